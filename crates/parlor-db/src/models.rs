//! Record types: one JSON object per line in the backing files.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::store::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Older files name this field `password`.
    #[serde(alias = "password")]
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub username: String,
    pub text: String,
    pub timestamp: i64,
}

impl Record for UserRecord {
    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.username)
    }
}

impl Record for MessageRecord {
    fn key(&self) -> Cow<'_, str> {
        Cow::Owned(self.id.to_string())
    }
}
