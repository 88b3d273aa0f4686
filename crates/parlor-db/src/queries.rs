use chrono::Utc;
use tracing::debug;

use crate::Database;
use crate::error::{Result, StoreError};
use crate::models::{MessageRecord, UserRecord};
use crate::password::hash_password;

impl Database {
    // -- Users --

    /// Exact, case-sensitive username match.
    pub fn user_exists(&self, username: &str) -> Result<bool> {
        Ok(self.users.find_by_key(username)?.is_some())
    }

    /// Append a user record without checking for an existing one.
    /// Prefer [`Database::register_user`].
    pub fn add_user(&self, username: &str, password: &str) -> Result<UserRecord> {
        let user = new_user(username, password);
        self.users.append(&user)?;
        Ok(user)
    }

    /// Atomically check uniqueness and create the user.
    /// Returns `false` when the username is already taken.
    pub fn register_user(&self, username: &str, password: &str) -> Result<bool> {
        let created = self.users.insert_if_absent(&new_user(username, password))?;
        debug!(username, created, "register_user");
        Ok(created)
    }

    pub fn verify_login(&self, username: &str, password: &str) -> Result<bool> {
        let digest = hash_password(password);
        for user in self.users.scan()? {
            let user = user?;
            if user.username == username && user.password_hash == digest {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // -- Messages --

    /// Store a message from `username`. Text is trimmed and must not be empty.
    pub fn add_message(&self, username: &str, text: &str) -> Result<MessageRecord> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyMessage);
        }

        let message = MessageRecord {
            id: self.ids.next_id(),
            username: username.to_string(),
            text: text.to_string(),
            timestamp: Utc::now().timestamp(),
        };
        self.messages.append(&message)?;
        Ok(message)
    }

    /// Messages with `timestamp > since`, oldest first. Messages sharing a
    /// timestamp keep their file order.
    pub fn get_messages(&self, since: i64) -> Result<Vec<MessageRecord>> {
        let mut messages = Vec::new();
        for message in self.messages.scan()? {
            let message = message?;
            if message.timestamp > since {
                messages.push(message);
            }
        }

        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }
}

fn new_user(username: &str, password: &str) -> UserRecord {
    UserRecord {
        username: username.to_string(),
        password_hash: hash_password(password),
        created_at: Utc::now().timestamp(),
    }
}
