pub mod error;
pub mod ids;
pub mod models;
pub mod password;
pub mod queries;
pub mod store;

use std::path::Path;

use tracing::{info, warn};

pub use error::{Result, StoreError};
use ids::IdGenerator;
use models::{MessageRecord, UserRecord};
use store::{JsonLinesStore, Repository};

pub const USERS_FILE: &str = "users.txt";
pub const MESSAGES_FILE: &str = "messages.txt";

/// Users and messages, each behind its own repository.
pub struct Database {
    users: Box<dyn Repository<UserRecord>>,
    messages: Box<dyn Repository<MessageRecord>>,
    ids: IdGenerator,
}

impl Database {
    /// Open (creating if absent) `users.txt` and `messages.txt` under `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let users = JsonLinesStore::open(dir.join(USERS_FILE))?;
        let messages = JsonLinesStore::open(dir.join(MESSAGES_FILE))?;

        info!("Record stores opened in {}", dir.display());
        Ok(Self::with_repositories(Box::new(users), Box::new(messages)))
    }

    /// Build a database over arbitrary repositories.
    pub fn with_repositories(
        users: Box<dyn Repository<UserRecord>>,
        messages: Box<dyn Repository<MessageRecord>>,
    ) -> Self {
        let last_id = match latest_message_id(&*messages) {
            Ok(id) => id,
            Err(e) => {
                warn!("Could not seed message ids from existing records: {}", e);
                0
            }
        };

        Self {
            users,
            messages,
            ids: IdGenerator::starting_after(last_id),
        }
    }
}

fn latest_message_id(messages: &dyn Repository<MessageRecord>) -> Result<i64> {
    let mut last = 0;
    for record in messages.scan()? {
        last = last.max(record?.id);
    }
    Ok(last)
}
