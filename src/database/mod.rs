pub mod db;

use crate::error::Result;
use rusqlite::Connection;

/// Key of the slot holding the serialized deck.
pub const DEFAULT_STORAGE_KEY: &str = "flashcardsData";

/// Durable storage for the serialized deck.
pub trait PersistenceGateway {
    /// Returns the stored document, or None when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>>;

    fn save(&mut self, serialized: &str) -> Result<()>;
}

/// Stores the deck in the SQLite `app_state` table.
pub struct SqliteGateway {
    conn: Connection,
    key: String,
}

impl SqliteGateway {
    pub fn new(conn: Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }
}

impl PersistenceGateway for SqliteGateway {
    fn load(&self) -> Result<Option<String>> {
        Ok(db::read_slot(&self.key, &self.conn)?)
    }

    fn save(&mut self, serialized: &str) -> Result<()> {
        db::write_slot(&self.key, serialized, &self.conn)?;
        tracing::debug!("Saved deck to slot '{}' ({} bytes)", self.key, serialized.len());
        Ok(())
    }
}

/// Keeps the deck in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    slot: Option<String>,
}

impl MemoryGateway {
    pub fn with_contents(serialized: impl Into<String>) -> Self {
        Self {
            slot: Some(serialized.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, serialized: &str) -> Result<()> {
        self.slot = Some(serialized.to_string());
        Ok(())
    }
}
