//! Transport-agnostic application state.
//!
//! `CoreState` is shared by every HTTP handler behind an `Arc`. The knowledge
//! base is immutable after load, so scans need no locking; account storage
//! opens a short-lived SQLite connection per operation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::db;
use crate::scanner::{DefaultScanner, KnowledgeBase, KnowledgeError};

pub struct CoreState {
    knowledge: Arc<KnowledgeBase>,
    scanner: DefaultScanner,
    /// Location of the account database.
    pub db_path: PathBuf,
}

impl CoreState {
    /// Wrap an already loaded knowledge base. The database at `db_path` is
    /// created and migrated eagerly so a bad path fails at startup.
    pub fn new(knowledge: KnowledgeBase, db_path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let db_path = db_path.into();
        db::open_database(&db_path)?;

        let knowledge = Arc::new(knowledge);
        Ok(Self {
            scanner: DefaultScanner::new(Arc::clone(&knowledge)),
            knowledge,
            db_path,
        })
    }

    /// Load the knowledge base named by `config` (bundled when unset) and
    /// prepare the account database.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let knowledge = match &config.knowledge_dir {
            Some(dir) => KnowledgeBase::load(dir)?,
            None => KnowledgeBase::bundled()?,
        };
        Self::new(knowledge, &config.db_path)
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn scanner(&self) -> &DefaultScanner {
        &self.scanner
    }

    /// Open a connection to the account database.
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        db::open_database(&self.db_path).map_err(CoreError::Database)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),
}
