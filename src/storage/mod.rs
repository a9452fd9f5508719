//! SQLite persistence layer
//!
//! `Storage` owns the database connection; the per-table stores borrow it
//! for the duration of a call. All tables are created on open.

pub mod audit_logs;
pub mod schema;
pub mod settings;
pub mod transactions;

use std::path::Path;

use rusqlite::Connection;

use crate::error::CashbookResult;

pub use audit_logs::{AuditLogStore, RETENTION_DAYS};
pub use settings::SettingsStore;
pub use transactions::{TransactionStore, MAX_ROWS_PER_BATCH};

/// Handle to the cashbook database
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> CashbookResult<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database, used by tests
    pub fn open_in_memory() -> CashbookResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> CashbookResult<Self> {
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    /// Store handle for the transactions table
    pub fn transactions(&self) -> TransactionStore<'_> {
        TransactionStore::new(&self.conn)
    }

    /// Store handle for the school settings row
    pub fn settings(&self) -> SettingsStore<'_> {
        SettingsStore::new(&self.conn)
    }

    /// Store handle for the audit log table
    pub fn audit_logs(&self) -> AuditLogStore<'_> {
        AuditLogStore::new(&self.conn)
    }
}
