//! Backup and restore engine for a school cashbook dashboard
//!
//! This library is the data-safety core behind the dashboard's settings
//! page: it turns the full ledger into a dated, self-describing ZIP
//! archive and ships it out through a delivery channel, and it replaces
//! the ledger from an uploaded archive document. The surrounding CRUD,
//! reporting, and HTTP layers live elsewhere and talk to this crate
//! through `Storage` and the `DistributionSink` trait.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, settings, audit entries, snapshots)
//! - `storage`: SQLite persistence layer
//! - `export`: Snapshot renderers (JSON document, SQL replay script, CSV extracts)
//! - `backup`: Archive assembly, delivery, and restore coordination
//!
//! # Example
//!
//! ```rust,ignore
//! use cashbook_core::backup::BackupManager;
//! use cashbook_core::storage::Storage;
//!
//! let storage = Storage::open("cashbook.db")?;
//! let report = BackupManager::new(&storage).export(&sink)?;
//! ```

pub mod backup;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;

pub use error::{CashbookError, CashbookResult};
