//! Backup and restore engine
//!
//! # Architecture
//!
//! Export side, leaf-first:
//!
//! - `crc32`: table-driven CRC-32, the checksum the archive embeds
//! - `zip`: stored-method ZIP assembly from named byte payloads
//! - `sink`: the delivery seam the finished archive leaves through
//! - `manager::BackupManager`: reads storage, renders payloads, builds
//!   the dated archive, hands it to the sink
//!
//! Restore side:
//!
//! - `restore::RestoreCoordinator`: validates the uploaded document,
//!   replaces the transaction set in bounded batches, upserts settings,
//!   appends one audit entry
//!
//! # Archive layout
//!
//! One top-level dated folder:
//!
//! - `backup-<YYYYMMDD>/README.txt`
//! - `backup-<YYYYMMDD>/backup.json` (structured document, restore input)
//! - `backup-<YYYYMMDD>/backup.sql` (replay script)
//! - `backup-<YYYYMMDD>/csv/fiscal-<label>/<fund-or-all>.csv`
//!
//! # Example
//!
//! ```rust,ignore
//! use cashbook_core::backup::{BackupManager, RestoreCoordinator};
//! use cashbook_core::storage::Storage;
//!
//! let storage = Storage::open("cashbook.db")?;
//!
//! // Export through whatever sink the API layer provides
//! let report = BackupManager::new(&storage).export(&sink)?;
//! println!("{} ({} files)", report.filename, report.file_count);
//!
//! // Later, restore an uploaded document
//! let summary = RestoreCoordinator::new(&storage).restore_from_slice(&upload)?;
//! println!("{}", summary.summary());
//! ```

pub mod crc32;
mod manager;
mod restore;
mod sink;
pub mod zip;

pub use crc32::crc32;
pub use manager::{BackupArchive, BackupManager, ExportReport, ARCHIVE_PREFIX, AUDIT_RECENT_LIMIT};
pub use restore::{RestoreCoordinator, RestoreDocument, RestoreSummary};
pub use sink::{DeliveryStatus, DistributionSink};
pub use zip::{build_archive, ArchiveEntry};
