//! Core data models for the cashbook engine
//!
//! This module contains the data structures that represent the bookkeeping
//! domain: money, funds, transactions, the school profile, audit entries,
//! and the full-state snapshot the backup pipeline moves around.

pub mod audit;
pub mod fiscal;
pub mod fund;
pub mod money;
pub mod settings;
pub mod snapshot;
pub mod transaction;

pub use audit::{AuditLogEntry, ACTION_RESTORE_BACKUP};
pub use fiscal::{fiscal_year, fiscal_year_label, UNLABELED_FISCAL_YEAR};
pub use fund::{FundCategory, ParseFundError};
pub use money::Money;
pub use settings::{BankAccount, SchoolSettings};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use transaction::{EntryKind, PayeeKind, Transaction};
