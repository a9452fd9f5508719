//! Full-state snapshot
//!
//! The transient aggregate an export reads out of storage. Serialized as
//! `backup.json`, it is also the authoritative restore input format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::audit::AuditLogEntry;
use super::fiscal::fiscal_year_label;
use super::settings::SchoolSettings;
use super::transaction::Transaction;

/// Version tag written into every snapshot document
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Everything one backup captures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Document format version
    pub version: String,

    /// When the snapshot was taken
    pub exported_at: DateTime<Utc>,

    /// School profile, if one has been saved
    pub settings: Option<SchoolSettings>,

    /// All transactions, ordered by date then id
    pub transactions: Vec<Transaction>,

    /// Recent audit entries (bounded; informational only, never restored)
    pub audit_logs: Vec<AuditLogEntry>,
}

impl Snapshot {
    /// Assemble a snapshot with the current version tag
    pub fn new(
        exported_at: DateTime<Utc>,
        settings: Option<SchoolSettings>,
        transactions: Vec<Transaction>,
        audit_logs: Vec<AuditLogEntry>,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            exported_at,
            settings,
            transactions,
            audit_logs,
        }
    }

    /// Distinct fiscal-year labels covered by the transactions, sorted
    ///
    /// The unlabeled bucket sorts after the numeric years.
    pub fn fiscal_years(&self) -> Vec<String> {
        let years: BTreeSet<String> = self
            .transactions
            .iter()
            .map(|txn| fiscal_year_label(&txn.date))
            .collect();
        years.into_iter().collect()
    }

    /// Number of transactions captured
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
