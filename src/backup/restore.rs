//! Backup restoration
//!
//! Validates an uploaded backup document, replaces the transaction set
//! in bounded batches, upserts the settings singleton when supplied, and
//! appends one audit entry. Validation failures happen before anything is
//! written; a failure after the wipe leaves the committed batches in
//! place, and re-running the same document is safe because the insert is
//! an upsert by id.

use serde::Deserialize;
use tracing::info;

use crate::error::{CashbookError, CashbookResult};
use crate::models::{AuditLogEntry, SchoolSettings, Transaction};
use crate::storage::{Storage, MAX_ROWS_PER_BATCH};

/// The accepted restore input
///
/// `transactions` is required (may be empty); `settings` is optional.
/// Unknown top-level keys, such as the version tag and audit log a full
/// backup document carries, are ignored.
#[derive(Debug, Deserialize)]
pub struct RestoreDocument {
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub settings: Option<SchoolSettings>,
}

/// What a completed restore reports back
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RestoreSummary {
    /// Transactions written
    pub restored: usize,
    /// Whether a settings object was present and applied
    pub settings_restored: bool,
}

impl RestoreSummary {
    /// One-line description for the audit trail and API responses
    pub fn summary(&self) -> String {
        if self.settings_restored {
            format!("Restored {} transactions and school settings", self.restored)
        } else {
            format!("Restored {} transactions", self.restored)
        }
    }
}

/// Drives the restore flow against one storage handle
pub struct RestoreCoordinator<'a> {
    storage: &'a Storage,
}

impl<'a> RestoreCoordinator<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse raw upload bytes and restore
    ///
    /// Any parse failure, including a missing or non-list `transactions`
    /// key, is a validation error; nothing has been written at that point.
    pub fn restore_from_slice(&self, bytes: &[u8]) -> CashbookResult<RestoreSummary> {
        let document: RestoreDocument = serde_json::from_slice(bytes)
            .map_err(|e| CashbookError::Validation(format!("Invalid backup document: {}", e)))?;
        self.restore(&document)
    }

    /// Restore a parsed document
    pub fn restore(&self, document: &RestoreDocument) -> CashbookResult<RestoreSummary> {
        for (index, txn) in document.transactions.iter().enumerate() {
            txn.validate().map_err(|err| {
                CashbookError::Validation(format!("Transaction {}: {}", index + 1, err))
            })?;
        }

        let transactions = self.storage.transactions();
        transactions.delete_all()?;

        let mut restored = 0;
        for chunk in document.transactions.chunks(MAX_ROWS_PER_BATCH) {
            match transactions.batch_upsert(chunk) {
                Ok(count) => restored += count,
                Err(err) => {
                    return Err(CashbookError::PartialRestore {
                        committed: restored,
                        message: err.to_string(),
                    });
                }
            }
        }

        let settings_restored = match &document.settings {
            Some(settings) => {
                self.storage.settings().replace(settings)?;
                true
            }
            None => false,
        };

        let entry = AuditLogEntry::restore_completed(restored, settings_restored);
        self.storage.audit_logs().append(&entry)?;

        info!(restored, settings_restored, "restore completed");
        Ok(RestoreSummary {
            restored,
            settings_restored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::backup::manager::BackupManager;
    use crate::export::json;
    use crate::models::{FundCategory, Money, ACTION_RESTORE_BACKUP};

    fn seeded_storage() -> Storage {
        let storage = Storage::open_in_memory().unwrap();

        let mut income = Transaction::income("2024-11-01", FundCategory::Lunch, Money::from_baht(500));
        income.payer = Some("District office".to_string());
        income
            .extra
            .insert("attachment".to_string(), serde_json::json!("receipt.pdf"));
        let expense = Transaction::expense("2024-03-15", FundCategory::Lunch, Money::from_baht(200));

        storage.transactions().batch_upsert(&[income, expense]).unwrap();
        storage
    }

    #[test]
    fn test_round_trip_restores_identical_set() {
        let storage = seeded_storage();
        let snapshot = BackupManager::new(&storage)
            .collect_snapshot(Utc::now())
            .unwrap();
        let document = json::render(&snapshot).unwrap();

        // Into a fresh database
        let target = Storage::open_in_memory().unwrap();
        let summary = RestoreCoordinator::new(&target)
            .restore_from_slice(&document)
            .unwrap();
        assert_eq!(summary.restored, 2);
        assert!(!summary.settings_restored);

        let restored = target.transactions().query_all().unwrap();
        assert_eq!(restored, snapshot.transactions);
        // Extension bag survived the trip
        assert_eq!(
            restored[1].extra["attachment"],
            serde_json::json!("receipt.pdf")
        );
    }

    #[test]
    fn test_restore_is_idempotent() {
        let storage = seeded_storage();
        let snapshot = BackupManager::new(&storage)
            .collect_snapshot(Utc::now())
            .unwrap();
        let document = json::render(&snapshot).unwrap();

        let coordinator = RestoreCoordinator::new(&storage);
        coordinator.restore_from_slice(&document).unwrap();
        let after_first = storage.transactions().query_all().unwrap();

        coordinator.restore_from_slice(&document).unwrap();
        let after_second = storage.transactions().query_all().unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(after_second.len(), 2);
    }

    #[test]
    fn test_empty_transaction_list_clears_everything() {
        let storage = seeded_storage();
        let summary = RestoreCoordinator::new(&storage)
            .restore_from_slice(br#"{"transactions": []}"#)
            .unwrap();

        assert_eq!(summary.restored, 0);
        assert_eq!(storage.transactions().count().unwrap(), 0);
    }

    #[test]
    fn test_missing_transactions_key_fails_without_mutation() {
        let storage = seeded_storage();
        let mut settings = SchoolSettings::default();
        settings.school_name_en = "Riverside School".to_string();
        storage.settings().replace(&settings).unwrap();

        let err = RestoreCoordinator::new(&storage)
            .restore_from_slice(br#"{"settings": {"school_name_en": "Overwritten"}}"#)
            .unwrap_err();
        assert!(err.is_validation());

        // Neither table was touched
        assert_eq!(storage.transactions().count().unwrap(), 2);
        let kept = storage.settings().get().unwrap().unwrap();
        assert_eq!(kept.school_name_en, "Riverside School");
        assert_eq!(storage.audit_logs().count().unwrap(), 0);
    }

    #[test]
    fn test_transactions_must_be_a_list() {
        let storage = seeded_storage();
        let err = RestoreCoordinator::new(&storage)
            .restore_from_slice(br#"{"transactions": {"id": 1}}"#)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.transactions().count().unwrap(), 2);
    }

    #[test]
    fn test_unknown_top_level_keys_ignored() {
        let storage = Storage::open_in_memory().unwrap();
        let document = br#"{
            "version": "1.0",
            "exported_at": "2024-12-31T12:00:00Z",
            "audit_logs": [{"timestamp": "2024-12-30T08:00:00Z", "user": "admin", "action": "LOGIN"}],
            "transactions": [
                {"date": "2024-11-01", "fund": "fund-lunch", "income": 50000, "expense": 0}
            ]
        }"#;

        let summary = RestoreCoordinator::new(&storage)
            .restore_from_slice(document)
            .unwrap();
        assert_eq!(summary.restored, 1);
        // Audit entries from the document are never replayed
        assert_eq!(storage.audit_logs().count().unwrap(), 1);
    }

    #[test]
    fn test_negative_amount_rejected_before_wipe() {
        let storage = seeded_storage();
        let document = br#"{
            "transactions": [
                {"date": "2024-11-01", "fund": "fund-lunch", "income": -1, "expense": 0}
            ]
        }"#;

        let err = RestoreCoordinator::new(&storage)
            .restore_from_slice(document)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Transaction 1"));
        assert_eq!(storage.transactions().count().unwrap(), 2);
    }

    #[test]
    fn test_large_document_restored_in_batches() {
        let storage = Storage::open_in_memory().unwrap();
        let rows: Vec<Transaction> = (0..120)
            .map(|i| {
                let mut txn = Transaction::income(
                    format!("2024-11-{:02}", (i % 28) + 1),
                    FundCategory::Subsidy,
                    Money::from_baht(10),
                );
                txn.id = Some(i + 1);
                txn
            })
            .collect();
        let document = RestoreDocument {
            transactions: rows,
            settings: None,
        };

        let summary = RestoreCoordinator::new(&storage).restore(&document).unwrap();
        assert_eq!(summary.restored, 120);
        assert_eq!(storage.transactions().count().unwrap(), 120);
    }

    #[test]
    fn test_settings_applied_and_audited() {
        let storage = seeded_storage();
        let document = br#"{
            "transactions": [
                {"date": "2024-11-01", "fund": "fund-lunch", "income": 50000, "expense": 0}
            ],
            "settings": {
                "school_name_th": "",
                "school_name_en": "Riverside School",
                "bank_accounts": [
                    {"id": "acc-1", "name": "Lunch account", "fund_types": ["fund-lunch"]}
                ]
            }
        }"#;

        let summary = RestoreCoordinator::new(&storage)
            .restore_from_slice(document)
            .unwrap();
        assert!(summary.settings_restored);
        assert_eq!(summary.summary(), "Restored 1 transactions and school settings");

        let settings = storage.settings().get().unwrap().unwrap();
        assert_eq!(settings.school_name_en, "Riverside School");
        assert_eq!(settings.bank_accounts.len(), 1);

        let entries = storage
            .audit_logs()
            .recent(Utc::now() - chrono::Duration::days(1), 10)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, ACTION_RESTORE_BACKUP);
        assert!(entries[0].details.contains("school settings"));
    }
}
