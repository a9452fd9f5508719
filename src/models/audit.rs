//! Audit log entry model
//!
//! One entry records one administrative action. The restore path writes
//! exactly one of these after the data has been replaced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action tag written by a completed restore
pub const ACTION_RESTORE_BACKUP: &str = "RESTORE_BACKUP";

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Row identity, assigned by storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// When the action happened (UTC)
    pub timestamp: DateTime<Utc>,

    /// Who performed the action
    pub user: String,

    /// Machine-readable action tag
    pub action: String,

    /// Human-readable summary
    #[serde(default)]
    pub details: String,

    /// Dashboard module the action belongs to
    #[serde(default)]
    pub module: String,
}

impl AuditLogEntry {
    /// Create an entry timestamped now
    pub fn new(
        user: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            timestamp: Utc::now(),
            user: user.into(),
            action: action.into(),
            details: details.into(),
            module: module.into(),
        }
    }

    /// The entry a completed restore appends
    pub fn restore_completed(restored: usize, settings_restored: bool) -> Self {
        let details = if settings_restored {
            format!("Restored {} transactions and school settings from backup", restored)
        } else {
            format!("Restored {} transactions from backup", restored)
        };
        Self::new("system", ACTION_RESTORE_BACKUP, details, "backup")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_entry_shape() {
        let entry = AuditLogEntry::restore_completed(120, false);
        assert_eq!(entry.action, ACTION_RESTORE_BACKUP);
        assert_eq!(entry.user, "system");
        assert_eq!(entry.module, "backup");
        assert!(entry.details.contains("120 transactions"));
        assert!(entry.id.is_none());
    }

    #[test]
    fn test_restore_entry_mentions_settings() {
        let entry = AuditLogEntry::restore_completed(3, true);
        assert!(entry.details.contains("school settings"));
    }

    #[test]
    fn test_serialization_skips_missing_id() {
        let entry = AuditLogEntry::new("admin", "EXPORT", "", "backup");
        let value = serde_json::to_value(&entry).unwrap();
        assert!(!value.as_object().unwrap().contains_key("id"));
        assert_eq!(value["user"], "admin");
    }
}
