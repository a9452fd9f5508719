//! School settings model
//!
//! The single school profile record: names, responsible officers, and the
//! bank accounts funds settle through. Stored as one row and replaced
//! wholesale on restore.

use serde::{Deserialize, Serialize};

use super::fund::FundCategory;

/// A bank account the school books funds through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Caller-assigned identifier, referenced by `Transaction::bank_id`
    pub id: String,

    /// Display name of the account
    pub name: String,

    /// Bank brand name
    #[serde(default)]
    pub bank_name: String,

    /// Account number as printed on the passbook
    #[serde(default)]
    pub account_no: String,

    /// Funds allowed to settle through this account
    #[serde(default)]
    pub fund_types: Vec<FundCategory>,

    /// Display color used by the dashboard
    #[serde(default)]
    pub color: String,
}

/// The school profile singleton
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolSettings {
    /// School name in Thai
    #[serde(default)]
    pub school_name_th: String,

    /// School name in English
    #[serde(default)]
    pub school_name_en: String,

    /// Postal address
    #[serde(default)]
    pub address: String,

    /// Director's name, as signed on reports
    #[serde(default)]
    pub director_name: String,

    /// Finance officer's name
    #[serde(default)]
    pub finance_officer_name: String,

    /// Auditor's name
    #[serde(default)]
    pub auditor_name: String,

    /// Supervising authority (district or department)
    #[serde(default)]
    pub affiliation: String,

    /// Bank accounts, embedded in the settings record
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,

    /// Extension bag for fields from newer schema versions
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SchoolSettings {
    /// Best display name: Thai name, then English name, then a placeholder
    pub fn display_name(&self) -> &str {
        if !self.school_name_th.is_empty() {
            &self.school_name_th
        } else if !self.school_name_en.is_empty() {
            &self.school_name_en
        } else {
            "School"
        }
    }
}
