//! Fund categories for the school ledger
//!
//! Every transaction is tagged with exactly one fund from this closed set.
//! The kebab-case key is the wire format (JSON, SQLite column, CSV file stem).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of ledger funds a school books against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FundCategory {
    /// Per-head subsidy grant
    #[serde(rename = "fund-subsidy")]
    Subsidy,
    /// Textbooks (15-year free education program)
    #[serde(rename = "fund-15y-book")]
    Books,
    /// Learning supplies (15-year program)
    #[serde(rename = "fund-15y-supply")]
    Supplies,
    /// Student uniforms (15-year program)
    #[serde(rename = "fund-15y-uniform")]
    Uniforms,
    /// Student development activities (15-year program)
    #[serde(rename = "fund-15y-activity")]
    Activities,
    /// Support for underprivileged students
    #[serde(rename = "fund-poor")]
    PoorStudents,
    /// State revenue remittances
    #[serde(rename = "fund-state")]
    StateRevenue,
    /// School lunch program
    #[serde(rename = "fund-lunch")]
    Lunch,
    /// Equitable Education Fund grants
    #[serde(rename = "fund-eef")]
    Eef,
    /// School-generated income
    #[serde(rename = "fund-school-income")]
    SchoolIncome,
    /// Withholding tax holding account
    #[serde(rename = "fund-tax")]
    Tax,
}

impl FundCategory {
    /// All funds, in ledger order
    pub const ALL: [FundCategory; 11] = [
        FundCategory::Subsidy,
        FundCategory::Books,
        FundCategory::Supplies,
        FundCategory::Uniforms,
        FundCategory::Activities,
        FundCategory::PoorStudents,
        FundCategory::StateRevenue,
        FundCategory::Lunch,
        FundCategory::Eef,
        FundCategory::SchoolIncome,
        FundCategory::Tax,
    ];

    /// The canonical wire key, also used as the CSV file stem
    pub const fn as_key(&self) -> &'static str {
        match self {
            FundCategory::Subsidy => "fund-subsidy",
            FundCategory::Books => "fund-15y-book",
            FundCategory::Supplies => "fund-15y-supply",
            FundCategory::Uniforms => "fund-15y-uniform",
            FundCategory::Activities => "fund-15y-activity",
            FundCategory::PoorStudents => "fund-poor",
            FundCategory::StateRevenue => "fund-state",
            FundCategory::Lunch => "fund-lunch",
            FundCategory::Eef => "fund-eef",
            FundCategory::SchoolIncome => "fund-school-income",
            FundCategory::Tax => "fund-tax",
        }
    }

    /// Human-readable fund name
    pub const fn label(&self) -> &'static str {
        match self {
            FundCategory::Subsidy => "Per-head subsidy",
            FundCategory::Books => "Textbooks",
            FundCategory::Supplies => "Learning supplies",
            FundCategory::Uniforms => "Student uniforms",
            FundCategory::Activities => "Student development activities",
            FundCategory::PoorStudents => "Underprivileged student support",
            FundCategory::StateRevenue => "State revenue",
            FundCategory::Lunch => "School lunch",
            FundCategory::Eef => "Equitable Education Fund",
            FundCategory::SchoolIncome => "School income",
            FundCategory::Tax => "Withholding tax",
        }
    }
}

impl fmt::Display for FundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl FromStr for FundCategory {
    type Err = ParseFundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FundCategory::ALL
            .iter()
            .find(|fund| fund.as_key() == s)
            .copied()
            .ok_or_else(|| ParseFundError(s.to_string()))
    }
}

/// Error type for unknown fund keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFundError(String);

impl fmt::Display for ParseFundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown fund category: {}", self.0)
    }
}

impl std::error::Error for ParseFundError {}
