//! Transaction model
//!
//! Represents one cashbook row: an income or expense against a fund, with
//! the optional document number, counterparty, bank link, and tax link the
//! ledger tracks. Unknown JSON fields are preserved in an extension bag so
//! a backup written by a newer dashboard survives a round trip unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::fund::FundCategory;
use super::money::Money;

/// Kind of payee on the expense side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayeeKind {
    /// A natural person
    Individual,
    /// A juristic person (company, agency, shop)
    Organization,
}

impl PayeeKind {
    /// The wire string, also stored in the SQLite column
    pub const fn as_key(&self) -> &'static str {
        match self {
            PayeeKind::Individual => "individual",
            PayeeKind::Organization => "organization",
        }
    }
}

impl fmt::Display for PayeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl FromStr for PayeeKind {
    type Err = ParsePayeeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(PayeeKind::Individual),
            "organization" => Ok(PayeeKind::Organization),
            other => Err(ParsePayeeKindError(other.to_string())),
        }
    }
}

/// Error type for unknown payee kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePayeeKindError(String);

impl fmt::Display for ParsePayeeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown payee kind: {}", self.0)
    }
}

impl std::error::Error for ParsePayeeKindError {}

/// A cashbook transaction
///
/// Income and expense amounts are both always present; exactly one of them
/// is non-zero in well-formed rows. The `extra` map holds every JSON field
/// this version does not model, flattened back in place on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Row identity, assigned by storage; absent on rows not yet persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Transaction date as a raw `YYYY-MM-DD` string
    ///
    /// Kept as text so a malformed date routes the row to the unlabeled
    /// fiscal-year bucket instead of being rejected or dropped.
    pub date: String,

    /// Receipt or voucher number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_no: Option<String>,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// The fund this row books against
    pub fund: FundCategory,

    /// Amount received
    #[serde(default)]
    pub income: Money,

    /// Amount disbursed
    #[serde(default)]
    pub expense: Money,

    /// Who paid (income side)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,

    /// Who was paid (expense side)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,

    /// Whether the payee is a person or an organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_kind: Option<PayeeKind>,

    /// Bank account this row settles through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,

    /// For withholding-tax expenses, the id of the income row they offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_ref_id: Option<i64>,

    /// Extension bag: fields from newer schema versions, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Tagged view of a transaction's booked side
///
/// Callers branch on this instead of inspecting the raw amount pair.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    Income {
        amount: Money,
        payer: Option<String>,
    },
    Expense {
        amount: Money,
        payee: Option<String>,
        payee_kind: Option<PayeeKind>,
        income_ref_id: Option<i64>,
    },
}

impl Transaction {
    /// Create an income row
    pub fn income(date: impl Into<String>, fund: FundCategory, amount: Money) -> Self {
        Self {
            id: None,
            date: date.into(),
            doc_no: None,
            description: String::new(),
            fund,
            income: amount,
            expense: Money::zero(),
            payer: None,
            payee: None,
            payee_kind: None,
            bank_id: None,
            income_ref_id: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Create an expense row
    pub fn expense(date: impl Into<String>, fund: FundCategory, amount: Money) -> Self {
        let mut txn = Self::income(date, fund, Money::zero());
        txn.expense = amount;
        txn
    }

    /// Check if this row books an income
    pub fn is_income(&self) -> bool {
        self.income.is_positive()
    }

    /// Check if this row books an expense
    pub fn is_expense(&self) -> bool {
        !self.is_income() && self.expense.is_positive()
    }

    /// The booked side as a tagged value, or `None` when both amounts are zero
    ///
    /// If both amounts are set the income side wins, matching how the
    /// exports pick the counterparty column.
    pub fn entry(&self) -> Option<EntryKind> {
        if self.income.is_positive() {
            Some(EntryKind::Income {
                amount: self.income,
                payer: self.payer.clone(),
            })
        } else if self.expense.is_positive() {
            Some(EntryKind::Expense {
                amount: self.expense,
                payee: self.payee.clone(),
                payee_kind: self.payee_kind,
                income_ref_id: self.income_ref_id,
            })
        } else {
            None
        }
    }

    /// The counterparty shown in CSV extracts: payer for income, payee for expense
    pub fn counterparty(&self) -> Option<&str> {
        if self.income.is_positive() {
            self.payer.as_deref()
        } else if self.expense.is_positive() {
            self.payee.as_deref()
        } else {
            None
        }
    }

    /// Validate the row
    ///
    /// Amounts must be non-negative; the side split is otherwise free-form.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.income.is_negative() {
            return Err(TransactionValidationError::NegativeAmount {
                field: "income",
                amount: self.income,
            });
        }
        if self.expense.is_negative() {
            return Err(TransactionValidationError::NegativeAmount {
                field: "expense",
                amount: self.expense,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = if self.income.is_positive() {
            self.income
        } else {
            self.expense
        };
        write!(f, "{} {} {}", self.date, self.fund.as_key(), amount)
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount { field: &'static str, amount: Money },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount { field, amount } => {
                write!(f, "Amount '{}' must not be negative (got {})", field, amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
