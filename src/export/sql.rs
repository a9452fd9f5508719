//! SQL replay script rendering
//!
//! A second, schema-level restore path independent of the JSON document.
//! The script wipes the transactions table and reinserts every row inside
//! one transaction, so reapplying it is idempotent.

use chrono::SecondsFormat;

use crate::error::CashbookResult;
use crate::models::{Snapshot, Transaction};

const INSERT_COLUMNS: &str = "id, date, doc_no, description, fund, income, expense, \
                              payer, payee, payee_kind, bank_id, income_ref_id, extra_json";

/// Render the replay script for a snapshot
pub fn render(snapshot: &Snapshot) -> CashbookResult<String> {
    let school = snapshot
        .settings
        .as_ref()
        .map(|s| s.display_name())
        .unwrap_or("School");

    let mut script = String::new();
    script.push_str("-- Cashbook backup\n");
    script.push_str(&format!(
        "-- Generated: {}\n",
        snapshot.exported_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    script.push_str(&format!("-- School: {}\n\n", school));
    script.push_str("BEGIN TRANSACTION;\n\n");
    script.push_str("DELETE FROM transactions;\n\n");

    for txn in &snapshot.transactions {
        script.push_str(&insert_statement(txn)?);
        script.push('\n');
    }

    script.push_str("\nCOMMIT;\n");
    Ok(script)
}

/// One INSERT per transaction, all thirteen columns in schema order
fn insert_statement(txn: &Transaction) -> CashbookResult<String> {
    let extra_json = if txn.extra.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&txn.extra)?)
    };

    let values = [
        opt_integer(txn.id),
        text(&txn.date),
        opt_text(txn.doc_no.as_deref()),
        text(&txn.description),
        text(txn.fund.as_key()),
        txn.income.satang().to_string(),
        txn.expense.satang().to_string(),
        opt_text(txn.payer.as_deref()),
        opt_text(txn.payee.as_deref()),
        opt_text(txn.payee_kind.map(|kind| kind.as_key())),
        opt_text(txn.bank_id.as_deref()),
        opt_integer(txn.income_ref_id),
        opt_text(extra_json.as_deref()),
    ];

    Ok(format!(
        "INSERT INTO transactions ({}) VALUES ({});",
        INSERT_COLUMNS,
        values.join(", ")
    ))
}

/// SQL string literal with single quotes doubled
fn text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn opt_text(value: Option<&str>) -> String {
    value.map(text).unwrap_or_else(|| "NULL".to_string())
}

fn opt_integer(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "NULL".to_string())
}
