//! Transaction store
//!
//! Rows live in the `transactions` table. The restore path relies on
//! `batch_upsert` being a single statement per call: SQLite applies it
//! atomically, and `INSERT OR REPLACE` keyed on the row id makes re-running
//! the same batch a no-op.

use rusqlite::types::{Type, Value};
use rusqlite::{params_from_iter, Connection, Row};

use crate::error::{CashbookError, CashbookResult};
use crate::models::{FundCategory, Money, PayeeKind, Transaction};

/// Upper bound on rows per `batch_upsert` call
///
/// 13 bound parameters per row keeps one statement at 650 variables, under
/// SQLite's historical 999-variable ceiling.
pub const MAX_ROWS_PER_BATCH: usize = 50;

const COLUMNS: &str = "id, date, doc_no, description, fund, income, expense, \
                       payer, payee, payee_kind, bank_id, income_ref_id, extra_json";
const PARAMS_PER_ROW: usize = 13;

/// Repository handle for the `transactions` table
pub struct TransactionStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> TransactionStore<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// All rows, ordered by date then id
    pub fn query_all(&self) -> CashbookResult<Vec<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions ORDER BY date ASC, id ASC",
            COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], row_to_transaction)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Delete every row, returning how many were removed
    pub fn delete_all(&self) -> CashbookResult<usize> {
        let removed = self.conn.execute("DELETE FROM transactions", [])?;
        Ok(removed)
    }

    /// Insert-or-replace up to [`MAX_ROWS_PER_BATCH`] rows in one statement
    ///
    /// Rows with an id replace any existing row with that id; rows without
    /// one are inserted fresh. Returns the number of rows written.
    pub fn batch_upsert(&self, rows: &[Transaction]) -> CashbookResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        if rows.len() > MAX_ROWS_PER_BATCH {
            return Err(CashbookError::Storage(format!(
                "Batch of {} rows exceeds the {}-row limit",
                rows.len(),
                MAX_ROWS_PER_BATCH
            )));
        }

        let placeholders = vec!["(?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"; rows.len()].join(", ");
        let sql = format!(
            "INSERT OR REPLACE INTO transactions ({}) VALUES {}",
            COLUMNS, placeholders
        );

        let mut values: Vec<Value> = Vec::with_capacity(rows.len() * PARAMS_PER_ROW);
        for row in rows {
            values.push(opt_integer(row.id));
            values.push(Value::Text(row.date.clone()));
            values.push(opt_text(row.doc_no.as_deref()));
            values.push(Value::Text(row.description.clone()));
            values.push(Value::Text(row.fund.as_key().to_string()));
            values.push(Value::Integer(row.income.satang()));
            values.push(Value::Integer(row.expense.satang()));
            values.push(opt_text(row.payer.as_deref()));
            values.push(opt_text(row.payee.as_deref()));
            values.push(opt_text(row.payee_kind.map(|kind| kind.as_key())));
            values.push(opt_text(row.bank_id.as_deref()));
            values.push(opt_integer(row.income_ref_id));
            values.push(extra_to_value(&row.extra)?);
        }

        let written = self.conn.execute(&sql, params_from_iter(values))?;
        Ok(written)
    }

    /// Number of rows currently stored
    pub fn count(&self) -> CashbookResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn opt_text(value: Option<&str>) -> Value {
    match value {
        Some(text) => Value::Text(text.to_string()),
        None => Value::Null,
    }
}

fn opt_integer(value: Option<i64>) -> Value {
    match value {
        Some(n) => Value::Integer(n),
        None => Value::Null,
    }
}

fn extra_to_value(extra: &serde_json::Map<String, serde_json::Value>) -> CashbookResult<Value> {
    if extra.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Text(serde_json::to_string(extra)?))
    }
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let fund_key: String = row.get(4)?;
    let fund = fund_key
        .parse::<FundCategory>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(err)))?;

    let payee_kind: Option<String> = row.get(9)?;
    let payee_kind = match payee_kind.as_deref() {
        Some(key) => Some(key.parse::<PayeeKind>().map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(err))
        })?),
        None => None,
    };

    let extra_json: Option<String> = row.get(12)?;
    let extra = match extra_json {
        Some(json) => serde_json::from_str(&json).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(err))
        })?,
        None => serde_json::Map::new(),
    };

    Ok(Transaction {
        id: Some(row.get(0)?),
        date: row.get(1)?,
        doc_no: row.get(2)?,
        description: row.get(3)?,
        fund,
        income: Money::from_satang(row.get(5)?),
        expense: Money::from_satang(row.get(6)?),
        payer: row.get(7)?,
        payee: row.get(8)?,
        payee_kind,
        bank_id: row.get(10)?,
        income_ref_id: row.get(11)?,
        extra,
    })
}
