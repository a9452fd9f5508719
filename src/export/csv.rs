//! CSV extract rendering
//!
//! Builds the per-fiscal-year, per-fund tables that go into the backup
//! archive. Tables are byte payloads ready to drop into the archive: a
//! UTF-8 BOM prefix so spreadsheet tools detect the encoding, CRLF row
//! endings, and amounts rendered with exactly two decimal places.

use std::collections::BTreeMap;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{CashbookError, CashbookResult};
use crate::models::{fiscal_year_label, FundCategory, Transaction};

/// Column headers shared by every extract
pub const CSV_HEADERS: [&str; 6] = [
    "Date",
    "Doc No",
    "Description",
    "Income",
    "Expense",
    "Payer/Payee",
];

/// Inner table key for the combined all-funds extract
///
/// Sorts ahead of the `fund-` keys, so the combined table always comes
/// first within its fiscal year.
pub const COMBINED_TABLE: &str = "all";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Partition transactions into CSV tables keyed by fiscal year, then by fund
///
/// The outer map is keyed by fiscal-year label (rows with unparseable
/// dates land under the unlabeled key rather than being dropped). Each
/// year holds one combined table plus one table per fund that has rows.
/// Rows are sorted ascending by date; ties keep their input order.
pub fn fiscal_fund_tables(
    transactions: &[Transaction],
) -> CashbookResult<BTreeMap<String, BTreeMap<String, Vec<u8>>>> {
    let mut by_year: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for txn in transactions {
        by_year
            .entry(fiscal_year_label(&txn.date))
            .or_default()
            .push(txn);
    }

    let mut tables = BTreeMap::new();
    for (label, mut rows) in by_year {
        rows.sort_by(|a, b| a.date.cmp(&b.date));

        let mut year_tables = BTreeMap::new();
        year_tables.insert(COMBINED_TABLE.to_string(), render_table(&rows)?);

        for fund in FundCategory::ALL {
            let fund_rows: Vec<&Transaction> =
                rows.iter().copied().filter(|t| t.fund == fund).collect();
            if !fund_rows.is_empty() {
                year_tables.insert(fund.as_key().to_string(), render_table(&fund_rows)?);
            }
        }

        tables.insert(label, year_tables);
    }

    Ok(tables)
}

/// Render one table: BOM, header row, one row per transaction
fn render_table(rows: &[&Transaction]) -> CashbookResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(&CSV_HEADERS)?;
    for txn in rows {
        let income = txn.income.to_string();
        let expense = txn.expense.to_string();
        writer.write_record(&[
            txn.date.as_str(),
            txn.doc_no.as_deref().unwrap_or(""),
            txn.description.as_str(),
            income.as_str(),
            expense.as_str(),
            txn.counterparty().unwrap_or(""),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| CashbookError::Export(e.to_string()))
}
