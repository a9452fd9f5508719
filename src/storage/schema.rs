//! SQLite schema for the cashbook store
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so opening an existing
//! database is a no-op.

use rusqlite::Connection;

use crate::error::CashbookResult;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    date          TEXT    NOT NULL,
    doc_no        TEXT,
    description   TEXT    NOT NULL DEFAULT '',
    fund          TEXT    NOT NULL,
    income        INTEGER NOT NULL DEFAULT 0,
    expense       INTEGER NOT NULL DEFAULT 0,
    payer         TEXT,
    payee         TEXT,
    payee_kind    TEXT,
    bank_id       TEXT,
    income_ref_id INTEGER,
    extra_json    TEXT
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

CREATE TABLE IF NOT EXISTS school_settings (
    id                   INTEGER PRIMARY KEY CHECK (id = 1),
    school_name_th       TEXT NOT NULL DEFAULT '',
    school_name_en       TEXT NOT NULL DEFAULT '',
    address              TEXT NOT NULL DEFAULT '',
    director_name        TEXT NOT NULL DEFAULT '',
    finance_officer_name TEXT NOT NULL DEFAULT '',
    auditor_name         TEXT NOT NULL DEFAULT '',
    affiliation          TEXT NOT NULL DEFAULT '',
    bank_accounts        TEXT NOT NULL DEFAULT '[]',
    extra_json           TEXT
);

CREATE TABLE IF NOT EXISTS audit_logs (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    user_name TEXT NOT NULL,
    action    TEXT NOT NULL,
    details   TEXT NOT NULL DEFAULT '',
    module    TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_audit_logs_timestamp ON audit_logs(timestamp);
";

/// Create all tables and indexes
pub fn init(conn: &Connection) -> CashbookResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();
        init(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"transactions".to_string()));
        assert!(tables.contains(&"school_settings".to_string()));
        assert!(tables.contains(&"audit_logs".to_string()));
    }
}
