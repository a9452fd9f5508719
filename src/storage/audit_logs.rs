//! Audit log store
//!
//! Timestamps are stored as fixed-width RFC3339 UTC text so lexicographic
//! comparison in SQL matches time order. Entries older than the retention
//! window are pruned on every append.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::error::CashbookResult;
use crate::models::AuditLogEntry;

/// How long entries are kept
pub const RETENTION_DAYS: i64 = 365;

/// Repository handle for the `audit_logs` table
pub struct AuditLogStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> AuditLogStore<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Append one entry and prune anything past retention
    ///
    /// Returns the rowid of the new entry.
    pub fn append(&self, entry: &AuditLogEntry) -> CashbookResult<i64> {
        self.conn.execute(
            "INSERT INTO audit_logs (timestamp, user_name, action, details, module) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                format_timestamp(entry.timestamp),
                entry.user,
                entry.action,
                entry.details,
                entry.module,
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        let cutoff = entry.timestamp - Duration::days(RETENTION_DAYS);
        self.conn.execute(
            "DELETE FROM audit_logs WHERE timestamp < ?1",
            params![format_timestamp(cutoff)],
        )?;

        Ok(id)
    }

    /// Entries at or after `cutoff`, newest first, capped at `limit`
    pub fn recent(&self, cutoff: DateTime<Utc>, limit: usize) -> CashbookResult<Vec<AuditLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, user_name, action, details, module \
             FROM audit_logs WHERE timestamp >= ?1 \
             ORDER BY timestamp DESC LIMIT ?2",
        )?;
        let entries = stmt
            .query_map(
                params![format_timestamp(cutoff), limit as i64],
                row_to_entry,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Number of entries currently stored
    pub fn count(&self) -> CashbookResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM audit_logs", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<AuditLogEntry> {
    let timestamp: String = row.get(1)?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(err)))?
        .with_timezone(&Utc);

    Ok(AuditLogEntry {
        id: Some(row.get(0)?),
        timestamp,
        user: row.get(2)?,
        action: row.get(3)?,
        details: row.get(4)?,
        module: row.get(5)?,
    })
}
