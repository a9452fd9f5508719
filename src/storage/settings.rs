//! School settings store
//!
//! The settings table holds at most one row, pinned to id 1. Consumers get
//! the whole record or replace it wholesale; there is no partial update.

use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite::types::Type;

use crate::error::CashbookResult;
use crate::models::SchoolSettings;

const SETTINGS_ROW_ID: i64 = 1;

/// Repository handle for the `school_settings` singleton
pub struct SettingsStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SettingsStore<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// The saved profile, or `None` if the school has not been set up
    pub fn get(&self) -> CashbookResult<Option<SchoolSettings>> {
        let settings = self
            .conn
            .query_row(
                "SELECT school_name_th, school_name_en, address, director_name, \
                        finance_officer_name, auditor_name, affiliation, \
                        bank_accounts, extra_json \
                 FROM school_settings WHERE id = ?1",
                params![SETTINGS_ROW_ID],
                row_to_settings,
            )
            .optional()?;
        Ok(settings)
    }

    /// Overwrite the profile
    pub fn replace(&self, settings: &SchoolSettings) -> CashbookResult<()> {
        let bank_accounts = serde_json::to_string(&settings.bank_accounts)?;
        let extra_json = if settings.extra.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&settings.extra)?)
        };

        self.conn.execute(
            "INSERT OR REPLACE INTO school_settings \
                 (id, school_name_th, school_name_en, address, director_name, \
                  finance_officer_name, auditor_name, affiliation, bank_accounts, extra_json) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                SETTINGS_ROW_ID,
                settings.school_name_th,
                settings.school_name_en,
                settings.address,
                settings.director_name,
                settings.finance_officer_name,
                settings.auditor_name,
                settings.affiliation,
                bank_accounts,
                extra_json,
            ],
        )?;
        Ok(())
    }
}

fn row_to_settings(row: &Row<'_>) -> rusqlite::Result<SchoolSettings> {
    let bank_accounts: String = row.get(7)?;
    let bank_accounts = serde_json::from_str(&bank_accounts).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(err))
    })?;

    let extra_json: Option<String> = row.get(8)?;
    let extra = match extra_json {
        Some(json) => serde_json::from_str(&json).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(err))
        })?,
        None => serde_json::Map::new(),
    };

    Ok(SchoolSettings {
        school_name_th: row.get(0)?,
        school_name_en: row.get(1)?,
        address: row.get(2)?,
        director_name: row.get(3)?,
        finance_officer_name: row.get(4)?,
        auditor_name: row.get(5)?,
        affiliation: row.get(6)?,
        bank_accounts,
        extra,
    })
}
