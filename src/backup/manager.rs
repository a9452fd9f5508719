//! Backup export pipeline
//!
//! Reads the full data set out of storage, renders the three payload
//! formats, packages them into one dated ZIP archive, and hands the
//! archive to the distribution sink. A failed delivery never fails the
//! export; the archive was still built correctly and the status is
//! reported separately.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::error::CashbookResult;
use crate::export::{csv, json, sql};
use crate::models::Snapshot;
use crate::storage::{Storage, RETENTION_DAYS};

use super::sink::{DeliveryStatus, DistributionSink};
use super::zip::{self, ArchiveEntry};

/// How many recent audit entries a snapshot carries
pub const AUDIT_RECENT_LIMIT: usize = 1000;

/// Filename prefix of produced archives
pub const ARCHIVE_PREFIX: &str = "cashbook-backup";

/// A fully built, not yet delivered backup archive
pub struct BackupArchive {
    /// Suggested download filename, dated
    pub filename: String,
    /// The raw ZIP bytes
    pub data: Vec<u8>,
    /// Human-readable summary sent alongside the file
    pub caption: String,
    /// Entries inside the archive
    pub file_count: usize,
    pub transaction_count: usize,
    /// Fiscal-year labels covered, sorted
    pub fiscal_years: Vec<String>,
}

/// What the caller gets back from an export
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExportReport {
    pub filename: String,
    pub file_count: usize,
    pub transaction_count: usize,
    pub fiscal_years: Vec<String>,
    pub delivery: DeliveryStatus,
}

/// Drives the export flow against one storage handle
pub struct BackupManager<'a> {
    storage: &'a Storage,
}

impl<'a> BackupManager<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Read everything one backup captures
    ///
    /// Transactions come back in export order (date, then id); audit
    /// entries are capped and limited to the retention window.
    pub fn collect_snapshot(&self, now: DateTime<Utc>) -> CashbookResult<Snapshot> {
        let transactions = self.storage.transactions().query_all()?;
        let settings = self.storage.settings().get()?;
        let audit_logs = self
            .storage
            .audit_logs()
            .recent(now - Duration::days(RETENTION_DAYS), AUDIT_RECENT_LIMIT)?;

        Ok(Snapshot::new(now, settings, transactions, audit_logs))
    }

    /// Build the dated archive from live data
    ///
    /// Layout: `backup-<YYYYMMDD>/` holding README.txt, backup.json,
    /// backup.sql, and `csv/fiscal-<label>/<fund-or-all>.csv` per fiscal
    /// year and fund with rows.
    pub fn build_archive(&self, now: DateTime<Utc>) -> CashbookResult<BackupArchive> {
        let snapshot = self.collect_snapshot(now)?;
        let folder = format!("backup-{}", now.format("%Y%m%d"));

        let mut entries = vec![
            ArchiveEntry::new(format!("{}/README.txt", folder), readme_text(&snapshot)),
            ArchiveEntry::new(format!("{}/backup.json", folder), json::render(&snapshot)?),
            ArchiveEntry::new(format!("{}/backup.sql", folder), sql::render(&snapshot)?),
        ];

        for (year, tables) in csv::fiscal_fund_tables(&snapshot.transactions)? {
            for (stem, bytes) in tables {
                entries.push(ArchiveEntry::new(
                    format!("{}/csv/fiscal-{}/{}.csv", folder, year, stem),
                    bytes,
                ));
            }
        }

        let data = zip::build_archive(&entries, now);

        Ok(BackupArchive {
            filename: format!("{}-{}.zip", ARCHIVE_PREFIX, now.format("%Y%m%d")),
            caption: caption_text(&snapshot),
            file_count: entries.len(),
            transaction_count: snapshot.transaction_count(),
            fiscal_years: snapshot.fiscal_years(),
            data,
        })
    }

    /// Build the archive and hand it to the sink
    pub fn export(&self, sink: &dyn DistributionSink) -> CashbookResult<ExportReport> {
        let archive = self.build_archive(Utc::now())?;
        info!(
            filename = %archive.filename,
            files = archive.file_count,
            transactions = archive.transaction_count,
            "backup archive built"
        );

        let delivery = match sink.deliver(&archive.filename, &archive.data, &archive.caption) {
            Ok(true) => DeliveryStatus::Delivered,
            Ok(false) => DeliveryStatus::Failed("sink did not acknowledge the upload".to_string()),
            Err(err) => DeliveryStatus::Failed(err.to_string()),
        };
        if let DeliveryStatus::Failed(reason) = &delivery {
            warn!(%reason, "archive delivery failed; the archive itself is intact");
        }

        Ok(ExportReport {
            filename: archive.filename,
            file_count: archive.file_count,
            transaction_count: archive.transaction_count,
            fiscal_years: archive.fiscal_years,
            delivery,
        })
    }
}

fn school_name(snapshot: &Snapshot) -> &str {
    snapshot
        .settings
        .as_ref()
        .map(|s| s.display_name())
        .unwrap_or("School")
}

fn readme_text(snapshot: &Snapshot) -> String {
    format!(
        "Cashbook backup for {school}\n\
         Created: {created}\n\
         Transactions: {count}\n\
         \n\
         Files:\n\
         {indent}backup.json  -> restore through the dashboard settings page\n\
         {indent}backup.sql   -> replay directly against an empty transactions table\n\
         {indent}csv/         -> extracts per fiscal year and fund, open with a spreadsheet tool\n",
        school = school_name(snapshot),
        created = snapshot.exported_at.to_rfc3339(),
        count = snapshot.transaction_count(),
        indent = "  ",
    )
}

fn caption_text(snapshot: &Snapshot) -> String {
    let years = snapshot.fiscal_years();
    let years = if years.is_empty() {
        "none".to_string()
    } else {
        years.join(", ")
    };
    format!(
        "Cashbook backup for {} on {}: {} transactions, fiscal years {}",
        school_name(snapshot),
        snapshot.exported_at.format("%Y-%m-%d"),
        snapshot.transaction_count(),
        years,
    )
}
