//! Structured backup document rendering
//!
//! The snapshot serialized as pretty-printed JSON. This is the primary
//! restore input; the SQL script is the fallback.

use crate::error::CashbookResult;
use crate::models::Snapshot;

/// Render the snapshot as `backup.json` bytes
pub fn render(snapshot: &Snapshot) -> CashbookResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(snapshot)?)
}
