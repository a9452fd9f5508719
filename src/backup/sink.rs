//! Archive delivery seam
//!
//! The finished archive leaves this crate through `DistributionSink`,
//! typically a chat-channel uploader owned by the API layer. Delivery
//! failure never invalidates the export itself; it is reported as a
//! separate status.

use serde::{Deserialize, Serialize};

use crate::error::CashbookResult;

/// Out-of-band channel the finished archive is handed to
pub trait DistributionSink {
    /// Deliver one file; the flag says whether the channel acknowledged it
    fn deliver(&self, filename: &str, data: &[u8], caption: &str) -> CashbookResult<bool>;
}

/// Outcome of handing the archive to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum DeliveryStatus {
    Delivered,
    Failed(String),
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_json_shape() {
        let ok = serde_json::to_value(DeliveryStatus::Delivered).unwrap();
        assert_eq!(ok, serde_json::json!({"status": "delivered"}));

        let failed = serde_json::to_value(DeliveryStatus::Failed("timeout".to_string())).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({"status": "failed", "detail": "timeout"})
        );
        assert!(!DeliveryStatus::Failed("timeout".to_string()).is_delivered());
    }
}
