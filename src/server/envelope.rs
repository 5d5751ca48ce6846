//! The JSON wrapper every sentiment response is sent in.

use crate::snapshot::SentimentSnapshot;
use serde::{Deserialize, Serialize};

/// `{ success, data?, message }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SentimentSnapshot>,
    #[serde(default)]
    pub message: String,
}

impl Envelope {
    pub fn success(data: SentimentSnapshot, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }

    /// The snapshot, if the envelope reports success and carries one.
    pub fn into_snapshot(self) -> Result<SentimentSnapshot, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ if !self.message.is_empty() => Err(self.message),
            _ => Err("Failed to retrieve valid data".to_string()),
        }
    }
}
