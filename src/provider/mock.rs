//! Fixed demonstration snapshot.

use crate::snapshot::{ReturnBucket, ReturnBuckets, SentimentSnapshot, format_datetime};
use chrono::{DateTime, Utc};

/// Bucket histogram carried by every mock snapshot.
const MOCK_BUCKETS: [(&str, f64, bool); 8] = [
    ("-9%", 12.0, false),
    ("-6%", 18.0, false),
    ("-3%", 35.0, false),
    ("<0%", 60.0, false),
    (">0%", 120.0, true),
    ("+3%", 85.0, true),
    ("+6%", 40.0, true),
    ("+9%", 22.0, true),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn snapshot(&self) -> SentimentSnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Only the time fields depend on `now`; everything else is constant.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> SentimentSnapshot {
        let data: ReturnBuckets = MOCK_BUCKETS
            .iter()
            .map(|(label, value, positive)| (*label, ReturnBucket::new(*value, *positive)))
            .collect();

        SentimentSnapshot {
            timestamp: now.timestamp_millis(),
            datetime: format_datetime(now),
            strategic_bias: 68.5,
            directional_bias: 1.2,
            green_percentage: 68.5,
            quadrant: "Momentum Long Only".to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_only_time_fields_vary() {
        let provider = MockProvider::new();
        let early = provider.snapshot_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let late = provider.snapshot_at(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());

        assert!(late.timestamp > early.timestamp);
        assert_ne!(early.datetime, late.datetime);
        assert_eq!(
            SentimentSnapshot {
                timestamp: 0,
                datetime: String::new(),
                ..early
            },
            SentimentSnapshot {
                timestamp: 0,
                datetime: String::new(),
                ..late
            }
        );
    }

    #[test]
    fn test_buckets_in_ascending_return_order() {
        let snapshot = MockProvider::new().snapshot();
        let labels: Vec<&str> = snapshot.data.iter().map(|(label, _)| label).collect();
        assert_eq!(
            labels,
            vec!["-9%", "-6%", "-3%", "<0%", ">0%", "+3%", "+6%", "+9%"]
        );
    }
}
