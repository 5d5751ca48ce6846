//! Sentiment snapshot model
//!
//! One immutable sentiment reading, as produced by the provider and consumed
//! by the dashboard.

pub mod display;
pub mod metrics;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::{fs, path::Path};

/// A labeled histogram cell of the 1d return distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnBucket {
    pub value: f64,
    pub color: String,
    pub is_positive: bool,
}

impl ReturnBucket {
    pub fn new(value: f64, is_positive: bool) -> Self {
        let color = if is_positive { "green" } else { "red" };
        Self {
            value,
            color: color.to_string(),
            is_positive,
        }
    }
}

/// Return buckets keyed by label, in the order the source listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnBuckets {
    entries: Vec<(String, ReturnBucket)>,
}

impl ReturnBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a bucket. A replaced label keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, bucket: ReturnBucket) {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = bucket,
            None => self.entries.push((label, bucket)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReturnBucket)> {
        self.entries
            .iter()
            .map(|(label, bucket)| (label.as_str(), bucket))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads a bare histogram, the `data` part of a snapshot file.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl<L: Into<String>> FromIterator<(L, ReturnBucket)> for ReturnBuckets {
    fn from_iter<I: IntoIterator<Item = (L, ReturnBucket)>>(iter: I) -> Self {
        let mut buckets = ReturnBuckets::new();
        for (label, bucket) in iter {
            buckets.insert(label, bucket);
        }
        buckets
    }
}

impl Serialize for ReturnBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, bucket) in &self.entries {
            map.serialize_entry(label, bucket)?;
        }
        map.end()
    }
}

struct ReturnBucketsVisitor;

impl<'de> Visitor<'de> for ReturnBucketsVisitor {
    type Value = ReturnBuckets;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of bucket label to return bucket")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut buckets = ReturnBuckets::new();
        while let Some((label, bucket)) = access.next_entry::<String, ReturnBucket>()? {
            buckets.insert(label, bucket);
        }
        Ok(buckets)
    }
}

impl<'de> Deserialize<'de> for ReturnBuckets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ReturnBucketsVisitor)
    }
}

/// One sentiment reading at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    /// Milliseconds since epoch.
    pub timestamp: i64,
    /// ISO-8601 mirror of `timestamp`.
    pub datetime: String,
    pub strategic_bias: f64,
    pub directional_bias: f64,
    pub green_percentage: f64,
    pub quadrant: String,
    pub data: ReturnBuckets,
}

impl SentimentSnapshot {
    /// Compose a snapshot from a bucket histogram, deriving the bias metrics.
    pub fn from_buckets(buckets: ReturnBuckets, now: DateTime<Utc>) -> Self {
        let derived = metrics::derive_metrics(&buckets);
        Self {
            timestamp: now.timestamp_millis(),
            datetime: format_datetime(now),
            strategic_bias: derived.strategic_bias,
            directional_bias: derived.directional_bias,
            green_percentage: derived.green_percentage,
            quadrant: derived.quadrant,
            data: buckets,
        }
    }

    /// Loads a snapshot from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Saves the snapshot as pretty JSON, creating parent directories and
    /// overwriting any existing file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)
    }
}

/// Format a UTC instant the way snapshot files carry it, e.g. `2025-03-01T12:00:00.000Z`.
pub fn format_datetime(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// The reading used across dashboard tests: momentum, long, one positive bucket.
    pub fn momentum_long() -> SentimentSnapshot {
        SentimentSnapshot {
            timestamp: 1_740_830_400_000,
            datetime: "2025-03-01T12:00:00.000Z".to_string(),
            strategic_bias: 68.5,
            directional_bias: 1.2,
            green_percentage: 68.5,
            quadrant: "Momentum Long Only".to_string(),
            data: [(">0%", ReturnBucket::new(120.0, true))]
                .into_iter()
                .collect(),
        }
    }

    pub fn mean_reversion_short() -> SentimentSnapshot {
        SentimentSnapshot {
            strategic_bias: 40.0,
            directional_bias: -0.5,
            green_percentage: 40.0,
            quadrant: "Mean Reversion Short Only".to_string(),
            data: [
                ("-3%", ReturnBucket::new(80.0, false)),
                (">0%", ReturnBucket::new(30.0, true)),
            ]
            .into_iter()
            .collect(),
            ..momentum_long()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    const SCRAPER_OUTPUT: &str = r#"{
        "timestamp": 1740830400000,
        "datetime": "2025-03-01T12:00:00.000Z",
        "strategic_bias": 55.0,
        "directional_bias": 0.25,
        "green_percentage": 55.0,
        "quadrant": "Momentum Long Only",
        "data": {
            "+9%": {"value": 4, "color": "green", "is_positive": true},
            "-9%": {"value": 2, "color": "red", "is_positive": false},
            ">0%": {"value": 30, "color": "green", "is_positive": true},
            "<0%": {"value": 25, "color": "red", "is_positive": false}
        }
    }"#;

    #[test]
    // Bucket order must follow the document, not any sorted order.
    fn test_buckets_keep_document_order() {
        let snapshot: SentimentSnapshot = serde_json::from_str(SCRAPER_OUTPUT).unwrap();
        let labels: Vec<&str> = snapshot.data.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["+9%", "-9%", ">0%", "<0%"]);

        let reencoded = serde_json::to_string(&snapshot).unwrap();
        let again: SentimentSnapshot = serde_json::from_str(&reencoded).unwrap();
        assert_eq!(snapshot, again);
    }

    #[test]
    // Re-inserting a label replaces the bucket in place.
    fn test_insert_replaces_in_place() {
        let mut buckets = ReturnBuckets::new();
        buckets.insert("-3%", ReturnBucket::new(1.0, false));
        buckets.insert("+3%", ReturnBucket::new(2.0, true));
        buckets.insert("-3%", ReturnBucket::new(9.0, false));

        assert_eq!(buckets.len(), 2);
        let (label, first) = buckets.iter().next().unwrap();
        assert_eq!(label, "-3%");
        assert_eq!(first.value, 9.0);
    }

    #[test]
    fn test_rejects_missing_fields() {
        let result = serde_json::from_str::<SentimentSnapshot>(r#"{"timestamp": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_buckets_stamps_time_and_metrics() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let buckets: ReturnBuckets = [
            ("-3%", ReturnBucket::new(25.0, false)),
            ("+3%", ReturnBucket::new(75.0, true)),
        ]
        .into_iter()
        .collect();

        let snapshot = SentimentSnapshot::from_buckets(buckets, now);

        assert_eq!(snapshot.timestamp, 1_740_830_400_000);
        assert_eq!(snapshot.datetime, "2025-03-01T12:00:00.000Z");
        assert_eq!(snapshot.strategic_bias, 75.0);
        assert_eq!(snapshot.quadrant, "Momentum Long Only");
    }

    #[test]
    fn test_save_then_load_from_nested_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("public").join("data.json");

        let snapshot = fixtures::momentum_long();
        snapshot.save(&path).unwrap();

        assert_eq!(SentimentSnapshot::load_from_file(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "not json").unwrap();

        let err = SentimentSnapshot::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
