//! Display derivations
//!
//! Pure functions from a snapshot to the labels and tones the dashboard shows.
//! The headline direction and the bucket tones are derived independently:
//! the first from `directional_bias`, the second from each bucket's own
//! `is_positive` flag.

use super::{ReturnBucket, SentimentSnapshot};
use crate::consts::cli_consts::MOMENTUM_THRESHOLD;

/// Presentation color, mapped to a concrete terminal color by the UI.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Tone {
    Green,
    Red,
    Purple,
    Blue,
}

/// Long/short lean from the directional bias.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn from_bias(directional_bias: f64) -> Self {
        if directional_bias > 0.0 {
            Direction::Long
        } else {
            Direction::Short
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Direction::Long => Tone::Green,
            Direction::Short => Tone::Red,
        }
    }
}

/// Market regime from the strategic bias.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TradingCondition {
    MeanReversion,
    Momentum,
}

impl TradingCondition {
    pub fn from_bias(strategic_bias: f64) -> Self {
        if strategic_bias < MOMENTUM_THRESHOLD {
            TradingCondition::MeanReversion
        } else {
            TradingCondition::Momentum
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradingCondition::MeanReversion => "MEAN-REVERSION",
            TradingCondition::Momentum => "MOMENTUM",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            TradingCondition::MeanReversion => Tone::Purple,
            TradingCondition::Momentum => Tone::Blue,
        }
    }
}

/// A bucket ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketView<'a> {
    pub label: &'a str,
    pub value: f64,
    pub tone: Tone,
}

impl<'a> BucketView<'a> {
    fn new(label: &'a str, bucket: &ReturnBucket) -> Self {
        Self {
            label,
            value: bucket.value,
            tone: if bucket.is_positive {
                Tone::Green
            } else {
                Tone::Red
            },
        }
    }
}

/// Everything the dashboard shows for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotView<'a> {
    pub direction: Direction,
    pub condition: TradingCondition,
    pub quadrant: &'a str,
    pub directional_bias_text: String,
    pub strategic_bias_text: String,
    pub buckets: Vec<BucketView<'a>>,
}

impl<'a> SnapshotView<'a> {
    pub fn of(snapshot: &'a SentimentSnapshot) -> Self {
        Self {
            direction: Direction::from_bias(snapshot.directional_bias),
            condition: TradingCondition::from_bias(snapshot.strategic_bias),
            quadrant: &snapshot.quadrant,
            directional_bias_text: format!("Bias: {:.2}σ", snapshot.directional_bias),
            strategic_bias_text: format!("Strategic Bias: {:.2}%", snapshot.strategic_bias),
            buckets: bucket_views(snapshot),
        }
    }

    /// Single-line rendering used by headless mode.
    pub fn summary(&self) -> String {
        let buckets = self
            .buckets
            .iter()
            .map(|b| format!("{}={}", b.label, b.value))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{} | {} | {} | {} | {} | [{}]",
            self.direction.label(),
            self.condition.label(),
            self.quadrant,
            self.directional_bias_text,
            self.strategic_bias_text,
            buckets
        )
    }
}

/// Buckets in mapping order, toned by their own `is_positive` flag.
pub fn bucket_views(snapshot: &SentimentSnapshot) -> Vec<BucketView<'_>> {
    snapshot
        .data
        .iter()
        .map(|(label, bucket)| BucketView::new(label, bucket))
        .collect()
}
