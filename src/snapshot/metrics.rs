//! Bias metrics derived from a return-bucket histogram.

use super::ReturnBuckets;
use crate::consts::cli_consts::MOMENTUM_THRESHOLD;

/// Sigma weight for each standard bucket label. Unknown labels weigh nothing.
pub fn sigma_weight(label: &str) -> f64 {
    match label {
        "-9%" => -3.0,
        "-6%" => -2.0,
        "-3%" => -1.0,
        "<0%" => -0.5,
        ">0%" => 0.5,
        "+3%" => 1.0,
        "+6%" => 2.0,
        "+9%" => 3.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub strategic_bias: f64,
    pub directional_bias: f64,
    pub green_percentage: f64,
    pub quadrant: String,
}

pub fn derive_metrics(buckets: &ReturnBuckets) -> DerivedMetrics {
    let total: f64 = buckets.iter().map(|(_, b)| b.value).sum();
    let positive: f64 = buckets
        .iter()
        .filter(|(_, b)| b.is_positive)
        .map(|(_, b)| b.value)
        .sum();

    let (strategic_bias, directional_bias) = if total > 0.0 {
        let weighted: f64 = buckets
            .iter()
            .map(|(label, b)| sigma_weight(label) * b.value)
            .sum();
        (positive / total * 100.0, weighted / total)
    } else {
        (MOMENTUM_THRESHOLD, 0.0)
    };

    DerivedMetrics {
        strategic_bias,
        directional_bias,
        green_percentage: strategic_bias,
        quadrant: quadrant_for(strategic_bias, directional_bias).to_string(),
    }
}

/// Regime name. A zero directional bias counts as long here.
pub fn quadrant_for(strategic_bias: f64, directional_bias: f64) -> &'static str {
    match (strategic_bias >= MOMENTUM_THRESHOLD, directional_bias >= 0.0) {
        (true, true) => "Momentum Long Only",
        (true, false) => "Momentum Short Only",
        (false, true) => "Mean Reversion Long Only",
        (false, false) => "Mean Reversion Short Only",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ReturnBucket;

    fn histogram(cells: &[(&str, f64, bool)]) -> ReturnBuckets {
        cells
            .iter()
            .map(|(label, value, positive)| (*label, ReturnBucket::new(*value, *positive)))
            .collect()
    }

    #[test]
    fn test_empty_histogram_defaults() {
        let metrics = derive_metrics(&ReturnBuckets::new());
        assert_eq!(metrics.strategic_bias, 50.0);
        assert_eq!(metrics.directional_bias, 0.0);
        assert_eq!(metrics.quadrant, "Momentum Long Only");
    }

    #[test]
    fn test_weighted_directional_bias() {
        let buckets = histogram(&[
            ("-9%", 10.0, false),
            ("<0%", 30.0, false),
            (">0%", 40.0, true),
            ("+6%", 20.0, true),
        ]);
        let metrics = derive_metrics(&buckets);

        // (-30 - 15 + 20 + 40) / 100
        assert!((metrics.directional_bias - 0.15).abs() < 1e-9);
        assert!((metrics.strategic_bias - 60.0).abs() < 1e-9);
        assert_eq!(metrics.green_percentage, metrics.strategic_bias);
        assert_eq!(metrics.quadrant, "Momentum Long Only");
    }

    #[test]
    fn test_unknown_labels_count_toward_total_only() {
        let buckets = histogram(&[("flat", 50.0, false), ("+3%", 50.0, true)]);
        let metrics = derive_metrics(&buckets);
        assert!((metrics.directional_bias - 0.5).abs() < 1e-9);
        assert!((metrics.strategic_bias - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadrants() {
        assert_eq!(quadrant_for(50.0, 0.0), "Momentum Long Only");
        assert_eq!(quadrant_for(70.0, -0.1), "Momentum Short Only");
        assert_eq!(quadrant_for(49.0, 0.3), "Mean Reversion Long Only");
        assert_eq!(quadrant_for(10.0, -2.0), "Mean Reversion Short Only");
    }
}
