//! Cumulative aggregation and threshold detection over recorded measurements.
//!
//! The cumulative series is seeded with `0` and accumulates from the second
//! stored measurement on: `measurements[0]` never contributes. Renderers and
//! the threshold check both depend on exactly this shape.

use serde::Serialize;

/// Alert level used when the caller does not configure one.
pub const DEFAULT_THRESHOLD: i64 = 100;

/// `cumulative[0] = 0`, `cumulative[i] = cumulative[i - 1] + measurements[i]`.
///
/// The result has `max(1, measurements.len())` elements. The running sum is
/// exact; only the emitted values are clamped to the `i64` bounds.
pub fn compute_cumulative_series(measurements: &[i64]) -> Vec<i64> {
    let mut cumulative = Vec::with_capacity(measurements.len().max(1));
    let mut running = 0i128;
    cumulative.push(0);
    for value in measurements.iter().skip(1) {
        running += i128::from(*value);
        cumulative.push(clamp_to_i64(running));
    }
    cumulative
}

fn clamp_to_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// `true` if any element of the series reaches `threshold`.
pub fn detect_threshold_crossing(series: &[i64], threshold: i64) -> bool {
    series.iter().any(|value| *value >= threshold)
}

/// Alert text shown alongside a series that crossed `threshold`.
pub fn alert_message(threshold: i64) -> String {
    format!("The carbon footprint data has reached above critical point({threshold}).")
}

/// Everything a renderer needs to plot the cumulative curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CumulativeSeries {
    /// X axis: one position per cumulative value, starting at 0.
    pub years: Vec<u64>,
    pub values: Vec<i64>,
    pub threshold: i64,
    pub crossed: bool,
    pub alert: Option<String>,
}

impl CumulativeSeries {
    /// Recompute the series from scratch. Nothing is cached.
    pub fn from_measurements(measurements: &[i64], threshold: i64) -> Self {
        let values = compute_cumulative_series(measurements);
        let crossed = detect_threshold_crossing(&values, threshold);
        Self {
            years: (0..values.len() as u64).collect(),
            values,
            threshold,
            crossed,
            alert: crossed.then(|| alert_message(threshold)),
        }
    }

    /// Largest cumulative value.
    pub fn peak(&self) -> i64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_series_is_the_seed() {
        assert_eq!(compute_cumulative_series(&[]), vec![0]);
    }

    #[test]
    fn single_measurement_does_not_contribute() {
        assert_eq!(compute_cumulative_series(&[500]), vec![0]);
    }

    // The first measurement is skipped on purpose: accumulation starts at
    // index 1 and position 0 holds the seed.
    #[test]
    fn accumulation_starts_at_second_measurement() {
        assert_eq!(compute_cumulative_series(&[5, 10, 20]), vec![0, 10, 30]);
        assert_eq!(compute_cumulative_series(&[1, 1, 1, 1]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn negative_measurements_reduce_the_sum() {
        assert_eq!(compute_cumulative_series(&[0, 50, -20]), vec![0, 50, 30]);
    }

    #[test]
    fn sums_clamp_on_output_instead_of_overflowing() {
        let series = compute_cumulative_series(&[0, i64::MAX, 1]);
        assert_eq!(series, vec![0, i64::MAX, i64::MAX]);
        let series = compute_cumulative_series(&[0, i64::MIN, -1]);
        assert_eq!(series, vec![0, i64::MIN, i64::MIN]);
    }

    #[test]
    fn running_sum_recovers_after_clamped_output() {
        let series = compute_cumulative_series(&[0, i64::MAX, 1, -1]);
        assert_eq!(series, vec![0, i64::MAX, i64::MAX, i64::MAX]);
        let series = compute_cumulative_series(&[0, i64::MAX, 10, -20]);
        assert_eq!(series, vec![0, i64::MAX, i64::MAX, i64::MAX - 10]);
    }

    #[test]
    fn threshold_detection() {
        assert!(!detect_threshold_crossing(&[0, 50, 99], 100));
        assert!(detect_threshold_crossing(&[0, 50, 120], 100));
        assert!(detect_threshold_crossing(&[0, 100], 100));
        assert!(!detect_threshold_crossing(&[], 100));
    }

    #[test]
    fn series_bundle_carries_alert_when_crossed() {
        let series = CumulativeSeries::from_measurements(&[5, 60, 60], DEFAULT_THRESHOLD);
        assert_eq!(series.values, vec![0, 60, 120]);
        assert_eq!(series.years, vec![0, 1, 2]);
        assert!(series.crossed);
        assert_eq!(
            series.alert.as_deref(),
            Some("The carbon footprint data has reached above critical point(100).")
        );
        assert_eq!(series.peak(), 120);
    }

    #[test]
    fn series_bundle_without_crossing_has_no_alert() {
        let series = CumulativeSeries::from_measurements(&[1000, 10], DEFAULT_THRESHOLD);
        assert_eq!(series.values, vec![0, 10]);
        assert!(!series.crossed);
        assert!(series.alert.is_none());
    }

    proptest! {
        #[test]
        fn series_shape_matches_input(values in proptest::collection::vec(-1_000i64..1_000, 0..50)) {
            let series = compute_cumulative_series(&values);
            prop_assert_eq!(series.len(), values.len().max(1));
            prop_assert_eq!(series[0], 0);
            for i in 1..series.len() {
                prop_assert_eq!(series[i] - series[i - 1], values[i]);
            }
        }
    }
}
