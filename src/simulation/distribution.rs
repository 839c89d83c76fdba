//! Forecast distribution types and percentile aggregation.

use serde::{Deserialize, Serialize};

/// Summary statistics for one forecast period across all trials.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Zero-based period index.
    pub period: usize,
    /// Mean account value across trials.
    pub mean: f64,
    /// Lower confidence bound (e.g., 2.5th percentile for a 95% band).
    pub lower: f64,
    /// Upper confidence bound (e.g., 97.5th percentile for a 95% band).
    pub upper: f64,
}

impl PeriodStats {
    /// Width of the confidence band.
    pub fn band_width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Per-period distribution of forecasted account values.
///
/// The output of the Monte Carlo forecast engine: one [`PeriodStats`] per
/// period, with bounds at the `(1 ± confidence_level) / 2` percentiles.
/// Read-only once built; the rendering layer consumes it as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDistribution {
    periods: Vec<PeriodStats>,
    confidence_level: f64,
}

impl ForecastDistribution {
    pub(crate) fn new(periods: Vec<PeriodStats>, confidence_level: f64) -> Self {
        Self {
            periods,
            confidence_level,
        }
    }

    pub fn periods(&self) -> &[PeriodStats] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Band width at the final period. A useful single-number gauge of
    /// forecast dispersion; it shrinks as trial counts grow.
    pub fn terminal_band_width(&self) -> f64 {
        self.periods.last().map(PeriodStats::band_width).unwrap_or(0.0)
    }

    /// Verify that every period satisfies `lower <= mean <= upper`.
    pub fn is_ordered(&self) -> bool {
        self.periods
            .iter()
            .all(|p| p.lower <= p.mean && p.mean <= p.upper)
    }
}

impl std::fmt::Display for ForecastDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Forecast Distribution ===")?;
        writeln!(f, "Periods:          {}", self.len())?;
        writeln!(f, "Confidence Level: {:.0}%", self.confidence_level * 100.0)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>6}  {:>16}  {:>16}  {:>16}",
            "Period", "Lower", "Mean", "Upper"
        )?;
        for p in &self.periods {
            writeln!(
                f,
                "{:>6}  {:>16.2}  {:>16.2}  {:>16.2}",
                p.period, p.lower, p.mean, p.upper
            )?;
        }
        Ok(())
    }
}

/// Linearly interpolated percentile of an unsorted sample, `q` in [0, 100].
///
/// Matches the convention most numeric stacks use: rank `q/100 * (n-1)`,
/// interpolated between the two nearest order statistics.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    assert!(!values.is_empty(), "percentile of empty sample");
    assert!((0.0..=100.0).contains(&q), "percentile out of range: {}", q);

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Arithmetic mean of a sample.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentile_endpoints() {
        let values = vec![4.0, 1.0, 3.0, 2.0];
        assert_relative_eq!(percentile(&values, 0.0), 1.0);
        assert_relative_eq!(percentile(&values, 100.0), 4.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        // rank = 0.5 * 3 = 1.5 -> halfway between 2 and 3
        assert_relative_eq!(percentile(&values, 50.0), 2.5);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_relative_eq!(percentile(&[7.0], 25.0), 7.0);
    }

    #[test]
    #[should_panic(expected = "empty sample")]
    fn test_percentile_empty_panics() {
        percentile(&[], 50.0);
    }

    #[test]
    fn test_mean_basic() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_relative_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_distribution_ordering_check() {
        let good = ForecastDistribution::new(
            vec![PeriodStats {
                period: 0,
                mean: 2.0,
                lower: 1.0,
                upper: 3.0,
            }],
            0.95,
        );
        assert!(good.is_ordered());
        assert_relative_eq!(good.terminal_band_width(), 2.0);

        let bad = ForecastDistribution::new(
            vec![PeriodStats {
                period: 0,
                mean: 5.0,
                lower: 1.0,
                upper: 3.0,
            }],
            0.95,
        );
        assert!(!bad.is_ordered());
    }
}
