//! Invested-capital pacing curve.
//!
//! Models how a private-equity program draws down and then winds down its
//! commitment over the fund life: a steep ramp during the investment
//! period, a slow build through the hold period, and a run-off as the
//! fund exits positions.

use serde::{Deserialize, Serialize};

/// Year at which the investment period ends and the hold period begins.
const RAMP_END_YEARS: f64 = 3.0;
/// Year at which the run-off period begins.
const RUNOFF_START_YEARS: f64 = 7.0;

/// Piecewise-linear invested capital curve, in percent of commitment.
///
/// The default curve ramps at 20%/year for the first three years, drifts
/// up at 5%/year through year seven, then runs off at 20%/year. Invested
/// capital is a fraction of commitment, so the curve is clamped to
/// [0, 100]: a long horizon runs off to zero rather than negative, and a
/// steep ramp saturates at the full commitment.
///
/// # Examples
///
/// ```
/// use pacing_engine::pacing::curve::PacingCurve;
///
/// let curve = PacingCurve::default();
/// assert_eq!(curve.invested_percent(0.0), 0.0);
/// assert_eq!(curve.invested_percent(3.0), 60.0);
/// assert_eq!(curve.invested_percent(7.0), 80.0);
/// assert_eq!(curve.invested_percent(8.0), 60.0);
/// assert_eq!(curve.invested_percent(12.0), 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingCurve {
    /// Slope of the investment period, percent of commitment per year.
    pub ramp_rate: f64,
    /// Slope of the hold period, percent of commitment per year.
    pub hold_rate: f64,
    /// Slope of the run-off period, percent of commitment per year (drawn
    /// down, so applied negatively).
    pub runoff_rate: f64,
}

impl Default for PacingCurve {
    fn default() -> Self {
        Self {
            ramp_rate: 20.0,
            hold_rate: 5.0,
            runoff_rate: 20.0,
        }
    }
}

impl PacingCurve {
    /// Invested capital at `t` years into the program, as a percent of
    /// commitment.
    pub fn invested_percent(&self, t: f64) -> f64 {
        let ramp_peak = self.ramp_rate * RAMP_END_YEARS;
        let hold_peak = ramp_peak + self.hold_rate * (RUNOFF_START_YEARS - RAMP_END_YEARS);
        let raw = if t < RAMP_END_YEARS {
            self.ramp_rate * t
        } else if t < RUNOFF_START_YEARS {
            ramp_peak + self.hold_rate * (t - RAMP_END_YEARS)
        } else {
            hold_peak - self.runoff_rate * (t - RUNOFF_START_YEARS)
        };
        raw.clamp(0.0, 100.0)
    }

    /// Sample the curve at `n` evenly spaced points over `[0, horizon_years]`.
    pub fn sample(&self, horizon_years: f64, n: usize) -> Vec<f64> {
        linspace(0.0, horizon_years, n)
            .into_iter()
            .map(|t| self.invested_percent(t))
            .collect()
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Centered rolling mean with window 3, edges filled from the nearest
/// interior value. Series shorter than the window are returned unchanged.
pub(crate) fn smooth(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 3 {
        return values.to_vec();
    }
    let mut out = vec![0.0; n];
    for i in 1..n - 1 {
        out[i] = (values[i - 1] + values[i] + values[i + 1]) / 3.0;
    }
    out[0] = out[1];
    out[n - 1] = out[n - 2];
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_curve_is_continuous_at_breakpoints() {
        let curve = PacingCurve::default();
        let eps = 1e-9;
        assert_relative_eq!(
            curve.invested_percent(RAMP_END_YEARS - eps),
            curve.invested_percent(RAMP_END_YEARS),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            curve.invested_percent(RUNOFF_START_YEARS - eps),
            curve.invested_percent(RUNOFF_START_YEARS),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_curve_peak_at_runoff_start() {
        let curve = PacingCurve::default();
        assert_relative_eq!(curve.invested_percent(7.0), 80.0);
    }

    #[test]
    fn test_runoff_floors_at_zero() {
        // Past year 11 the default run-off would go negative; invested
        // capital cannot, so the curve floors at zero.
        let curve = PacingCurve::default();
        assert_relative_eq!(curve.invested_percent(11.0), 0.0);
        assert_relative_eq!(curve.invested_percent(12.0), 0.0);
        for sampled in curve.sample(12.0, 48) {
            assert!((0.0..=100.0).contains(&sampled));
        }
    }

    #[test]
    fn test_steep_ramp_saturates_at_commitment() {
        let curve = PacingCurve {
            ramp_rate: 50.0,
            ..PacingCurve::default()
        };
        assert_relative_eq!(curve.invested_percent(3.0), 100.0);
    }

    #[test]
    fn test_sample_length_and_endpoints() {
        let curve = PacingCurve::default();
        let samples = curve.sample(9.0, 36);
        assert_eq!(samples.len(), 36);
        assert_relative_eq!(samples[0], 0.0);
        assert_relative_eq!(samples[35], curve.invested_percent(9.0));
    }

    #[test]
    fn test_linspace_basic() {
        let xs = linspace(0.0, 1.0, 5);
        assert_eq!(xs.len(), 5);
        assert_relative_eq!(xs[0], 0.0);
        assert_relative_eq!(xs[2], 0.5);
        assert_relative_eq!(xs[4], 1.0);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[test]
    fn test_smooth_preserves_length() {
        let raw = vec![0.0, 3.0, 6.0, 9.0, 12.0];
        let smoothed = smooth(&raw);
        assert_eq!(smoothed.len(), raw.len());
        // Interior points are plain three-point averages.
        assert_relative_eq!(smoothed[2], 6.0);
        // Edges take the nearest interior value.
        assert_relative_eq!(smoothed[0], smoothed[1]);
        assert_relative_eq!(smoothed[4], smoothed[3]);
    }

    #[test]
    fn test_smooth_short_series_unchanged() {
        let raw = vec![1.0, 2.0];
        assert_eq!(smooth(&raw), raw);
    }
}
