use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from invalid simulation parameters.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("calls per year must be positive, got {0}")]
    InvalidCallFrequency(u32),
    #[error("horizon must be positive, got {0} years")]
    InvalidHorizon(u32),
    #[error("trial count must be positive, got {0}")]
    InvalidTrialCount(u32),
    #[error("commitment must be positive, got {0}")]
    InvalidCommitment(Decimal),
    #[error("confidence level must be in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),
    #[error("return standard deviation must be non-negative, got {0}")]
    InvalidReturnStddev(f64),
}

/// Inputs to the pacing schedule and Monte Carlo forecast.
///
/// All amounts are interpreted against a single `commitment`; percentage
/// series produced by the pacing module are relative to it. The defaults
/// reproduce a typical nine-year buyout program: quarterly calls, a $20M
/// commitment, 4% annual growth on invested capital and a 15% distribution
/// rate, with per-period forecast returns of 0.5% mean / 2% standard
/// deviation.
///
/// # Examples
///
/// ```
/// use pacing_engine::core::params::SimulationParams;
///
/// let params = SimulationParams {
///     calls_per_year: 4,
///     horizon_years: 5,
///     ..Default::default()
/// };
/// assert!(params.validate().is_ok());
/// assert_eq!(params.total_calls(), 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of capital calls issued per year. Must be positive.
    pub calls_per_year: u32,
    /// Investment horizon in years. Must be positive.
    pub horizon_years: u32,
    /// Number of Monte Carlo trials. Must be positive.
    pub trials: u32,
    /// Seed for the forecast RNG. `None` seeds from entropy, making runs
    /// non-reproducible; set `Some(seed)` for deterministic output.
    pub seed: Option<u64>,
    /// Total committed capital.
    pub commitment: Decimal,
    /// Date of the first capital call.
    pub start_date: DateTime<Utc>,
    /// Annual growth rate applied to invested capital.
    pub growth_rate: f64,
    /// Fraction of invested capital distributed back each call period.
    pub distribution_rate: f64,
    /// Mean account return per call period in the forecast.
    pub period_return_mean: f64,
    /// Standard deviation of the per-period account return.
    pub period_return_stddev: f64,
    /// Width of the forecast confidence band (e.g., 0.95 for a 95% band,
    /// bounded by the 2.5th and 97.5th percentiles).
    pub confidence_level: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            calls_per_year: 4,
            horizon_years: 9,
            trials: 1000,
            seed: None,
            commitment: Decimal::from(20_000_000),
            start_date: Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap(),
            growth_rate: 0.04,
            distribution_rate: 0.15,
            period_return_mean: 0.005,
            period_return_stddev: 0.02,
            confidence_level: 0.95,
        }
    }
}

impl SimulationParams {
    /// Check all invariants, returning the first violation found.
    ///
    /// A call frequency of zero is rejected rather than treated as an
    /// empty schedule; constrained UI inputs normally prevent it, but the
    /// engines validate defensively before running.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.calls_per_year == 0 {
            return Err(ParamError::InvalidCallFrequency(self.calls_per_year));
        }
        if self.horizon_years == 0 {
            return Err(ParamError::InvalidHorizon(self.horizon_years));
        }
        if self.trials == 0 {
            return Err(ParamError::InvalidTrialCount(self.trials));
        }
        if self.commitment <= Decimal::ZERO {
            return Err(ParamError::InvalidCommitment(self.commitment));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ParamError::InvalidConfidenceLevel(self.confidence_level));
        }
        if !(self.period_return_stddev >= 0.0) {
            return Err(ParamError::InvalidReturnStddev(self.period_return_stddev));
        }
        Ok(())
    }

    /// Total number of call points over the horizon.
    pub fn total_calls(&self) -> usize {
        (self.calls_per_year as usize) * (self.horizon_years as usize)
    }
}
