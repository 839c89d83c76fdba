//! Monte Carlo forecast of account values.
//!
//! Repeated randomized trials of a per-period return process, aggregated
//! into a per-period mean and confidence band. This is the engine behind
//! the forecast-with-confidence-band view of the capital call program.

use crate::core::params::{ParamError, SimulationParams};
use crate::simulation::distribution::{mean, percentile, ForecastDistribution, PeriodStats};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Construct the forecast RNG: seeded deterministically when the
/// parameters carry a seed, from OS entropy otherwise.
fn forecast_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// The core Monte Carlo forecast engine.
///
/// Pure and stateless: each run is a single-shot computation with no I/O
/// and no side effects beyond its return value. A run is deterministic
/// exactly when [`SimulationParams::seed`] is set.
pub struct ForecastEngine;

impl ForecastEngine {
    /// Run the forecast and aggregate it into a [`ForecastDistribution`].
    ///
    /// One period per scheduled call (`calls_per_year * horizon_years`).
    /// Each trial starts at the commitment value and compounds a per-period
    /// return drawn from `Normal(period_return_mean, period_return_stddev)`.
    /// Per period, trials are summarized as the mean and the
    /// `(1 ± confidence_level) / 2` percentiles.
    pub fn run(params: &SimulationParams) -> Result<ForecastDistribution, ParamError> {
        let trial_values = Self::run_trials(params)?;

        let lower_q = (1.0 - params.confidence_level) / 2.0 * 100.0;
        let upper_q = (1.0 + params.confidence_level) / 2.0 * 100.0;

        let periods = trial_values
            .iter()
            .enumerate()
            .map(|(period, values)| PeriodStats {
                period,
                mean: mean(values),
                lower: percentile(values, lower_q),
                upper: percentile(values, upper_q),
            })
            .collect();

        log::debug!(
            "forecast: {} trials over {} periods, {:.0}% band",
            params.trials,
            params.total_calls(),
            params.confidence_level * 100.0
        );

        Ok(ForecastDistribution::new(periods, params.confidence_level))
    }

    /// Run the raw trials without aggregation.
    ///
    /// Returns one vector per period, each holding `trials` simulated
    /// account values. Period 0 is pinned to the starting value in every
    /// trial.
    pub fn run_trials(params: &SimulationParams) -> Result<Vec<Vec<f64>>, ParamError> {
        params.validate()?;

        let returns = Normal::new(params.period_return_mean, params.period_return_stddev)
            .map_err(|_| ParamError::InvalidReturnStddev(params.period_return_stddev))?;
        let mut rng = forecast_rng(params.seed);

        let n_periods = params.total_calls();
        let n_trials = params.trials as usize;
        let initial: f64 = params.commitment.to_string().parse().unwrap_or(0.0);

        let mut values = vec![vec![0.0; n_trials]; n_periods];
        for trial in 0..n_trials {
            let mut value = initial;
            values[0][trial] = value;
            for period in values.iter_mut().skip(1) {
                let period_return = returns.sample(&mut rng);
                value *= 1.0 + period_return;
                period[trial] = value;
            }
        }

        Ok(values)
    }
}
