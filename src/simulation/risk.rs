//! Per-call risk distributions.
//!
//! Generates, for every call point in the schedule, a cloud of simulated
//! account values whose dispersion widens with call index. This is the
//! data behind the ridge-style risk view: early calls cluster tightly,
//! late calls spread as compounded uncertainty accumulates.

use crate::core::params::{ParamError, SimulationParams};
use crate::pacing::curve::linspace;
use crate::simulation::distribution::{mean, percentile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// Simulated account-value scenarios for a single capital call.
///
/// Values are in millions. The spread scales from 1x at the first call to
/// 2x at the last; the center drifts upward with the call index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRiskDistribution {
    /// Zero-based call point index.
    pub sequence: usize,
    /// Simulated account values, millions.
    pub scenarios: Vec<f64>,
}

impl CallRiskDistribution {
    /// Mean scenario value.
    pub fn mean(&self) -> f64 {
        mean(&self.scenarios)
    }

    /// Scenario value at percentile `q` (0-100).
    pub fn percentile(&self, q: f64) -> f64 {
        percentile(&self.scenarios, q)
    }

    /// Spread between the 95th and 5th percentile scenarios.
    pub fn spread(&self) -> f64 {
        self.percentile(95.0) - self.percentile(5.0)
    }
}

/// Generate per-call risk distributions.
///
/// One distribution per call point, each with `scenarios_per_call` draws.
/// Call `i` of `n` draws from a normal cloud with scale `linspace(1, 2)[i]`
/// centered at `i + 2·U(0,1)`. Seeded like the forecast engine.
pub fn risk_distribution(
    params: &SimulationParams,
    scenarios_per_call: u32,
) -> Result<Vec<CallRiskDistribution>, ParamError> {
    params.validate()?;
    if scenarios_per_call == 0 {
        return Err(ParamError::InvalidTrialCount(scenarios_per_call));
    }

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let n = params.total_calls();
    let scales = linspace(1.0, 2.0, n);

    let distributions = (0..n)
        .map(|i| {
            let offset = i as f64 + 2.0 * rng.gen::<f64>();
            let scenarios = (0..scenarios_per_call)
                .map(|_| {
                    let z: f64 = StandardNormal.sample(&mut rng);
                    scales[i] * z + offset
                })
                .collect();
            CallRiskDistribution {
                sequence: i,
                scenarios,
            }
        })
        .collect();

    Ok(distributions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParams {
        SimulationParams {
            calls_per_year: 4,
            horizon_years: 5,
            seed: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_one_distribution_per_call() {
        let dists = risk_distribution(&params(), 200).unwrap();
        assert_eq!(dists.len(), 20);
        for (i, d) in dists.iter().enumerate() {
            assert_eq!(d.sequence, i);
            assert_eq!(d.scenarios.len(), 200);
        }
    }

    #[test]
    fn test_later_calls_drift_higher() {
        let dists = risk_distribution(&params(), 500).unwrap();
        let first = dists.first().unwrap().mean();
        let last = dists.last().unwrap().mean();
        // Centers drift with the call index: 0..n plus a bounded offset.
        assert!(last > first + 10.0);
    }

    #[test]
    fn test_spread_widens_on_average() {
        let dists = risk_distribution(&params(), 2000).unwrap();
        let early = dists[0].spread();
        let late = dists[19].spread();
        assert!(late > early);
    }

    #[test]
    fn test_seeded_risk_reproducible() {
        let a = risk_distribution(&params(), 100).unwrap();
        let b = risk_distribution(&params(), 100).unwrap();
        assert_eq!(a[7].scenarios, b[7].scenarios);
    }

    #[test]
    fn test_zero_scenarios_rejected() {
        assert!(matches!(
            risk_distribution(&params(), 0),
            Err(ParamError::InvalidTrialCount(0))
        ));
    }
}
