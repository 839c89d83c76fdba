//! Basic Monte Carlo forecast example.
//!
//! Demonstrates how the pacing engine turns a call frequency and a
//! commitment into a distribution of forecasted account values.

use pacing_engine::core::params::SimulationParams;
use pacing_engine::simulation::monte_carlo::ForecastEngine;
use rust_decimal_macros::dec;

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  pacing-engine: Basic Forecast Example    ║");
    println!("╚═══════════════════════════════════════════╝\n");

    // --- Scenario 1: Quarterly calls over five years ---
    println!("━━━ Scenario 1: Quarterly Calls, 5-Year Horizon ━━━\n");

    let params = SimulationParams {
        calls_per_year: 4,
        horizon_years: 5,
        trials: 1000,
        seed: Some(42),
        commitment: dec!(20_000_000),
        ..Default::default()
    };

    let forecast = ForecastEngine::run(&params).expect("valid parameters");
    println!("{}", forecast);

    // --- Scenario 2: Same program, wider confidence band ---
    println!("━━━ Scenario 2: 99% Confidence Band ━━━\n");

    let wide = SimulationParams {
        confidence_level: 0.99,
        ..params
    };
    let forecast_wide = ForecastEngine::run(&wide).expect("valid parameters");

    let last_95 = forecast.periods().last().unwrap();
    let last_99 = forecast_wide.periods().last().unwrap();
    println!("Terminal band at 95%: {:>14.0}", last_95.band_width());
    println!("Terminal band at 99%: {:>14.0}", last_99.band_width());
    println!();
    assert!(last_99.band_width() > last_95.band_width());
    println!("The 99% band is wider: it covers more of the simulated tail mass.");
}
