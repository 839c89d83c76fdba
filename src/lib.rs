//! # pacing-engine
//!
//! Private-equity capital call pacing and Monte Carlo cash flow
//! forecasting engine.
//!
//! Given a commitment and a call frequency, this engine builds the
//! deterministic pacing schedule (invested capital and cumulative net cash
//! flow against commitment) and runs randomized trials to forecast the
//! distribution of account values over the program horizon.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: funds, capital calls, parameters, ledger
//! - **pacing** — Deterministic pacing curve and schedule generation
//! - **simulation** — Monte Carlo forecasting and per-call risk distributions

pub mod core;
pub mod pacing;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::call::{CallSchedule, CapitalCall};
    pub use crate::core::fund::FundId;
    pub use crate::core::ledger::CommitmentLedger;
    pub use crate::core::params::{ParamError, SimulationParams};
    pub use crate::pacing::curve::PacingCurve;
    pub use crate::pacing::schedule::{build_series, call_schedule, PacingSeries};
    pub use crate::simulation::distribution::ForecastDistribution;
    pub use crate::simulation::monte_carlo::ForecastEngine;
}
