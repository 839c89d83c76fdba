//! Deterministic pacing schedule generation.
//!
//! Turns [`SimulationParams`] and a [`PacingCurve`] into the series an
//! allocator actually looks at: per-call-point invested capital and
//! cumulative net cash flow (the classic J-curve), plus a dollar-amount
//! [`CallSchedule`] derived from the curve's step-ups.

use crate::core::call::{CallSchedule, CapitalCall};
use crate::core::fund::FundId;
use crate::core::params::{ParamError, SimulationParams};
use crate::pacing::curve::{linspace, smooth, PacingCurve};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trough of the baseline cumulative net cash flow, percent of commitment.
const JCURVE_TROUGH_PERCENT: f64 = -60.0;
/// Terminal value of the baseline cumulative net cash flow.
const JCURVE_TERMINAL_PERCENT: f64 = 100.0;

/// One call point in the pacing series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingPoint {
    /// Zero-based call point index.
    pub sequence: usize,
    /// Date of the call point.
    pub date: DateTime<Utc>,
    /// Invested capital, percent of commitment.
    pub invested_percent: f64,
    /// Smoothed baseline cumulative net cash flow, percent of commitment.
    pub net_cash_flow_percent: f64,
    /// Invested capital adjusted for the annual growth rate, clamped to
    /// [-100, 100].
    pub adjusted_invested_percent: f64,
    /// Cumulative net cash flow under the distribution-rate model, clamped
    /// to [-100, 100].
    pub adjusted_net_cash_flow_percent: f64,
}

/// The full pacing series for one program: one point per scheduled call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PacingSeries {
    points: Vec<PacingPoint>,
}

impl PacingSeries {
    pub fn points(&self) -> &[PacingPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Peak invested capital across the series, percent of commitment.
    pub fn peak_invested_percent(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.invested_percent)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Deepest point of the baseline J-curve, percent of commitment.
    pub fn trough_net_cash_flow_percent(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.net_cash_flow_percent)
            .fold(f64::INFINITY, f64::min)
    }
}

impl std::fmt::Display for PacingSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Pacing Series ===")?;
        writeln!(f, "Call Points:      {}", self.len())?;
        writeln!(f, "Peak Invested:    {:.1}%", self.peak_invested_percent())?;
        writeln!(
            f,
            "J-Curve Trough:   {:.1}%",
            self.trough_net_cash_flow_percent()
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>4}  {:>12}  {:>10}  {:>10}  {:>10}  {:>10}",
            "Seq", "Date", "Invested%", "NetCF%", "AdjInv%", "AdjNetCF%"
        )?;
        for p in &self.points {
            writeln!(
                f,
                "{:>4}  {:>12}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}",
                p.sequence,
                p.date.format("%Y-%m-%d"),
                p.invested_percent,
                p.net_cash_flow_percent,
                p.adjusted_invested_percent,
                p.adjusted_net_cash_flow_percent,
            )?;
        }
        Ok(())
    }
}

/// Dates of each call point: the start date plus evenly spaced offsets of
/// `365 / calls_per_year` days.
fn call_dates(params: &SimulationParams) -> Vec<DateTime<Utc>> {
    let n = params.total_calls();
    (0..n)
        .map(|i| {
            let offset_days = (i as i64) * 365 / (params.calls_per_year as i64);
            params.start_date + Duration::days(offset_days)
        })
        .collect()
}

/// Build the pacing series for one program.
///
/// Produces exactly `calls_per_year * horizon_years` points. The baseline
/// net cash flow descends linearly to the J-curve trough over the first
/// half of the schedule, recovers to the terminal value over the second
/// half, and is smoothed with a centered three-point rolling mean. The
/// adjusted series apply the growth and distribution rates and are clamped
/// to [-100, 100] percent of commitment.
pub fn build_series(
    params: &SimulationParams,
    curve: &PacingCurve,
) -> Result<PacingSeries, ParamError> {
    params.validate()?;

    let n = params.total_calls();
    let dates = call_dates(params);
    let invested = curve.sample(params.horizon_years as f64, n);

    // Baseline J-curve: down to the trough, then back past break-even.
    let half = n / 2;
    let mut baseline = linspace(0.0, JCURVE_TROUGH_PERCENT, half);
    baseline.extend(linspace(
        JCURVE_TROUGH_PERCENT,
        JCURVE_TERMINAL_PERCENT,
        n - half,
    ));
    let baseline = smooth(&baseline);

    let adjusted_invested: Vec<f64> = invested
        .iter()
        .map(|pct| pct * (1.0 + params.growth_rate))
        .collect();

    // Cumulative outflow under the distribution-rate model, accumulated
    // before clamping so the running sum is not distorted at the caps.
    let mut running = 0.0;
    let adjusted_net_cash_flow: Vec<f64> = adjusted_invested
        .iter()
        .map(|pct| {
            running += pct * -params.distribution_rate;
            running
        })
        .collect();

    let points = (0..n)
        .map(|i| PacingPoint {
            sequence: i,
            date: dates[i],
            invested_percent: invested[i],
            net_cash_flow_percent: baseline[i],
            adjusted_invested_percent: adjusted_invested[i].clamp(-100.0, 100.0),
            adjusted_net_cash_flow_percent: adjusted_net_cash_flow[i].clamp(-100.0, 100.0),
        })
        .collect();

    Ok(PacingSeries { points })
}

/// Derive the dollar-amount call schedule for `fund` from the pacing curve.
///
/// A capital call is issued at every call point where the invested-capital
/// curve steps up; the amount is the step size applied to the commitment,
/// rounded to cents. The run-off phase of the curve issues no calls, so
/// the schedule holds at most `calls_per_year * horizon_years` entries and
/// its total never exceeds the commitment.
pub fn call_schedule(
    params: &SimulationParams,
    curve: &PacingCurve,
    fund: &FundId,
) -> Result<CallSchedule, ParamError> {
    params.validate()?;

    let n = params.total_calls();
    let dates = call_dates(params);
    let invested = curve.sample(params.horizon_years as f64, n);

    let mut schedule = CallSchedule::new();
    let mut previous = 0.0;
    for i in 0..n {
        let delta_pct = invested[i] - previous;
        previous = invested[i];
        if delta_pct <= 0.0 {
            continue;
        }
        let fraction = Decimal::from_f64_retain(delta_pct / 100.0).unwrap_or(Decimal::ZERO);
        let amount = (fraction * params.commitment).round_dp(2);
        if amount > Decimal::ZERO {
            // Notice references number issued calls, not call points.
            let reference = format!("{}/CALL-{:02}", fund, schedule.len() + 1);
            schedule.add(
                CapitalCall::new(fund.clone(), i, dates[i], amount).with_reference(reference),
            );
        }
    }

    log::debug!(
        "call schedule for {}: {} calls totaling {}",
        fund,
        schedule.len(),
        schedule.total_called()
    );

    Ok(schedule)
}
