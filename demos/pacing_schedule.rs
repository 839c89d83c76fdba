//! Pacing schedule example.
//!
//! Builds the deterministic pacing series for a quarterly program and
//! reconciles the derived call amounts against a commitment ledger.

use pacing_engine::core::fund::FundId;
use pacing_engine::core::ledger::CommitmentLedger;
use pacing_engine::core::params::SimulationParams;
use pacing_engine::pacing::curve::PacingCurve;
use pacing_engine::pacing::schedule::{build_series, call_schedule};
use rust_decimal_macros::dec;

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  pacing-engine: Pacing Schedule Example   ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let params = SimulationParams {
        calls_per_year: 4,
        horizon_years: 9,
        commitment: dec!(20_000_000),
        ..Default::default()
    };
    let curve = PacingCurve::default();
    let fund = FundId::new("PE-BUYOUT-IV");

    // --- The pacing series: invested capital and the J-curve ---
    let series = build_series(&params, &curve).expect("valid parameters");
    println!("{}", series);

    // --- Dollar call amounts from the curve's step-ups ---
    println!("━━━ Call Amounts ━━━\n");

    let schedule = call_schedule(&params, &curve, &fund).expect("valid parameters");
    for call in schedule.calls().iter().take(6) {
        println!(
            "  #{:<3} {}  ${}",
            call.sequence(),
            call.date().format("%Y-%m-%d"),
            call.amount()
        );
    }
    println!("  ... {} calls in total\n", schedule.len());

    // --- Ledger reconciliation ---
    println!("━━━ Ledger ━━━\n");

    let mut ledger = CommitmentLedger::new();
    ledger.register_commitment(fund.clone(), params.commitment);
    for call in schedule.calls() {
        ledger.apply_call(call);
    }

    let position = ledger.position(&fund);
    println!("  Commitment: ${}", position.commitment);
    println!("  Called:     ${}", position.called);
    println!("  Uncalled:   ${}", position.uncalled());
    println!("  Consistent: {}", ledger.is_consistent());
}
