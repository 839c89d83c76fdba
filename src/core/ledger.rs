use crate::core::call::CapitalCall;
use crate::core::fund::FundId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-fund position against a committed amount.
///
/// `called` accumulates capital call outflows; `distributed` accumulates
/// inflows returned by the fund. Uncalled capital is derived, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundPosition {
    /// Total capital committed to the fund.
    pub commitment: Decimal,
    /// Capital called to date.
    pub called: Decimal,
    /// Capital distributed back to date.
    pub distributed: Decimal,
}

impl FundPosition {
    /// Commitment not yet called.
    pub fn uncalled(&self) -> Decimal {
        self.commitment - self.called
    }

    /// Net cash flow from the investor's perspective: distributions in,
    /// calls out. Negative while the fund is in its drawdown phase.
    pub fn net_cash_flow(&self) -> Decimal {
        self.distributed - self.called
    }
}

/// Tracks called, distributed, and uncalled capital per fund.
///
/// The ledger is the bookkeeping side of the pacing engine — applying a
/// call schedule to it shows how far into its commitment a program is at
/// any point, and whether the schedule ever over-calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitmentLedger {
    positions: HashMap<FundId, FundPosition>,
}

impl CommitmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a commitment to a fund. Replaces any prior commitment.
    pub fn register_commitment(&mut self, fund: FundId, commitment: Decimal) {
        self.positions.entry(fund).or_default().commitment = commitment;
    }

    /// Apply a capital call: the called balance grows by the call amount.
    pub fn apply_call(&mut self, call: &CapitalCall) {
        self.positions
            .entry(call.fund().clone())
            .or_default()
            .called += call.amount();
    }

    /// Apply a distribution from a fund back to the investor.
    pub fn apply_distribution(&mut self, fund: &FundId, amount: Decimal) {
        self.positions.entry(fund.clone()).or_default().distributed += amount;
    }

    /// Get the position for a fund, zero if unknown.
    pub fn position(&self, fund: &FundId) -> FundPosition {
        self.positions.get(fund).cloned().unwrap_or_default()
    }

    /// All tracked positions.
    pub fn all_positions(&self) -> &HashMap<FundId, FundPosition> {
        &self.positions
    }

    /// Verify that no fund has been called past its commitment and that
    /// called + uncalled reconstructs the commitment exactly.
    pub fn is_consistent(&self) -> bool {
        self.positions.values().all(|p| {
            p.called >= Decimal::ZERO
                && p.called <= p.commitment
                && p.called + p.uncalled() == p.commitment
        })
    }

    /// Total capital called across all funds.
    pub fn total_called(&self) -> Decimal {
        self.positions.values().map(|p| p.called).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn call(fund: &str, amount: Decimal) -> CapitalCall {
        CapitalCall::new(FundId::new(fund), 0, Utc::now(), amount)
    }

    #[test]
    fn test_ledger_basic() {
        let mut ledger = CommitmentLedger::new();
        ledger.register_commitment(FundId::new("PE-BUYOUT-IV"), dec!(1000));
        ledger.apply_call(&call("PE-BUYOUT-IV", dec!(250)));

        let pos = ledger.position(&FundId::new("PE-BUYOUT-IV"));
        assert_eq!(pos.called, dec!(250));
        assert_eq!(pos.uncalled(), dec!(750));
        assert_eq!(pos.net_cash_flow(), dec!(-250));
    }

    #[test]
    fn test_ledger_distribution() {
        let mut ledger = CommitmentLedger::new();
        ledger.register_commitment(FundId::new("PE-BUYOUT-IV"), dec!(1000));
        ledger.apply_call(&call("PE-BUYOUT-IV", dec!(400)));
        ledger.apply_distribution(&FundId::new("PE-BUYOUT-IV"), dec!(100));

        let pos = ledger.position(&FundId::new("PE-BUYOUT-IV"));
        assert_eq!(pos.net_cash_flow(), dec!(-300));
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_ledger_overcall_detected() {
        let mut ledger = CommitmentLedger::new();
        ledger.register_commitment(FundId::new("PE-BUYOUT-IV"), dec!(100));
        ledger.apply_call(&call("PE-BUYOUT-IV", dec!(150)));
        assert!(!ledger.is_consistent());
    }

    #[test]
    fn test_ledger_unknown_fund_is_zero() {
        let ledger = CommitmentLedger::new();
        let pos = ledger.position(&FundId::new("NOPE"));
        assert_eq!(pos.called, Decimal::ZERO);
        assert_eq!(pos.commitment, Decimal::ZERO);
    }
}
