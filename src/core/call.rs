use crate::core::fund::FundId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single capital call issued by a fund against an investor's commitment.
///
/// Represents the fact that the investor must contribute `amount` to `fund`
/// on `date`. This is the atomic unit of the pacing schedule.
///
/// Capital calls are immutable once created. The pacing engine operates on
/// ordered collections of calls to compute invested capital and cash flow.
///
/// # Examples
///
/// ```
/// use pacing_engine::core::call::CapitalCall;
/// use pacing_engine::core::fund::FundId;
/// use chrono::Utc;
/// use rust_decimal_macros::dec;
///
/// let call = CapitalCall::new(
///     FundId::new("PE-BUYOUT-IV"),
///     0,
///     Utc::now(),
///     dec!(1_000_000),
/// );
///
/// assert_eq!(call.amount(), dec!(1_000_000));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalCall {
    /// Unique identifier for this call.
    id: Uuid,
    /// The fund issuing the call.
    fund: FundId,
    /// Zero-based position of this call in the schedule.
    sequence: usize,
    /// The date the call is due.
    date: DateTime<Utc>,
    /// The amount called. Must be positive.
    amount: Decimal,
    /// Optional notice reference or memo.
    reference: Option<String>,
}

impl CapitalCall {
    /// Create a new capital call.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(fund: FundId, sequence: usize, date: DateTime<Utc>, amount: Decimal) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "Capital call amount must be positive, got {}",
            amount
        );
        Self {
            id: Uuid::new_v4(),
            fund,
            sequence,
            date,
            amount,
            reference: None,
        }
    }

    /// Create a call with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        fund: FundId,
        sequence: usize,
        date: DateTime<Utc>,
        amount: Decimal,
    ) -> Self {
        assert!(amount > Decimal::ZERO);
        Self {
            id,
            fund,
            sequence,
            date,
            amount,
            reference: None,
        }
    }

    /// Set a notice reference string.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn fund(&self) -> &FundId {
        &self.fund
    }

    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// An ordered collection of capital calls for one program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallSchedule {
    calls: Vec<CapitalCall>,
}

impl CallSchedule {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn add(&mut self, call: CapitalCall) {
        self.calls.push(call);
    }

    pub fn calls(&self) -> &[CapitalCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Total amount called across the schedule.
    pub fn total_called(&self) -> Decimal {
        self.calls.iter().map(|c| c.amount()).sum()
    }

    /// All unique funds referenced in this schedule.
    pub fn funds(&self) -> Vec<FundId> {
        let mut funds: Vec<FundId> = self.calls.iter().map(|c| c.fund().clone()).collect();
        funds.sort();
        funds.dedup();
        funds
    }
}

impl FromIterator<CapitalCall> for CallSchedule {
    fn from_iter<T: IntoIterator<Item = CapitalCall>>(iter: T) -> Self {
        Self {
            calls: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_call(sequence: usize, amount: Decimal) -> CapitalCall {
        CapitalCall::new(FundId::new("PE-BUYOUT-IV"), sequence, Utc::now(), amount)
    }

    #[test]
    fn test_call_creation() {
        let call = sample_call(0, dec!(1000));
        assert_eq!(call.fund().as_str(), "PE-BUYOUT-IV");
        assert_eq!(call.sequence(), 0);
        assert_eq!(call.amount(), dec!(1000));
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_call_zero_amount() {
        sample_call(0, Decimal::ZERO);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_call_negative_amount() {
        sample_call(0, dec!(-100));
    }

    #[test]
    fn test_call_with_fixed_id_survives_serde() {
        let id = Uuid::nil();
        let call = CapitalCall::with_id(
            id,
            FundId::new("PE-BUYOUT-IV"),
            3,
            Utc::now(),
            dec!(500_000),
        )
        .with_reference("PE-BUYOUT-IV/CALL-04");

        let json = serde_json::to_string(&call).unwrap();
        let restored: CapitalCall = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id(), id);
        assert_eq!(restored.sequence(), 3);
        assert_eq!(restored.reference(), Some("PE-BUYOUT-IV/CALL-04"));
    }

    #[test]
    fn test_schedule_total() {
        let mut schedule = CallSchedule::new();
        schedule.add(sample_call(0, dec!(100)));
        schedule.add(sample_call(1, dec!(200)));
        assert_eq!(schedule.total_called(), dec!(300));
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_schedule_funds() {
        let mut schedule = CallSchedule::new();
        schedule.add(sample_call(0, dec!(100)));
        schedule.add(CapitalCall::new(
            FundId::new("VC-GROWTH-II"),
            0,
            Utc::now(),
            dec!(50),
        ));
        assert_eq!(schedule.funds().len(), 2);
    }
}
