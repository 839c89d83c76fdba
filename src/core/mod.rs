pub mod call;
pub mod fund;
pub mod ledger;
pub mod params;
