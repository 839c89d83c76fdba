pub mod curve;
pub mod schedule;
