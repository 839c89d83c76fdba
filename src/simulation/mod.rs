pub mod distribution;
pub mod monte_carlo;
pub mod risk;
