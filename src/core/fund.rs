use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a fund in a capital call program.
///
/// A fund can represent a buyout vehicle, a venture fund, a fund-of-funds
/// sleeve, or any entity that issues capital calls against a commitment.
///
/// # Examples
///
/// ```
/// use pacing_engine::core::fund::FundId;
///
/// let buyout = FundId::new("PE-BUYOUT-IV");
/// let venture = FundId::new("VC-GROWTH-II");
/// assert_ne!(buyout, venture);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundId(String);

impl FundId {
    /// Create a new fund identifier.
    ///
    /// Convention: strategy prefix followed by vehicle name and vintage
    /// numeral (e.g., "PE-BUYOUT-IV", "VC-GROWTH-II").
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this fund ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The strategy prefix of the identifier, if it follows the
    /// `STRATEGY-NAME-VINTAGE` convention ("PE-BUYOUT-IV" → "PE").
    pub fn strategy(&self) -> Option<&str> {
        self.0.split_once('-').map(|(prefix, _)| prefix)
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FundId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
