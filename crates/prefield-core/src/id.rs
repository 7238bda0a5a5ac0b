//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based index of a simulation period.
///
/// Period `t` names the state produced by the `t`-th update, so the first
/// recorded entry of every time series belongs to `Period(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period(pub u64);

impl Period {
    /// The period following this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

impl From<u64> for Period {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
