use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a charge, stable for the charge's whole lifetime.
///
/// Force computation matches charges by id rather than by index, so a store never
/// hands out the same id twice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChargeId(pub u64);

impl ChargeId {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ChargeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
