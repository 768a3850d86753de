//! Bounded outcome meters (chaos, risk)

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Integer meter that always stays within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Meter(u8);

impl Meter {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    /// Create a meter, clamping the value into range
    pub fn new(value: i32) -> Self {
        Self(value.clamp(i32::from(Self::MIN), i32::from(Self::MAX)) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Apply a signed delta, clamping the result
    pub fn apply(self, delta: i32) -> Self {
        Self::new(i32::from(self.0).saturating_add(delta))
    }
}

impl From<Meter> for u8 {
    fn from(meter: Meter) -> Self {
        meter.0
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// Clamp on the way in so a hand-edited snapshot cannot break the range.
impl<'de> Deserialize<'de> for Meter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i32::deserialize(deserializer)?;
        Ok(Meter::new(raw))
    }
}
