use std::fmt;

use serde::{Deserialize, Serialize};

/// Display text of the genesis record's payload.
pub const GENESIS_SENTINEL: &str = "Genesis Block";

/// Content carried by a ledger record.
///
/// A closed set keeps the digest input serialization identical across
/// implementations: the genesis record carries a fixed marker, every other
/// record carries one integer measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    Genesis,
    Measurement(i64),
}

impl Payload {
    /// The measurement value, if this is not the genesis marker.
    pub fn measurement(&self) -> Option<i64> {
        match self {
            Self::Genesis => None,
            Self::Measurement(value) => Some(*value),
        }
    }

    pub fn is_genesis(&self) -> bool {
        matches!(self, Self::Genesis)
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Self::Measurement(value)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis => f.write_str(GENESIS_SENTINEL),
            Self::Measurement(value) => write!(f, "{value}"),
        }
    }
}
