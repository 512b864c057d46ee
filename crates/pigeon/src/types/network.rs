//! Network identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the network a transaction is bound to.
///
/// The signature covers the network identifier, so a transaction signed for
/// one network is rejected by every other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkId(u64);

impl NetworkId {
    /// Core mainnet.
    pub const MAINNET: Self = Self(1);

    /// Devin testnet.
    pub const DEVIN: Self = Self(3);

    /// Creates a network identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric identifier.
    pub fn id(&self) -> u64 {
        self.0
    }

    /// Returns the two-character address prefix used on this network.
    pub fn address_prefix(&self) -> &'static str {
        match self.0 {
            1 => "cb",
            3 => "ab",
            _ => "ce",
        }
    }
}

impl Default for NetworkId {
    fn default() -> Self {
        Self::MAINNET
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NetworkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
