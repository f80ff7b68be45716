//! Driver-related types

use alloy_primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Driver tier as stored by the contract (`uint8` enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverTier {
    /// Tier every driver starts at
    Rookie,
    /// A tier value this client does not know by name
    Unrecognized(u8),
}

impl DriverTier {
    /// Raw value as encoded on chain
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Rookie => 0,
            Self::Unrecognized(value) => *value,
        }
    }
}

impl From<u8> for DriverTier {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Rookie,
            other => Self::Unrecognized(other),
        }
    }
}

impl fmt::Display for DriverTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rookie => write!(f, "Rookie"),
            Self::Unrecognized(value) => write!(f, "Tier {}", value),
        }
    }
}

/// Public driver profile returned by `getDriverProfile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverProfile {
    /// Label of the last submitted car ("brand model"), empty if none
    pub car_model: String,

    /// Driver tier
    pub tier: DriverTier,

    /// Registration timestamp (seconds), 0 for unregistered addresses
    pub joined_at: u64,

    /// Timestamp of the last car setup update (seconds), 0 if never updated
    pub car_setup_updated_at: u64,
}

impl Default for DriverProfile {
    fn default() -> Self {
        Self {
            car_model: String::new(),
            tier: DriverTier::Rookie,
            joined_at: 0,
            car_setup_updated_at: 0,
        }
    }
}

impl DriverProfile {
    /// The contract returns an all-zero profile for unknown drivers
    pub fn is_registered(&self) -> bool {
        self.joined_at != 0
    }

    /// Whether the driver has submitted at least one car setup
    pub fn has_setup(&self) -> bool {
        self.car_setup_updated_at != 0
    }
}

/// `DriverRegistered(address indexed driver, uint8 tier)` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRegisteredEvent {
    /// Address of the newly registered driver
    pub driver: Address,

    /// Tier assigned at registration
    pub tier: DriverTier,

    /// Block the event was emitted in
    pub block_number: Option<u64>,

    /// Transaction that emitted the event
    pub transaction_hash: Option<TxHash>,
}
