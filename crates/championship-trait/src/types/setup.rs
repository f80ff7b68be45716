//! Car setup types: the plaintext parameter tuple and its encrypted form

use alloy_primitives::{B256, Bytes};
use serde::{Deserialize, Serialize};

/// Plaintext car setup in the parameter order of `updateCarSetup`.
///
/// The first four values are encrypted as `euint16`, the last three as
/// `euint8`; the field widths mirror that split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetupParameters {
    pub engine_tuning: u16,
    pub suspension_balance: u16,
    pub aero_package: u16,
    pub tire_compound: u16,
    pub boost_response: u8,
    pub brake_bias: u8,
    pub traction_control: u8,
}

impl SetupParameters {
    /// Number of values submitted to the contract
    pub const COUNT: usize = 7;

    /// The 16-bit values, in submission order
    pub fn sixteen_bit(&self) -> [u16; 4] {
        [
            self.engine_tuning,
            self.suspension_balance,
            self.aero_package,
            self.tire_compound,
        ]
    }

    /// The 8-bit values, in submission order
    pub fn eight_bit(&self) -> [u8; 3] {
        [self.boost_response, self.brake_bias, self.traction_control]
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Ciphertext handles and input proof ready for `updateCarSetup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedCarSetup {
    pub engine_tuning: B256,
    pub suspension_balance: B256,
    pub aero_package: B256,
    pub tire_compound: B256,
    pub boost_response: B256,
    pub brake_bias: B256,
    pub traction_control: B256,
    /// Validity proof covering all seven handles
    pub input_proof: Bytes,
}

impl EncryptedCarSetup {
    /// Build from handles in submission order
    pub fn from_handles(handles: [B256; SetupParameters::COUNT], input_proof: Bytes) -> Self {
        let [
            engine_tuning,
            suspension_balance,
            aero_package,
            tire_compound,
            boost_response,
            brake_bias,
            traction_control,
        ] = handles;

        Self {
            engine_tuning,
            suspension_balance,
            aero_package,
            tire_compound,
            boost_response,
            brake_bias,
            traction_control,
            input_proof,
        }
    }

    /// Handles in submission order
    pub fn handles(&self) -> [B256; SetupParameters::COUNT] {
        [
            self.engine_tuning,
            self.suspension_balance,
            self.aero_package,
            self.tire_compound,
            self.boost_response,
            self.brake_bias,
            self.traction_control,
        ]
    }
}
