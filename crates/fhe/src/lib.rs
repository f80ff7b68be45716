//! FHE encryption gateway for EncryptedRally car setups
//!
//! [`EncryptionGateway`] turns the seven plaintext setup parameters into
//! ciphertext handles plus an input proof that the championship contract
//! accepts. The SDK itself sits behind the traits in [`sdk`]; [`bridge`]
//! provides the HTTP implementation used by the CLI.

pub mod bridge;
pub mod error;
pub mod gateway;
pub mod sdk;

#[cfg(any(test, feature = "testutils"))]
pub mod testing;

pub use bridge::{FheConfig, HttpSdkLoader};
pub use error::{FheError, Result};
pub use gateway::{EncryptionGateway, GatewayState, normalize_address};
pub use sdk::{EncryptedInput, EncryptionOutput, FheInstance, FheSdk, InstanceConfig, NetworkBinding, SdkLoader};
