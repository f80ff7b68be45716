//! Traits modelling the remotely loaded FHE encryption SDK
//!
//! The SDK is obtained through an [`SdkLoader`], initialized once, and then
//! produces an [`FheInstance`] bound to the network. Each encryption opens a
//! fresh [`EncryptedInput`] builder scoped to one contract and one user.
//!
//! SDK failures are opaque (`anyhow`); the gateway assigns them to the
//! [`FheError`](crate::FheError) variant of the phase they happened in.

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The wallet-side network the instance is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkBinding {
    pub rpc_url: String,
    pub chain_id: u64,
}

/// Instance configuration: the SDK's network defaults plus the binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub defaults: serde_json::Map<String, serde_json::Value>,
    pub network: NetworkBinding,
}

/// Raw encryption result as returned by the SDK
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptionOutput {
    pub handles: Vec<Vec<u8>>,
    pub input_proof: Vec<u8>,
}

/// Fetches the SDK
#[async_trait]
pub trait SdkLoader: Send + Sync {
    async fn load(&self) -> anyhow::Result<Arc<dyn FheSdk>>;
}

/// A loaded SDK
#[async_trait]
pub trait FheSdk: Send + Sync {
    /// One-time SDK initialization (wasm, key material)
    async fn init_sdk(&self) -> anyhow::Result<()>;

    /// Default configuration for the target network
    fn network_config(&self) -> serde_json::Map<String, serde_json::Value>;

    async fn create_instance(&self, config: InstanceConfig) -> anyhow::Result<Arc<dyn FheInstance>>;
}

/// An initialized SDK instance
pub trait FheInstance: Send + Sync {
    /// Open an input builder for `contract` and `user`
    fn create_encrypted_input(&self, contract: Address, user: Address) -> Box<dyn EncryptedInput>;
}

/// Builder accumulating plaintext values for one encryption
#[async_trait]
pub trait EncryptedInput: Send {
    fn add16(&mut self, value: u16);

    fn add8(&mut self, value: u8);

    /// Encrypt the accumulated values, consuming the builder
    async fn encrypt(self: Box<Self>) -> anyhow::Result<EncryptionOutput>;
}
