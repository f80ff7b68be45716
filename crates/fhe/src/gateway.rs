//! Encryption gateway
//!
//! Lazily initializes the SDK on first use and caches the resulting instance
//! for the life of the gateway. Concurrent first callers wait on a single
//! initialization; a failed attempt leaves the gateway uninitialized so the
//! next call tries again.

use crate::error::{FheError, Result};
use crate::sdk::{FheInstance, InstanceConfig, NetworkBinding, SdkLoader};
use alloy_primitives::Address;
use rally_championship_trait::{B256, Bytes, EncryptedCarSetup, SetupParameters};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Size in bytes of a ciphertext handle
pub const HANDLE_LEN: usize = 32;

/// Lifecycle of the shared encryption context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayState {
    Uninitialized,
    Initializing,
    Ready,
}

impl fmt::Display for GatewayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Initializing => write!(f, "initializing"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// Shared encryption context; wrap in an `Arc` to share across submissions
pub struct EncryptionGateway {
    loader: Arc<dyn SdkLoader>,
    network: Option<NetworkBinding>,
    instance: OnceCell<Arc<dyn FheInstance>>,
    initializing: AtomicBool,
}

/// Clears the initializing flag when an attempt ends, including on cancellation
struct InitializingGuard<'a>(&'a AtomicBool);

impl Drop for InitializingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl EncryptionGateway {
    /// Create a gateway. `network` is the wallet's provider binding; without
    /// it initialization fails with [`FheError::Environment`].
    pub fn new(loader: Arc<dyn SdkLoader>, network: Option<NetworkBinding>) -> Self {
        Self {
            loader,
            network,
            instance: OnceCell::new(),
            initializing: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> GatewayState {
        if self.instance.initialized() {
            GatewayState::Ready
        } else if self.initializing.load(Ordering::SeqCst) {
            GatewayState::Initializing
        } else {
            GatewayState::Uninitialized
        }
    }

    /// Initialize the SDK instance, or return the cached one
    pub async fn initialize(&self) -> Result<Arc<dyn FheInstance>> {
        self.instance
            .get_or_try_init(|| self.create_instance())
            .await
            .cloned()
    }

    async fn create_instance(&self) -> Result<Arc<dyn FheInstance>> {
        let network = self.network.clone().ok_or_else(|| {
            FheError::Environment("no network provider available for the FHE SDK".to_string())
        })?;

        self.initializing.store(true, Ordering::SeqCst);
        let _guard = InitializingGuard(&self.initializing);
        info!("Initializing FHE SDK for chain {}", network.chain_id);

        let sdk = self.loader.load().await.map_err(|e| {
            warn!("FHE SDK load failed: {:#}", e);
            FheError::SdkLoad(format!("{:#}", e))
        })?;

        sdk.init_sdk().await.map_err(|e| {
            warn!("FHE SDK init failed: {:#}", e);
            FheError::SdkInit(format!("{:#}", e))
        })?;

        let config = InstanceConfig {
            defaults: sdk.network_config(),
            network,
        };
        let instance = sdk.create_instance(config).await.map_err(|e| {
            warn!("FHE instance creation failed: {:#}", e);
            FheError::SdkInit(format!("instance creation: {:#}", e))
        })?;

        info!("FHE SDK ready");
        Ok(instance)
    }

    /// Encrypt the seven setup parameters for `user` calling `contract_address`.
    ///
    /// Values are added as four 16-bit inputs (engine tuning, suspension
    /// balance, aero package, tire compound) followed by three 8-bit inputs
    /// (boost response, brake bias, traction control).
    pub async fn encrypt_setup(
        &self,
        params: &SetupParameters,
        contract_address: &str,
        user: Address,
    ) -> Result<EncryptedCarSetup> {
        let instance = self.initialize().await?;
        let contract = normalize_address(contract_address)?;
        debug!(
            "Encrypting setup for {} on contract {}",
            user,
            contract.to_checksum(None)
        );

        let mut input = instance.create_encrypted_input(contract, user);
        for value in params.sixteen_bit() {
            input.add16(value);
        }
        for value in params.eight_bit() {
            input.add8(value);
        }

        let output = input
            .encrypt()
            .await
            .map_err(|e| FheError::Encryption(format!("{:#}", e)))?;

        if output.handles.len() != SetupParameters::COUNT {
            return Err(FheError::Encryption(format!(
                "expected {} handles, got {}",
                SetupParameters::COUNT,
                output.handles.len()
            )));
        }
        if output.input_proof.is_empty() {
            return Err(FheError::Encryption("empty input proof".to_string()));
        }

        let mut handles = [B256::ZERO; SetupParameters::COUNT];
        for (slot, (handle, raw)) in handles.iter_mut().zip(&output.handles).enumerate() {
            if raw.len() != HANDLE_LEN {
                return Err(FheError::Encryption(format!(
                    "handle {} is {} bytes, expected {}",
                    slot,
                    raw.len(),
                    HANDLE_LEN
                )));
            }
            *handle = B256::from_slice(raw);
        }

        debug!("Encrypted setup with {}-byte proof", output.input_proof.len());
        Ok(EncryptedCarSetup::from_handles(
            handles,
            Bytes::from(output.input_proof),
        ))
    }
}

/// Parse `address`, enforcing the EIP-55 checksum when it is mixed-case
pub fn normalize_address(address: &str) -> Result<Address> {
    let invalid = |reason: &str| FheError::InvalidAddress(format!("{}: {}", address, reason));

    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| invalid("missing 0x prefix"))?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("expected 40 hex characters"));
    }

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{}", hex), None).map_err(|_| invalid("bad checksum"))
    } else {
        Address::from_str(hex).map_err(|e| invalid(&e.to_string()))
    }
}
