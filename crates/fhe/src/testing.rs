//! Deterministic SDK double for tests
//!
//! Handles are `keccak256(contract ‖ user ‖ nonce ‖ index ‖ bits ‖ value)` and
//! the proof is the hash over all handles, so outputs are reproducible yet
//! differ per encryption.

use crate::sdk::{EncryptedInput, EncryptionOutput, FheInstance, FheSdk, InstanceConfig, SdkLoader};
use alloy_primitives::{Address, keccak256};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Where the double should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Load,
    Init,
    CreateInstance,
    Encrypt,
    WrongHandleCount,
    ShortHandle,
    EmptyProof,
}

#[derive(Default)]
struct MockState {
    failure: Mutex<Option<(MockFailure, bool)>>,
    init_delay: Mutex<Option<Duration>>,
    loads: AtomicUsize,
    inits: AtomicUsize,
    instances: AtomicUsize,
    nonce: AtomicU64,
    last_inputs: Mutex<Vec<(u8, u64)>>,
    last_scope: Mutex<Option<(Address, Address)>>,
    last_config: Mutex<Option<InstanceConfig>>,
}

/// In-process stand-in for the FHE SDK; acts as its own loader
#[derive(Clone, Default)]
pub struct MockSdk {
    state: Arc<MockState>,
}

impl MockSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every time at `failure`
    pub fn fail(self, failure: MockFailure) -> Self {
        *lock(&self.state.failure) = Some((failure, false));
        self
    }

    /// Fail the first time `failure` is reached, then behave
    pub fn fail_once(self, failure: MockFailure) -> Self {
        *lock(&self.state.failure) = Some((failure, true));
        self
    }

    /// Make `init_sdk` slow so concurrent callers overlap
    pub fn with_init_delay(self, delay: Duration) -> Self {
        *lock(&self.state.init_delay) = Some(delay);
        self
    }

    pub fn load_count(&self) -> usize {
        self.state.loads.load(Ordering::SeqCst)
    }

    pub fn init_count(&self) -> usize {
        self.state.inits.load(Ordering::SeqCst)
    }

    pub fn instance_count(&self) -> usize {
        self.state.instances.load(Ordering::SeqCst)
    }

    /// `(bits, value)` pairs of the most recent encryption, in order
    pub fn last_inputs(&self) -> Vec<(u8, u64)> {
        lock(&self.state.last_inputs).clone()
    }

    /// `(contract, user)` of the most recent input builder
    pub fn last_scope(&self) -> Option<(Address, Address)> {
        *lock(&self.state.last_scope)
    }

    pub fn last_config(&self) -> Option<InstanceConfig> {
        lock(&self.state.last_config).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockState {
    fn should_fail(&self, at: MockFailure) -> bool {
        let mut failure = lock(&self.failure);
        match *failure {
            Some((configured, once)) if configured == at => {
                if once {
                    *failure = None;
                }
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl SdkLoader for MockSdk {
    async fn load(&self) -> Result<Arc<dyn FheSdk>> {
        self.state.loads.fetch_add(1, Ordering::SeqCst);
        if self.state.should_fail(MockFailure::Load) {
            bail!("script failed to load");
        }
        Ok(Arc::new(self.clone()))
    }
}

#[async_trait]
impl FheSdk for MockSdk {
    async fn init_sdk(&self) -> Result<()> {
        self.state.inits.fetch_add(1, Ordering::SeqCst);
        let delay = *lock(&self.state.init_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.state.should_fail(MockFailure::Init) {
            bail!("wasm module failed to instantiate");
        }
        Ok(())
    }

    fn network_config(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut config = serde_json::Map::new();
        config.insert("chainId".to_string(), 11155111.into());
        config.insert("relayerUrl".to_string(), "mock://relayer".into());
        config
    }

    async fn create_instance(&self, config: InstanceConfig) -> Result<Arc<dyn FheInstance>> {
        if self.state.should_fail(MockFailure::CreateInstance) {
            bail!("public key fetch failed");
        }
        self.state.instances.fetch_add(1, Ordering::SeqCst);
        *lock(&self.state.last_config) = Some(config);
        Ok(Arc::new(self.clone()))
    }
}

impl FheInstance for MockSdk {
    fn create_encrypted_input(&self, contract: Address, user: Address) -> Box<dyn EncryptedInput> {
        *lock(&self.state.last_scope) = Some((contract, user));
        Box::new(MockInput {
            state: self.state.clone(),
            contract,
            user,
            values: Vec::new(),
        })
    }
}

struct MockInput {
    state: Arc<MockState>,
    contract: Address,
    user: Address,
    values: Vec<(u8, u64)>,
}

#[async_trait]
impl EncryptedInput for MockInput {
    fn add16(&mut self, value: u16) {
        self.values.push((16, u64::from(value)));
    }

    fn add8(&mut self, value: u8) {
        self.values.push((8, u64::from(value)));
    }

    async fn encrypt(self: Box<Self>) -> Result<EncryptionOutput> {
        *lock(&self.state.last_inputs) = self.values.clone();
        if self.state.should_fail(MockFailure::Encrypt) {
            return Err(anyhow!("relayer rejected the input"));
        }

        let nonce = self.state.nonce.fetch_add(1, Ordering::SeqCst);
        let mut handles: Vec<Vec<u8>> = self
            .values
            .iter()
            .enumerate()
            .map(|(index, (bits, value))| {
                let mut preimage = Vec::with_capacity(20 + 20 + 8 + 8 + 1 + 8);
                preimage.extend_from_slice(self.contract.as_slice());
                preimage.extend_from_slice(self.user.as_slice());
                preimage.extend_from_slice(&nonce.to_be_bytes());
                preimage.extend_from_slice(&(index as u64).to_be_bytes());
                preimage.push(*bits);
                preimage.extend_from_slice(&value.to_be_bytes());
                keccak256(&preimage).to_vec()
            })
            .collect();

        let mut input_proof = keccak256(handles.concat()).to_vec();

        if self.state.should_fail(MockFailure::WrongHandleCount) {
            handles.pop();
        }
        if self.state.should_fail(MockFailure::ShortHandle) {
            if let Some(first) = handles.first_mut() {
                first.truncate(16);
            }
        }
        if self.state.should_fail(MockFailure::EmptyProof) {
            input_proof.clear();
        }

        Ok(EncryptionOutput {
            handles,
            input_proof,
        })
    }
}
