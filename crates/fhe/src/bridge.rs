//! HTTP bridge to a hosted FHE relayer SDK
//!
//! The bridge exposes the SDK over a small JSON API:
//!
//! | request                              | purpose                          |
//! |--------------------------------------|----------------------------------|
//! | `GET  {base}/sdk`                    | manifest: entry points, defaults |
//! | `POST {base}/sdk/init`               | `initSDK()`                      |
//! | `POST {base}/instances`              | `createInstance(config)`         |
//! | `POST {base}/instances/{id}/encrypt` | build + encrypt one input        |

use crate::sdk::{EncryptedInput, EncryptionOutput, FheInstance, FheSdk, InstanceConfig, SdkLoader};
use alloy_primitives::Address;
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Entry points a usable SDK manifest must advertise
pub const REQUIRED_ENTRY_POINTS: [&str; 3] = ["initSDK", "createInstance", "createEncryptedInput"];

/// Bridge connection settings (`[fhe]` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FheConfig {
    /// Base URL of the relayer SDK bridge
    pub bridge_url: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for FheConfig {
    fn default() -> Self {
        Self {
            bridge_url: "http://localhost:8787".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl FheConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.bridge_url.starts_with("http://") && !self.bridge_url.starts_with("https://") {
            return Err("fhe.bridge_url must start with http:// or https://".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("fhe.request_timeout_secs must be > 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SdkManifest {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    entry_points: Vec<String>,
    #[serde(default)]
    network_config: serde_json::Map<String, serde_json::Value>,
}

impl SdkManifest {
    fn missing_entry_points(&self) -> Vec<&'static str> {
        REQUIRED_ENTRY_POINTS
            .into_iter()
            .filter(|required| !self.entry_points.iter().any(|e| e == required))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstanceResponse {
    instance_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EncryptRequest {
    contract_address: String,
    user_address: String,
    values: Vec<EncryptValue>,
}

#[derive(Debug, Serialize)]
struct EncryptValue {
    bits: u8,
    value: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncryptResponse {
    handles: Vec<String>,
    input_proof: String,
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim_start_matches("0x")).with_context(|| format!("invalid hex in {}", field))
}

fn parse_encrypt_response(response: EncryptResponse) -> Result<EncryptionOutput> {
    let handles = response
        .handles
        .iter()
        .enumerate()
        .map(|(i, handle)| decode_hex(&format!("handles[{}]", i), handle))
        .collect::<Result<Vec<_>>>()?;
    let input_proof = decode_hex("inputProof", &response.input_proof)?;
    Ok(EncryptionOutput {
        handles,
        input_proof,
    })
}

async fn read_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("bridge returned {}: {}", status, body);
    }
    response.json::<T>().await.context("malformed bridge response")
}

/// Loads the SDK through the HTTP bridge
pub struct HttpSdkLoader {
    client: Client,
    base_url: String,
}

impl HttpSdkLoader {
    pub fn new(config: &FheConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self {
            client,
            base_url: config.bridge_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SdkLoader for HttpSdkLoader {
    async fn load(&self) -> Result<Arc<dyn FheSdk>> {
        let url = format!("{}/sdk", self.base_url);
        debug!("Fetching SDK manifest from {}", url);

        let response = self.client.get(&url).send().await?;
        let manifest: SdkManifest = read_json(response).await?;

        let missing = manifest.missing_entry_points();
        if !missing.is_empty() {
            bail!("SDK manifest lacks entry points: {}", missing.join(", "));
        }

        info!(
            "Loaded FHE SDK {} from {}",
            manifest.version.as_deref().unwrap_or("(unversioned)"),
            self.base_url
        );
        Ok(Arc::new(BridgeSdk {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            network_config: manifest.network_config,
        }))
    }
}

struct BridgeSdk {
    client: Client,
    base_url: String,
    network_config: serde_json::Map<String, serde_json::Value>,
}

#[async_trait]
impl FheSdk for BridgeSdk {
    async fn init_sdk(&self) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/sdk/init", self.base_url))
            .send()
            .await?;
        read_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    fn network_config(&self) -> serde_json::Map<String, serde_json::Value> {
        self.network_config.clone()
    }

    async fn create_instance(&self, config: InstanceConfig) -> Result<Arc<dyn FheInstance>> {
        let response = self
            .client
            .post(format!("{}/instances", self.base_url))
            .json(&config)
            .send()
            .await?;
        let instance: InstanceResponse = read_json(response).await?;
        debug!("Created FHE instance {}", instance.instance_id);

        Ok(Arc::new(BridgeInstance {
            client: self.client.clone(),
            encrypt_url: format!("{}/instances/{}/encrypt", self.base_url, instance.instance_id),
        }))
    }
}

struct BridgeInstance {
    client: Client,
    encrypt_url: String,
}

impl FheInstance for BridgeInstance {
    fn create_encrypted_input(&self, contract: Address, user: Address) -> Box<dyn EncryptedInput> {
        Box::new(BridgeInput {
            client: self.client.clone(),
            url: self.encrypt_url.clone(),
            request: EncryptRequest {
                contract_address: contract.to_checksum(None),
                user_address: user.to_checksum(None),
                values: Vec::new(),
            },
        })
    }
}

struct BridgeInput {
    client: Client,
    url: String,
    request: EncryptRequest,
}

#[async_trait]
impl EncryptedInput for BridgeInput {
    fn add16(&mut self, value: u16) {
        self.request.values.push(EncryptValue {
            bits: 16,
            value: u64::from(value),
        });
    }

    fn add8(&mut self, value: u8) {
        self.request.values.push(EncryptValue {
            bits: 8,
            value: u64::from(value),
        });
    }

    async fn encrypt(self: Box<Self>) -> Result<EncryptionOutput> {
        let response = self.client.post(&self.url).json(&self.request).send().await?;
        parse_encrypt_response(read_json(response).await?)
    }
}
