//! Garage configuration: championship client settings plus the FHE bridge
//!
//! ```toml
//! [championship]
//! rpc_url = "https://ethereum-sepolia-rpc.publicnode.com"
//! contract_address = "0x92F2dBC25D02F080079a4FC0557eF14274104C5f"
//! confirmation_blocks = 2
//!
//! [fhe]
//! bridge_url = "http://localhost:8787"
//! ```
//!
//! Command-line flags (and their environment variables) override file values.

use crate::error::{GarageError, Result};
use rally_championship_ethereum::EthereumChampionshipConfig;
use rally_fhe::{FheConfig, NetworkBinding};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GarageConfig {
    pub championship: EthereumChampionshipConfig,
    pub fhe: FheConfig,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub rpc_url: Option<String>,
    pub chain_id: Option<u64>,
    pub contract_address: Option<String>,
    pub private_key: Option<String>,
    pub fhe_bridge_url: Option<String>,
}

impl GarageConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| GarageError::Config(format!("invalid TOML: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| GarageError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` (or defaults), apply `overrides`, then validate
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let championship = &mut self.championship;
        if let Some(rpc_url) = overrides.rpc_url {
            championship.rpc_url = rpc_url;
        }
        if let Some(chain_id) = overrides.chain_id {
            championship.chain_id = chain_id;
        }
        if let Some(contract_address) = overrides.contract_address {
            championship.contract_address = contract_address;
        }
        if let Some(private_key) = overrides.private_key {
            championship.private_key = Some(private_key);
        }
        if let Some(bridge_url) = overrides.fhe_bridge_url {
            self.fhe.bridge_url = bridge_url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.championship.validate().map_err(GarageError::Config)?;
        self.fhe.validate().map_err(GarageError::Config)
    }

    /// Network binding handed to the FHE SDK; only available with a wallet
    pub fn network_binding(&self) -> Option<NetworkBinding> {
        self.championship.can_write().then(|| NetworkBinding {
            rpc_url: self.championship.rpc_url.clone(),
            chain_id: self.championship.chain_id,
        })
    }
}
