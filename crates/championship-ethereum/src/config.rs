//! Configuration types for the championship contract client

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sepolia chain ID
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// EncryptedRallyChampionship deployment on Sepolia
pub const SEPOLIA_CONTRACT_ADDRESS: &str = "0x92F2dBC25D02F080079a4FC0557eF14274104C5f";

/// Configuration for the championship contract client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EthereumChampionshipConfig {
    /// RPC URL for the Ethereum node
    /// Example: "https://ethereum-sepolia-rpc.publicnode.com"
    pub rpc_url: String,

    /// Chain ID (11155111 = Sepolia, 31337 = local anvil/hardhat)
    pub chain_id: u64,

    /// Deployed EncryptedRallyChampionship contract address
    /// Must be a valid Ethereum address (0x-prefixed, 42 characters)
    pub contract_address: String,

    /// Private key of the driver wallet (optional for read-only operations)
    /// Format: 0x-prefixed hex string (64 hex chars + 0x prefix = 66 chars)
    pub private_key: Option<String>,

    /// Number of confirmations to wait for (default 2)
    pub confirmation_blocks: u64,

    /// Give up waiting for confirmations after this many seconds.
    /// When unset the provider waits indefinitely.
    pub confirmation_timeout_secs: Option<u64>,

    /// Block explorer used for transaction links
    /// Example: "https://sepolia.etherscan.io"
    pub explorer_url: Option<String>,
}

impl Default for EthereumChampionshipConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            chain_id: SEPOLIA_CHAIN_ID,
            contract_address: SEPOLIA_CONTRACT_ADDRESS.to_string(),
            private_key: None,
            confirmation_blocks: 2,
            confirmation_timeout_secs: None,
            explorer_url: Some("https://sepolia.etherscan.io".to_string()),
        }
    }
}

impl EthereumChampionshipConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rally_championship_ethereum::EthereumChampionshipConfig;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = EthereumChampionshipConfig::from_file("rally.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml_str(toml: &str) -> Result<Self, anyhow::Error> {
        let config: Self = toml::from_str(toml)?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// Returns `Ok(())` if valid, otherwise returns error message
    pub fn validate(&self) -> Result<(), String> {
        if self.rpc_url.is_empty() {
            return Err("rpc_url cannot be empty".to_string());
        }

        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err("rpc_url must start with http:// or https://".to_string());
        }

        if self.chain_id == 0 {
            return Err("chain_id must be > 0".to_string());
        }

        validate_hex_field("contract_address", &self.contract_address, 40)?;

        if let Some(ref pk) = self.private_key {
            if !pk.is_empty() {
                validate_hex_field("private_key", pk, 64)?;
            }
        }

        if self.confirmation_blocks == 0 {
            return Err("confirmation_blocks must be > 0".to_string());
        }

        if self.confirmation_blocks > 100 {
            return Err("confirmation_blocks too large (max 100)".to_string());
        }

        if self.confirmation_timeout_secs == Some(0) {
            return Err("confirmation_timeout_secs must be > 0 when set".to_string());
        }

        if let Some(ref explorer) = self.explorer_url {
            if !explorer.starts_with("http://") && !explorer.starts_with("https://") {
                return Err("explorer_url must start with http:// or https://".to_string());
            }
        }

        Ok(())
    }

    /// Check if configuration supports write operations (has private key)
    pub fn can_write(&self) -> bool {
        self.private_key.as_deref().is_some_and(|pk| !pk.is_empty())
    }

    /// Explorer link for a transaction, if an explorer is configured
    pub fn transaction_url(&self, tx_hash: impl std::fmt::Display) -> Option<String> {
        self.explorer_url
            .as_ref()
            .map(|explorer| format!("{}/tx/{}", explorer.trim_end_matches('/'), tx_hash))
    }
}

fn validate_hex_field(name: &str, value: &str, hex_len: usize) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} cannot be empty", name));
    }

    let Some(hex) = value.strip_prefix("0x") else {
        return Err(format!("{} must start with 0x", name));
    };

    if hex.len() != hex_len {
        return Err(format!(
            "{} must be {} characters (0x + {} hex), got {}",
            name,
            hex_len + 2,
            hex_len,
            value.len()
        ));
    }

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("{} must contain only hex characters after 0x", name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_default_config_validation() {
        let config = EthereumChampionshipConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chain_id, SEPOLIA_CHAIN_ID);
        assert_eq!(config.confirmation_blocks, 2);
    }

    #[test]
    fn test_invalid_rpc_url() {
        let mut config = EthereumChampionshipConfig::default();
        config.rpc_url = String::new();
        assert!(config.validate().is_err());

        config.rpc_url = "ws://localhost:8545".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_contract_address() {
        let mut config = EthereumChampionshipConfig::default();

        config.contract_address = String::new();
        assert!(config.validate().is_err());

        config.contract_address = "92F2dBC25D02F080079a4FC0557eF14274104C5f".to_string();
        assert!(config.validate().is_err());

        config.contract_address = "0x12345".to_string();
        assert!(config.validate().is_err());

        config.contract_address = "0x12345678901234567890123456789012345678XY".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_private_key_validation() {
        let mut config = EthereumChampionshipConfig::default();

        config.private_key = Some(PRIVATE_KEY.to_string());
        assert!(config.validate().is_ok());
        assert!(config.can_write());

        config.private_key = Some("0x1234".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_confirmation_validation() {
        let mut config = EthereumChampionshipConfig::default();

        config.confirmation_blocks = 0;
        assert!(config.validate().is_err());

        config.confirmation_blocks = 101;
        assert!(config.validate().is_err());

        config.confirmation_blocks = 2;
        config.confirmation_timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.confirmation_timeout_secs = Some(120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_can_write() {
        let mut config = EthereumChampionshipConfig::default();
        assert!(!config.can_write());

        config.private_key = Some(String::new());
        assert!(!config.can_write());

        config.private_key = Some(PRIVATE_KEY.to_string());
        assert!(config.can_write());
    }

    #[test]
    fn test_transaction_url() {
        let config = EthereumChampionshipConfig::default();
        assert_eq!(
            config.transaction_url("0xabc").as_deref(),
            Some("https://sepolia.etherscan.io/tx/0xabc")
        );

        let config = EthereumChampionshipConfig {
            explorer_url: None,
            ..Default::default()
        };
        assert!(config.transaction_url("0xabc").is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let toml = r#"
rpc_url = "http://localhost:8545"
chain_id = 31337
contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
confirmation_blocks = 1
"#;

        let config = EthereumChampionshipConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.contract_address, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(config.confirmation_blocks, 1);
        // Unset fields keep their defaults
        assert!(config.private_key.is_none());
        assert_eq!(config.explorer_url.as_deref(), Some("https://sepolia.etherscan.io"));
    }

    #[test]
    fn test_from_toml_str_rejects_invalid() {
        let toml = r#"
contract_address = "0xinvalid"
"#;
        assert!(EthereumChampionshipConfig::from_toml_str(toml).is_err());
    }
}
