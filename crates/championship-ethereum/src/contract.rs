//! Contract client holding connection details for the championship contract
//!
//! Providers are created per operation and never cached.

use crate::config::EthereumChampionshipConfig;
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use rally_championship_trait::{ChampionshipError, ChampionshipResult};
use std::str::FromStr;

/// Contract client that manages contract connection details
pub struct ContractClient {
    contract_address: Address,
    rpc_url: String,
    signer: Option<PrivateKeySigner>,
}

impl ContractClient {
    /// Creates a new contract client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Contract address is invalid
    /// - Private key is invalid (if provided)
    pub fn new(config: &EthereumChampionshipConfig) -> ChampionshipResult<Self> {
        let contract_address = Address::from_str(&config.contract_address).map_err(|e| {
            ChampionshipError::InvalidAddress(format!("'{}': {}", config.contract_address, e))
        })?;

        let signer = match config.private_key.as_deref() {
            Some(pk) if !pk.is_empty() => Some(pk.parse::<PrivateKeySigner>().map_err(|e| {
                ChampionshipError::Configuration(format!("Invalid private key: {}", e))
            })?),
            _ => None,
        };

        Ok(Self {
            contract_address,
            rpc_url: config.rpc_url.clone(),
            signer,
        })
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Address derived from the configured private key
    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|signer| signer.address())
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Create a read-only provider for contract calls
    pub fn create_provider(&self) -> ChampionshipResult<impl Provider + use<>> {
        let rpc_url = self
            .rpc_url
            .parse()
            .map_err(|e| ChampionshipError::Configuration(format!("Invalid RPC URL: {}", e)))?;

        Ok(ProviderBuilder::new().connect_http(rpc_url))
    }

    /// Create a provider with wallet for sending transactions
    ///
    /// # Errors
    ///
    /// Returns [`ChampionshipError::WalletNotConnected`] when no private key is configured.
    pub fn create_provider_with_signer(&self) -> ChampionshipResult<impl Provider + use<>> {
        let signer = self
            .signer
            .clone()
            .ok_or(ChampionshipError::WalletNotConnected)?;

        let rpc_url = self
            .rpc_url
            .parse()
            .map_err(|e| ChampionshipError::Configuration(format!("Invalid RPC URL: {}", e)))?;

        Ok(ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url))
    }
}
