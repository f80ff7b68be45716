//! Ethereum implementation of the `Championship` trait
//!
//! Every operation builds a fresh provider from the [`ContractClient`]; there
//! is no background task and nothing is cached between calls.

use crate::{
    abi::EncryptedRallyChampionship,
    abi::EncryptedRallyChampionship::DriverRegistered,
    config::EthereumChampionshipConfig,
    contract::ContractClient,
    conversions::{driver_registered_from_log, profile_from_return, receipt_from_rpc},
    error::{from_contract_error, from_pending_error, from_transport_error},
};
use alloy::network::Ethereum;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{PendingTransactionBuilder, Provider};
use alloy::rpc::types::Filter;
use alloy::sol_types::SolEvent;
use async_trait::async_trait;
use rally_championship_trait::*;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Championship contract client for Ethereum and EVM-compatible chains
///
/// # Example
///
/// ```ignore
/// use rally_championship_ethereum::{EthereumChampionship, EthereumChampionshipConfig};
/// use rally_championship_trait::Championship;
///
/// let championship = EthereumChampionship::new(EthereumChampionshipConfig::default())?;
/// let drivers = championship.total_drivers().await?;
/// ```
pub struct EthereumChampionship {
    contract: ContractClient,
    config: EthereumChampionshipConfig,
}

impl EthereumChampionship {
    /// Create a new championship client
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - Contract address is invalid
    /// - Private key is invalid (if provided)
    pub fn new(config: EthereumChampionshipConfig) -> ChampionshipResult<Self> {
        info!(
            "Initializing championship client for contract {} on chain {}",
            config.contract_address, config.chain_id
        );

        config.validate().map_err(ChampionshipError::Configuration)?;
        let contract = ContractClient::new(&config)?;

        match contract.signer_address() {
            Some(signer) => info!("Wallet connected: {}", signer),
            None => info!("No private key configured, client is read-only"),
        }

        Ok(Self { contract, config })
    }

    pub fn config(&self) -> &EthereumChampionshipConfig {
        &self.config
    }

    /// Explorer link for `tx_hash`, if an explorer is configured
    pub fn transaction_url(&self, tx_hash: TxHash) -> Option<String> {
        self.config.transaction_url(tx_hash)
    }

    fn confirmation_timeout(&self) -> Option<Duration> {
        self.config
            .confirmation_timeout_secs
            .map(Duration::from_secs)
    }
}

#[async_trait]
impl Championship for EthereumChampionship {
    fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    fn contract_address(&self) -> Address {
        self.contract.contract_address()
    }

    fn signer_address(&self) -> Option<Address> {
        self.contract.signer_address()
    }

    // ===== Driver Views =====

    async fn is_registered(&self, driver: Address) -> ChampionshipResult<bool> {
        debug!("Checking registration for {}", driver);

        let provider = self.contract.create_provider()?;
        let contract = EncryptedRallyChampionship::new(self.contract.contract_address(), &provider);

        contract
            .isRegistered(driver)
            .call()
            .await
            .map_err(from_contract_error)
    }

    async fn get_driver_profile(&self, driver: Address) -> ChampionshipResult<DriverProfile> {
        debug!("Fetching driver profile for {}", driver);

        let provider = self.contract.create_provider()?;
        let contract = EncryptedRallyChampionship::new(self.contract.contract_address(), &provider);

        let result = contract
            .getDriverProfile(driver)
            .call()
            .await
            .map_err(from_contract_error)?;

        Ok(profile_from_return(result))
    }

    async fn total_drivers(&self) -> ChampionshipResult<u64> {
        let provider = self.contract.create_provider()?;
        let contract = EncryptedRallyChampionship::new(self.contract.contract_address(), &provider);

        let total: U256 = contract
            .totalDrivers()
            .call()
            .await
            .map_err(from_contract_error)?;

        u64::try_from(total)
            .map_err(|_| ChampionshipError::rpc(format!("totalDrivers out of range: {}", total)))
    }

    async fn driver_registered_events(
        &self,
        from_block: u64,
        driver: Option<Address>,
    ) -> ChampionshipResult<Vec<DriverRegisteredEvent>> {
        debug!(
            "Fetching DriverRegistered events from block {} (driver filter: {:?})",
            from_block, driver
        );

        let provider = self.contract.create_provider()?;

        let mut filter = Filter::new()
            .address(self.contract.contract_address())
            .event(DriverRegistered::SIGNATURE)
            .from_block(from_block);
        if let Some(driver) = driver {
            filter = filter.topic1(driver.into_word());
        }

        let logs = provider
            .get_logs(&filter)
            .await
            .map_err(from_transport_error)?;

        let mut events = Vec::with_capacity(logs.len());
        for log in &logs {
            match driver_registered_from_log(log) {
                Ok(event) => events.push(event),
                Err(e) => warn!("Skipping undecodable log: {}", e),
            }
        }

        debug!("Found {} DriverRegistered events", events.len());
        Ok(events)
    }

    // ===== Transactions =====

    async fn register_driver(&self) -> ChampionshipResult<TxHash> {
        let signer = self
            .contract
            .signer_address()
            .ok_or(ChampionshipError::WalletNotConnected)?;
        info!("Registering driver {}", signer);

        let provider = self.contract.create_provider_with_signer()?;
        let contract = EncryptedRallyChampionship::new(self.contract.contract_address(), &provider);

        let pending_tx = contract
            .registerDriver()
            .send()
            .await
            .map_err(from_contract_error)?;

        let tx_hash = *pending_tx.tx_hash();
        info!("registerDriver broadcast: {}", tx_hash);
        Ok(tx_hash)
    }

    async fn submit_car_setup(
        &self,
        car_model: &str,
        setup: &EncryptedCarSetup,
    ) -> ChampionshipResult<TxHash> {
        let signer = self
            .contract
            .signer_address()
            .ok_or(ChampionshipError::WalletNotConnected)?;
        info!("Submitting car setup for {} ({})", signer, car_model);

        let provider = self.contract.create_provider_with_signer()?;
        let contract = EncryptedRallyChampionship::new(self.contract.contract_address(), &provider);

        let pending_tx = contract
            .updateCarSetup(
                car_model.to_string(),
                setup.engine_tuning,
                setup.suspension_balance,
                setup.aero_package,
                setup.tire_compound,
                setup.boost_response,
                setup.brake_bias,
                setup.traction_control,
                setup.input_proof.clone(),
            )
            .send()
            .await
            .map_err(from_contract_error)?;

        let tx_hash = *pending_tx.tx_hash();
        info!("updateCarSetup broadcast: {}", tx_hash);
        Ok(tx_hash)
    }

    async fn await_confirmation(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> ChampionshipResult<TxReceipt> {
        debug!("Waiting for {} confirmations of {}", confirmations, tx_hash);

        let provider = self.contract.create_provider()?;

        let receipt = PendingTransactionBuilder::<Ethereum>::new(provider.root().clone(), tx_hash)
            .with_required_confirmations(confirmations)
            .with_timeout(self.confirmation_timeout())
            .get_receipt()
            .await
            .map_err(|e| from_pending_error(tx_hash, e))?;

        let receipt = receipt_from_rpc(&receipt);
        if receipt.is_success() {
            info!(
                "Transaction {} confirmed in block {:?} (gas used {})",
                tx_hash, receipt.block_number, receipt.gas_used
            );
        } else {
            warn!("Transaction {} reverted in block {:?}", tx_hash, receipt.block_number);
        }
        Ok(receipt)
    }
}
