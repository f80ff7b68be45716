//! In-memory championship contract for tests
//!
//! Mirrors the registration rules of the deployed contract and records every
//! call so tests can assert on the exact sequence a caller produced. Failures
//! can be injected per operation.

use crate::{
    Championship, ChampionshipError, ChampionshipResult, DriverProfile, DriverRegisteredEvent,
    DriverTier, EncryptedCarSetup, ReceiptStatus, TxReceipt,
};
use alloy_primitives::{Address, TxHash, keccak256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Operations that accept injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    IsRegistered,
    RegisterDriver,
    SubmitCarSetup,
    AwaitConfirmation,
}

/// Failure to inject for an [`Operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Fail with [`ChampionshipError::Rpc`]
    Rpc,
    /// Fail with [`ChampionshipError::WalletRejected`]
    WalletRejected,
    /// Fail with [`ChampionshipError::TransactionTimeout`]
    Timeout,
    /// Broadcast succeeds but the mined transaction reverts
    RevertOnChain,
}

/// A recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    IsRegistered(Address),
    GetDriverProfile(Address),
    TotalDrivers,
    DriverRegisteredEvents { from_block: u64 },
    RegisterDriver,
    SubmitCarSetup { car_model: String, setup: EncryptedCarSetup },
    AwaitConfirmation { tx_hash: TxHash, confirmations: u64 },
}

impl Call {
    fn operation(&self) -> Option<Operation> {
        match self {
            Self::IsRegistered(_) => Some(Operation::IsRegistered),
            Self::RegisterDriver => Some(Operation::RegisterDriver),
            Self::SubmitCarSetup { .. } => Some(Operation::SubmitCarSetup),
            Self::AwaitConfirmation { .. } => Some(Operation::AwaitConfirmation),
            _ => None,
        }
    }
}

#[derive(Default)]
struct State {
    drivers: HashMap<Address, DriverProfile>,
    events: Vec<DriverRegisteredEvent>,
    receipts: HashMap<TxHash, TxReceipt>,
    failures: HashMap<Operation, Failure>,
    calls: Vec<Call>,
    block_number: u64,
    nonce: u64,
}

/// In-memory implementation of [`Championship`]
pub struct InMemoryChampionship {
    chain_id: u64,
    contract_address: Address,
    signer: Option<Address>,
    state: Mutex<State>,
}

impl InMemoryChampionship {
    /// Create a contract double; `signer` is the connected wallet, if any
    pub fn new(signer: Option<Address>) -> Self {
        Self {
            chain_id: 31337,
            contract_address: Address::repeat_byte(0x42),
            signer,
            state: Mutex::new(State {
                block_number: 1,
                ..Default::default()
            }),
        }
    }

    /// Pre-register `driver`
    pub fn with_registered(self, driver: Address) -> Self {
        {
            let mut state = self.lock();
            let joined_at = state.block_number;
            state.drivers.insert(
                driver,
                DriverProfile {
                    joined_at,
                    ..Default::default()
                },
            );
        }
        self
    }

    /// Inject a failure for every subsequent call of `operation`
    pub fn fail(&self, operation: Operation, failure: Failure) {
        self.lock().failures.insert(operation, failure);
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of calls made for `operation`
    pub fn count(&self, operation: Operation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation() == Some(operation))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(state: &mut State, call: Call) -> Option<Failure> {
        let failure = call
            .operation()
            .and_then(|operation| state.failures.get(&operation).copied());
        state.calls.push(call);
        failure
    }

    fn signer(&self) -> ChampionshipResult<Address> {
        self.signer.ok_or(ChampionshipError::WalletNotConnected)
    }

    fn failure_error(failure: Failure, tx_hash: Option<TxHash>) -> ChampionshipError {
        match failure {
            Failure::Rpc => ChampionshipError::rpc("connection refused"),
            Failure::WalletRejected => {
                ChampionshipError::wallet_rejected("User denied transaction signature")
            }
            Failure::Timeout => ChampionshipError::TransactionTimeout {
                tx_hash: tx_hash.unwrap_or_default(),
                message: "confirmation watcher timed out".to_string(),
            },
            Failure::RevertOnChain => ChampionshipError::Reverted("execution reverted".to_string()),
        }
    }

    /// Mine a transaction; `apply` runs only when the transaction succeeds
    fn mine(state: &mut State, reverted: bool, apply: impl FnOnce(&mut State, u64)) -> TxHash {
        state.nonce += 1;
        state.block_number += 1;
        let tx_hash = keccak256(state.nonce.to_be_bytes());
        let block_number = state.block_number;

        if !reverted {
            apply(state, block_number);
        }

        state.receipts.insert(
            tx_hash,
            TxReceipt {
                transaction_hash: tx_hash,
                block_number: Some(block_number),
                gas_used: 21_000,
                status: ReceiptStatus::from(!reverted),
            },
        );
        tx_hash
    }
}

#[async_trait]
impl Championship for InMemoryChampionship {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn contract_address(&self) -> Address {
        self.contract_address
    }

    fn signer_address(&self) -> Option<Address> {
        self.signer
    }

    async fn is_registered(&self, driver: Address) -> ChampionshipResult<bool> {
        let mut state = self.lock();
        if let Some(failure) = Self::record(&mut state, Call::IsRegistered(driver)) {
            return Err(Self::failure_error(failure, None));
        }
        Ok(state.drivers.contains_key(&driver))
    }

    async fn get_driver_profile(&self, driver: Address) -> ChampionshipResult<DriverProfile> {
        let mut state = self.lock();
        Self::record(&mut state, Call::GetDriverProfile(driver));
        Ok(state.drivers.get(&driver).cloned().unwrap_or_default())
    }

    async fn total_drivers(&self) -> ChampionshipResult<u64> {
        let mut state = self.lock();
        Self::record(&mut state, Call::TotalDrivers);
        Ok(state.drivers.len() as u64)
    }

    async fn driver_registered_events(
        &self,
        from_block: u64,
        driver: Option<Address>,
    ) -> ChampionshipResult<Vec<DriverRegisteredEvent>> {
        let mut state = self.lock();
        Self::record(&mut state, Call::DriverRegisteredEvents { from_block });
        Ok(state
            .events
            .iter()
            .filter(|event| event.block_number.unwrap_or(0) >= from_block)
            .filter(|event| driver.is_none_or(|d| event.driver == d))
            .cloned()
            .collect())
    }

    async fn register_driver(&self) -> ChampionshipResult<TxHash> {
        let driver = self.signer()?;
        let mut state = self.lock();
        let failure = Self::record(&mut state, Call::RegisterDriver);

        match failure {
            Some(Failure::RevertOnChain) => {}
            Some(failure) => return Err(Self::failure_error(failure, None)),
            None => {}
        }

        // Gas estimation surfaces the revert before anything is broadcast.
        if state.drivers.contains_key(&driver) {
            return Err(ChampionshipError::DriverAlreadyRegistered);
        }

        let reverted = failure == Some(Failure::RevertOnChain);
        let tx_hash = Self::mine(&mut state, reverted, |state, block_number| {
            state.drivers.insert(
                driver,
                DriverProfile {
                    joined_at: block_number,
                    ..Default::default()
                },
            );
        });

        if !reverted {
            let block_number = state.block_number;
            state.events.push(DriverRegisteredEvent {
                driver,
                tier: DriverTier::Rookie,
                block_number: Some(block_number),
                transaction_hash: Some(tx_hash),
            });
        }
        Ok(tx_hash)
    }

    async fn submit_car_setup(
        &self,
        car_model: &str,
        setup: &EncryptedCarSetup,
    ) -> ChampionshipResult<TxHash> {
        let driver = self.signer()?;
        let mut state = self.lock();
        let failure = Self::record(
            &mut state,
            Call::SubmitCarSetup {
                car_model: car_model.to_string(),
                setup: setup.clone(),
            },
        );

        match failure {
            Some(Failure::RevertOnChain) => {}
            Some(failure) => return Err(Self::failure_error(failure, None)),
            None => {}
        }

        if !state.drivers.contains_key(&driver) {
            return Err(ChampionshipError::DriverNotRegistered);
        }

        let reverted = failure == Some(Failure::RevertOnChain);
        let car_model = car_model.to_string();
        Ok(Self::mine(&mut state, reverted, move |state, block_number| {
            if let Some(profile) = state.drivers.get_mut(&driver) {
                profile.car_model = car_model;
                profile.car_setup_updated_at = block_number;
            }
        }))
    }

    async fn await_confirmation(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> ChampionshipResult<TxReceipt> {
        let mut state = self.lock();
        let failure = Self::record(
            &mut state,
            Call::AwaitConfirmation {
                tx_hash,
                confirmations,
            },
        );

        if let Some(failure) = failure {
            if failure != Failure::RevertOnChain {
                return Err(Self::failure_error(failure, Some(tx_hash)));
            }
        }

        // Confirmations pile up on top of the inclusion block.
        state.block_number += confirmations.saturating_sub(1);
        state
            .receipts
            .get(&tx_hash)
            .cloned()
            .ok_or_else(|| ChampionshipError::rpc(format!("transaction {} not found", tx_hash)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Address {
        Address::repeat_byte(0x11)
    }

    #[tokio::test]
    async fn test_register_then_query() {
        let contract = InMemoryChampionship::new(Some(driver()));
        assert!(!contract.is_registered(driver()).await.unwrap());

        let tx_hash = contract.register_driver().await.unwrap();
        let receipt = contract.await_confirmation(tx_hash, 2).await.unwrap();
        assert!(receipt.is_success());

        assert!(contract.is_registered(driver()).await.unwrap());
        assert_eq!(contract.total_drivers().await.unwrap(), 1);

        let events = contract.driver_registered_events(0, Some(driver())).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tier, DriverTier::Rookie);
    }

    #[tokio::test]
    async fn test_double_registration_reverts() {
        let contract = InMemoryChampionship::new(Some(driver())).with_registered(driver());
        let err = contract.register_driver().await.unwrap_err();
        assert!(matches!(err, ChampionshipError::DriverAlreadyRegistered));
    }

    #[tokio::test]
    async fn test_unregistered_setup_reverts() {
        let contract = InMemoryChampionship::new(Some(driver()));
        let setup = EncryptedCarSetup::from_handles(Default::default(), Default::default());
        let err = contract.submit_car_setup("BMW M3", &setup).await.unwrap_err();
        assert!(matches!(err, ChampionshipError::DriverNotRegistered));
    }

    #[tokio::test]
    async fn test_write_without_signer() {
        let contract = InMemoryChampionship::new(None);
        let err = contract.register_driver().await.unwrap_err();
        assert!(matches!(err, ChampionshipError::WalletNotConnected));
    }

    #[tokio::test]
    async fn test_unregistered_profile_is_empty() {
        let contract = InMemoryChampionship::new(None);
        let profile = contract.get_driver_profile(driver()).await.unwrap();
        assert_eq!(profile, DriverProfile::default());
    }

    #[tokio::test]
    async fn test_revert_on_chain_yields_failed_receipt() {
        let contract = InMemoryChampionship::new(Some(driver()));
        contract.fail(Operation::RegisterDriver, Failure::RevertOnChain);

        let tx_hash = contract.register_driver().await.unwrap();
        let receipt = contract.await_confirmation(tx_hash, 2).await.unwrap();
        assert_eq!(receipt.status, ReceiptStatus::Failed);
        assert!(!contract.is_registered(driver()).await.unwrap());
    }
}
