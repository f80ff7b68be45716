//! Championship Trait - chain gateway abstraction for the EncryptedRally contract
//!
//! This crate defines the `Championship` trait which provides a unified interface
//! to the championship contract (driver registration, encrypted car setups and
//! the read-only profile views), together with the domain types shared by the
//! catalog, the encryption gateway and the submission workflow.

use async_trait::async_trait;

pub mod error;
pub mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testing;

pub use error::{ChampionshipError, ChampionshipResult};
pub use types::*;

/// Primitive types used throughout the trait
pub use alloy_primitives::{Address, B256, Bytes, TxHash};

/// Number of block confirmations a transaction needs before it is considered final
pub const DEFAULT_CONFIRMATIONS: u64 = 2;

/// Main Championship trait that every contract backend must implement
#[async_trait]
pub trait Championship: Send + Sync {
    // ===== Identification =====

    /// Get the chain ID the contract is deployed on
    fn chain_id(&self) -> u64;

    /// Get the address of the championship contract
    fn contract_address(&self) -> Address;

    /// Address of the connected signer, `None` when no wallet is connected
    fn signer_address(&self) -> Option<Address>;

    // ===== Driver Views =====

    /// Check whether `driver` has registered with the championship
    async fn is_registered(&self, driver: Address) -> ChampionshipResult<bool>;

    /// Fetch the public profile of `driver`.
    ///
    /// Unregistered addresses yield an empty profile rather than an error.
    async fn get_driver_profile(&self, driver: Address) -> ChampionshipResult<DriverProfile>;

    /// Total number of registered drivers
    async fn total_drivers(&self) -> ChampionshipResult<u64>;

    /// Fetch `DriverRegistered` events starting at `from_block`,
    /// optionally restricted to a single driver
    async fn driver_registered_events(
        &self,
        from_block: u64,
        driver: Option<Address>,
    ) -> ChampionshipResult<Vec<DriverRegisteredEvent>>;

    // ===== Transactions =====

    /// Register the connected signer as a driver.
    ///
    /// Returns once the transaction has been broadcast; use
    /// [`Championship::await_confirmation`] to wait for it to be mined.
    async fn register_driver(&self) -> ChampionshipResult<TxHash>;

    /// Submit an encrypted car setup for the connected signer.
    ///
    /// Calls `updateCarSetup` with the car label, the seven ciphertext
    /// handles and the input proof, in that order.
    async fn submit_car_setup(
        &self,
        car_model: &str,
        setup: &EncryptedCarSetup,
    ) -> ChampionshipResult<TxHash>;

    /// Wait until `tx_hash` has `confirmations` confirmations.
    ///
    /// A mined but reverted transaction is not an error: the returned receipt
    /// carries [`ReceiptStatus::Failed`] and the caller decides what to do.
    async fn await_confirmation(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> ChampionshipResult<TxReceipt>;
}
