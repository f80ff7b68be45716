//! Error types for championship contract operations

use alloy_primitives::TxHash;
use thiserror::Error;

/// Result type for championship operations
pub type ChampionshipResult<T> = Result<T, ChampionshipError>;

/// Errors surfaced by a championship contract backend
#[derive(Error, Debug)]
pub enum ChampionshipError {
    /// No signer is available for a state-changing call
    #[error("Wallet not connected - write operations require a signer")]
    WalletNotConnected,

    /// The signer declined to sign the transaction
    #[error("Wallet rejected the request: {0}")]
    WalletRejected(String),

    /// Network or RPC failure
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The provider gave up waiting for confirmations
    #[error("Transaction {tx_hash} was not confirmed: {message}")]
    TransactionTimeout { tx_hash: TxHash, message: String },

    /// `registerDriver` called for an address that is already registered
    #[error("Driver is already registered")]
    DriverAlreadyRegistered,

    /// `updateCarSetup` called before the driver registered
    #[error("Driver is not registered")]
    DriverNotRegistered,

    /// Any other contract revert
    #[error("Contract reverted: {0}")]
    Reverted(String),

    /// Malformed Ethereum address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Configuration problem in the backend
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Wrapper for other error types
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChampionshipError {
    /// Create an RPC error
    pub fn rpc(message: impl Into<String>) -> Self {
        Self::Rpc(message.into())
    }

    /// Create a wallet rejection error
    pub fn wallet_rejected(message: impl Into<String>) -> Self {
        Self::WalletRejected(message.into())
    }

    /// Check if this error is a revert raised by the contract itself
    pub fn is_revert(&self) -> bool {
        matches!(
            self,
            Self::DriverAlreadyRegistered | Self::DriverNotRegistered | Self::Reverted(_)
        )
    }

    /// Check if this error indicates a network problem
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Rpc(_) | Self::TransactionTimeout { .. })
    }

    /// Check if this error was caused by the wallet (missing or declining)
    pub fn is_wallet_error(&self) -> bool {
        matches!(self, Self::WalletNotConnected | Self::WalletRejected(_))
    }

    /// Check if this error indicates a configuration problem
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidAddress(_))
    }
}
