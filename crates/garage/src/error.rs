use rally_catalog::CatalogError;
use rally_championship_trait::{ChampionshipError, TxHash};
use rally_fhe::FheError;
use thiserror::Error;

/// Preconditions checked before the workflow touches the network
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Select at least one performance part before submitting")]
    NoPartsSelected,

    #[error("Connect a wallet before submitting")]
    WalletNotConnected,
}

/// Terminal failure of a setup submission
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Chain(#[from] ChampionshipError),

    #[error(transparent)]
    Encryption(#[from] FheError),

    #[error("Driver registration transaction {tx_hash} reverted")]
    RegistrationReverted { tx_hash: TxHash },

    #[error("Transaction reverted: car setup transaction {tx_hash} failed on-chain")]
    TransactionReverted { tx_hash: TxHash },
}

impl WorkflowError {
    /// The signer declined a signing request
    pub fn is_wallet_rejection(&self) -> bool {
        matches!(self, Self::Chain(ChampionshipError::WalletRejected(_)))
    }

    /// Hash of a mined but reverted transaction
    pub fn reverted_tx_hash(&self) -> Option<TxHash> {
        match self {
            Self::RegistrationReverted { tx_hash } | Self::TransactionReverted { tx_hash } => {
                Some(*tx_hash)
            }
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum GarageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Championship(#[from] ChampionshipError),

    #[error(transparent)]
    Fhe(#[from] FheError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GarageError>;
