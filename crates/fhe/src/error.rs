//! Error types for the encryption gateway

use thiserror::Error;

/// Result type for encryption gateway operations
pub type Result<T> = std::result::Result<T, FheError>;

/// Errors raised while preparing or producing encrypted inputs
#[derive(Debug, Error)]
pub enum FheError {
    /// No network binding (wallet provider) is available
    #[error("Environment error: {0}")]
    Environment(String),

    /// The SDK could not be fetched or lacks its entry points
    #[error("Failed to load FHE SDK: {0}")]
    SdkLoad(String),

    /// SDK initialization or instance construction failed
    #[error("Failed to initialize FHE SDK: {0}")]
    SdkInit(String),

    /// Malformed or badly checksummed address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The SDK rejected the input or returned a malformed result
    #[error("Encryption failed: {0}")]
    Encryption(String),
}

impl FheError {
    /// Failures that leave the gateway uninitialized and can be retried
    pub fn is_initialization_error(&self) -> bool {
        matches!(self, Self::Environment(_) | Self::SdkLoad(_) | Self::SdkInit(_))
    }
}
