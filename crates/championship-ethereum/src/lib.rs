//! Ethereum Championship Client
//!
//! This crate implements the `Championship` trait from `rally-championship-trait`
//! for the EncryptedRallyChampionship contract using alloy.
//!
//! # Features
//!
//! - Type-safe contract bindings via Alloy's `sol!` macro
//! - TOML configuration with validation
//! - Classification of RPC, wallet and revert failures into `ChampionshipError`
//! - `DriverRegistered` event queries with an optional driver filter
//!
//! # Example
//!
//! ```ignore
//! use rally_championship_ethereum::{EthereumChampionship, EthereumChampionshipConfig};
//! use rally_championship_trait::Championship;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EthereumChampionshipConfig {
//!     private_key: Some("0xYourPrivateKey".to_string()),
//!     ..Default::default()
//! };
//!
//! let championship = EthereumChampionship::new(config)?;
//! let tx_hash = championship.register_driver().await?;
//! let receipt = championship.await_confirmation(tx_hash, 2).await?;
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod championship;
pub mod config;
pub mod contract;
pub mod conversions;
pub mod error;

pub use championship::EthereumChampionship;
pub use config::{EthereumChampionshipConfig, SEPOLIA_CHAIN_ID, SEPOLIA_CONTRACT_ADDRESS};
pub use contract::ContractClient;

/// Re-export the Championship trait for convenience
pub use rally_championship_trait::Championship;
