//! Contract ABI bindings module
//!
//! Alloy bindings for the EncryptedRally championship contract.

pub mod championship;

pub use championship::EncryptedRallyChampionship;
