//! Error types for catalog lookups

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown car: {0}")]
    UnknownCar(String),

    #[error("Unknown part: {0}")]
    UnknownPart(String),

    #[error("Unknown part category: {0} (expected one of engine, transmission, suspension, wheels, body, exhaust)")]
    UnknownCategory(String),
}
