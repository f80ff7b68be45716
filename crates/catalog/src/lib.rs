//! Rally catalog
//!
//! The static garage of the EncryptedRally championship: nine rally cars, three
//! tiers of performance parts per category, the per-session upgrade selection
//! and the reduction of selected parts into the seven setup parameters the
//! championship contract expects.
//!
//! # Example
//!
//! ```
//! use rally_catalog::{Selection, find_car, find_part, map_to_contract_parameters};
//!
//! let car = find_car("bmw-m3").unwrap();
//! let mut selection = Selection::new(car);
//! selection.add_part(find_part("turbo-v1").unwrap());
//!
//! let params = map_to_contract_parameters(&selection);
//! assert_eq!(params.engine_tuning, 8);
//! ```

pub mod boost;
pub mod catalog;
pub mod error;
pub mod part;
pub mod selection;

pub use boost::{StatTotals, aggregate, map_to_contract_parameters};
pub use catalog::{Car, CarSpecs, find_car, find_part, list_cars, list_parts, parse_price};
pub use error::{CatalogError, Result};
pub use part::{Boost, Part, PartCategory, Stat};
pub use selection::Selection;
