//! Common data types shared by the catalog, the encryption gateway and contract backends

pub mod driver;
pub mod receipt;
pub mod setup;

pub use driver::*;
pub use receipt::*;
pub use setup::*;
