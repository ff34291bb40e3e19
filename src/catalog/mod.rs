//! Static variant data and size-to-variant resolution.

pub mod defaults;
pub mod error;
pub mod table;

pub use error::*;
pub use table::*;
