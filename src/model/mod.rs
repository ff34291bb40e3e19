//! Plain data shared by the selection tracker, the catalog and the cart store.

pub mod add_on;
pub mod cart;
pub mod size;
pub mod variant;

pub use add_on::*;
pub use cart::*;
pub use size::*;
pub use variant::*;
