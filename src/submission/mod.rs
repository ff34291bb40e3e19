//! The Cart Submission Workflow: validate, resolve, add sequentially, reconcile, broadcast.

pub mod error;
pub mod policy;
pub mod summary;
pub mod validation;
pub mod workflow;

pub use error::*;
pub use policy::*;
pub use summary::*;
pub use validation::validate;
pub use workflow::BundleSubmitter;
