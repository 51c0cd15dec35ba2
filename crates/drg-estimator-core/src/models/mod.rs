//! Domain models for the DRG cost estimator.

mod catalog;
mod estimate;
mod labels;

pub use catalog::*;
pub use estimate::*;
pub use labels::*;
