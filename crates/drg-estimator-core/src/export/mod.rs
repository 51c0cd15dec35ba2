//! Presentation and export of estimates.

mod report;
mod strings;

pub use report::*;
pub use strings::*;
