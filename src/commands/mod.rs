//! Command implementations behind the `testgap` binary.
//!
//! - **fix**: analyze sources and render stubs plus the ratio table
//! - **eval**: run the rendered stubs with a Ruby interpreter

pub mod eval;
pub mod fix;

pub use eval::eval;
pub use fix::{analyze_sources, fix, render, FixReport};
