//! CLI module for docprep
//!
//! One module per command, each with an argument struct and a `run()`
//! entry point.

pub mod error;
pub mod process;
pub mod rules;

#[allow(unused_imports)]
pub use error::HelpfulError;
