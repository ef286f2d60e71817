//! Command-line interface module.

mod args;
pub mod bundle;

pub use args::Cli;
