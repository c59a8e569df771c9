//! CLI module
//!
//! Command-line interface for the table and the mock endpoint.
//!
//! # Commands
//!
//! - `serve` - Start the mock query endpoint
//! - `query` - Drive a table against an endpoint and print one page
//! - `pager` - Print a compacted pager

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{parse_filter, Runner};
