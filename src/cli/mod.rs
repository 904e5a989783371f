//! CLI module
//!
//! Command-line interface for exercising service endpoints.
//!
//! # Commands
//!
//! - `list` - Walk a paginated collection and print its items as JSON lines

mod commands;
mod runner;

pub use commands::{parse_header, Cli, Commands};
pub use runner::{list, ListArgs, ListSummary, Runner};
