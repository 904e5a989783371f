//! CLI commands and argument parsing

use crate::types::PaginationKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stackclient CLI
#[derive(Parser, Debug)]
#[command(name = "stackclient")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service endpoint (overrides the config file)
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Client configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service type used for microversion headers
    #[arg(long, global = true)]
    pub service_type: Option<String>,

    /// Microversion to request
    #[arg(long, global = true)]
    pub microversion: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a collection, printing one JSON item per line
    List {
        /// Collection path relative to the endpoint
        #[arg(short, long)]
        path: String,

        /// Pagination strategy of the collection
        #[arg(short, long, value_enum, default_value_t = PaginationKind::Single)]
        strategy: PaginationKind,

        /// Body key holding the items
        #[arg(long)]
        items_key: String,

        /// Body key holding the links (linked strategy)
        #[arg(long)]
        links_key: Option<String>,

        /// Item field used as the marker (marked strategy)
        #[arg(long, default_value = "id")]
        marker_field: String,

        /// Page size hint sent as `limit`
        #[arg(long)]
        limit: Option<u32>,

        /// Extra request header, as NAME=VALUE (repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// Stop after this many pages (0 fetches nothing)
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

/// Parse a `NAME=VALUE` header argument
pub fn parse_header(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("invalid header '{arg}': expected NAME=VALUE"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid header '{arg}': empty name"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
