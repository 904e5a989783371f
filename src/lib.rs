// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Stackclient
//!
//! A Rust-native client for OpenStack-style cloud REST APIs, built around a
//! single pagination engine shared by every listing call.
//!
//! ## Features
//!
//! - **Pagination strategies**: single page, `rel="next"` links, and markers
//! - **Pager**: collect everything, visit page by page, or stream
//! - **Cycle detection**: a next page that was already fetched is an error
//! - **Microversions**: per-service version headers on every request
//! - **Resources**: block storage snapshots, share replicas and snapshots, BGP peers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stackclient::blockstorage::snapshots::{self, ListOpts};
//! use stackclient::{ServiceClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Arc::new(ServiceClient::new("https://volume.example.com/v3/my-project")?);
//!
//!     let pager = snapshots::list(&client, &ListOpts::default())?;
//!     pager
//!         .each_page(|page| {
//!             for snapshot in snapshots::extract_snapshots(page)? {
//!                 println!("{} {}", snapshot.id, snapshot.status);
//!             }
//!             Ok(true)
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │   Resource modules: snapshots, replicas, bgp peers           │
//! │   list(client, opts) → Pager<Strategy>    extract_*(page)    │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────┬───────────┴──────────┬─────────────────────┐
//! │     Pager       │      Strategies      │    ServiceClient    │
//! ├─────────────────┼──────────────────────┼─────────────────────┤
//! │ all_pages       │ SinglePage           │ Fetcher impl        │
//! │ each_page       │ LinkedPage           │ ok codes            │
//! │ into_stream     │ MarkedPage           │ microversions       │
//! └─────────────────┴──────────────────────┴─────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document resource struct fields before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP service client
pub mod http;

/// Pagination engine and strategies
pub mod pagination;

/// Client configuration files
pub mod config;

/// Block storage service
pub mod blockstorage;

/// Shared filesystems service
pub mod sharedfilesystems;

/// Networking service
pub mod networking;

/// Tracing setup
pub mod telemetry;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, ClientConfig};
pub use http::{RequestConfig, ServiceClient, ServiceClientConfig};
pub use pagination::{
    Fetcher, LinkedPage, MarkedPage, NextPage, Page, PageResult, Pager, RawResponse, SinglePage,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
