//! HTTP client module
//!
//! Provides the service client used by resource modules and pagers.
//!
//! # Features
//!
//! - **Endpoint URLs**: Resource paths joined onto a service endpoint
//! - **Microversions**: Generic and per-service version headers
//! - **Status Checks**: Expected status codes per method, overridable per request
//! - **Page Fetching**: Implements the pagination `Fetcher` seam

mod client;

pub use client::{
    microversion_headers, with_query, RequestConfig, ServiceClient, ServiceClientConfig,
    ServiceClientConfigBuilder, API_VERSION_HEADER,
};
