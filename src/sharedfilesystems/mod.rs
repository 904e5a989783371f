//! Shared filesystems service (v2)
//!
//! Resource modules for the share service. Most calls need a microversion,
//! sent with the `sharev2` service type.

use crate::http::{microversion_headers, RequestConfig, ServiceClient};
use crate::types::StringMap;

/// Share replicas
pub mod replicas;

/// Share snapshots
pub mod snapshots;

/// Service type used when the client has none configured
pub const SERVICE_TYPE: &str = "sharev2";

/// Request config carrying the microversion headers
pub(crate) fn request(client: &ServiceClient, minimum: &str) -> RequestConfig {
    RequestConfig::new().headers(version_headers(client, minimum))
}

/// Microversion headers, preferring the client's configured version
pub(crate) fn version_headers(client: &ServiceClient, minimum: &str) -> StringMap {
    let version = client.microversion().unwrap_or(minimum);
    microversion_headers(Some(client.service_type().unwrap_or(SERVICE_TYPE)), version)
}
