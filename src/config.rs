//! Client configuration
//!
//! Configuration for a service client, loadable from YAML or JSON files:
//!
//! ```yaml
//! endpoint: https://volume.example.com/v3/6f70656e737461636b20342065766572
//! service_type: volume
//! microversion: "3.59"
//! timeout_secs: 60
//! headers:
//!   X-Auth-Token: gAAAAABf...
//! ```

use crate::error::{Error, Result};
use crate::http::{ServiceClient, ServiceClientConfig};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Service client configuration as written in a config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service endpoint
    pub endpoint: String,

    /// Service type for microversion headers
    #[serde(default)]
    pub service_type: Option<String>,

    /// Microversion to request
    #[serde(default)]
    pub microversion: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Create a config for `endpoint` with defaults everywhere else
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            service_type: None,
            microversion: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            headers: StringMap::new(),
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::missing_field("endpoint"));
        }
        if self.microversion.is_some() && self.service_type.is_none() {
            return Err(Error::config(
                "microversion requires service_type to be set",
            ));
        }
        Ok(())
    }

    /// Convert into the HTTP client configuration
    pub fn to_client_config(&self) -> ServiceClientConfig {
        let mut builder = ServiceClientConfig::builder()
            .endpoint(&self.endpoint)
            .timeout(Duration::from_secs(self.timeout_secs));

        if let Some(service_type) = &self.service_type {
            builder = builder.service_type(service_type);
        }
        if let Some(version) = &self.microversion {
            builder = builder.microversion(version);
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }

    /// Build a service client from this configuration
    pub fn build_client(&self) -> Result<ServiceClient> {
        ServiceClient::from_config(self)
    }
}

/// Load a client config, choosing the parser by file extension
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => ClientConfig::from_json_str(&content),
        _ => ClientConfig::from_yaml_str(&content),
    }
}
