//! Service client over reqwest
//!
//! Provides the handle every resource module talks through:
//! - Endpoint-relative URL construction
//! - Default and microversion headers
//! - Expected-status checks per method
//! - The [`Fetcher`] implementation used by pagers
//!
//! Requests are sent exactly once; there is no retry or backoff here.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{Fetcher, RawResponse};
use crate::types::StringMap;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Generic microversion header understood by every service
pub const API_VERSION_HEADER: &str = "OpenStack-API-Version";

/// Configuration for the service client
#[derive(Debug, Clone)]
pub struct ServiceClientConfig {
    /// Service endpoint all resource URLs are relative to
    pub endpoint: String,
    /// Service type used in microversion headers (e.g. "volume", "sharev2")
    pub service_type: Option<String>,
    /// Microversion sent with every request
    pub microversion: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for ServiceClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            service_type: None,
            microversion: None,
            timeout: Duration::from_secs(30),
            default_headers: StringMap::new(),
            user_agent: format!("stackclient/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServiceClientConfig {
    /// Create a new config builder
    pub fn builder() -> ServiceClientConfigBuilder {
        ServiceClientConfigBuilder::default()
    }
}

/// Builder for service client config
#[derive(Default)]
pub struct ServiceClientConfigBuilder {
    config: ServiceClientConfig,
}

impl ServiceClientConfigBuilder {
    /// Set the endpoint
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    /// Set the service type
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.config.service_type = Some(service_type.into());
        self
    }

    /// Set the microversion
    pub fn microversion(mut self, version: impl Into<String>) -> Self {
        self.config.microversion = Some(version.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ServiceClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Request headers, overriding client defaults
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Accepted status codes; empty means the method's defaults
    pub ok_codes: Vec<u16>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add several headers
    #[must_use]
    pub fn headers(mut self, headers: StringMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set accepted status codes
    #[must_use]
    pub fn ok_codes(mut self, codes: &[u16]) -> Self {
        self.ok_codes = codes.to_vec();
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Handle to one service endpoint
#[derive(Clone)]
pub struct ServiceClient {
    client: Client,
    config: ServiceClientConfig,
    endpoint: Url,
}

impl ServiceClient {
    /// Create a client for `endpoint` with default configuration
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_config(ServiceClientConfig::builder().endpoint(endpoint).build())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ServiceClientConfig) -> Result<Self> {
        if config.endpoint.is_empty() {
            return Err(Error::missing_field("endpoint"));
        }
        let endpoint = normalize_endpoint(&config.endpoint)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Create a client from a file-level client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::with_config(config.to_client_config())
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Service endpoint, always ending in `/`
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Configured service type
    pub fn service_type(&self) -> Option<&str> {
        self.config.service_type.as_deref()
    }

    /// Configured microversion
    pub fn microversion(&self) -> Option<&str> {
        self.config.microversion.as_deref()
    }

    /// Build a URL from path segments relative to the endpoint
    pub fn service_url(&self, parts: &[&str]) -> Result<Url> {
        let path = parts
            .iter()
            .map(|part| part.trim_matches('/'))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Ok(self.endpoint.join(&path)?)
    }

    /// Headers that request `version` from this client's service
    pub fn microversion_headers(&self, version: &str) -> StringMap {
        microversion_headers(self.service_type(), version)
    }

    /// Send a request and check its status against the expected codes
    pub async fn request(&self, method: Method, url: &Url, config: RequestConfig) -> Result<Response> {
        let ok_codes = if config.ok_codes.is_empty() {
            default_ok_codes(&method).to_vec()
        } else {
            config.ok_codes.clone()
        };

        let response = self.send(method.clone(), url, &config).await?;
        let status = response.status().as_u16();
        if !ok_codes.contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status, body));
        }

        debug!("Request succeeded: {} {} -> {}", method, url, status);
        Ok(response)
    }

    /// GET and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url, config: RequestConfig) -> Result<T> {
        let response = self.request(Method::GET, url, config).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B, T>(&self, url: &Url, body: &B, config: RequestConfig) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let config = config.json(serde_json::to_value(body)?);
        let response = self.request(Method::POST, url, config).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body, ignoring the response body (server actions)
    pub async fn post_action<B>(&self, url: &Url, body: &B, config: RequestConfig) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let config = config.json(serde_json::to_value(body)?);
        self.request(Method::POST, url, config).await?;
        Ok(())
    }

    /// PUT a JSON body and decode the JSON response
    pub async fn put_json<B, T>(&self, url: &Url, body: &B, config: RequestConfig) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let config = config.json(serde_json::to_value(body)?);
        let response = self.request(Method::PUT, url, config).await?;
        Ok(response.json().await?)
    }

    /// DELETE a resource
    pub async fn delete(&self, url: &Url, config: RequestConfig) -> Result<()> {
        self.request(Method::DELETE, url, config).await?;
        Ok(())
    }

    /// Send one request without status checks
    async fn send(&self, method: Method, url: &Url, config: &RequestConfig) -> Result<Response> {
        let mut req = self
            .client
            .request(method, url.clone())
            .headers(self.build_headers(&config.headers)?);

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }

        Ok(req.send().await?)
    }

    /// Merge default, microversion and request headers, later ones winning
    pub(crate) fn build_headers(&self, extra: &StringMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        insert_headers(&mut headers, &self.config.default_headers)?;
        if let Some(version) = self.microversion() {
            insert_headers(&mut headers, &self.microversion_headers(version))?;
        }
        insert_headers(&mut headers, extra)?;
        Ok(headers)
    }
}

#[async_trait]
impl Fetcher for ServiceClient {
    async fn get(&self, url: &Url, headers: &StringMap) -> Result<RawResponse> {
        let config = RequestConfig::new().headers(headers.clone());
        let response = self.send(Method::GET, url, &config).await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Parse an endpoint and make sure relative joins stay under it
fn normalize_endpoint(endpoint: &str) -> Result<Url> {
    let mut endpoint = endpoint.to_string();
    if !endpoint.ends_with('/') {
        endpoint.push('/');
    }
    Ok(Url::parse(&endpoint)?)
}

/// Status codes accepted by default for each method
fn default_ok_codes(method: &Method) -> &'static [u16] {
    match *method {
        Method::GET => &[200],
        Method::POST | Method::PUT => &[201, 202],
        Method::PATCH => &[200, 202, 204],
        Method::DELETE => &[202, 204],
        Method::HEAD => &[204],
        _ => &[200],
    }
}

/// Microversion headers for a service type
pub fn microversion_headers(service_type: Option<&str>, version: &str) -> StringMap {
    let mut headers = StringMap::new();
    let Some(service_type) = service_type else {
        return headers;
    };

    let legacy = match service_type {
        "compute" => Some("X-OpenStack-Nova-API-Version"),
        "sharev2" => Some("X-OpenStack-Manila-API-Version"),
        "volume" => Some("X-OpenStack-Volume-API-Version"),
        "baremetal" => Some("X-OpenStack-Ironic-API-Version"),
        _ => None,
    };
    if let Some(name) = legacy {
        headers.insert(name.to_string(), version.to_string());
    }

    headers.insert(
        API_VERSION_HEADER.to_string(),
        format!("{service_type} {version}"),
    );
    headers
}

/// Append `pairs` to the query string of `url`
pub fn with_query(mut url: Url, pairs: &[(String, String)]) -> Url {
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    url
}

fn insert_headers(headers: &mut HeaderMap, values: &StringMap) -> Result<()> {
    for (key, value) in values {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::config(format!("invalid header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::config(format!("invalid value for header '{key}': {e}")))?;
        headers.insert(name, value);
    }
    Ok(())
}
