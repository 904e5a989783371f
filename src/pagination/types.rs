//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies and by
//! the pager that drives them.

use crate::error::{Error, Result};
use crate::types::StringMap;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Raw response returned by a [`Fetcher`]
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as received
    pub body: String,
}

impl RawResponse {
    /// Create a raw response with no headers
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport seam used by the pager to fetch one page
///
/// Implementations issue exactly one GET per call. Retries, authentication
/// and TLS are the implementation's business; the pager never retries.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` with `headers` added to the request
    async fn get(&self, url: &Url, headers: &StringMap) -> Result<RawResponse>;
}

/// The raw outcome of fetching one page
#[derive(Debug, Clone)]
pub struct PageResult {
    /// Decoded response body
    pub body: Value,
    /// Response headers
    pub headers: HeaderMap,
    /// URL the page was fetched from
    pub url: Url,
}

impl PageResult {
    /// Create a page result
    pub fn new(body: Value, headers: HeaderMap, url: Url) -> Self {
        Self { body, headers, url }
    }

    /// Decode a successful raw response into a page result
    pub fn from_response(response: RawResponse, url: Url) -> Result<Self> {
        let body: Value = serde_json::from_str(&response.body).map_err(|e| {
            Error::decode(format!("response from {url} is not valid JSON: {e}"))
        })?;
        Ok(Self {
            body,
            headers: response.headers,
            url,
        })
    }
}

/// How to locate the page after the current one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Absolute URL of the next page
    Url(String),
    /// Marker to send as the `marker` query parameter on the current URL
    Marker(String),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        !self.is_done()
    }
}

/// A fetched page wrapped in a pagination strategy
///
/// Strategies answer two questions for the pager: whether the page carries
/// any items, and where the next page lives.
pub trait Page: Send {
    /// Raw result this page wraps
    fn result(&self) -> &PageResult;

    /// Body key holding the item array (e.g. `"snapshots"`)
    fn items_key(&self) -> &str;

    /// Items carried by this page
    fn items(&self) -> Result<&[Value]> {
        extract_items(&self.result().body, self.items_key())
    }

    /// True if the page carries zero items
    fn is_empty(&self) -> Result<bool> {
        Ok(self.items()?.is_empty())
    }

    /// Locate the next page
    fn next_page(&self) -> Result<NextPage>;
}

/// Borrow the item array stored under `key`
pub fn extract_items<'a>(body: &'a Value, key: &str) -> Result<&'a [Value]> {
    let object = body
        .as_object()
        .ok_or_else(|| Error::decode(format!("expected a JSON object holding '{key}'")))?;

    match object.get(key) {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(Value::Null) => Ok(&[]),
        Some(other) => Err(Error::decode(format!(
            "'{key}' is not an array (found {})",
            json_kind(other)
        ))),
        None => Err(Error::decode(format!("body has no '{key}' field"))),
    }
}

/// Decode the items of a page into typed values
pub fn extract_into<T, P>(page: &P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: Page + ?Sized,
{
    page.items()?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|e| {
                Error::decode(format!("item {index} in '{}': {e}", page.items_key()))
            })
        })
        .collect()
}

/// Short name of a JSON value's type for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
