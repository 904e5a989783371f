//! Pagination strategy implementations
//!
//! Each strategy handles a specific continuation pattern.

use super::types::{json_kind, NextPage, Page, PageResult};
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// Single Page
// ============================================================================

/// Endpoint the server never paginates
///
/// The first fetch is always the last one.
#[derive(Debug, Clone)]
pub struct SinglePage {
    result: PageResult,
    items_key: String,
}

impl SinglePage {
    /// Wrap a page result whose items live under `items_key`
    pub fn new(result: PageResult, items_key: impl Into<String>) -> Self {
        Self {
            result,
            items_key: items_key.into(),
        }
    }
}

impl Page for SinglePage {
    fn result(&self) -> &PageResult {
        &self.result
    }

    fn items_key(&self) -> &str {
        &self.items_key
    }

    fn next_page(&self) -> Result<NextPage> {
        Ok(NextPage::Done)
    }
}

// ============================================================================
// Linked Page
// ============================================================================

/// Link pagination (next URL embedded in the body)
///
/// The body carries a collection of link objects next to the items:
/// ```json
/// {
///   "snapshots": [...],
///   "snapshots_links": [{"href": "https://.../snapshots?marker=abc", "rel": "next"}]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LinkedPage {
    result: PageResult,
    items_key: String,
    links_key: String,
}

impl LinkedPage {
    /// Wrap a page result with items under `items_key` and links under `links_key`
    pub fn new(
        result: PageResult,
        items_key: impl Into<String>,
        links_key: impl Into<String>,
    ) -> Self {
        Self {
            result,
            items_key: items_key.into(),
            links_key: links_key.into(),
        }
    }

    /// Body key holding the link collection
    pub fn links_key(&self) -> &str {
        &self.links_key
    }

    /// Find the `href` of the link with the given `rel`
    pub fn find_link(&self, rel: &str) -> Result<Option<String>> {
        let links = match self.result.body.get(&self.links_key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Array(links)) => links,
            Some(other) => {
                return Err(Error::decode(format!(
                    "'{}' is not an array (found {})",
                    self.links_key,
                    json_kind(other)
                )))
            }
        };

        for link in links {
            if link.get("rel").and_then(Value::as_str) != Some(rel) {
                continue;
            }
            return match link.get("href").and_then(Value::as_str) {
                Some(href) => Ok(Some(href.to_string())),
                None => Err(Error::decode(format!(
                    "'{rel}' link in '{}' has no href",
                    self.links_key
                ))),
            };
        }

        Ok(None)
    }
}

impl Page for LinkedPage {
    fn result(&self) -> &PageResult {
        &self.result
    }

    fn items_key(&self) -> &str {
        &self.items_key
    }

    fn next_page(&self) -> Result<NextPage> {
        match self.find_link("next")? {
            Some(href) if !href.is_empty() => {
                // Relative links resolve against the page they came from
                let next = self.result.url.join(&href).map_err(|e| {
                    Error::decode(format!(
                        "'next' link '{href}' in '{}' is not a valid URL: {e}",
                        self.links_key
                    ))
                })?;
                Ok(NextPage::Url(next.to_string()))
            }
            _ => Ok(NextPage::Done),
        }
    }
}

// ============================================================================
// Marked Page
// ============================================================================

/// Marker pagination (last seen identifier sent back as `marker`)
///
/// The marker is read from `marker_field` of the last item on the page.
/// Common patterns:
/// - `?marker=<id>`
/// - `?limit=50&marker=<id>`
#[derive(Debug, Clone)]
pub struct MarkedPage {
    result: PageResult,
    items_key: String,
    marker_field: String,
}

impl MarkedPage {
    /// Wrap a page result whose items live under `items_key`, marked by `id`
    pub fn new(result: PageResult, items_key: impl Into<String>) -> Self {
        Self::with_marker_field(result, items_key, "id")
    }

    /// Wrap a page result using a custom marker field
    pub fn with_marker_field(
        result: PageResult,
        items_key: impl Into<String>,
        marker_field: impl Into<String>,
    ) -> Self {
        Self {
            result,
            items_key: items_key.into(),
            marker_field: marker_field.into(),
        }
    }

    /// Marker of the last item on this page, if any
    pub fn last_marker(&self) -> Result<Option<String>> {
        let Some(last) = self.items()?.last() else {
            return Ok(None);
        };

        match last.get(&self.marker_field) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            _ => Err(Error::decode(format!(
                "last item in '{}' has no usable '{}' marker",
                self.items_key, self.marker_field
            ))),
        }
    }
}

impl Page for MarkedPage {
    fn result(&self) -> &PageResult {
        &self.result
    }

    fn items_key(&self) -> &str {
        &self.items_key
    }

    fn next_page(&self) -> Result<NextPage> {
        Ok(match self.last_marker()? {
            Some(marker) if !marker.is_empty() => NextPage::Marker(marker),
            _ => NextPage::Done,
        })
    }
}
