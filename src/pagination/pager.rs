//! Pager: drives a pagination strategy over a fetcher
//!
//! A pager is built once per listing call from a starting URL and a
//! page-construction function supplied by the resource module. It can be
//! consumed eagerly ([`Pager::all_pages`]), page by page with a visitor
//! ([`Pager::each_page`]), or as a stream ([`Pager::into_stream`]).
//!
//! Every iteration step runs in the same order:
//! 1. fetch the current URL (transport errors and non-2xx abort)
//! 2. build the page with the strategy
//! 3. stop cleanly if the page is empty, even if it advertises a next page
//! 4. hand the page to the caller, or accumulate its items
//! 5. stop cleanly if the visitor asked to
//! 6. compute the next URL; stop when there is none, fail on a repeat

use super::types::{Fetcher, NextPage, Page, PageResult};
use crate::error::{Error, Result};
use crate::types::StringMap;
use futures::stream::{self, Stream};
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Page-construction function bound to a resource type
pub type CreatePage<P> = Arc<dyn Fn(PageResult) -> P + Send + Sync>;

/// Query parameter used for marker pagination
pub const MARKER_PARAM: &str = "marker";

/// Query parameter carrying the page size hint
pub const LIMIT_PARAM: &str = "limit";

/// Drives repeated page fetches until exhaustion or caller stop
pub struct Pager<P: Page> {
    client: Arc<dyn Fetcher>,
    initial_url: Url,
    create_page: CreatePage<P>,
    headers: StringMap,
}

impl<P: Page> Pager<P> {
    /// Create a pager starting at `url`
    pub fn new<F>(client: Arc<dyn Fetcher>, url: Url, create_page: F) -> Self
    where
        F: Fn(PageResult) -> P + Send + Sync + 'static,
    {
        Self {
            client,
            initial_url: url,
            create_page: Arc::new(create_page),
            headers: StringMap::new(),
        }
    }

    /// Replace the extra headers sent with every page request
    #[must_use]
    pub fn with_headers(mut self, headers: StringMap) -> Self {
        self.headers = headers;
        self
    }

    /// Add an extra header sent with every page request
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// URL of the first page
    pub fn url(&self) -> &Url {
        &self.initial_url
    }

    /// Extra headers sent with every page request
    pub fn headers(&self) -> &StringMap {
        &self.headers
    }

    /// Visit each page in order
    ///
    /// The visitor returns `Ok(true)` to continue, `Ok(false)` to stop early
    /// (not an error), or `Err` to abort; that error is returned unchanged.
    /// Empty pages are never visited and end the iteration.
    pub async fn each_page<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&P) -> Result<bool>,
    {
        let mut cursor = Cursor::new(self.initial_url.clone());
        let mut visited = 0usize;

        while let Some(url) = cursor.take() {
            let page = self.fetch(url).await?;

            if page.is_empty()? {
                debug!("Empty page after {} pages, stopping", visited);
                return Ok(());
            }

            visited += 1;
            if !visit(&page)? {
                debug!("Visitor stopped iteration after {} pages", visited);
                return Ok(());
            }

            cursor.advance(&page)?;
        }

        debug!("No next page after {} pages", visited);
        Ok(())
    }

    /// Fetch every page and concatenate their items
    ///
    /// The returned page is built with the same strategy from the body
    /// `{ <items_key>: [all items in arrival order] }`; it carries the first
    /// response's headers and the initial URL. Any error discards what was
    /// collected.
    pub async fn all_pages(&self) -> Result<P> {
        let mut cursor = Cursor::new(self.initial_url.clone());
        let mut collected: Option<Collected> = None;

        while let Some(url) = cursor.take() {
            let page = self.fetch(url).await?;
            let acc = collected.get_or_insert_with(|| Collected {
                items_key: page.items_key().to_string(),
                headers: page.result().headers.clone(),
                items: Vec::new(),
                pages: 0,
            });

            if page.is_empty()? {
                break;
            }

            acc.items.extend(page.items()?.iter().cloned());
            acc.pages += 1;
            cursor.advance(&page)?;
        }

        let acc = collected.ok_or_else(|| Error::other("pager fetched no pages"))?;
        debug!(
            "Collected {} items from {} pages of {}",
            acc.items.len(),
            acc.pages,
            self.initial_url
        );

        let mut body = serde_json::Map::new();
        body.insert(acc.items_key, Value::Array(acc.items));
        let result = PageResult::new(Value::Object(body), acc.headers, self.initial_url.clone());
        Ok((self.create_page)(result))
    }

    /// Consume the pager as a stream of non-empty pages
    ///
    /// Pages are fetched one at a time as the stream is polled. Dropping the
    /// stream stops the iteration; errors end it after being yielded.
    pub fn into_stream(self) -> impl Stream<Item = Result<P>> + Send
    where
        P: 'static,
    {
        let cursor = Cursor::new(self.initial_url.clone());
        stream::try_unfold((self, cursor, None), stream_step)
    }

    async fn fetch(&self, url: Url) -> Result<P> {
        let response = self.client.get(&url, &self.headers).await?;
        debug!("GET {} -> {}", url, response.status);

        if !response.is_success() {
            return Err(Error::http_status(response.status, response.body));
        }

        let result = PageResult::from_response(response, url)?;
        Ok((self.create_page)(result))
    }
}

impl<P: Page> Clone for Pager<P> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            initial_url: self.initial_url.clone(),
            create_page: Arc::clone(&self.create_page),
            headers: self.headers.clone(),
        }
    }
}

impl<P: Page> std::fmt::Debug for Pager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("url", &self.initial_url.as_str())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// State threaded through `into_stream`
type StreamState<P> = (Pager<P>, Cursor, Option<Error>);

async fn stream_step<P: Page + 'static>(
    (pager, mut cursor, deferred): StreamState<P>,
) -> Result<Option<(P, StreamState<P>)>> {
    // An error computing the next URL surfaces after its page was yielded
    if let Some(err) = deferred {
        return Err(err);
    }
    let Some(url) = cursor.take() else {
        return Ok(None);
    };

    let page = pager.fetch(url).await?;
    if page.is_empty()? {
        return Ok(None);
    }

    let deferred = cursor.advance(&page).err();
    Ok(Some((page, (pager, cursor, deferred))))
}

/// Items gathered by `all_pages`
struct Collected {
    items_key: String,
    headers: HeaderMap,
    items: Vec<Value>,
    pages: usize,
}

/// Iteration cursor: the next URL plus every URL fetched so far
struct Cursor {
    next: Option<Url>,
    visited: HashSet<String>,
}

impl Cursor {
    fn new(url: Url) -> Self {
        Self {
            next: Some(url),
            visited: HashSet::new(),
        }
    }

    /// Take the next URL to fetch and record it as visited
    fn take(&mut self) -> Option<Url> {
        let url = self.next.take()?;
        self.visited.insert(url.to_string());
        Some(url)
    }

    /// Compute the URL after `page`
    fn advance<P: Page>(&mut self, page: &P) -> Result<()> {
        let next = match page.next_page()? {
            NextPage::Done => None,
            NextPage::Url(href) => Some(Url::parse(&href)?),
            NextPage::Marker(marker) => Some(with_marker(&page.result().url, &marker)),
        };

        if let Some(url) = &next {
            if self.visited.contains(url.as_str()) {
                warn!("Next page {} was already fetched, aborting", url);
                return Err(Error::link_cycle(url.as_str()));
            }
        }

        self.next = next;
        Ok(())
    }
}

/// Set `marker` on `url`, keeping every other query parameter
pub fn with_marker(url: &Url, marker: &str) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != MARKER_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut next = url.clone();
    next.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(MARKER_PARAM, marker);
    next
}
