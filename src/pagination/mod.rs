//! Pagination module
//!
//! Supports: Single Page, Linked Page (next link in body), Marked Page (marker query)
//!
//! # Overview
//!
//! The pagination module turns a sequence of server-paginated responses into
//! one iteration. Resource modules pick a strategy when they build a
//! [`Pager`]; the pager fetches pages one at a time through a [`Fetcher`]
//! and asks each page whether it is empty and where the next one lives.

mod pager;
mod strategies;
mod types;

pub use pager::{with_marker, CreatePage, Pager, LIMIT_PARAM, MARKER_PARAM};
pub use strategies::{LinkedPage, MarkedPage, SinglePage};
pub use types::{extract_into, extract_items, Fetcher, NextPage, Page, PageResult, RawResponse};
