//! Common types used throughout stackclient
//!
//! Shared type aliases and small enums used by more than one module.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Pagination Kind
// ============================================================================

/// Which continuation scheme a listing endpoint uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PaginationKind {
    /// The server never paginates this endpoint
    #[default]
    Single,
    /// Next page URL embedded in the body as a `rel="next"` link
    Linked,
    /// Next page requested with `marker=<last item id>`
    Marked,
}

impl std::fmt::Display for PaginationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Linked => write!(f, "linked"),
            Self::Marked => write!(f, "marked"),
        }
    }
}

impl std::str::FromStr for PaginationKind {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "linked" | "link" => Ok(Self::Linked),
            "marked" | "marker" => Ok(Self::Marked),
            other => Err(crate::error::Error::config(format!(
                "unknown pagination kind '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Sort Direction
// ============================================================================

/// Sort direction accepted by listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    /// Query-string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}
