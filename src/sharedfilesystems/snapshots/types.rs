//! Share snapshot types

use crate::pagination::{LIMIT_PARAM, MARKER_PARAM};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A snapshot of a share
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    pub id: String,
    pub share_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle status ("available", "creating", "error", ...)
    pub status: String,
    /// Size in GiB
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub share_size: Option<u64>,
    #[serde(default)]
    pub share_proto: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Filters and paging for listing snapshots
#[derive(Debug, Clone, Default)]
pub struct ListOpts {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub share_id: Option<String>,
    pub project_id: Option<String>,
    /// Include snapshots of every project (admin only)
    pub all_tenants: bool,
    pub limit: Option<u32>,
    pub marker: Option<String>,
}

impl ListOpts {
    /// Render the options as query parameters
    pub fn to_query(&self) -> Vec<(String, String)> {
        let pairs = [
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("status", self.status.clone()),
            ("share_id", self.share_id.clone()),
            ("project_id", self.project_id.clone()),
            ("all_tenants", self.all_tenants.then(|| "true".to_string())),
            (LIMIT_PARAM, self.limit.map(|l| l.to_string())),
            (MARKER_PARAM, self.marker.clone()),
        ];

        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect()
    }
}

/// Options for creating a snapshot
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOpts {
    pub share_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Snapshot even when the share is busy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

/// Options for updating a snapshot
///
/// `Some("")` clears a field; `None` leaves it untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct SnapshotEnvelope<T> {
    pub snapshot: T,
}
