//! Snapshot types
//!
//! Request options and response shapes for the v3 snapshots API.

use crate::pagination::LIMIT_PARAM;
use crate::pagination::MARKER_PARAM;
use crate::types::{SortDir, StringMap};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A block storage snapshot
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    /// Unique identifier
    pub id: String,

    /// Human-readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Volume the snapshot was taken from
    pub volume_id: String,

    /// Current status (e.g. "available", "creating", "error")
    pub status: String,

    /// Size in GiB
    #[serde(default)]
    pub size: u64,

    /// User-defined key/value pairs
    #[serde(default)]
    pub metadata: StringMap,

    /// Creation time
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,

    /// Last update time
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,

    /// Progress of the snapshot (e.g. "100%")
    #[serde(default, rename = "os-extended-snapshot-attributes:progress")]
    pub progress: Option<String>,

    /// Owning project
    #[serde(default, rename = "os-extended-snapshot-attributes:project_id")]
    pub project_id: Option<String>,
}

/// Filters and paging for listing snapshots
#[derive(Debug, Clone, Default)]
pub struct ListOpts {
    /// List snapshots of every project (admin only)
    pub all_tenants: bool,
    /// Only snapshots with this name
    pub name: Option<String>,
    /// Only snapshots in this status
    pub status: Option<String>,
    /// Only snapshots of this volume
    pub volume_id: Option<String>,
    /// Only snapshots owned by this project (with `all_tenants`)
    pub project_id: Option<String>,
    /// Page size hint
    pub limit: Option<u32>,
    /// Skip this many snapshots
    pub offset: Option<u32>,
    /// Start after this snapshot ID
    pub marker: Option<String>,
    /// Sort attribute
    pub sort_key: Option<String>,
    /// Sort direction
    pub sort_dir: Option<SortDir>,
}

impl ListOpts {
    /// Render the options as query parameters
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: String| query.push((key.to_string(), value));

        if self.all_tenants {
            push("all_tenants", "true".to_string());
        }
        if let Some(name) = &self.name {
            push("name", name.clone());
        }
        if let Some(status) = &self.status {
            push("status", status.clone());
        }
        if let Some(volume_id) = &self.volume_id {
            push("volume_id", volume_id.clone());
        }
        if let Some(project_id) = &self.project_id {
            push("project_id", project_id.clone());
        }
        if let Some(limit) = self.limit {
            push(LIMIT_PARAM, limit.to_string());
        }
        if let Some(offset) = self.offset {
            push("offset", offset.to_string());
        }
        if let Some(marker) = &self.marker {
            push(MARKER_PARAM, marker.clone());
        }
        if let Some(sort_key) = &self.sort_key {
            push("sort_key", sort_key.clone());
        }
        if let Some(sort_dir) = self.sort_dir {
            push("sort_dir", sort_dir.as_str().to_string());
        }

        query
    }
}

/// Options for creating a snapshot
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOpts {
    /// Volume to snapshot
    pub volume_id: String,
    /// Snapshot an attached volume
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
    /// Name of the snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description of the snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User-defined key/value pairs
    #[serde(skip_serializing_if = "StringMap::is_empty")]
    pub metadata: StringMap,
}

/// Options for updating a snapshot
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOpts {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Options for the update-status action
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateStatusOpts {
    /// New status
    pub status: String,
    /// Reported progress (e.g. "50%")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
}

/// Wire envelope `{"snapshot": ...}`
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct SnapshotEnvelope<T> {
    pub snapshot: T,
}
