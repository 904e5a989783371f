//! Replica types

use crate::pagination::{LIMIT_PARAM, MARKER_PARAM};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A share replica
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Replica {
    /// Unique identifier
    pub id: String,

    /// Share this replica belongs to
    pub share_id: String,

    /// Availability zone holding the replica
    #[serde(default)]
    pub availability_zone: Option<String>,

    /// Share network of the replica (detail listing only)
    #[serde(default)]
    pub share_network_id: Option<String>,

    /// Share server of the replica (detail listing, admin only)
    #[serde(default)]
    pub share_server_id: Option<String>,

    /// Replication state ("active", "in_sync", "out_of_sync", "error")
    #[serde(default)]
    pub replica_state: Option<String>,

    /// Lifecycle status ("available", "creating", ...)
    pub status: String,

    /// Creation time
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,

    /// Last update time
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Replica {
    /// True if this replica is the writable one
    pub fn is_active(&self) -> bool {
        self.replica_state.as_deref() == Some("active")
    }
}

/// An export location of a replica
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExportLocation {
    /// Unique identifier
    pub id: String,
    /// Mount path
    pub path: String,
    /// Whether clients should prefer this location
    #[serde(default)]
    pub preferred: bool,
    /// Replication state of the owning replica
    #[serde(default)]
    pub replica_state: Option<String>,
    /// Availability zone of the owning replica
    #[serde(default)]
    pub availability_zone: Option<String>,
    /// Only visible to administrators
    #[serde(default)]
    pub is_admin_only: bool,
}

/// Filters and paging for listing replicas
#[derive(Debug, Clone, Default)]
pub struct ListOpts {
    /// Only replicas of this project (admin only)
    pub project_id: Option<String>,
    /// Only replicas of this share
    pub share_id: Option<String>,
    /// Page size hint
    pub limit: Option<u32>,
    /// Start after this replica ID
    pub marker: Option<String>,
}

impl ListOpts {
    /// Render the options as query parameters
    pub fn to_query(&self) -> Vec<(String, String)> {
        let pairs = [
            ("project_id", self.project_id.clone()),
            ("share_id", self.share_id.clone()),
            (LIMIT_PARAM, self.limit.map(|l| l.to_string())),
            (MARKER_PARAM, self.marker.clone()),
        ];

        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect()
    }
}

/// Options for creating a replica
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOpts {
    /// Share to replicate
    pub share_id: String,
    /// Target availability zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    /// Share network for the replica
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_network_id: Option<String>,
}

/// Options for promoting a replica
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromoteOpts {
    /// Seconds to wait for the old active replica to quiesce
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiesce_wait_time: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ReplicaEnvelope<T> {
    pub share_replica: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportLocationsEnvelope {
    pub export_locations: Vec<ExportLocation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportLocationEnvelope {
    pub export_location: ExportLocation,
}
