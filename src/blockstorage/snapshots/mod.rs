//! Block storage v3 snapshots
//!
//! Listing uses link pagination: each page carries its items under
//! `snapshots` and a `rel="next"` link under `snapshots_links`.

mod types;

pub use types::{CreateOpts, ListOpts, Snapshot, UpdateOpts, UpdateStatusOpts};

use types::SnapshotEnvelope;

use crate::error::Result;
use crate::http::{with_query, RequestConfig, ServiceClient};
use crate::pagination::{extract_into, Fetcher, LinkedPage, Page, Pager};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Body key holding snapshot items
pub const ITEMS_KEY: &str = "snapshots";

/// Body key holding pagination links
pub const LINKS_KEY: &str = "snapshots_links";

/// List snapshots with details
pub fn list(client: &Arc<ServiceClient>, opts: &ListOpts) -> Result<Pager<LinkedPage>> {
    let url = with_query(client.service_url(&["snapshots", "detail"])?, &opts.to_query());
    let fetcher: Arc<dyn Fetcher> = client.clone();
    Ok(Pager::new(fetcher, url, |r| {
        LinkedPage::new(r, ITEMS_KEY, LINKS_KEY)
    }))
}

/// Decode the snapshots carried by a page
pub fn extract_snapshots<P: Page + ?Sized>(page: &P) -> Result<Vec<Snapshot>> {
    extract_into(page)
}

/// Retrieve one snapshot
pub async fn get(client: &ServiceClient, id: &str) -> Result<Snapshot> {
    let url = client.service_url(&["snapshots", id])?;
    let envelope: SnapshotEnvelope<Snapshot> = client.get_json(&url, RequestConfig::new()).await?;
    Ok(envelope.snapshot)
}

/// Create a snapshot of a volume
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<Snapshot> {
    let url = client.service_url(&["snapshots"])?;
    let body = SnapshotEnvelope { snapshot: opts };
    let envelope: SnapshotEnvelope<Snapshot> = client
        .post_json(&url, &body, RequestConfig::new().ok_codes(&[202]))
        .await?;
    info!("Created snapshot {} of volume {}", envelope.snapshot.id, opts.volume_id);
    Ok(envelope.snapshot)
}

/// Update a snapshot's name or description
pub async fn update(client: &ServiceClient, id: &str, opts: &UpdateOpts) -> Result<Snapshot> {
    let url = client.service_url(&["snapshots", id])?;
    let body = SnapshotEnvelope { snapshot: opts };
    let envelope: SnapshotEnvelope<Snapshot> = client
        .put_json(&url, &body, RequestConfig::new().ok_codes(&[200]))
        .await?;
    Ok(envelope.snapshot)
}

/// Delete a snapshot
pub async fn delete(client: &ServiceClient, id: &str) -> Result<()> {
    let url = client.service_url(&["snapshots", id])?;
    client.delete(&url, RequestConfig::new()).await
}

/// Force a snapshot into `status` regardless of its current state (admin)
pub async fn reset_status(client: &ServiceClient, id: &str, status: &str) -> Result<()> {
    action(client, id, json!({"os-reset_status": {"status": status}})).await
}

/// Update a snapshot's status as its backend would
pub async fn update_status(client: &ServiceClient, id: &str, opts: &UpdateStatusOpts) -> Result<()> {
    action(client, id, json!({ "os-update_snapshot_status": opts })).await
}

/// Delete a snapshot regardless of its state (admin)
pub async fn force_delete(client: &ServiceClient, id: &str) -> Result<()> {
    action(client, id, json!({"os-force_delete": {}})).await
}

async fn action(client: &ServiceClient, id: &str, body: serde_json::Value) -> Result<()> {
    let url = client.service_url(&["snapshots", id, "action"])?;
    client
        .post_action(&url, &body, RequestConfig::new().ok_codes(&[202]))
        .await
}
