//! Shared filesystems v2 share snapshots
//!
//! Listing uses marker pagination on `snapshots/detail`. The
//! `snapshots/{id}/action` path needs microversion 2.7; older versions
//! only accept it as an experimental API.

mod types;

pub use types::{CreateOpts, ListOpts, Snapshot, UpdateOpts};

use types::SnapshotEnvelope;

use super::{request, version_headers};
use crate::error::Result;
use crate::http::{with_query, ServiceClient};
use crate::pagination::{extract_into, Fetcher, MarkedPage, Page, Pager};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Body key holding snapshot items
pub const ITEMS_KEY: &str = "snapshots";

/// Minimum microversion for the snapshot API
pub const SNAPSHOTS_MICROVERSION: &str = "2.7";

/// List snapshots with details
pub fn list_detail(client: &Arc<ServiceClient>, opts: &ListOpts) -> Result<Pager<MarkedPage>> {
    let url = with_query(client.service_url(&["snapshots", "detail"])?, &opts.to_query());
    let fetcher: Arc<dyn Fetcher> = client.clone();
    let headers = version_headers(client, SNAPSHOTS_MICROVERSION);

    Ok(Pager::new(fetcher, url, |r| MarkedPage::new(r, ITEMS_KEY)).with_headers(headers))
}

/// Decode the snapshots carried by a page
pub fn extract_snapshots<P: Page + ?Sized>(page: &P) -> Result<Vec<Snapshot>> {
    extract_into(page)
}

/// Retrieve one snapshot
pub async fn get(client: &ServiceClient, id: &str) -> Result<Snapshot> {
    let url = client.service_url(&["snapshots", id])?;
    let envelope: SnapshotEnvelope<Snapshot> = client
        .get_json(&url, request(client, SNAPSHOTS_MICROVERSION))
        .await?;
    Ok(envelope.snapshot)
}

/// Snapshot a share
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<Snapshot> {
    let url = client.service_url(&["snapshots"])?;
    let body = SnapshotEnvelope { snapshot: opts };
    let envelope: SnapshotEnvelope<Snapshot> = client
        .post_json(&url, &body, request(client, SNAPSHOTS_MICROVERSION).ok_codes(&[202]))
        .await?;
    info!(
        "Created snapshot {} of share {}",
        envelope.snapshot.id, opts.share_id
    );
    Ok(envelope.snapshot)
}

/// Rename or re-describe a snapshot
pub async fn update(client: &ServiceClient, id: &str, opts: &UpdateOpts) -> Result<Snapshot> {
    let url = client.service_url(&["snapshots", id])?;
    let body = SnapshotEnvelope { snapshot: opts };
    let envelope: SnapshotEnvelope<Snapshot> = client
        .put_json(&url, &body, request(client, SNAPSHOTS_MICROVERSION))
        .await?;
    Ok(envelope.snapshot)
}

/// Delete a snapshot
pub async fn delete(client: &ServiceClient, id: &str) -> Result<()> {
    let url = client.service_url(&["snapshots", id])?;
    client
        .delete(&url, request(client, SNAPSHOTS_MICROVERSION).ok_codes(&[202]))
        .await
}

/// Set a snapshot's status (admin)
pub async fn reset_status(client: &ServiceClient, id: &str, status: &str) -> Result<()> {
    action(client, id, json!({"reset_status": {"status": status}})).await
}

/// Delete a snapshot regardless of its state (admin)
pub async fn force_delete(client: &ServiceClient, id: &str) -> Result<()> {
    action(client, id, json!({"force_delete": null})).await
}

async fn action(client: &ServiceClient, id: &str, body: Value) -> Result<()> {
    let url = client.service_url(&["snapshots", id, "action"])?;
    client
        .post_action(
            &url,
            &body,
            request(client, SNAPSHOTS_MICROVERSION).ok_codes(&[202]),
        )
        .await
}
