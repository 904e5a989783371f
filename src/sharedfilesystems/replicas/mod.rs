//! Shared filesystems v2 share replicas
//!
//! Listing uses marker pagination: the next page is requested with
//! `marker=<id of the last replica>` on the same URL.
//!
//! Replica calls need microversion 2.56, where the `share-replicas` paths
//! left experimental status. The client's configured microversion wins when
//! one is set.

mod types;

pub use types::{CreateOpts, ExportLocation, ListOpts, PromoteOpts, Replica};

use types::{ExportLocationEnvelope, ExportLocationsEnvelope, ReplicaEnvelope};

use super::{request, version_headers};
use crate::error::Result;
use crate::http::{with_query, ServiceClient};
use crate::pagination::{extract_into, Fetcher, MarkedPage, Page, Pager};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Body key holding replica items
pub const ITEMS_KEY: &str = "share_replicas";

/// Minimum microversion for the replica API
pub const REPLICAS_MICROVERSION: &str = "2.56";

/// List replicas (summary view)
pub fn list(client: &Arc<ServiceClient>, opts: &ListOpts) -> Result<Pager<MarkedPage>> {
    list_at(client, &["share-replicas"], opts)
}

/// List replicas with details
pub fn list_detail(client: &Arc<ServiceClient>, opts: &ListOpts) -> Result<Pager<MarkedPage>> {
    list_at(client, &["share-replicas", "detail"], opts)
}

fn list_at(
    client: &Arc<ServiceClient>,
    parts: &[&str],
    opts: &ListOpts,
) -> Result<Pager<MarkedPage>> {
    let url = with_query(client.service_url(parts)?, &opts.to_query());
    let fetcher: Arc<dyn Fetcher> = client.clone();
    let headers = version_headers(client, REPLICAS_MICROVERSION);

    Ok(Pager::new(fetcher, url, |r| MarkedPage::new(r, ITEMS_KEY)).with_headers(headers))
}

/// Decode the replicas carried by a page
pub fn extract_replicas<P: Page + ?Sized>(page: &P) -> Result<Vec<Replica>> {
    extract_into(page)
}

/// Retrieve one replica
pub async fn get(client: &ServiceClient, id: &str) -> Result<Replica> {
    let url = client.service_url(&["share-replicas", id])?;
    let envelope: ReplicaEnvelope<Replica> = client
        .get_json(&url, request(client, REPLICAS_MICROVERSION))
        .await?;
    Ok(envelope.share_replica)
}

/// Create a replica of a share
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<Replica> {
    let url = client.service_url(&["share-replicas"])?;
    let body = ReplicaEnvelope {
        share_replica: opts,
    };
    let envelope: ReplicaEnvelope<Replica> = client
        .post_json(&url, &body, request(client, REPLICAS_MICROVERSION).ok_codes(&[202]))
        .await?;
    info!(
        "Created replica {} of share {}",
        envelope.share_replica.id, opts.share_id
    );
    Ok(envelope.share_replica)
}

/// Delete a replica
pub async fn delete(client: &ServiceClient, id: &str) -> Result<()> {
    let url = client.service_url(&["share-replicas", id])?;
    client
        .delete(&url, request(client, REPLICAS_MICROVERSION).ok_codes(&[202]))
        .await
}

/// Make a replica the active one
pub async fn promote(client: &ServiceClient, id: &str, opts: &PromoteOpts) -> Result<()> {
    action(client, id, json!({ "promote": opts })).await
}

/// Resynchronize a replica with the active one
pub async fn resync(client: &ServiceClient, id: &str) -> Result<()> {
    action(client, id, json!({"resync": null})).await
}

/// Set a replica's status (admin)
pub async fn reset_status(client: &ServiceClient, id: &str, status: &str) -> Result<()> {
    action(client, id, json!({"reset_status": {"status": status}})).await
}

/// Set a replica's replication state (admin)
pub async fn reset_state(client: &ServiceClient, id: &str, state: &str) -> Result<()> {
    action(
        client,
        id,
        json!({"reset_replica_state": {"replica_state": state}}),
    )
    .await
}

/// Delete a replica regardless of its state (admin)
pub async fn force_delete(client: &ServiceClient, id: &str) -> Result<()> {
    action(client, id, json!({"force_delete": null})).await
}

/// List the export locations of a replica
pub async fn list_export_locations(client: &ServiceClient, id: &str) -> Result<Vec<ExportLocation>> {
    let url = client.service_url(&["share-replicas", id, "export-locations"])?;
    let envelope: ExportLocationsEnvelope = client
        .get_json(&url, request(client, REPLICAS_MICROVERSION))
        .await?;
    Ok(envelope.export_locations)
}

/// Retrieve one export location of a replica
pub async fn get_export_location(
    client: &ServiceClient,
    id: &str,
    location_id: &str,
) -> Result<ExportLocation> {
    let url = client.service_url(&["share-replicas", id, "export-locations", location_id])?;
    let envelope: ExportLocationEnvelope = client
        .get_json(&url, request(client, REPLICAS_MICROVERSION))
        .await?;
    Ok(envelope.export_location)
}

async fn action(client: &ServiceClient, id: &str, body: Value) -> Result<()> {
    let url = client.service_url(&["share-replicas", id, "action"])?;
    client
        .post_action(
            &url,
            &body,
            request(client, REPLICAS_MICROVERSION).ok_codes(&[202]),
        )
        .await
}

#[cfg(test)]
mod tests;
