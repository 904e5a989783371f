//! BGP peers of the dynamic routing extension
//!
//! The listing is not paginated: one request returns every peer.

use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use crate::pagination::{extract_into, Fetcher, Page, Pager, SinglePage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body key holding peer items
pub const ITEMS_KEY: &str = "bgp_peers";

/// A BGP peer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BgpPeer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Authentication algorithm ("none", "md5")
    #[serde(default)]
    pub auth_type: String,
    pub peer_ip: String,
    pub remote_as: u32,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Only returned to administrators
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BgpPeerEnvelope {
    bgp_peer: BgpPeer,
}

/// List every BGP peer
pub fn list(client: &Arc<ServiceClient>) -> Result<Pager<SinglePage>> {
    let url = client.service_url(&["bgp-peers"])?;
    let fetcher: Arc<dyn Fetcher> = client.clone();
    Ok(Pager::new(fetcher, url, |r| SinglePage::new(r, ITEMS_KEY)))
}

/// Decode the peers carried by a page
pub fn extract_bgp_peers<P: Page + ?Sized>(page: &P) -> Result<Vec<BgpPeer>> {
    extract_into(page)
}

/// Retrieve one peer
pub async fn get(client: &ServiceClient, id: &str) -> Result<BgpPeer> {
    let url = client.service_url(&["bgp-peers", id])?;
    let envelope: BgpPeerEnvelope = client.get_json(&url, RequestConfig::new()).await?;
    Ok(envelope.bgp_peer)
}
