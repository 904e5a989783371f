//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config file → service client → pager → typed resources

use async_trait::async_trait;
use futures::{pin_mut, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use stackclient::blockstorage::snapshots;
use stackclient::networking::bgp::peers;
use stackclient::sharedfilesystems::replicas;
use stackclient::{
    load_config, Error, Fetcher, LinkedPage, MarkedPage, Page, Pager, RawResponse, ServiceClient,
    StringMap,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn snapshot(id: &str) -> Value {
    json!({
        "id": id,
        "volume_id": "vol-1",
        "status": "available",
        "size": 1
    })
}

/// Fetcher that counts requests before delegating to a service client
struct CountingFetcher {
    inner: ServiceClient,
    calls: AtomicUsize,
}

#[async_trait]
impl Fetcher for CountingFetcher {
    async fn get(&self, url: &Url, headers: &StringMap) -> stackclient::Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(url, headers).await
    }
}

// ============================================================================
// Config → Client
// ============================================================================

#[tokio::test]
async fn test_config_file_drives_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas"))
        .and(header("X-Auth-Token", "token-1"))
        .and(header("OpenStack-API-Version", "sharev2 2.56"))
        .and(header("X-OpenStack-Manila-API-Version", "2.56"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"share_replicas": []})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("share.yaml");
    std::fs::write(
        &config_path,
        format!(
            "endpoint: {}/v2\nservice_type: sharev2\nheaders:\n  X-Auth-Token: token-1\n",
            server.uri()
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let client = Arc::new(config.build_client().unwrap());

    let all = replicas::list(&client, &replicas::ListOpts::default())
        .unwrap()
        .all_pages()
        .await
        .unwrap();

    assert!(replicas::extract_replicas(&all).unwrap().is_empty());
}

// ============================================================================
// Linked pagination
// ============================================================================

#[tokio::test]
async fn test_linked_relative_next_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/p/snapshots/detail"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "snapshots": [snapshot("a")],
            "snapshots_links": [{"rel": "next", "href": "detail?marker=a"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/p/snapshots/detail"))
        .and(query_param("marker", "a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "snapshots": [snapshot("b")],
            "snapshots_links": []
        })))
        .mount(&server)
        .await;

    let client = Arc::new(ServiceClient::new(format!("{}/v3/p", server.uri())).unwrap());
    let all = snapshots::list(&client, &snapshots::ListOpts::default())
        .unwrap()
        .all_pages()
        .await
        .unwrap();

    let ids: Vec<String> = snapshots::extract_snapshots(&all)
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_linked_cycle_is_detected() {
    let server = MockServer::start().await;
    let first = format!("{}/v3/p/snapshots/detail", server.uri());

    Mock::given(method("GET"))
        .and(path("/v3/p/snapshots/detail"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "snapshots": [snapshot("a")],
            "snapshots_links": [{"rel": "next", "href": format!("{first}?marker=a")}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/p/snapshots/detail"))
        .and(query_param("marker", "a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "snapshots": [snapshot("b")],
            "snapshots_links": [{"rel": "next", "href": first}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(ServiceClient::new(format!("{}/v3/p", server.uri())).unwrap());
    let err = snapshots::list(&client, &snapshots::ListOpts::default())
        .unwrap()
        .all_pages()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::LinkCycle { .. }));
}

// ============================================================================
// Streams and custom fetchers
// ============================================================================

#[tokio::test]
async fn test_stream_over_custom_fetcher() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1}, {"id": 2}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param("marker", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 3}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param("marker", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let fetcher = Arc::new(CountingFetcher {
        inner: ServiceClient::new(server.uri()).unwrap(),
        calls: AtomicUsize::new(0),
    });
    let url = Url::parse(&format!("{}/v1/items", server.uri())).unwrap();
    let pager: Pager<MarkedPage> =
        Pager::new(fetcher.clone(), url, |r| MarkedPage::new(r, "items"));

    let stream = pager.into_stream();
    pin_mut!(stream);

    let mut sizes = Vec::new();
    while let Some(page) = stream.next().await {
        sizes.push(page.unwrap().items().unwrap().len());
    }

    assert_eq!(sizes, vec![2, 1]);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_visitor_error_stops_fetching() {
    let server = MockServer::start().await;
    let next = format!("{}/v1/things?page=2", server.uri());

    Mock::given(method("GET"))
        .and(path("/v1/things"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "things": [{"id": "x"}],
            "things_links": [{"rel": "next", "href": next}]
        })))
        .mount(&server)
        .await;

    let fetcher = Arc::new(CountingFetcher {
        inner: ServiceClient::new(server.uri()).unwrap(),
        calls: AtomicUsize::new(0),
    });
    let url = Url::parse(&format!("{}/v1/things", server.uri())).unwrap();
    let pager = Pager::new(fetcher.clone(), url, |r| {
        LinkedPage::new(r, "things", "things_links")
    });

    let err = pager
        .each_page(|_| Err(Error::other("visitor gave up")))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Other(ref msg) if msg == "visitor gave up"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Single page resources
// ============================================================================

#[tokio::test]
async fn test_bgp_peers_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.0/bgp-peers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bgp_peers": [{
                "id": "p1",
                "name": "edge",
                "auth_type": "none",
                "peer_ip": "10.0.0.1",
                "remote_as": 64512
            }],
            "bgp_peers_links": [{"rel": "next", "href": "ignored"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(ServiceClient::new(format!("{}/v2.0", server.uri())).unwrap());
    let all = peers::list(&client).unwrap().all_pages().await.unwrap();
    let found = peers::extract_bgp_peers(&all).unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].remote_as, 64512);
}
