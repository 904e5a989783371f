//! Tests for share replicas

use super::*;
use crate::error::Error;
use crate::http::ServiceClientConfig;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn replica_json(id: &str, state: &str) -> Value {
    json!({
        "id": id,
        "share_id": "share-1",
        "availability_zone": "nova",
        "share_network_id": null,
        "replica_state": state,
        "status": "available",
        "created_at": "2023-11-02T08:00:00.000000",
        "updated_at": "2023-11-02T08:05:30.500000"
    })
}

fn client_for(server: &MockServer) -> Arc<ServiceClient> {
    let config = ServiceClientConfig::builder()
        .endpoint(format!("{}/v2", server.uri()))
        .service_type("sharev2")
        .build();
    Arc::new(ServiceClient::with_config(config).unwrap())
}

#[test]
fn test_list_opts_to_query() {
    let opts = ListOpts {
        share_id: Some("share-1".to_string()),
        limit: Some(2),
        ..Default::default()
    };
    assert_eq!(
        opts.to_query(),
        vec![
            ("share_id".to_string(), "share-1".to_string()),
            ("limit".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn test_replica_is_active() {
    let replica: Replica = serde_json::from_value(replica_json("r1", "active")).unwrap();
    assert!(replica.is_active());
    let replica: Replica = serde_json::from_value(replica_json("r2", "in_sync")).unwrap();
    assert!(!replica.is_active());
}

#[tokio::test]
async fn test_list_detail_follows_markers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas/detail"))
        .and(query_param("share_id", "share-1"))
        .and(query_param("limit", "2"))
        .and(query_param_is_missing("marker"))
        .and(header("X-OpenStack-Manila-API-Version", "2.56"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "share_replicas": [replica_json("r1", "active"), replica_json("r2", "in_sync")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas/detail"))
        .and(query_param("share_id", "share-1"))
        .and(query_param("limit", "2"))
        .and(query_param("marker", "r2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "share_replicas": [replica_json("r3", "out_of_sync")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas/detail"))
        .and(query_param("marker", "r3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"share_replicas": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = ListOpts {
        share_id: Some("share-1".to_string()),
        limit: Some(2),
        ..Default::default()
    };
    let all = list_detail(&client, &opts).unwrap().all_pages().await.unwrap();
    let replicas = extract_replicas(&all).unwrap();

    let ids: Vec<&str> = replicas.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2", "r3"]);
    assert_eq!(replicas.iter().filter(|r| r.is_active()).count(), 1);
}

#[tokio::test]
async fn test_list_uses_configured_microversion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas"))
        .and(query_param_is_missing("marker"))
        .and(header("OpenStack-API-Version", "sharev2 2.60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "share_replicas": [replica_json("r1", "active")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas"))
        .and(query_param("marker", "r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"share_replicas": []})))
        .mount(&server)
        .await;

    let config = ServiceClientConfig::builder()
        .endpoint(format!("{}/v2", server.uri()))
        .service_type("sharev2")
        .microversion("2.60")
        .build();
    let client = Arc::new(ServiceClient::with_config(config).unwrap());

    let mut pages = 0;
    list(&client, &ListOpts::default())
        .unwrap()
        .each_page(|page| {
            pages += 1;
            assert_eq!(extract_replicas(page)?.len(), 1);
            Ok(true)
        })
        .await
        .unwrap();

    assert_eq!(pages, 1);
}

#[tokio::test]
async fn test_list_server_error_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = list(&client, &ListOpts::default())
        .unwrap()
        .all_pages()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_replica_actions() {
    let server = MockServer::start().await;
    let action_path = "/v2/share-replicas/r2/action";

    for body in [
        json!({"promote": {"quiesce_wait_time": 30}}),
        json!({"resync": null}),
        json!({"reset_status": {"status": "error"}}),
        json!({"reset_replica_state": {"replica_state": "out_of_sync"}}),
        json!({"force_delete": null}),
    ] {
        Mock::given(method("POST"))
            .and(path(action_path))
            .and(body_json(body))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let opts = PromoteOpts {
        quiesce_wait_time: Some(30),
    };
    promote(&client, "r2", &opts).await.unwrap();
    resync(&client, "r2").await.unwrap();
    reset_status(&client, "r2", "error").await.unwrap();
    reset_state(&client, "r2", "out_of_sync").await.unwrap();
    force_delete(&client, "r2").await.unwrap();
}

#[tokio::test]
async fn test_create_and_get() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/share-replicas"))
        .and(body_json(json!({"share_replica": {"share_id": "share-1", "availability_zone": "az-2"}})))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(json!({"share_replica": replica_json("r9", "out_of_sync")})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas/r9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"share_replica": replica_json("r9", "in_sync")})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = CreateOpts {
        share_id: "share-1".to_string(),
        availability_zone: Some("az-2".to_string()),
        ..Default::default()
    };

    let created = create(&client, &opts).await.unwrap();
    assert_eq!(created.replica_state.as_deref(), Some("out_of_sync"));

    let fetched = get(&client, &created.id).await.unwrap();
    assert_eq!(fetched.replica_state.as_deref(), Some("in_sync"));
}

#[tokio::test]
async fn test_export_locations() {
    let server = MockServer::start().await;
    let location = json!({
        "id": "el-1",
        "path": "10.0.0.5:/shares/share-1",
        "preferred": true,
        "replica_state": "active",
        "availability_zone": "nova",
        "is_admin_only": false
    });

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas/r1/export-locations"))
        .and(header("X-OpenStack-Manila-API-Version", "2.56"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"export_locations": [location.clone()]})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/share-replicas/r1/export-locations/el-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"export_location": location})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let locations = list_export_locations(&client, "r1").await.unwrap();
    assert_eq!(locations.len(), 1);
    assert!(locations[0].preferred);

    let single = get_export_location(&client, "r1", "el-1").await.unwrap();
    assert_eq!(single.path, "10.0.0.5:/shares/share-1");
}

#[tokio::test]
async fn test_delete_replica() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/share-replicas/r3"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    delete(&client, "r3").await.unwrap();
}
