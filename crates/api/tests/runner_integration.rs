//! Batch runner against a mock storefront

use picnic_domain::{CountryCode, NodeConfig, PicnicCredentials};
use picnic_node_lib::{run_batch, AppContext, RunError};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer, continue_on_fail: bool) -> NodeConfig {
    NodeConfig {
        credentials: PicnicCredentials::new(CountryCode::Nl, "15")
            .with_login("john@example.com", "topsecret"),
        continue_on_fail,
        base_url: Some(format!("{}/api/15", server.uri())),
    }
}

async fn mount_storefront(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/15/user/login"))
        .respond_with(ResponseTemplate::new(200).insert_header("x-picnic-auth", "session"))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/15/search"))
        .and(query_param("search_term", "milk"))
        .and(header("x-picnic-auth", "session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "s1"}])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn runs_batch_and_reports_item_errors_when_continuing() {
    let server = MockServer::start().await;
    mount_storefront(&server).await;
    let context = AppContext::from_config(config(&server, true)).expect("context");

    let output = run_batch(
        &context,
        r#"[
            {"operation": "searchProducts", "parameters": {"query": "milk"}},
            {"operation": "placeOrder"},
            {"operation": "search-products", "parameters": {"query": "milk"}}
        ]"#,
    )
    .await
    .expect("batch output");

    let output: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        output,
        json!([
            {"json": {"operation": "searchProducts", "result": [{"id": "s1"}]}, "pairedItem": {"item": 0}},
            {"json": {"error": "Unsupported operation: placeOrder"}, "pairedItem": {"item": 1}},
            {"json": {"operation": "searchProducts", "result": [{"id": "s1"}]}, "pairedItem": {"item": 2}}
        ])
    );
}

#[tokio::test]
async fn aborts_on_first_failure_without_continue() {
    let server = MockServer::start().await;
    mount_storefront(&server).await;
    let context = AppContext::from_config(config(&server, false)).expect("context");

    let err = run_batch(
        &context,
        r#"[
            {"operation": "searchProducts", "parameters": {"query": "milk"}},
            {"operation": "addToCart", "parameters": {"count": 2}}
        ]"#,
    )
    .await
    .unwrap_err();

    match err {
        RunError::Aborted(inner) => {
            assert_eq!(inner.item_index, 1);
            assert_eq!(inner.to_string(), "Invalid parameter 'productId': is required");
        }
        other => panic!("expected aborted batch, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_batch_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    let context = AppContext::from_config(config(&server, true)).expect("context");

    let err = run_batch(&context, "not json").await.unwrap_err();

    assert!(matches!(err, RunError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
