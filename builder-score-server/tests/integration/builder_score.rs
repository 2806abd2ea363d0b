use crate::helpers;
use builder_score_logic::{test_utils::MockedRpcNode, Address};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const VITALIK: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
const ALICE: &str = "0x00000000000000000000000000000000000a11ce";

fn address(value: &str) -> Address {
    value.parse().unwrap()
}

async fn get_json(base: &url::Url, route: &str) -> (StatusCode, Value) {
    let response = helpers::get(base, route).await;
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn resolves_name_and_returns_score() {
    let rpc = MockedRpcNode::new()
        .with_name("vitalik.base.eth", address(VITALIK))
        .start()
        .await;
    let score_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/resolves/{VITALIK}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score": {
                "points": 97,
                "rank_position": 1234,
                "last_calculated_at": "2025-03-01T12:30:00Z",
                "slug": "builder_score"
            }
        })))
        .expect(1)
        .mount(&score_api)
        .await;
    let base = helpers::init_server(&rpc, &score_api, "/resolves").await;

    let (status, body) = get_json(&base, "/api/builder-score?name=%20Vitalik%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "score": {
                "points": 97,
                "rank_position": 1234,
                "last_calculated_at": "2025-03-01T12:30:00Z",
                "slug": "builder_score"
            },
            "address": VITALIK
        })
    );
}

#[tokio::test]
async fn missing_name_is_bad_request() {
    let rpc = MockedRpcNode::new().start().await;
    let score_api = MockServer::start().await;
    let base = helpers::init_server(&rpc, &score_api, "/missing-name").await;

    for route in ["/api/builder-score", "/api/builder-score?name=", "/api/builder-score?name=%20"] {
        let (status, body) = get_json(&base, route).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "route: {route}");
        assert_eq!(body, json!({"error": "name is required"}), "route: {route}");
    }
    assert!(rpc.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn unresolved_name_is_not_found() {
    let rpc = MockedRpcNode::new()
        .with_reverting_name("broken.base.eth")
        .start()
        .await;
    let score_api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&score_api)
        .await;
    let base = helpers::init_server(&rpc, &score_api, "/unresolved").await;

    for name in ["nobody", "broken", "nobody.eth"] {
        let (status, body) = get_json(&base, &format!("/api/builder-score?name={name}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "name: {name}");
        assert_eq!(body, json!({"error": "could not resolve this name"}));
    }
}

#[tokio::test]
async fn address_without_score_gets_zero_record() {
    let rpc = MockedRpcNode::new()
        .with_name("alice.base.eth", address(ALICE))
        .start()
        .await;
    let score_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/no-record/{}", address(ALICE).to_checksum(None))))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&score_api)
        .await;
    let base = helpers::init_server(&rpc, &score_api, "/no-record").await;

    let (status, body) = get_json(&base, "/api/builder-score?name=alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "score": {
                "points": 0,
                "rank_position": null,
                "last_calculated_at": null,
                "slug": "builder_score"
            },
            "address": address(ALICE).to_checksum(None)
        })
    );
}

#[tokio::test]
async fn score_api_failure_is_internal_error() {
    let rpc = MockedRpcNode::new()
        .with_name("alice.base.eth", address(ALICE))
        .start()
        .await;
    let score_api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"error": "bad gateway"})))
        .mount(&score_api)
        .await;
    let base = helpers::init_server(&rpc, &score_api, "/failing").await;

    let (status, body) = get_json(&base, "/api/builder-score?name=alice.base.eth").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "bad gateway"}));
}

#[tokio::test]
async fn broken_rpc_is_internal_error() {
    let rpc = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("node is down"))
        .mount(&rpc)
        .await;
    let score_api = MockServer::start().await;
    let base = helpers::init_server(&rpc, &score_api, "/broken-rpc").await;

    let (status, body) = get_json(&base, "/api/builder-score?name=alice").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some_and(|error| !error.is_empty()), "{body}");
}
