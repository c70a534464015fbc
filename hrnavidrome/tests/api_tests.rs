//! HTTP routes of hrnavidrome, backed by a mock Navidrome

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hrnavidrome::api_rest::create_router;
use hrnavidrome::{NavidromeClient, NavidromeServerExt, NavidromeState};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn router_for(server: &MockServer) -> Router {
    let client = NavidromeClient::builder()
        .base_url(server.uri())
        .username("alice")
        .password("secret")
        .build()
        .unwrap();
    create_router(NavidromeState::new(client))
}

async fn call(router: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

#[tokio::test]
async fn test_fetch_playlists_route() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/getPlaylists.view"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subsonic-response": {
                "status": "ok",
                "playlists": {"playlist": [{"id": "pl1", "name": "Morning Mix", "coverArt": "pl-pl1"}]}
            }
        })))
        .mount(&mock_server)
        .await;

    let (status, _, body) = call(router_for(&mock_server), "/fetch-playlists").await;
    assert_eq!(status, StatusCode::OK);

    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        value,
        json!([{"id": "pl1", "name": "Morning Mix", "coverArt": "pl-pl1"}])
    );
}

#[tokio::test]
async fn test_fetch_playlists_upstream_failure_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/getPlaylists.view"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (status, _, body) = call(router_for(&mock_server), "/fetch-playlists").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(value["error"].is_string());
}

#[tokio::test]
async fn test_cover_art_requires_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    for uri in ["/get-cover-art", "/get-cover-art?id=", "/get-cover-art?size=300"] {
        let (status, _, body) = call(router_for(&mock_server), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body, b"Missing cover art ID");
    }
}

#[tokio::test]
async fn test_cover_art_route() {
    let mock_server = MockServer::start().await;
    let image = vec![0xFF, 0xD8, 0xFF, 0xE0];

    Mock::given(method("GET"))
        .and(path("/rest/getCoverArt.view"))
        .and(query_param("id", "pl-pl1"))
        .and(query_param("size", "120"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(image.clone(), "image/jpeg"))
        .mount(&mock_server)
        .await;

    let (status, content_type, body) =
        call(router_for(&mock_server), "/get-cover-art?id=pl-pl1&size=120").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(body, image);
}

#[tokio::test]
async fn test_cover_art_ignores_invalid_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/getCoverArt.view"))
        .and(query_param("id", "pl-pl1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, content_type, _) =
        call(router_for(&mock_server), "/get-cover-art?id=pl-pl1&size=big").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/jpeg"));

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].url.query_pairs().all(|(k, _)| k != "size"));
}

#[tokio::test]
async fn test_cover_art_size_with_unit_suffix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/getCoverArt.view"))
        .and(query_param("id", "pl-pl1"))
        .and(query_param("size", "64"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1, 2, 3], "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, content_type, body) =
        call(router_for(&mock_server), "/get-cover-art?id=pl-pl1&size=64px").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(body, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_cover_art_not_found_route() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/getCoverArt.view"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (status, _, _) = call(router_for(&mock_server), "/get-cover-art?id=nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_server_extension_mounts_routes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/getPlaylists.view"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subsonic-response": {"status": "ok"}
        })))
        .mount(&mock_server)
        .await;

    let client = NavidromeClient::builder()
        .base_url(mock_server.uri())
        .username("alice")
        .password("secret")
        .build()
        .unwrap();

    let mut server = hrserver::Server::new("Test", "localhost", 0);
    server.init_navidrome_with_client(client).await;

    let (status, _, body) = call(server.router().await, "/api/navidrome/fetch-playlists").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");

    let (status, _, _) = call(server.router().await, "/api-docs/navidrome.json").await;
    assert_eq!(status, StatusCode::OK);
}
