//! Integration tests for `LinkedInClient` using wiremock HTTP mocks.

use reqwest::header::HeaderMap;
use socialdata_linkedin::{ClientCredentials, LinkedInClient, LinkedInError};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CALLBACK: &str = "https://cms.example.com/api/v1/linkedin/connect/check";

fn test_client(server: &MockServer) -> LinkedInClient {
    LinkedInClient::with_base_urls(
        ClientCredentials {
            client_id: "client-123".to_string(),
            client_secret: "secret-456".to_string(),
            callback_url: CALLBACK.to_string(),
        },
        30,
        &format!("{}/v2", server.uri()),
        &format!("{}/oauth/v2", server.uri()),
    )
    .expect("client construction should not fail")
}

fn authorized_client(server: &MockServer) -> LinkedInClient {
    let mut client = test_client(server);
    client.set_access_token("tok-abc").unwrap();
    client
}

#[tokio::test]
async fn exchange_authorization_code_caches_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/v2/accessToken"))
        .and(query_param("grant_type", "authorization_code"))
        .and(query_param("code", "auth-code"))
        .and(query_param("client_id", "client-123"))
        .and(query_param("client_secret", "secret-456"))
        .and(query_param("redirect_uri", CALLBACK))
        .and(header("x-li-format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "AQX-token",
            "expires_in": 5_184_000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = test_client(&server);
    let token = client
        .exchange_authorization_code("auth-code")
        .await
        .expect("exchange should succeed");

    assert_eq!(token.token, "AQX-token");
    assert_eq!(token.expires_in, 5_184_000);
    assert_eq!(client.access_token(), Some("AQX-token"));
    assert_eq!(client.access_token_expires_in(), Some(5_184_000));
}

#[tokio::test]
async fn exchange_error_payload_is_auth_error_and_leaves_cache_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/v2/accessToken"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_request",
            "error_description": "Unable to retrieve access token: appid/redirect uri/code verifier does not match"
        })))
        .mount(&server)
        .await;

    let mut client = test_client(&server);
    let err = client
        .exchange_authorization_code("stale-code")
        .await
        .unwrap_err();

    match err {
        LinkedInError::AuthExchange { error, description } => {
            assert_eq!(error, "invalid_request");
            assert!(description.starts_with("Unable to retrieve access token"));
        }
        other => panic!("expected AuthExchange, got {other:?}"),
    }
    assert!(client.access_token().is_none());
    assert!(client.access_token_expires_in().is_none());
}

#[tokio::test]
async fn exchange_without_token_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/v2/accessToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let mut client = test_client(&server);
    let err = client.exchange_authorization_code("code").await.unwrap_err();
    assert!(matches!(err, LinkedInError::AuthExchange { ref error, .. } if error == "invalid_response"));
    assert!(client.access_token().is_none());
}

#[tokio::test]
async fn blank_code_is_rejected_without_request() {
    let server = MockServer::start().await;
    let mut client = test_client(&server);

    let err = client.exchange_authorization_code("  ").await.unwrap_err();
    assert!(matches!(err, LinkedInError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn get_encoded_sends_restli_syntax_literally() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/ugcPosts"))
        .and(query_param("oauth2_access_token", "tok-abc"))
        .and(query_param("q", "authors"))
        .and(query_param("authors", "List(urn:li:organization:12345)"))
        .and(query_param("count", "20"))
        .and(header("x-restli-protocol-version", "2.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "elements": [{ "id": "urn:li:share:1" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authorized_client(&server);
    let body = client
        .get_encoded(
            "/ugcPosts/",
            &[
                ("q", "authors"),
                ("authors", "List(urn:li:organization:12345)"),
                ("count", "20"),
            ],
            &HeaderMap::new(),
        )
        .await
        .expect("request should succeed");

    assert_eq!(body["elements"][0]["id"], "urn:li:share:1");

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(
        query.contains("authors=List(urn:li:organization:12345)"),
        "query was {query}"
    );
}

#[tokio::test]
async fn get_percent_encodes_query_values() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/ugcPosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = authorized_client(&server);
    client
        .get(
            "ugcPosts",
            &[("authors", "List(urn:li:organization:12345)")],
            &HeaderMap::new(),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("authors=List%28urn%3Ali%3Aorganization%3A12345%29"));
}

#[tokio::test]
async fn embedded_error_status_is_remote_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/ugcPosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "serviceErrorCode": 65600,
            "message": "Invalid access token",
            "status": 401
        })))
        .mount(&server)
        .await;

    let client = authorized_client(&server);
    let err = client
        .get("ugcPosts", &[], &HeaderMap::new())
        .await
        .unwrap_err();

    match err {
        LinkedInError::RemoteApi { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body["message"], "Invalid access token");
        }
        other => panic!("expected RemoteApi, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_status_without_embedded_status_is_remote_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/ugcPosts"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(serde_json::json!({ "message": "down" })),
        )
        .mount(&server)
        .await;

    let client = authorized_client(&server);
    let err = client
        .get("ugcPosts", &[], &HeaderMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkedInError::RemoteApi { status: 503, .. }));
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/ugcPosts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = authorized_client(&server);
    let err = client
        .get("ugcPosts", &[], &HeaderMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LinkedInError::Decode { .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn authenticated_call_without_token_is_rejected() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let err = client
        .get("ugcPosts", &[], &HeaderMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkedInError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn post_sends_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/shares"))
        .and(query_param("oauth2_access_token", "tok-abc"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("text=hello+world"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": "s1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authorized_client(&server);
    let body = client
        .post("shares", &[("text", "hello world")], &HeaderMap::new())
        .await
        .expect("post should succeed");
    assert_eq!(body["id"], "s1");
}

#[tokio::test]
async fn introspect_token_posts_to_oauth_base() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/v2/introspectToken"))
        .and(body_string_contains("client_id=client-123"))
        .and(body_string_contains("token=tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "active": true,
            "status": "active",
            "scope": "r_organization_social",
            "authorized_at": 1_700_000_000,
            "created_at": 1_700_000_000,
            "expires_at": 1_705_184_000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let data = client
        .introspect_token("tok-abc")
        .await
        .expect("introspection should succeed");
    assert_eq!(data["active"], true);
    assert_eq!(data["scope"], "r_organization_social");
}
