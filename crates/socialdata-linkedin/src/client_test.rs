use super::*;

fn credentials() -> ClientCredentials {
    ClientCredentials {
        client_id: "client-123".to_string(),
        client_secret: "secret-456".to_string(),
        callback_url: "https://cms.example.com/api/v1/linkedin/connect/check".to_string(),
    }
}

fn test_client() -> LinkedInClient {
    LinkedInClient::new(credentials(), 30).expect("client construction should not fail")
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[test]
fn login_url_targets_authorization_endpoint() {
    let mut client = test_client();
    let url = client
        .build_login_url(&["r_organization_social", "rw_organization_admin"], Some("abc"))
        .unwrap();

    assert!(url
        .as_str()
        .starts_with("https://www.linkedin.com/oauth/v2/authorization?response_type=code"));
    assert!(url
        .as_str()
        .contains("scope=r_organization_social%20rw_organization_admin"));
    assert_eq!(query_value(&url, "client_id").as_deref(), Some("client-123"));
    assert_eq!(query_value(&url, "state").as_deref(), Some("abc"));
    assert_eq!(
        query_value(&url, "redirect_uri").as_deref(),
        Some("https://cms.example.com/api/v1/linkedin/connect/check")
    );
    assert_eq!(client.state(), Some("abc"));
}

#[test]
fn login_url_generates_state_when_absent() {
    let mut client = test_client();
    let url = client.build_login_url(&["r_liteprofile"], None).unwrap();
    let state = query_value(&url, "state").expect("state param");
    assert!(!state.is_empty());
    assert_eq!(client.state(), Some(state.as_str()));
}

#[test]
fn login_url_generates_state_when_blank() {
    let mut client = test_client();
    client.build_login_url(&["r_liteprofile"], Some("   ")).unwrap();
    assert!(client.state().is_some_and(|s| !s.trim().is_empty()));
}

#[test]
fn generated_states_differ_between_calls() {
    let mut client = test_client();
    client.build_login_url(&["r_liteprofile"], None).unwrap();
    let first = client.state().unwrap().to_string();
    client.build_login_url(&["r_liteprofile"], None).unwrap();
    assert_ne!(client.state().unwrap(), first);
}

#[test]
fn verify_state_matches_only_issued_state() {
    let mut client = test_client();
    assert!(!client.verify_state("anything"));
    client.set_state("issued-state").unwrap();
    assert!(client.verify_state("issued-state"));
    assert!(!client.verify_state("forged-state"));
    assert!(!client.verify_state(""));
}

#[test]
fn set_state_rejects_blank() {
    let mut client = test_client();
    assert!(matches!(
        client.set_state("  "),
        Err(LinkedInError::InvalidArgument(_))
    ));
}

#[test]
fn set_access_token_rejects_blank_and_trims() {
    let mut client = test_client();
    assert!(matches!(
        client.set_access_token(""),
        Err(LinkedInError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.set_access_token("   "),
        Err(LinkedInError::InvalidArgument(_))
    ));
    client.set_access_token(" abc ").unwrap();
    assert_eq!(client.access_token(), Some("abc"));
}

#[test]
fn construction_rejects_blank_credentials() {
    let mut creds = credentials();
    creds.client_secret = " ".to_string();
    let result = LinkedInClient::new(creds, 30);
    assert!(matches!(result, Err(LinkedInError::InvalidArgument(ref m)) if m.contains("client secret")));

    let mut creds = credentials();
    creds.callback_url = String::new();
    assert!(LinkedInClient::new(creds, 30).is_err());
}

#[test]
fn normalise_base_appends_single_slash() {
    assert_eq!(
        normalise_base("https://api.linkedin.com/v2//").unwrap().as_str(),
        "https://api.linkedin.com/v2/"
    );
    assert!(normalise_base("not a url").is_err());
}

#[test]
fn trim_endpoint_strips_slashes_and_backslashes() {
    assert_eq!(trim_endpoint("/ugcPosts/"), "ugcPosts");
    assert_eq!(trim_endpoint("\\ugcPosts"), "ugcPosts");
}

#[test]
fn embedded_error_status_wins_over_http_success() {
    let body = serde_json::json!({ "status": 403, "message": "Not enough permissions" });
    let err = check_status(StatusCode::OK, &body).unwrap_err();
    assert!(matches!(err, LinkedInError::RemoteApi { status: 403, .. }));
}

#[test]
fn numeric_string_status_is_honoured() {
    let body = serde_json::json!({ "status": "401" });
    assert!(check_status(StatusCode::OK, &body).is_err());
    let ok = serde_json::json!({ "status": "200" });
    assert!(check_status(StatusCode::OK, &ok).is_ok());
}

#[test]
fn http_error_without_embedded_status_is_remote_error() {
    let body = serde_json::json!({ "message": "boom" });
    let err = check_status(StatusCode::BAD_GATEWAY, &body).unwrap_err();
    assert!(matches!(err, LinkedInError::RemoteApi { status: 502, .. }));
}

#[test]
fn non_numeric_status_is_ignored() {
    let body = serde_json::json!({ "status": "OK" });
    assert!(check_status(StatusCode::OK, &body).is_ok());
}
