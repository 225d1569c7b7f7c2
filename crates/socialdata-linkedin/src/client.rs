//! HTTP client for LinkedIn's REST API and OAuth endpoints.
//!
//! Wraps `reqwest` with LinkedIn-specific request signing
//! (`oauth2_access_token` query parameter, Rest.li protocol header) and error
//! handling. LinkedIn frequently reports failures inside a `"status"` field
//! of an otherwise successful response, so every decoded body is inspected
//! before it is handed back.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use subtle::ConstantTimeEq;

use crate::encoding::{encode_component, form_decode, form_encode};
use crate::error::LinkedInError;
use crate::types::TokenResponse;

pub const DEFAULT_API_BASE: &str = "https://api.linkedin.com/v2";
pub const DEFAULT_OAUTH_BASE: &str = "https://www.linkedin.com/oauth/v2";

const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Application credentials and the registered OAuth redirect URL.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// Result of a successful authorization-code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    /// Lifetime in seconds, counted from the exchange.
    pub expires_in: u64,
}

/// How query parameters are written into GET URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryEncoding {
    /// Standard form encoding.
    #[default]
    Encoded,
    /// Form-encoded, then URL-decoded, so Rest.li syntax such as
    /// `List(urn:li:organization:1)` reaches LinkedIn literally.
    Decoded,
}

/// Client for a single LinkedIn application.
///
/// Owns one `reqwest::Client`; its connection pool is released when the
/// client is dropped. Use [`LinkedInClient::new`] for production or
/// [`LinkedInClient::with_base_urls`] to point at a mock server in tests.
pub struct LinkedInClient {
    http: Client,
    credentials: ClientCredentials,
    api_base: Url,
    oauth_base: Url,
    state: Option<String>,
    access_token: Option<String>,
    access_token_expires_in: Option<u64>,
}

impl std::fmt::Debug for LinkedInClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedInClient")
            .field("credentials", &self.credentials)
            .field("api_base", &self.api_base)
            .field("oauth_base", &self.oauth_base)
            .field("state", &self.state.as_ref().map(|_| "[redacted]"))
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("access_token_expires_in", &self.access_token_expires_in)
            .finish_non_exhaustive()
    }
}

impl LinkedInClient {
    /// Creates a client pointed at the production LinkedIn endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedInError::InvalidArgument`] if a credential is blank, or
    /// [`LinkedInError::Transport`] if the `reqwest::Client` cannot be built.
    pub fn new(credentials: ClientCredentials, timeout_secs: u64) -> Result<Self, LinkedInError> {
        Self::with_base_urls(
            credentials,
            timeout_secs,
            DEFAULT_API_BASE,
            DEFAULT_OAUTH_BASE,
        )
    }

    /// Creates a client with custom API and OAuth bases (for wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LinkedInError::InvalidArgument`] if a credential is blank or
    /// a base URL does not parse, or [`LinkedInError::Transport`] if the
    /// `reqwest::Client` cannot be built.
    pub fn with_base_urls(
        credentials: ClientCredentials,
        timeout_secs: u64,
        api_base: &str,
        oauth_base: &str,
    ) -> Result<Self, LinkedInError> {
        require_non_blank(&credentials.client_id, "client id")?;
        require_non_blank(&credentials.client_secret, "client secret")?;
        require_non_blank(&credentials.callback_url, "callback url")?;

        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("socialdata-linkedin/0.1")
            .build()?;

        Ok(Self {
            http,
            credentials,
            api_base: normalise_base(api_base)?,
            oauth_base: normalise_base(oauth_base)?,
            state: None,
            access_token: None,
            access_token_expires_in: None,
        })
    }

    /// Builds the authorization redirect URL for the given scopes.
    ///
    /// When `state` is absent or blank a fresh random token is generated. The
    /// chosen state is kept on the client, see [`LinkedInClient::state`].
    ///
    /// # Errors
    ///
    /// Returns [`LinkedInError::InvalidArgument`] if the resulting URL does
    /// not parse.
    pub fn build_login_url<S: AsRef<str>>(
        &mut self,
        scopes: &[S],
        state: Option<&str>,
    ) -> Result<Url, LinkedInError> {
        let state = match state.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s.to_string(),
            None => uuid::Uuid::new_v4().simple().to_string(),
        };
        self.set_state(&state)?;

        let scope = scopes
            .iter()
            .map(|s| encode_component(s.as_ref()))
            .collect::<Vec<_>>()
            .join("%20");

        let raw = format!(
            "{}authorization?response_type=code&client_id={}&scope={scope}&state={}&redirect_uri={}",
            self.oauth_base,
            encode_component(&self.credentials.client_id),
            encode_component(&state),
            encode_component(&self.credentials.callback_url),
        );

        Url::parse(&raw)
            .map_err(|e| LinkedInError::InvalidArgument(format!("invalid login URL: {e}")))
    }

    /// Sets the OAuth state manually.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedInError::InvalidArgument`] if `state` is blank.
    pub fn set_state(&mut self, state: &str) -> Result<(), LinkedInError> {
        let state = state.trim();
        if state.is_empty() {
            return Err(LinkedInError::InvalidArgument(
                "state must be a non-blank unique identifier".to_string(),
            ));
        }
        self.state = Some(state.to_string());
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Compares a state returned by LinkedIn with the one issued by
    /// [`LinkedInClient::build_login_url`], in constant time.
    #[must_use]
    pub fn verify_state(&self, returned: &str) -> bool {
        self.state
            .as_deref()
            .is_some_and(|issued| bool::from(issued.as_bytes().ct_eq(returned.trim().as_bytes())))
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// The token and its lifetime are cached on the client only when the
    /// exchange succeeds.
    ///
    /// # Errors
    ///
    /// - [`LinkedInError::InvalidArgument`] if `code` is blank.
    /// - [`LinkedInError::AuthExchange`] if LinkedIn returns an `error`, or
    ///   the response carries no token.
    /// - [`LinkedInError::RemoteApi`] on an error status.
    /// - [`LinkedInError::Transport`] / [`LinkedInError::Decode`] on network
    ///   or decoding failure.
    pub async fn exchange_authorization_code(
        &mut self,
        code: &str,
    ) -> Result<AccessToken, LinkedInError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(LinkedInError::InvalidArgument(
                "invalid authorization code; pass the \"code\" parameter from the callback URL"
                    .to_string(),
            ));
        }

        let query = form_encode(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("redirect_uri", self.credentials.callback_url.as_str()),
        ]);
        let url = format!("{}accessToken?{query}", self.oauth_base);

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-li-format"),
            HeaderValue::from_static("json"),
        );
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));

        let (http_status, body) = self
            .send(&url, &[], Method::POST, headers, QueryEncoding::Encoded)
            .await?;
        check_embedded_status(&body)?;

        let token_response: TokenResponse =
            serde_json::from_value(body.clone()).unwrap_or_default();

        if let Some(error) = token_response.error.filter(|e| !e.is_empty()) {
            tracing::warn!(error = %error, "LinkedIn rejected authorization code");
            return Err(LinkedInError::AuthExchange {
                error,
                description: token_response.error_description.unwrap_or_default(),
            });
        }

        if !http_status.is_success() {
            return Err(LinkedInError::RemoteApi {
                status: i64::from(http_status.as_u16()),
                body,
            });
        }

        let token = token_response
            .access_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| LinkedInError::AuthExchange {
                error: "invalid_response".to_string(),
                description: "token response did not contain an access_token".to_string(),
            })?;
        let expires_in = token_response
            .expires_in
            .and_then(|s| u64::try_from(s).ok())
            .ok_or_else(|| LinkedInError::AuthExchange {
                error: "invalid_response".to_string(),
                description: "token response did not contain a valid expires_in".to_string(),
            })?;

        self.access_token = Some(token.clone());
        self.access_token_expires_in = Some(expires_in);
        tracing::info!(expires_in, "LinkedIn access token obtained");

        Ok(AccessToken { token, expires_in })
    }

    /// Supplies a previously persisted token instead of performing an exchange.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedInError::InvalidArgument`] if `token` is blank.
    pub fn set_access_token(&mut self, token: &str) -> Result<(), LinkedInError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(LinkedInError::InvalidArgument(
                "invalid access token".to_string(),
            ));
        }
        self.access_token = Some(token.to_string());
        Ok(())
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Seconds until expiry as reported by the last successful exchange.
    #[must_use]
    pub fn access_token_expires_in(&self) -> Option<u64> {
        self.access_token_expires_in
    }

    /// GETs an authenticated API endpoint.
    ///
    /// # Errors
    ///
    /// See [`LinkedInClient::fetch`].
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        headers: &HeaderMap,
    ) -> Result<serde_json::Value, LinkedInError> {
        self.fetch(endpoint, query, Method::GET, headers, QueryEncoding::Encoded)
            .await
    }

    /// GETs an authenticated API endpoint with URL-decoded query values.
    ///
    /// # Errors
    ///
    /// See [`LinkedInClient::fetch`].
    pub async fn get_encoded(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        headers: &HeaderMap,
    ) -> Result<serde_json::Value, LinkedInError> {
        self.fetch(endpoint, query, Method::GET, headers, QueryEncoding::Decoded)
            .await
    }

    /// POSTs a form body to an authenticated API endpoint.
    ///
    /// # Errors
    ///
    /// See [`LinkedInClient::fetch`].
    pub async fn post(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
        headers: &HeaderMap,
    ) -> Result<serde_json::Value, LinkedInError> {
        let headers = with_form_content_type(headers);
        self.fetch(endpoint, form, Method::POST, &headers, QueryEncoding::Encoded)
            .await
    }

    /// PUTs a form body to an authenticated API endpoint.
    ///
    /// # Errors
    ///
    /// See [`LinkedInClient::fetch`].
    pub async fn put(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
        headers: &HeaderMap,
    ) -> Result<serde_json::Value, LinkedInError> {
        let headers = with_form_content_type(headers);
        self.fetch(endpoint, form, Method::PUT, &headers, QueryEncoding::Encoded)
            .await
    }

    /// Calls an authenticated API endpoint.
    ///
    /// Appends `oauth2_access_token`, sets `Content-Type: application/json`
    /// and the Rest.li protocol header; caller headers take precedence.
    ///
    /// # Errors
    ///
    /// - [`LinkedInError::InvalidArgument`] if no access token is set.
    /// - [`LinkedInError::RemoteApi`] if the body carries an error status or
    ///   the HTTP status is not 2xx.
    /// - [`LinkedInError::Transport`] / [`LinkedInError::Decode`] on network
    ///   or decoding failure.
    pub async fn fetch(
        &self,
        endpoint: &str,
        payload: &[(&str, &str)],
        method: Method,
        headers: &HeaderMap,
        encoding: QueryEncoding,
    ) -> Result<serde_json::Value, LinkedInError> {
        let token = self.access_token.as_deref().ok_or_else(|| {
            LinkedInError::InvalidArgument(
                "no access token; exchange an authorization code or set a token first".to_string(),
            )
        })?;

        let url = format!(
            "{}{}?{}",
            self.api_base,
            trim_endpoint(endpoint),
            form_encode(&[("oauth2_access_token", token)])
        );

        let mut all_headers = HeaderMap::new();
        all_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        all_headers.insert(
            HeaderName::from_static("x-restli-protocol-version"),
            HeaderValue::from_static(RESTLI_PROTOCOL_VERSION),
        );
        for (name, value) in headers {
            all_headers.insert(name.clone(), value.clone());
        }

        tracing::debug!(endpoint = trim_endpoint(endpoint), %method, "LinkedIn API request");
        let (http_status, body) = self
            .send(&url, payload, method, all_headers, encoding)
            .await?;
        check_status(http_status, &body)?;
        Ok(body)
    }

    /// Calls an endpoint under the OAuth base, without the access token.
    ///
    /// # Errors
    ///
    /// Same as [`LinkedInClient::fetch`], minus the missing-token case.
    pub async fn fetch_oauth(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        method: Method,
    ) -> Result<serde_json::Value, LinkedInError> {
        let url = format!("{}{}", self.oauth_base, trim_endpoint(endpoint));
        let headers = if method == Method::POST || method == Method::PUT {
            with_form_content_type(&HeaderMap::new())
        } else {
            HeaderMap::new()
        };

        tracing::debug!(endpoint = trim_endpoint(endpoint), %method, "LinkedIn OAuth request");
        let (http_status, body) = self
            .send(&url, params, method, headers, QueryEncoding::Encoded)
            .await?;
        check_status(http_status, &body)?;
        Ok(body)
    }

    /// Fetches metadata for `token` from `introspectToken`.
    ///
    /// # Errors
    ///
    /// See [`LinkedInClient::fetch_oauth`].
    pub async fn introspect_token(&self, token: &str) -> Result<serde_json::Value, LinkedInError> {
        self.fetch_oauth(
            "introspectToken",
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("token", token),
            ],
            Method::POST,
        )
        .await
    }

    /// Sends one request and decodes the JSON body.
    ///
    /// GET-like methods carry `payload` in the query string; POST/PUT carry it
    /// as a form body with an explicit `Content-Length`.
    async fn send(
        &self,
        url: &str,
        payload: &[(&str, &str)],
        method: Method,
        mut headers: HeaderMap,
        encoding: QueryEncoding,
    ) -> Result<(StatusCode, serde_json::Value), LinkedInError> {
        let mut url = url.to_string();
        let mut body = None;

        if !payload.is_empty() {
            let encoded = form_encode(payload);
            if method == Method::POST || method == Method::PUT {
                headers.insert(CONTENT_LENGTH, HeaderValue::from(encoded.len()));
                body = Some(encoded);
            } else {
                let query = match encoding {
                    QueryEncoding::Encoded => encoded,
                    QueryEncoding::Decoded => form_decode(&encoded),
                };
                url.push(if url.contains('?') { '&' } else { '?' });
                url.push_str(&query);
            }
        }

        let url = Url::parse(&url)
            .map_err(|e| LinkedInError::InvalidArgument(format!("invalid request URL: {e}")))?;
        let context = format!("{method} {}", url.path());

        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str(&text)
            .map_err(|e| LinkedInError::Decode { context, source: e })?;

        Ok((status, body))
    }
}

fn require_non_blank(value: &str, what: &str) -> Result<(), LinkedInError> {
    if value.trim().is_empty() {
        return Err(LinkedInError::InvalidArgument(format!(
            "invalid {what}: value must not be empty"
        )));
    }
    Ok(())
}

/// Parses a base URL and makes sure it ends with exactly one slash.
fn normalise_base(base: &str) -> Result<Url, LinkedInError> {
    let normalised = format!("{}/", base.trim_end_matches('/'));
    Url::parse(&normalised)
        .map_err(|e| LinkedInError::InvalidArgument(format!("invalid base URL '{base}': {e}")))
}

fn trim_endpoint(endpoint: &str) -> &str {
    endpoint.trim_matches(|c| c == '/' || c == '\\')
}

fn with_form_content_type(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    headers
}

/// Reads a numeric `"status"` field (number or numeric string).
fn embedded_status(body: &serde_json::Value) -> Option<i64> {
    match body.get("status")? {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn check_embedded_status(body: &serde_json::Value) -> Result<(), LinkedInError> {
    match embedded_status(body) {
        Some(status) if !(200..300).contains(&status) => Err(LinkedInError::RemoteApi {
            status,
            body: body.clone(),
        }),
        _ => Ok(()),
    }
}

/// Embedded status wins; otherwise the HTTP status line decides.
fn check_status(http_status: StatusCode, body: &serde_json::Value) -> Result<(), LinkedInError> {
    if embedded_status(body).is_some() {
        return check_embedded_status(body);
    }
    if !http_status.is_success() {
        return Err(LinkedInError::RemoteApi {
            status: i64::from(http_status.as_u16()),
            body: body.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
