//! LinkedIn connect flow: authorization redirect, OAuth callback and token
//! introspection.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use socialdata_linkedin::{format_introspection_dates, LinkedInClient};

use super::{AppState, MAX_PENDING_STATES};

/// Error payload shown to the admin when connecting fails.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ConnectError {
    #[serde(skip)]
    status: StatusCode,
    error_code: String,
    context: String,
    message: String,
}

impl ConnectError {
    fn new(
        status: StatusCode,
        error_code: impl Into<String>,
        context: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            error_code: error_code.into(),
            context: context.into(),
            message: message.into(),
        }
    }

    fn general(context: &str, message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "general_error",
            context,
            message,
        )
    }
}

impl IntoResponse for ConnectError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ConnectSuccess {
    success: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub(super) struct DebugTokenResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl DebugTokenResponse {
    fn failure(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: Some(true),
            message: Some(message.into()),
            ..Self::default()
        })
    }
}

fn engine_client(state: &AppState) -> Result<LinkedInClient, ConnectError> {
    let engine = state.store.load();
    if !engine.has_credentials() {
        return Err(ConnectError::general(
            "connector engine configuration error",
            "LinkedIn client id and client secret are not configured",
        ));
    }
    state
        .factory
        .client_for(&engine)
        .map_err(|e| ConnectError::general("connector engine configuration error", e.to_string()))
}

/// Redirects the admin to LinkedIn's consent page.
pub(super) async fn connect(State(state): State<AppState>) -> Result<Redirect, ConnectError> {
    let mut client = engine_client(&state)?;
    let login_url = client
        .build_login_url(state.config.linkedin_connect_scopes.as_slice(), None)
        .map_err(|e| ConnectError::general("connector engine configuration error", e.to_string()))?;

    if let Some(issued) = client.state() {
        let mut pending = state.pending_states.lock().await;
        if pending.len() >= MAX_PENDING_STATES {
            pending.pop_front();
        }
        pending.push_back(issued.to_string());
    }

    tracing::info!(scopes = ?state.config.linkedin_connect_scopes, "redirecting to LinkedIn authorization");
    Ok(Redirect::to(login_url.as_str()))
}

/// OAuth redirect target: verifies state, exchanges the code and persists
/// the token.
pub(super) async fn check(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<ConnectSuccess>, ConnectError> {
    let mut client = engine_client(&state)?;

    if let Some(error) = query.error {
        tracing::warn!(error = %error, "LinkedIn returned an authorization error");
        return Err(ConnectError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error,
            "connection error",
            query
                .error_description
                .unwrap_or_else(|| "Unknown Error".to_string()),
        ));
    }

    let returned_state = query.state.unwrap_or_default();
    if !take_pending_state(&state, &mut client, &returned_state).await {
        tracing::warn!("OAuth callback carried an unknown state");
        return Err(ConnectError::new(
            StatusCode::BAD_REQUEST,
            "invalid_state",
            "connection error",
            "the state parameter does not match an issued authorization request",
        ));
    }

    let token = client
        .exchange_authorization_code(query.code.as_deref().unwrap_or_default())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "authorization code exchange failed");
            ConnectError::general("invalid access token", e.to_string())
        })?;

    let now = Utc::now();
    let expires_at = i64::try_from(token.expires_in)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime));

    let mut engine = state.store.load();
    engine
        .set_access_token(Some(token.token), true)
        .map_err(|e| ConnectError::general("invalid access token", e.to_string()))?;
    engine.set_access_token_expires_at(expires_at, true);
    state.store.save(engine).map_err(|e| {
        tracing::error!(error = %e, "failed to persist engine configuration");
        ConnectError::general("connector engine configuration error", e.to_string())
    })?;

    tracing::info!(expires_at = ?expires_at, "LinkedIn connection established");
    Ok(Json(ConnectSuccess { success: true }))
}

/// Removes and returns whether a pending state matches `returned`.
async fn take_pending_state(state: &AppState, client: &mut LinkedInClient, returned: &str) -> bool {
    let mut pending = state.pending_states.lock().await;
    let position = pending
        .iter()
        .position(|issued| client.set_state(issued).is_ok() && client.verify_state(returned));
    match position {
        Some(index) => {
            pending.remove(index);
            true
        }
        None => false,
    }
}

/// Introspects the stored access token.
pub(super) async fn debug_token(State(state): State<AppState>) -> Json<DebugTokenResponse> {
    let engine = state.store.load();
    let Some(token) = engine.access_token().filter(|t| !t.is_empty()) else {
        return DebugTokenResponse::failure("access token is empty");
    };

    let client = match state.factory.client_for(&engine) {
        Ok(client) => client,
        Err(e) => return DebugTokenResponse::failure(e.to_string()),
    };

    match client.introspect_token(token).await {
        Ok(mut data) => {
            format_introspection_dates(&mut data);
            Json(DebugTokenResponse {
                success: Some(true),
                data: Some(data),
                ..DebugTokenResponse::default()
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, "token introspection failed");
            DebugTokenResponse::failure(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "linkedin_test.rs"]
mod tests;
