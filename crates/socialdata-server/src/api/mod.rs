mod linkedin;

use std::collections::VecDeque;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use socialdata_core::{AppConfig, EngineStore};
use socialdata_linkedin::LinkedInClientFactory;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, require_bearer_auth, AuthState, RequestId};

/// Upper bound on OAuth states awaiting their callback; the oldest is evicted.
pub const MAX_PENDING_STATES: usize = 32;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<EngineStore>,
    pub factory: LinkedInClientFactory,
    pub pending_states: Arc<Mutex<VecDeque<String>>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Arc<AppConfig>, store: Arc<EngineStore>) -> Self {
        let factory = LinkedInClientFactory::new(
            config.callback_url(),
            config.linkedin_request_timeout_secs,
        );
        Self::with_factory(config, store, factory)
    }

    #[must_use]
    pub fn with_factory(
        config: Arc<AppConfig>,
        store: Arc<EngineStore>,
        factory: LinkedInClientFactory,
    ) -> Self {
        Self {
            config,
            store,
            factory,
            pending_states: Arc::new(Mutex::new(VecDeque::new())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    linkedin: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

/// Routes that mint OAuth states or expose token data. The callback stays
/// public because LinkedIn's redirect carries no bearer token; it only
/// accepts states issued through the protected connect route.
fn protected_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/linkedin/connect", get(linkedin::connect))
        .route(
            "/api/v1/linkedin/debug-token",
            get(linkedin::debug_token),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_bearer_auth,
        ))
}

pub fn build_app(state: AppState, auth: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route(socialdata_core::app_config::CALLBACK_PATH, get(linkedin::check));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let engine = state.store.load();
    let linkedin = if engine.access_token().is_none() {
        "disconnected"
    } else if engine.is_access_token_expired(Utc::now()) {
        "expired"
    } else {
        "connected"
    };

    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                linkedin,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use std::sync::Arc;

    use socialdata_core::{AppConfig, EngineConfiguration, EngineStore, Environment};
    use socialdata_linkedin::LinkedInClientFactory;

    use super::AppState;

    pub(crate) fn test_config() -> AppConfig {
        AppConfig {
            env: Environment::Test,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            log_level: "debug".to_string(),
            public_url: "https://cms.example.com".to_string(),
            feeds_path: PathBuf::from("./config/feeds.yaml"),
            engine_store_path: PathBuf::from("./config/linkedin_engine.json"),
            linkedin_client_id: None,
            linkedin_client_secret: None,
            linkedin_connect_scopes: vec![
                "r_organization_social".to_string(),
                "rw_organization_admin".to_string(),
            ],
            linkedin_request_timeout_secs: 5,
        }
    }

    pub(crate) fn test_state(engine: EngineConfiguration, linkedin_base: &str) -> AppState {
        let config = Arc::new(test_config());
        let factory = LinkedInClientFactory::with_base_urls(
            config.callback_url(),
            5,
            format!("{linkedin_base}/v2"),
            format!("{linkedin_base}/oauth/v2"),
        );
        AppState::with_factory(config, Arc::new(EngineStore::in_memory(engine)), factory)
    }
}
