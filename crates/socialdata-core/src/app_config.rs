use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Path the OAuth callback is mounted on; LinkedIn redirects here after consent.
pub const CALLBACK_PATH: &str = "/api/v1/linkedin/connect/check";

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub public_url: String,
    pub feeds_path: PathBuf,
    pub engine_store_path: PathBuf,
    pub linkedin_client_id: Option<String>,
    pub linkedin_client_secret: Option<String>,
    pub linkedin_connect_scopes: Vec<String>,
    pub linkedin_request_timeout_secs: u64,
}

impl AppConfig {
    /// Absolute URL LinkedIn redirects back to after authorization.
    #[must_use]
    pub fn callback_url(&self) -> String {
        format!("{}{CALLBACK_PATH}", self.public_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("public_url", &self.public_url)
            .field("feeds_path", &self.feeds_path)
            .field("engine_store_path", &self.engine_store_path)
            .field("linkedin_client_id", &self.linkedin_client_id)
            .field(
                "linkedin_client_secret",
                &self.linkedin_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("linkedin_connect_scopes", &self.linkedin_connect_scopes)
            .field(
                "linkedin_request_timeout_secs",
                &self.linkedin_request_timeout_secs,
            )
            .finish()
    }
}
