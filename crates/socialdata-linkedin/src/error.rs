use thiserror::Error;

/// Errors returned by the LinkedIn API client.
#[derive(Debug, Error)]
pub enum LinkedInError {
    /// A required value was missing or blank.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("response from {context} is not valid JSON: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// LinkedIn answered with an error status, usually embedded in the body.
    #[error("LinkedIn API error (status {status}): {body}")]
    RemoteApi {
        status: i64,
        body: serde_json::Value,
    },

    /// The OAuth token endpoint rejected the authorization code.
    #[error("access token request error: {error} -- {description}")]
    AuthExchange { error: String, description: String },
}

impl LinkedInError {
    /// `true` for failures below the API layer: connection errors and
    /// undecodable responses.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode { .. })
    }
}
