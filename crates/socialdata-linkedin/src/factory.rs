//! Builds one owned [`LinkedInClient`] per connected account.

use socialdata_core::EngineConfiguration;

use crate::client::{ClientCredentials, LinkedInClient, DEFAULT_API_BASE, DEFAULT_OAUTH_BASE};
use crate::error::LinkedInError;

/// Everything needed to build a client except the per-account credentials.
#[derive(Debug, Clone)]
pub struct LinkedInClientFactory {
    callback_url: String,
    timeout_secs: u64,
    api_base: String,
    oauth_base: String,
}

impl LinkedInClientFactory {
    #[must_use]
    pub fn new(callback_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self::with_base_urls(
            callback_url,
            timeout_secs,
            DEFAULT_API_BASE,
            DEFAULT_OAUTH_BASE,
        )
    }

    /// Factory whose clients talk to custom bases (for wiremock).
    #[must_use]
    pub fn with_base_urls(
        callback_url: impl Into<String>,
        timeout_secs: u64,
        api_base: impl Into<String>,
        oauth_base: impl Into<String>,
    ) -> Self {
        Self {
            callback_url: callback_url.into(),
            timeout_secs,
            api_base: api_base.into(),
            oauth_base: oauth_base.into(),
        }
    }

    #[must_use]
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Builds a fresh client from `engine`'s credentials.
    ///
    /// The stored access token is not applied; callers decide whether the
    /// flow needs it.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedInError::InvalidArgument`] if the engine has no client
    /// id or secret, or any error from [`LinkedInClient::with_base_urls`].
    pub fn client_for(&self, engine: &EngineConfiguration) -> Result<LinkedInClient, LinkedInError> {
        let client_id = engine.client_id().ok_or_else(|| {
            LinkedInError::InvalidArgument("engine configuration has no client id".to_string())
        })?;
        let client_secret = engine.client_secret().ok_or_else(|| {
            LinkedInError::InvalidArgument("engine configuration has no client secret".to_string())
        })?;

        LinkedInClient::with_base_urls(
            ClientCredentials {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
                callback_url: self.callback_url.clone(),
            },
            self.timeout_secs,
            &self.api_base,
            &self.oauth_base,
        )
    }
}
