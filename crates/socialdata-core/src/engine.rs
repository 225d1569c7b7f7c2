//! Credential and token state for one connected LinkedIn account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Credential/token state associated with one connection.
///
/// The token fields follow partial-update semantics: passing `None` without
/// `force_update` leaves the stored value untouched, so a form submission
/// that omits the field does not wipe a token obtained through OAuth.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfiguration {
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    access_token_expires_at: Option<DateTime<Utc>>,
}

impl EngineConfiguration {
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn set_client_id(&mut self, client_id: Option<String>) {
        self.client_id = client_id;
    }

    #[must_use]
    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn set_client_secret(&mut self, client_secret: Option<String>) {
        self.client_secret = client_secret;
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Sets the access token.
    ///
    /// `None` only clears the stored token when `force_update` is set.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if `token` is present but blank.
    pub fn set_access_token(
        &mut self,
        token: Option<String>,
        force_update: bool,
    ) -> Result<(), CoreError> {
        match token {
            None if !force_update => Ok(()),
            None => {
                self.access_token = None;
                Ok(())
            }
            Some(t) if t.trim().is_empty() => Err(CoreError::InvalidArgument(
                "access token must not be blank".to_string(),
            )),
            Some(t) => {
                self.access_token = Some(t.trim().to_string());
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn access_token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.access_token_expires_at
    }

    /// Sets the token expiry. `None` only clears it when `force_update` is set.
    pub fn set_access_token_expires_at(
        &mut self,
        expires_at: Option<DateTime<Utc>>,
        force_update: bool,
    ) {
        if expires_at.is_none() && !force_update {
            return;
        }
        self.access_token_expires_at = expires_at;
    }

    /// Both client id and client secret are present and non-blank.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.client_id) && present(&self.client_secret)
    }

    /// Returns `true` when an expiry is recorded and lies before `now`.
    #[must_use]
    pub fn is_access_token_expired(&self, now: DateTime<Utc>) -> bool {
        self.access_token_expires_at.is_some_and(|at| at <= now)
    }
}

impl std::fmt::Debug for EngineConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfiguration")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("access_token_expires_at", &self.access_token_expires_at)
            .finish()
    }
}
