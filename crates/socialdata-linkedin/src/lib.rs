//! OAuth2-authenticated client for LinkedIn's REST API v2.
//!
//! [`LinkedInClient`] covers the authorization-code handshake (login URL,
//! code exchange, token introspection) and signed REST calls against the API
//! base. [`LinkedInClientFactory`] builds one owned client per connected
//! account from its [`socialdata_core::EngineConfiguration`].

pub mod client;
mod encoding;
pub mod error;
pub mod factory;
pub mod introspection;
pub mod scopes;
pub mod types;

pub use client::{
    AccessToken, ClientCredentials, LinkedInClient, QueryEncoding, DEFAULT_API_BASE,
    DEFAULT_OAUTH_BASE,
};
pub use error::LinkedInError;
pub use factory::LinkedInClientFactory;
pub use introspection::format_introspection_dates;
pub use types::{
    ShareCommentary, ShareContent, ShareMedia, SpecificContent, Thumbnail, UgcPost,
    UgcPostSummary,
};
