//! Stage options and the normalized post record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use socialdata_core::EngineConfiguration;

/// Endpoint listing an organization's shares.
pub const UGC_POSTS_ENDPOINT: &str = "ugcPosts";

/// Public permalink prefix; the post id is appended verbatim.
pub const POST_URL_PREFIX: &str = "https://www.linkedin.com/feed/update/";

/// A LinkedIn share normalized into the host's generic social-post shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub social_id: String,
    pub social_creation_date: DateTime<Utc>,
    pub content: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// Query sent to `ugcPosts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPayload {
    pub q: String,
    /// Rest.li list of author URNs, e.g. `List(urn:li:organization:12345)`.
    pub authors: String,
    pub count: i64,
}

impl QueryPayload {
    /// Query for every share authored by one organization.
    #[must_use]
    pub fn for_organization(company_id: &str, count: i64) -> Self {
        Self {
            q: "authors".to_string(),
            authors: format!("List(urn:li:organization:{company_id})"),
            count,
        }
    }
}

/// Everything the fetch stage needs; produced once per feed by
/// [`crate::configure_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub endpoint: String,
    pub engine: EngineConfiguration,
    pub query: QueryPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// Lifecycle states that are shown.
    pub lifecycle_states: Vec<String>,
    /// Value one of the visibility entries must carry, when visibility is set.
    pub required_visibility: String,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            lifecycle_states: vec!["PUBLISHED".to_string(), "PUBLISHED_EDITED".to_string()],
            required_visibility: "PUBLIC".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub post_url_prefix: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            post_url_prefix: POST_URL_PREFIX.to_string(),
        }
    }
}

/// A raw element that passed the filter, keyed by its post id.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredElement {
    pub id: String,
    pub element: serde_json::Value,
}
