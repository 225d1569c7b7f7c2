//! LinkedIn API response types.
//!
//! Every field is optional: LinkedIn omits keys freely, so presence is
//! checked by the code consuming these types rather than by serde.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// OAuth
// ---------------------------------------------------------------------------

/// Body returned by `oauth/v2/accessToken`, success or failure.
#[derive(Debug, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

// ---------------------------------------------------------------------------
// ugcPosts
// ---------------------------------------------------------------------------

/// The fields needed to decide whether a post is shown at all.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UgcPostSummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub lifecycle_state: Option<String>,
    #[serde(default)]
    pub visibility: Option<HashMap<String, serde_json::Value>>,
}

/// One "User Generated Content" share.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UgcPost {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub lifecycle_state: Option<String>,
    #[serde(default)]
    pub specific_content: Option<SpecificContent>,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub first_published_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SpecificContent {
    #[serde(default, rename = "com.linkedin.ugc.ShareContent")]
    pub share_content: Option<ShareContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareContent {
    #[serde(default)]
    pub share_commentary: Option<ShareCommentary>,
    #[serde(default)]
    pub share_media_category: Option<String>,
    #[serde(default)]
    pub media: Option<Vec<ShareMedia>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCommentary {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inferred_locale: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareMedia {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub thumbnails: Option<Vec<Thumbnail>>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub width: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub height: Option<i64>,
}

/// Accepts JSON integers, integral floats and numeric strings.
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// Accepts strings and JSON numbers, rendering numbers in decimal.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
