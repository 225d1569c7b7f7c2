//! Per-feed query parameters.

use serde::{Deserialize, Deserializer, Serialize};

/// Item count requested when a feed has no usable limit.
pub const DEFAULT_FETCH_LIMIT: i64 = 20;

/// Lower bound offered by the admin form. Not enforced by the pipeline.
pub const LIMIT_UI_MIN: i64 = 0;

/// Upper bound offered by the admin form. Not enforced by the pipeline.
pub const LIMIT_UI_MAX: i64 = 500;

/// Query parameters for a single LinkedIn feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfiguration {
    /// Organization id. Older feed records call it `pageId`.
    #[serde(
        default,
        alias = "pageId",
        alias = "page_id",
        alias = "company_id",
        deserialize_with = "lenient_company_id"
    )]
    company_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_limit")]
    limit: Option<i64>,
}

impl FeedConfiguration {
    #[must_use]
    pub fn new(company_id: impl Into<String>, limit: Option<i64>) -> Self {
        Self {
            company_id: Some(company_id.into()),
            limit,
        }
    }

    #[must_use]
    pub fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }

    pub fn set_company_id(&mut self, company_id: Option<String>) {
        self.company_id = company_id;
    }

    #[must_use]
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn set_limit(&mut self, limit: Option<i64>) {
        self.limit = limit;
    }

    /// The trimmed company id, or `None` when it is absent or blank.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        self.company_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Configured limit, falling back to [`DEFAULT_FETCH_LIMIT`]. Never clamped.
    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_FETCH_LIMIT)
    }
}

/// Accepts integers and numeric strings; anything else is treated as unset.
fn lenient_limit<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// Organization ids are numeric, so hand-written feed files often leave them
/// unquoted. Numbers keep their decimal text; other types are unset.
fn lenient_company_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_limit_defaults_to_twenty() {
        assert_eq!(FeedConfiguration::default().effective_limit(), 20);
    }

    #[test]
    fn effective_limit_is_not_clamped() {
        let feed = FeedConfiguration::new("1", Some(900));
        assert_eq!(feed.effective_limit(), 900);
    }

    #[test]
    fn non_numeric_limit_deserializes_as_unset() {
        let feed: FeedConfiguration =
            serde_json::from_str(r#"{"companyId": "12345", "limit": "lots"}"#).unwrap();
        assert_eq!(feed.limit(), None);
        assert_eq!(feed.effective_limit(), 20);
    }

    #[test]
    fn numeric_string_limit_is_accepted() {
        let feed: FeedConfiguration =
            serde_json::from_str(r#"{"companyId": "12345", "limit": "35"}"#).unwrap();
        assert_eq!(feed.effective_limit(), 35);
    }

    #[test]
    fn null_limit_is_unset() {
        let feed: FeedConfiguration =
            serde_json::from_str(r#"{"companyId": "12345", "limit": null}"#).unwrap();
        assert_eq!(feed.limit(), None);
    }

    #[test]
    fn page_id_is_accepted_as_company_id() {
        let feed: FeedConfiguration = serde_json::from_str(r#"{"pageId": "777"}"#).unwrap();
        assert_eq!(feed.company_id(), Some("777"));
    }

    #[test]
    fn numeric_company_id_keeps_its_digits() {
        let feed: FeedConfiguration =
            serde_json::from_str(r#"{"companyId": 12345, "limit": 5}"#).unwrap();
        assert_eq!(feed.company_id(), Some("12345"));
        assert_eq!(feed.target_id(), Some("12345"));
    }

    #[test]
    fn blank_company_id_has_no_target() {
        let feed = FeedConfiguration::new("   ", None);
        assert_eq!(feed.target_id(), None);
        assert_eq!(FeedConfiguration::new(" 42 ", None).target_id(), Some("42"));
    }
}
