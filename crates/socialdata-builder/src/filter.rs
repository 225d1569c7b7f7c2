use serde::Deserialize;
use socialdata_core::{EngineConfiguration, FeedConfiguration};
use socialdata_linkedin::UgcPostSummary;

use crate::types::{FilterOptions, FilteredElement};

/// Filter options for a feed. Every LinkedIn feed uses the same rules.
#[must_use]
pub fn configure_filter(
    _engine: Option<&EngineConfiguration>,
    _feed: Option<&FeedConfiguration>,
) -> FilterOptions {
    FilterOptions::default()
}

/// Keeps published, identifiable, publicly visible posts.
///
/// Returns `None` for anything else, including elements that do not decode.
#[must_use]
pub fn filter(options: &FilterOptions, element: &serde_json::Value) -> Option<FilteredElement> {
    let summary = match UgcPostSummary::deserialize(element) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::debug!(error = %e, "dropping element that is not a post summary");
            return None;
        }
    };

    let state = summary.lifecycle_state.as_deref()?;
    if !options.lifecycle_states.iter().any(|s| s == state) {
        return None;
    }

    let id = summary.id.filter(|id| !id.is_empty())?;

    if let Some(visibility) = &summary.visibility {
        let public = visibility
            .values()
            .any(|v| v.as_str() == Some(options.required_visibility.as_str()));
        if !public {
            return None;
        }
    }

    Some(FilteredElement {
        id,
        element: element.clone(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn keep(element: &serde_json::Value) -> Option<FilteredElement> {
        filter(&FilterOptions::default(), element)
    }

    #[test]
    fn published_public_post_is_kept_with_id() {
        let element = json!({
            "lifecycleState": "PUBLISHED",
            "id": "7",
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" }
        });
        let kept = keep(&element).expect("should be kept");
        assert_eq!(kept.id, "7");
        assert_eq!(kept.element, element);
    }

    #[test]
    fn draft_is_dropped() {
        let element = json!({
            "lifecycleState": "DRAFT",
            "id": "7",
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" }
        });
        assert!(keep(&element).is_none());
    }

    #[test]
    fn non_public_visibility_is_dropped() {
        let element = json!({
            "lifecycleState": "PUBLISHED",
            "id": "7",
            "visibility": { "x": "CONNECTIONS" }
        });
        assert!(keep(&element).is_none());
    }

    #[test]
    fn edited_post_without_visibility_is_kept() {
        let element = json!({ "lifecycleState": "PUBLISHED_EDITED", "id": "urn:li:share:9" });
        assert_eq!(keep(&element).unwrap().id, "urn:li:share:9");
    }

    #[test]
    fn missing_or_empty_id_is_dropped() {
        assert!(keep(&json!({ "lifecycleState": "PUBLISHED" })).is_none());
        assert!(keep(&json!({ "lifecycleState": "PUBLISHED", "id": "" })).is_none());
    }

    #[test]
    fn missing_lifecycle_state_is_dropped() {
        assert!(keep(&json!({ "id": "7" })).is_none());
    }

    #[test]
    fn non_object_element_is_dropped() {
        assert!(keep(&json!("PUBLISHED")).is_none());
        assert!(keep(&json!({ "lifecycleState": "PUBLISHED", "visibility": "PUBLIC" })).is_none());
    }

    #[test]
    fn numeric_id_is_kept_as_text() {
        let element = json!({ "lifecycleState": "PUBLISHED", "id": 7 });
        assert_eq!(keep(&element).expect("should be kept").id, "7");
    }

    #[test]
    fn malformed_share_content_does_not_affect_filtering() {
        let element = json!({
            "lifecycleState": "PUBLISHED",
            "id": "7",
            "specificContent": "not an object"
        });
        assert!(keep(&element).is_some());
    }
}
