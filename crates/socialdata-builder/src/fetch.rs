use socialdata_core::{EngineConfiguration, FeedConfiguration};

use crate::types::{FetchOptions, QueryPayload, UGC_POSTS_ENDPOINT};

/// Derives the `ugcPosts` query for one feed.
///
/// Returns `None` when the feed is not configured yet: either configuration
/// is absent, the engine lacks credentials, or the feed has no company id.
/// Fetching is then skipped rather than reported as an error.
#[must_use]
pub fn configure_fetch(
    engine: Option<&EngineConfiguration>,
    feed: Option<&FeedConfiguration>,
) -> Option<FetchOptions> {
    let (Some(engine), Some(feed)) = (engine, feed) else {
        tracing::debug!("engine or feed configuration missing; fetch not configured");
        return None;
    };
    if !engine.has_credentials() {
        tracing::debug!("engine has no client credentials; fetch not configured");
        return None;
    }
    let Some(company_id) = feed.target_id() else {
        tracing::debug!("feed has no company id; fetch not configured");
        return None;
    };

    Some(FetchOptions {
        endpoint: UGC_POSTS_ENDPOINT.to_string(),
        engine: engine.clone(),
        query: QueryPayload::for_organization(company_id, feed.effective_limit()),
    })
}
