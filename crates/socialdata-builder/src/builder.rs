//! Pipeline driver: fetch → filter → transform for one feed.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use socialdata_core::{EngineConfiguration, FeedConfiguration};
use socialdata_linkedin::{LinkedInClientFactory, LinkedInError};

use crate::error::BuildError;
use crate::fetch::configure_fetch;
use crate::filter::{configure_filter, filter};
use crate::transform::{configure_transform, transform_at};
use crate::types::{FetchOptions, SocialPost};

/// Runs the LinkedIn post pipeline.
///
/// Holds no per-run state: every [`SocialPostBuilder::fetch`] builds its own
/// client, and the client (with its token cache and connection pool) is
/// dropped when the call returns.
#[derive(Debug, Clone)]
pub struct SocialPostBuilder {
    factory: LinkedInClientFactory,
}

impl SocialPostBuilder {
    #[must_use]
    pub fn new(factory: LinkedInClientFactory) -> Self {
        Self { factory }
    }

    /// Fetches raw `ugcPosts` elements.
    ///
    /// `None` options mean the feed is unconfigured: no request is made and
    /// no elements are returned. A response without an `elements` array also
    /// yields no elements.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Fetch`] naming the endpoint when the client
    /// cannot be built, the engine has no usable access token, or the call
    /// fails.
    pub async fn fetch(
        &self,
        options: Option<&FetchOptions>,
    ) -> Result<Vec<serde_json::Value>, BuildError> {
        let Some(options) = options else {
            return Ok(Vec::new());
        };
        let wrap = |source: LinkedInError| BuildError::Fetch {
            endpoint: options.endpoint.clone(),
            source,
        };

        let mut client = self.factory.client_for(&options.engine).map_err(wrap)?;
        client
            .set_access_token(options.engine.access_token().unwrap_or_default())
            .map_err(wrap)?;

        let count = options.query.count.to_string();
        let body = client
            .get_encoded(
                &options.endpoint,
                &[
                    ("q", options.query.q.as_str()),
                    ("authors", options.query.authors.as_str()),
                    ("count", count.as_str()),
                ],
                &HeaderMap::new(),
            )
            .await
            .map_err(wrap)?;

        let elements = match body {
            serde_json::Value::Object(mut map) => match map.remove("elements") {
                Some(serde_json::Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        tracing::debug!(
            endpoint = %options.endpoint,
            authors = %options.query.authors,
            count = elements.len(),
            "fetched LinkedIn elements"
        );
        Ok(elements)
    }

    /// Runs every stage for one feed, using the current time as the
    /// creation-date fallback.
    ///
    /// # Errors
    ///
    /// See [`SocialPostBuilder::build_posts_at`].
    pub async fn build_posts(
        &self,
        engine: Option<&EngineConfiguration>,
        feed: Option<&FeedConfiguration>,
    ) -> Result<Vec<SocialPost>, BuildError> {
        self.build_posts_at(engine, feed, Utc::now()).await
    }

    /// Runs every stage for one feed.
    ///
    /// Filtered-out elements are skipped silently; elements that fail to
    /// transform are logged and skipped.
    ///
    /// # Errors
    ///
    /// Propagates [`BuildError::Fetch`] from [`SocialPostBuilder::fetch`].
    pub async fn build_posts_at(
        &self,
        engine: Option<&EngineConfiguration>,
        feed: Option<&FeedConfiguration>,
        now: DateTime<Utc>,
    ) -> Result<Vec<SocialPost>, BuildError> {
        let fetch_options = configure_fetch(engine, feed);
        if fetch_options.is_none() {
            tracing::info!("feed is not configured; skipping LinkedIn fetch");
        }
        let elements = self.fetch(fetch_options.as_ref()).await?;

        let filter_options = configure_filter(engine, feed);
        let transform_options = configure_transform(engine, feed);

        let fetched = elements.len();
        let mut posts = Vec::with_capacity(fetched);
        for element in &elements {
            let Some(kept) = filter(&filter_options, element) else {
                continue;
            };
            match transform_at(&transform_options, &kept.element, now) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!(element_id = %kept.id, error = %e, "skipping malformed LinkedIn element");
                }
            }
        }

        tracing::info!(
            fetched,
            built = posts.len(),
            dropped = fetched - posts.len(),
            "LinkedIn posts built"
        );
        Ok(posts)
    }
}
