//! Maps a kept `ugcPosts` element onto [`SocialPost`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use socialdata_core::{EngineConfiguration, FeedConfiguration};
use socialdata_linkedin::{ShareMedia, UgcPost};

use crate::error::BuildError;
use crate::types::{SocialPost, TransformOptions};

#[must_use]
pub fn configure_transform(
    _engine: Option<&EngineConfiguration>,
    _feed: Option<&FeedConfiguration>,
) -> TransformOptions {
    TransformOptions::default()
}

/// Transforms `element` using the current time as the creation-date fallback.
///
/// # Errors
///
/// See [`transform_at`].
pub fn transform(
    options: &TransformOptions,
    element: &serde_json::Value,
) -> Result<SocialPost, BuildError> {
    transform_at(options, element, Utc::now())
}

/// Transforms `element`, falling back to `now` when it has no publish time.
///
/// # Errors
///
/// Returns [`BuildError::Deserialize`] if a field has the wrong JSON type, or
/// [`BuildError::MalformedElement`] naming the first missing field on the
/// path to the commentary text.
pub fn transform_at(
    options: &TransformOptions,
    element: &serde_json::Value,
    now: DateTime<Utc>,
) -> Result<SocialPost, BuildError> {
    let post = UgcPost::deserialize(element).map_err(|source| BuildError::Deserialize {
        context: "ugcPosts element".to_string(),
        source,
    })?;

    let id = post
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| BuildError::missing("id"))?;

    let share = post
        .specific_content
        .ok_or_else(|| BuildError::missing("specificContent"))?
        .share_content
        .ok_or_else(|| BuildError::missing("specificContent.com.linkedin.ugc.ShareContent"))?;

    let content = share
        .share_commentary
        .ok_or_else(|| {
            BuildError::missing("specificContent.com.linkedin.ugc.ShareContent.shareCommentary")
        })?
        .text
        .ok_or_else(|| {
            BuildError::missing(
                "specificContent.com.linkedin.ugc.ShareContent.shareCommentary.text",
            )
        })?;

    let social_creation_date = post
        .first_published_at
        .filter(|ms| *ms != 0)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or(now);

    let poster_url = share.media.as_deref().and_then(select_poster);

    Ok(SocialPost {
        url: format!("{}{id}", options.post_url_prefix),
        social_id: id,
        social_creation_date,
        content,
        poster_url,
    })
}

/// Picks the widest thumbnail of the first media entry that has one.
///
/// Thumbnails without a width or URL are ignored. Equal widths resolve to
/// the earlier thumbnail.
#[must_use]
pub fn select_poster(media: &[ShareMedia]) -> Option<String> {
    media.iter().find_map(|entry| {
        let mut best: Option<(i64, &str)> = None;
        for thumb in entry.thumbnails.as_deref().unwrap_or_default() {
            let (Some(width), Some(url)) = (thumb.width, thumb.url.as_deref()) else {
                continue;
            };
            if url.is_empty() {
                continue;
            }
            if best.is_none_or(|(w, _)| width > w) {
                best = Some((width, url));
            }
        }
        best.map(|(_, url)| url.to_string())
    })
}
