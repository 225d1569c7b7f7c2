//! Turns a LinkedIn organization's shares into normalized [`SocialPost`]s.
//!
//! Each stage has a `configure_*` step, run once per feed, and an execution
//! step: [`configure_fetch`] / [`SocialPostBuilder::fetch`],
//! [`configure_filter`] / [`filter`], [`configure_transform`] /
//! [`transform`]. [`SocialPostBuilder::build_posts`] chains them.

pub mod builder;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod transform;
pub mod types;

pub use builder::SocialPostBuilder;
pub use error::BuildError;
pub use fetch::configure_fetch;
pub use filter::{configure_filter, filter};
pub use transform::{configure_transform, select_poster, transform, transform_at};
pub use types::{
    FetchOptions, FilterOptions, FilteredElement, QueryPayload, SocialPost, TransformOptions,
    POST_URL_PREFIX, UGC_POSTS_ENDPOINT,
};
