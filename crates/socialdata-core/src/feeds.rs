use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, FeedConfiguration};

/// A named feed as declared in `feeds.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub name: String,
    #[serde(flatten)]
    pub config: FeedConfiguration,
}

#[derive(Debug, Deserialize)]
pub struct FeedsFile {
    pub feeds: Vec<FeedEntry>,
}

impl FeedsFile {
    /// Look up a feed by name (case-insensitive).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FeedEntry> {
        self.feeds
            .iter()
            .find(|feed| feed.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Load and validate the feed declarations from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_feeds(path: &Path) -> Result<FeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_feeds(&content)
}

fn parse_feeds(content: &str) -> Result<FeedsFile, ConfigError> {
    let feeds_file: FeedsFile =
        serde_yaml::from_str(content).map_err(ConfigError::FeedsFileParse)?;

    validate_feeds(&feeds_file)?;

    Ok(feeds_file)
}

fn validate_feeds(feeds_file: &FeedsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for feed in &feeds_file.feeds {
        if feed.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "feed name must be non-empty".to_string(),
            ));
        }

        if !seen.insert(feed.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate feed name: '{}'",
                feed.name
            )));
        }
    }

    Ok(())
}
