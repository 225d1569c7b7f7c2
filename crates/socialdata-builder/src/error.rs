use socialdata_linkedin::LinkedInError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    /// The LinkedIn call behind a fetch stage failed.
    #[error("failed to fetch '{endpoint}': {source}")]
    Fetch {
        endpoint: String,
        #[source]
        source: LinkedInError,
    },

    /// A field the transform stage needs is absent.
    #[error("malformed element: missing {path}")]
    MalformedElement { path: String },

    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BuildError {
    pub(crate) fn missing(path: &str) -> Self {
        Self::MalformedElement {
            path: path.to_string(),
        }
    }
}
