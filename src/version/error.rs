use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Malformed version '{text}': {reason}")]
    MalformedVersion { text: String, reason: String },

    #[error("Version set is empty")]
    EmptySet,

    #[error("Failed to read package directory {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VersionError {
    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        VersionError::MalformedVersion {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
