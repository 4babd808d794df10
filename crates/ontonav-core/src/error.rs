#![deny(unsafe_code)]

use std::path::PathBuf;

/// A place token that does not follow the fragment grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("malformed place token {token:?}: {reason}")]
    MalformedPlaceToken { token: String, reason: String },
}

impl CodecError {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedPlaceToken {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// Problems with the application configuration.
///
/// These are startup errors: a builder that cannot be constructed means the
/// deployment is misconfigured.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse navigation settings: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
