//! Application settings used to build absolute URLs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ConfigError;
use crate::perspective::{PerspectiveResolver, PerspectiveSettings};

const DEFAULT_SCHEME: &str = "http";
const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];
const HOST_FORBIDDEN: [char; 5] = ['/', '?', '#', '@', '\\'];

/// Where the application is served and what it is called.
///
/// Set once at startup and passed to [`crate::UrlBuilder::new`]; never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationConfig {
    #[serde(default = "default_scheme")]
    scheme: String,
    host: String,
    path: String,
    display_name: String,
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

impl ApplicationConfig {
    pub fn new(
        host: impl Into<String>,
        path: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            scheme: default_scheme(),
            host: host.into(),
            path: path.into(),
            display_name: display_name.into(),
        }
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Checks the fields can form `scheme://host/path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_SCHEMES.contains(&self.scheme.as_str()) {
            return Err(ConfigError::invalid(format!(
                "unsupported scheme {:?} (expected http or https)",
                self.scheme
            )));
        }
        if self.host.is_empty() {
            return Err(ConfigError::invalid("host is empty"));
        }
        if let Some(c) = self
            .host
            .chars()
            .find(|c| c.is_whitespace() || HOST_FORBIDDEN.contains(c))
        {
            return Err(ConfigError::invalid(format!(
                "host {:?} contains {c:?}",
                self.host
            )));
        }
        if self.path.is_empty() {
            return Err(ConfigError::invalid("path is empty"));
        }
        if !self.path.starts_with('/') {
            return Err(ConfigError::invalid(format!(
                "path {:?} must start with '/'",
                self.path
            )));
        }
        if let Some(c) = self
            .path
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '?' | '#'))
        {
            return Err(ConfigError::invalid(format!(
                "path {:?} contains {c:?}",
                self.path
            )));
        }
        if self.display_name.trim().is_empty() {
            return Err(ConfigError::invalid("display name is empty"));
        }
        Ok(())
    }
}

/// Contents of a navigation settings file.
///
/// ```toml
/// [application]
/// host = "example.org"
/// path = "/app"
/// display_name = "WebOnto"
///
/// [perspectives.mappings]
/// NamedIndividual = "Individuals"
/// ```
///
/// When `[perspectives]` is absent the standard mapping applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationSettings {
    pub application: ApplicationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspectives: Option<PerspectiveSettings>,
}

impl NavigationSettings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`NavigationSettings::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded navigation settings");
        Ok(settings)
    }

    /// Resolver described by the `[perspectives]` section.
    ///
    /// # Errors
    ///
    /// Fails when a mapping names an unknown entity type.
    pub fn resolver(&self) -> Result<PerspectiveResolver, ConfigError> {
        match &self.perspectives {
            Some(settings) => settings.resolver(),
            None => Ok(PerspectiveResolver::standard()),
        }
    }
}
