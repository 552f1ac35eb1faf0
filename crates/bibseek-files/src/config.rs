//! Finder configuration.
//!
//! Configuration can be built in code or loaded from YAML. Every key is
//! optional; missing keys take their defaults.
//!
//! ```yaml
//! exact_key_only: false
//! appendix_characters: abcdefghijklmnopqrstuvwxyz
//! extensions: [pdf, djvu]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};

/// Lowercase ASCII letters, the suffixes citation-key generators append to
/// tell apart keys that would otherwise collide (`Smith2020a`, `Smith2020b`).
pub const DEFAULT_APPENDIX_CHARACTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Settings for [`CitationKeyFileFinder`](crate::CitationKeyFileFinder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Only accept files whose base name equals the citation key.
    pub exact_key_only: bool,
    /// Characters that, directly after the key, mark a file as belonging
    /// to a different key.
    pub appendix_characters: String,
    /// Extensions (without the dot) to look for when none are given
    /// explicitly.
    pub extensions: Vec<String>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            exact_key_only: false,
            appendix_characters: DEFAULT_APPENDIX_CHARACTERS.to_string(),
            extensions: vec!["pdf".to_string()],
        }
    }
}

impl FinderConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| FinderError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| FinderError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Sets whether only exact key matches are accepted.
    pub fn with_exact_key_only(mut self, exact_key_only: bool) -> Self {
        self.exact_key_only = exact_key_only;
        self
    }

    /// Replaces the appendix character set.
    pub fn with_appendix_characters(mut self, characters: impl Into<String>) -> Self {
        self.appendix_characters = characters.into();
        self
    }

    /// Replaces the default extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if `c` is one of the configured appendix characters.
    pub fn is_appendix_character(&self, c: char) -> bool {
        self.appendix_characters.contains(c)
    }
}
