//! Error types for file lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating files or loading finder configuration.
#[derive(Debug, Error)]
pub enum FinderError {
    /// Traversing a directory failed (permissions, symlink loop, ...).
    #[error("failed to scan directory '{}'", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A configuration file could not be read.
    #[error("failed to read finder config '{}'", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid YAML for [`FinderConfig`](crate::FinderConfig).
    #[error("invalid finder config '{}'", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type alias for file lookup.
pub type Result<T> = std::result::Result<T, FinderError>;
