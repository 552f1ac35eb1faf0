//! Loading libraries from disk.
//!
//! A library is a list of entries, stored as JSON or YAML:
//!
//! ```yaml
//! - citation_key: Knuth1984
//!   fields:
//!     author: Donald Knuth
//!     title: Literate Programming
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use bibseek::Entry;
use tracing::debug;

/// Reads a library, choosing the format from the file extension.
pub fn load_library(path: &Path) -> Result<Vec<Entry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read library '{}'", path.display()))?;

    let entries: Vec<Entry> = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON library '{}'", path.display()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML library '{}'", path.display()))?,
        _ => bail!(
            "unsupported library format '{}' (expected .json, .yaml or .yml)",
            path.display()
        ),
    };

    debug!(library = %path.display(), entries = entries.len(), "loaded library");
    Ok(entries)
}
