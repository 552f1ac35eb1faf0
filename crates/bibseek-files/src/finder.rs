//! Citation-key based file lookup.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bibseek::Record;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::FinderConfig;
use crate::error::{FinderError, Result};
use crate::names::{base_name, clean_file_name, file_extension};

/// Locates files on disk that belong to a record.
pub trait FileFinder {
    /// Returns the files under `directories` with one of `extensions` that
    /// belong to `record`, sorted by path.
    fn find_associated_files<R: Record + ?Sized>(
        &self,
        record: &R,
        directories: &[PathBuf],
        extensions: &[String],
    ) -> Result<Vec<PathBuf>>;

    /// Runs [`find_associated_files`](Self::find_associated_files) for every
    /// record, keyed by citation key.
    ///
    /// Records without a citation key are left out. Records sharing a key
    /// share one entry.
    fn find_associated_files_for_all<R: Record>(
        &self,
        records: &[R],
        directories: &[PathBuf],
        extensions: &[String],
    ) -> Result<BTreeMap<String, Vec<PathBuf>>> {
        let mut found = BTreeMap::new();
        for record in records {
            let Some(key) = record.citation_key().filter(|k| !k.trim().is_empty()) else {
                continue;
            };
            if found.contains_key(key) {
                continue;
            }
            let files = self.find_associated_files(record, directories, extensions)?;
            found.insert(key.to_string(), files);
        }
        Ok(found)
    }
}

/// Matches file names against a record's citation key.
///
/// A file belongs to key `K` if its base name is exactly `K`, or, unless
/// `exact_key_only` is set, if it starts with the sanitized key and the next
/// character is not an appendix character. With the default configuration
/// `Smith2020.pdf` and `Smith2020_supplement.pdf` belong to `Smith2020`, but
/// `Smith2020a.pdf` does not.
#[derive(Debug, Clone, Default)]
pub struct CitationKeyFileFinder {
    config: FinderConfig,
}

impl CitationKeyFileFinder {
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Finds the files belonging to `citation_key`.
    ///
    /// Files are sorted by their full path text. A missing or blank key
    /// yields no files. Directories that do not exist
    /// are skipped; any other traversal failure is returned as
    /// [`FinderError::Walk`].
    pub fn find_for_key<D, E>(
        &self,
        citation_key: Option<&str>,
        directories: &[D],
        extensions: &[E],
    ) -> Result<Vec<PathBuf>>
    where
        D: AsRef<Path>,
        E: AsRef<str>,
    {
        let Some(key) = citation_key.filter(|k| !k.trim().is_empty()) else {
            debug!("no citation key, skipping file lookup");
            return Ok(Vec::new());
        };

        let cleaned_key = clean_file_name(key);
        let mut result: Vec<PathBuf> = files_with_extension(directories, extensions)?
            .into_iter()
            .filter(|file| {
                let name = base_name(file);
                if name == key {
                    debug!(key, file = %file.display(), "found exact match");
                    return true;
                }
                if !self.config.exact_key_only && self.matches_prefix(name, &cleaned_key) {
                    debug!(key, file = %file.display(), "found non-exact match");
                    return true;
                }
                false
            })
            .collect();

        result.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        Ok(result)
    }

    fn matches_prefix(&self, name: &str, cleaned_key: &str) -> bool {
        match name.strip_prefix(cleaned_key) {
            Some(rest) => match rest.chars().next() {
                Some(next) => !self.config.is_appendix_character(next),
                None => true,
            },
            None => false,
        }
    }
}

impl FileFinder for CitationKeyFileFinder {
    fn find_associated_files<R: Record + ?Sized>(
        &self,
        record: &R,
        directories: &[PathBuf],
        extensions: &[String],
    ) -> Result<Vec<PathBuf>> {
        self.find_for_key(record.citation_key(), directories, extensions)
    }
}

/// Collects every non-directory file under `directories` whose extension is
/// one of `extensions`. The same physical file is reported once, even when
/// directories overlap or alias each other through symlinks.
fn files_with_extension<D, E>(directories: &[D], extensions: &[E]) -> Result<Vec<PathBuf>>
where
    D: AsRef<Path>,
    E: AsRef<str>,
{
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for directory in directories {
        let root = directory.as_ref();
        if !root.exists() {
            debug!(directory = %root.display(), "skipping missing directory");
            continue;
        }

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_dangling_link(&err) => {
                    debug!(error = %err, "skipping dangling symlink");
                    continue;
                }
                Err(source) => {
                    return Err(FinderError::Walk {
                        root: root.to_path_buf(),
                        source,
                    })
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            let Some(extension) = file_extension(path) else {
                continue;
            };
            if !extensions.iter().any(|e| e.as_ref() == extension) {
                continue;
            }

            let identity = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            if seen.insert(identity) {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_none()
        && err.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound)
        && err
            .path()
            .and_then(|p| fs::symlink_metadata(p).ok())
            .is_some_and(|m| m.file_type().is_symlink())
}
