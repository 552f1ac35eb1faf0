//! Locate documents that belong to bibliographic records.
//!
//! Files are associated with a record through its citation key: a file
//! named `Smith2020.pdf`, or `Smith2020_supplement.pdf`, belongs to the
//! record keyed `Smith2020`. Files whose name continues with an appendix
//! character, such as `Smith2020a.pdf`, are left to the record keyed
//! `Smith2020a`.
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use bibseek::Entry;
//! use bibseek_files::{CitationKeyFileFinder, FileFinder, FinderConfig};
//!
//! let finder = CitationKeyFileFinder::new(FinderConfig::default());
//! let entry = Entry::new().with_citation_key("Smith2020");
//! let files = finder.find_associated_files(
//!     &entry,
//!     &[PathBuf::from("papers")],
//!     &["pdf".to_string()],
//! )?;
//! for file in files {
//!     println!("{}", file.display());
//! }
//! # Ok::<(), bibseek_files::FinderError>(())
//! ```

mod config;
mod error;
mod finder;
mod names;

pub use config::{FinderConfig, DEFAULT_APPENDIX_CHARACTERS};
pub use error::{FinderError, Result};
pub use finder::{CitationKeyFileFinder, FileFinder};
pub use names::{base_name, clean_file_name, file_extension};
