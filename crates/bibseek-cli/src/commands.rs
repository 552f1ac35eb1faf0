//! Command implementations.
//!
//! Commands render into a [`CommandOutput`] instead of printing, so the
//! binary decides where text goes and tests can inspect it.

use anyhow::{Context, Result};
use bibseek::{DatabaseSearcher, Entry, Record, SearchQuery};
use bibseek_files::{CitationKeyFileFinder, FileFinder, FinderConfig};
use tracing::info;

use crate::args::{Command, FilesArgs, OutputFormat, SearchArgs};
use crate::library::load_library;

/// Printed in place of a citation key for entries that have none.
pub const NO_KEY: &str = "<no key>";

/// Text produced by a command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Goes to stdout.
    pub stdout: String,
    /// Goes to stderr, one line each.
    pub warnings: Vec<String>,
}

/// Runs a parsed command.
pub fn run(command: &Command) -> Result<CommandOutput> {
    match command {
        Command::Search(args) => search(args),
        Command::Files(args) => files(args),
    }
}

/// Prints the entries matching the query.
///
/// A query that fails to compile is not an error: it matches nothing and
/// leaves a warning.
pub fn search(args: &SearchArgs) -> Result<CommandOutput> {
    let entries = load_library(&args.library)?;
    let query = SearchQuery::new(args.query.clone()).with_flags(args.flags());
    let searcher = DatabaseSearcher::new(&query, &entries);

    let mut output = CommandOutput::default();
    let hits = match searcher.try_matches() {
        Ok(hits) => hits,
        Err(err) => {
            output.warnings.push(format!("warning: {err}"));
            Vec::new()
        }
    };
    info!(query = query.text(), matches = hits.len(), "search finished");

    output.stdout = match args.format {
        OutputFormat::Text => render_keys(&hits),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&hits).context("failed to serialize matches")?;
            json.push('\n');
            json
        }
    };
    Ok(output)
}

/// Prints `key: path` for every file that belongs to an entry.
pub fn files(args: &FilesArgs) -> Result<CommandOutput> {
    let entries = load_library(&args.library)?;

    let mut config = match &args.config {
        Some(path) => FinderConfig::load(path)?,
        None => FinderConfig::default(),
    };
    if args.exact {
        config.exact_key_only = true;
    }
    if !args.extensions.is_empty() {
        config.extensions = args.extensions.clone();
    }

    let finder = CitationKeyFileFinder::new(config);
    let extensions = finder.config().extensions.clone();
    let found = finder
        .find_associated_files_for_all(&entries, &args.dirs, &extensions)
        .context("failed to look up files")?;

    let mut stdout = String::new();
    for (key, paths) in &found {
        for path in paths {
            stdout.push_str(&format!("{}: {}\n", key, path.display()));
        }
    }
    info!(entries = entries.len(), keys = found.len(), "file lookup finished");

    Ok(CommandOutput {
        stdout,
        warnings: Vec::new(),
    })
}

fn render_keys(hits: &[&Entry]) -> String {
    let mut out = String::new();
    for entry in hits {
        out.push_str(entry.citation_key().unwrap_or(NO_KEY));
        out.push('\n');
    }
    out
}
