//! Command line arguments.

use std::path::PathBuf;

use bibseek::{SearchFlag, SearchFlags};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Search bibliographic libraries and find the documents that belong to them.
#[derive(Parser, Debug, Clone)]
#[command(name = "bibseek", version, about, long_about = None)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the entries of a library that match a query
    Search(SearchArgs),

    /// Print the files that belong to each entry of a library
    Files(FilesArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Library file (.json, .yaml or .yml)
    #[arg(value_name = "LIBRARY")]
    pub library: PathBuf,

    /// Query, e.g. `author=knuth and programming`
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Compare letter case exactly
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Treat term values as regular expressions
    #[arg(short = 'r', long)]
    pub regex: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SearchArgs {
    pub fn flags(&self) -> SearchFlags {
        SearchFlags::empty()
            .set(SearchFlag::CaseSensitive, self.case_sensitive)
            .set(SearchFlag::RegularExpression, self.regex)
    }
}

#[derive(Args, Debug, Clone)]
pub struct FilesArgs {
    /// Library file (.json, .yaml or .yml)
    #[arg(value_name = "LIBRARY")]
    pub library: PathBuf,

    /// Directory to scan, may be repeated
    #[arg(short, long = "dir", value_name = "DIR", required = true)]
    pub dirs: Vec<PathBuf>,

    /// File extension to accept, may be repeated (default: from config, else pdf)
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Only accept files named exactly after the citation key
    #[arg(long)]
    pub exact: bool,

    /// YAML finder configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One citation key per line
    #[default]
    Text,
    /// Matching entries as a JSON array
    Json,
}
