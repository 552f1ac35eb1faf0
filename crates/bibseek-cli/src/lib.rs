//! Command line front end for bibseek.
//!
//! ```text
//! bibseek search library.yaml 'author=knuth and programming'
//! bibseek search library.json '\bCase\b' --regex --case-sensitive --format json
//! bibseek files library.yaml --dir ~/papers --ext pdf --ext djvu
//! ```

pub mod args;
pub mod commands;
pub mod library;

use std::io::IsTerminal;

pub use args::{Cli, Command, FilesArgs, OutputFormat, SearchArgs};
pub use commands::{run, CommandOutput};
pub use library::load_library;

/// Default log filter for a `-v` count.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides `verbose`.
pub fn init_tracing(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .init();
}
