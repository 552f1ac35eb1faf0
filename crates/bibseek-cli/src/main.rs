use std::io::Write;

use bibseek_cli::{init_tracing, run, Cli};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = run(&cli.command)?;
    for warning in &output.warnings {
        eprintln!("{warning}");
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
