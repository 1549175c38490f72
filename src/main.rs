// BaseCmd - Console commands with per-command logging
use anyhow::Context;
use basecmd::cli::output::{ConsoleOutput, ConsoleWriter, OutputWriter};
use basecmd::cli::{execute_command, Args};
use basecmd::infrastructure::logging::init_logging;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !args.quiet {
        init_logging(args.verbose).context("failed to set up diagnostics")?;
    }

    let writer = ConsoleWriter::new(args.output, ConsoleOutput::Stderr);
    if let Err(e) = execute_command(args) {
        writer.write_error(&e.to_string())?;
        std::process::exit(1);
    }
    Ok(())
}
