//! CLI entrypoint for `nkrn`.

use std::{error::Error, io, process::ExitCode};

use clap::Parser;
use nkrn_tool::{Cli, logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("ERROR: {err}");
            let mut source = err.source();
            while let Some(src) = source {
                eprintln!("\tsource: {src}");
                source = src.source();
            }
            ExitCode::FAILURE
        },
    }
}
