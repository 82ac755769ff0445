mod basins_cmd;
mod cli;
mod config;
mod convert;
mod evaluate_cmd;
mod logging;
mod peaks_cmd;
mod profile;
mod wrf_info_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::profile::Profiler;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(command) = cli.command else {
        eprintln!("Error: no subcommand given, try `fos --help`");
        process::exit(1);
    };

    let mut profiler = Profiler::new(cli.profile);
    let result = run(command, &mut profiler);
    if let Err(e) = profiler.finish(&cli.profile_output) {
        eprintln!("Error: failed to write timing dump: {e}");
    }
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command, profiler: &mut Profiler) -> Result<()> {
    match command {
        Command::Peaks(args) => peaks_cmd::run(args, profiler),
        Command::Evaluate(args) => evaluate_cmd::run(args, profiler),
        Command::Basins(args) => basins_cmd::run(args, profiler),
        Command::WrfInfo(args) => wrf_info_cmd::run(args, profiler),
    }
}
