use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

mod hints;
mod profile;
mod wrapper;

use tapels_ls::{CommandOracle, ListFlags, Listing, eligibility_map};
use tapels_runtime::{HIDE_DEBUG_FLAGS, PROGRAM_NAME, SUPPRESS_BACKTRACE, logging};

/// Storage-aware ls: lists files with their tape-migration state.
///
/// -h is taken by --human, the way the native ls spells it, so help is
/// reachable through --help only.
#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "List files with their tape-migration state",
    disable_help_flag = true
)]
struct Cli {
    /// Long listing
    #[arg(short = 'l', long)]
    long: bool,

    /// Human readable sizes
    #[arg(short = 'h', long)]
    human: bool,

    /// Show all files including hidden files
    #[arg(short = 'a', long)]
    all: bool,

    /// Sort output by time last modified
    #[arg(short = 't', long)]
    time: bool,

    /// Disable coloring and use text for storage pool location
    #[arg(short = 'n', long = "no-color")]
    no_color: bool,

    /// Display hints about color code meanings
    #[arg(short = 'H', long)]
    hints: bool,

    /// Disable the wrapper and fall back to the standard ls
    #[arg(long = "disable-wrapper")]
    disable_wrapper: bool,

    /// Display debug information
    #[arg(short = 'v', long, hide = HIDE_DEBUG_FLAGS)]
    debug: bool,

    /// Write a CPU profile of the run to the given path
    #[arg(long, value_name = "PATH", hide = HIDE_DEBUG_FLAGS)]
    cpuprof: Option<PathBuf>,

    /// Print help
    #[arg(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Paths to list
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug).ok();

    if cli.hints {
        hints::display();
        return ExitCode::SUCCESS;
    }

    if cli.disable_wrapper {
        return wrapper::run_native_ls();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Fail-fast with no partial listing: the first error aborts
            // the whole invocation.
            if SUPPRESS_BACKTRACE {
                eprintln!("Aborting: {err:#}");
            } else {
                eprintln!("Aborting: {err:?}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let profiler = cli
        .cpuprof
        .as_deref()
        .map(profile::Profiler::start)
        .transpose()?;

    let mut paths = Vec::with_capacity(cli.paths.len());
    for path in &cli.paths {
        let abs = std::path::absolute(path)
            .with_context(|| format!("cannot resolve {}", path.display()))?;
        paths.push(abs);
    }
    debug!("listing {} path(s)", paths.len());

    let flags = ListFlags {
        long: cli.long,
        human: cli.human,
        all: cli.all,
        sort_by_time: cli.time,
        no_color: cli.no_color,
        eligible: eligibility_map(&paths),
    };

    let mut listing = Listing::new(paths);
    listing.set_flags(flags);

    let oracle = CommandOracle::new();
    listing.stat_all(&oracle)?;
    listing.sort()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    listing.print(&mut out)?;

    if let Some(profiler) = profiler {
        profiler.finish()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
