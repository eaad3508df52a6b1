#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::process;

mod app;
mod commands;
mod server;

use commands::Commands;

use clap::{Args, Parser};
use log::{error, trace};

fn main() {
    if let Err(err) = try_main() {
        error!("{:#}", err);
        process::exit(1);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        command,
        global_opts: GlobalOpts { verbosity, quiet },
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    trace!("Running command..");
    let message = command.execute()?;

    if !quiet {
        println!("{message}");
    }
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "isbn")]
#[clap(about = "Look up book information by ISBN using Open Library")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}
