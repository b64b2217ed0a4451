mod cli;
mod logging;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;
use tether_core::kernel::constants::{APP_NAME, APP_VERSION};

/// Tether: dependency-first plugin loader
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print "pong" and exit
    #[arg(long)]
    ping: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load plugins and print them in dependency-first order
    Load {
        /// Comma-separated plugin names, e.g. "A,B"
        names: String,

        /// Module root containing `plugins/` and `modules/`
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Print the collection as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{}", e);
    }

    match args.command {
        Some(Commands::Load { names, root, json }) => {
            let outcome = match cli::load(&names, root).await {
                Ok(reports) => cli::print(&reports, json),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("Load failed: {}", e);
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            println!("{} {}", APP_NAME, APP_VERSION);
            println!("Run `tether load <NAMES> --root <DIR>` to load plugins, or `tether --help`.");
            ExitCode::SUCCESS
        }
    }
}
