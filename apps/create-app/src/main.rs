#![warn(clippy::pedantic)]

//! # create-app
//!
//! Scaffolds a new JavaScript application: validates the name against npm
//! naming rules, creates the project directory (asking before reusing an
//! existing one), copies the bundled template into it, sets the package
//! name in `package.json`, and installs dependencies with yarn or npm.
//!
//! ## Examples
//!
//! Create a project and install its dependencies:
//! ```bash
//! create-app my-app
//! ```
//!
//! Create a project without installing:
//! ```bash
//! create-app my-app --skip-install
//! ```
//!
//! ## Exit Codes
//!
//! - `0` - the project was created and its dependencies installed
//! - `1` - any failure, including a failed install

mod commands;
mod config;
mod errors;
mod project;

use anyhow::Result;
use clap::Parser;
use commands::create::{self, CreateArgs};
use errors::CreateError;
use tracing_subscriber::EnvFilter;

/// Version string shown by `--version`.
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit:   ",
    env!("CREATE_APP_GIT_COMMIT"),
    "\nplatform: ",
    env!("CREATE_APP_TARGET"),
);

/// Scaffold a new JavaScript application.
#[derive(Parser)]
#[command(
    name = "create-app",
    author,
    version,
    long_version = LONG_VERSION,
    about = "Create a new JavaScript application from a template",
    after_help = "\
ENVIRONMENT VARIABLES:
    CREATE_APP_USE_NPM        Same as --use-npm (true/false)
    CREATE_APP_SKIP_INSTALL   Same as --skip-install (true/false)
    CREATE_APP_TEMPLATE       Same as --template
    CREATE_APP_LOG            Log filter, e.g. 'debug' (falls back to RUST_LOG)"
)]
pub struct Cli {
    #[command(flatten)]
    pub create: CreateArgs,
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        let exit_code = handle_error(&e);
        std::process::exit(exit_code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    create::execute(&cli.create).await
}

/// Installs the stderr log subscriber.
///
/// The filter comes from `CREATE_APP_LOG`, then `RUST_LOG`, and defaults to
/// warnings only so that normal runs print nothing but their own output.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(config::LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Reports an error and returns the process exit code.
///
/// Mistakes in the user's input are explained on their own. Everything
/// else happened part way through creating the project and is reported
/// under an abort banner with the full error chain.
fn handle_error(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<CreateError>() {
        Some(CreateError::MissingProjectDirectory) => print_usage(),
        Some(CreateError::InvalidName { violations, .. }) => {
            eprintln!("Error: {e}:");
            eprintln!();
            for violation in violations {
                eprintln!("  * {violation}");
            }
            eprintln!();
            eprintln!("Please choose a different project name.");
        }
        Some(err) if err.is_user_error() => eprintln!("Error: {e}"),
        _ => {
            eprintln!();
            eprintln!("Aborting installation.");
            eprintln!("Error: {e:?}");
        }
    }
    1
}

fn print_usage() {
    eprintln!("Please specify the project directory:");
    eprintln!("  create-app <project-directory>");
    eprintln!();
    eprintln!("For example:");
    eprintln!("  create-app my-app");
    eprintln!();
    eprintln!("Run 'create-app --help' to see all options.");
}
