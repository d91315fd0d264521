mod cli;
mod client;
mod commands;
mod config;
mod error;
mod output;
mod state_file;
mod store;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ListArgs};
use commands::Session;
use config::Config;
use error::Result;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_tracing(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

/// Filter used when `USERS_LOG` is unset. Verbose raises this crate to debug
/// and keeps warnings from everything else.
fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(concat!("warn,", env!("CARGO_CRATE_NAME"), "=debug"))
    } else {
        EnvFilter::new("warn")
    }
}

/// Logs go to stderr so `--format json` output stays parseable.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("USERS_LOG").unwrap_or_else(|_| default_filter(verbose));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Set global output format
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command.unwrap_or_else(|| Commands::List(ListArgs::default())) {
        // Commands that don't require config/state
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "users", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        // Commands that require config and the saved store
        command => {
            let config = Config::load()?;
            let mut session = Session::open(&config)?;

            match command {
                Commands::List(args) => {
                    commands::list::list(&mut session, args).await?;
                }
                Commands::Show { id } => {
                    commands::show::show(&mut session, id).await?;
                }
                Commands::Add(args) => {
                    commands::form::add(&mut session, args).await?;
                }
                Commands::Edit(args) => {
                    commands::form::edit(&mut session, args).await?;
                }
                Commands::Delete { id, yes } => {
                    commands::delete::delete(&mut session, id, yes).await?;
                }
                Commands::Refresh => {
                    commands::refresh::run(&mut session).await?;
                }
                Commands::Status => {
                    commands::status::run(&session)?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
