pub mod args;
pub mod commands;

pub use args::{CheckArgs, OutputFormat, RunArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "mandate")]
#[command(version = crate::VERSION)]
#[command(about = "Route JSON messages to transformers that enforce their mandatory steps")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: describe transformers in mandate.toml, verify them with `check`, then `run` a directory of messages."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Validate configuration and list transformers",
        long_about = "Check loads mandate.toml, builds every transformer and its pipeline, and prints each transformer's tag, operations and mandatory set.",
        after_help = "Example:\n    mandate check ./workspace --format json"
    )]
    Check(CheckArgs),
    #[command(
        about = "Transform a directory of messages",
        long_about = "Run routes every JSON message under --input to the transformer registered for its tag, writes transformed messages to the output directory and exits non-zero when any message was rejected.",
        after_help = "Example:\n    mandate run ./workspace --input inbox --output outbox --rejected rejected"
    )]
    Run(RunArgs),
}

impl Command {
    /// Workspace the command operates on; logging configuration is read from here.
    pub fn workspace(&self) -> PathBuf {
        match self {
            Command::Check(check_args) => args::workspace_path(check_args.path.as_deref()),
            Command::Run(run_args) => args::workspace_path(run_args.path.as_deref()),
        }
    }
}

pub fn run(args: Args) -> crate::Result<ExitCode> {
    match args.command {
        Command::Check(check_args) => commands::check(check_args).map(|_| ExitCode::SUCCESS),
        Command::Run(run_args) => {
            let summary = commands::run(run_args)?;
            Ok(if summary.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
