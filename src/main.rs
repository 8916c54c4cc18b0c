use clap::Parser;
use mandate::cli::{self, Args};
use mandate::logging;
use std::process::ExitCode;

fn main() -> mandate::Result<ExitCode> {
    let args = Args::parse();
    let workspace = args.command.workspace();
    let _logging = logging::init(Some(&workspace), None)?;
    cli::run(args)
}
