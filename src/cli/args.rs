use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Workspace holding mandate.toml (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Read configuration from this file instead of PATH/mandate.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit either terminal-friendly text or machine-readable JSON
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Workspace holding mandate.toml (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Directory tree of JSON messages to transform
    #[arg(long, value_name = "DIR")]
    pub input: PathBuf,

    /// Where transformed messages are written (default: worker.output_dir)
    #[arg(long, value_name = "DIR", help_heading = "Output Paths")]
    pub output: Option<PathBuf>,

    /// Where rejected messages and their error reports are copied
    #[arg(long, value_name = "DIR", help_heading = "Output Paths")]
    pub rejected: Option<PathBuf>,

    /// Read configuration from this file instead of PATH/mandate.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stop at the first rejected message
    #[arg(long)]
    pub fail_fast: bool,

    /// Emit the run summary as text or JSON
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON document suitable for downstream tooling
    Json,
}

/// Workspace directory named on the command line, or the current directory.
pub fn workspace_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
