use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "routeros-reconcile")]
#[command(about = "Diff, replay and check RouterOS configuration exports")]
pub struct Cli {
    /// Order-mode profile (TOML). Defaults to the embedded profile.
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compute the edit script turning BASE into TARGET.
    Diff(DiffArgs),
    /// Replay a script onto BASE and print the resulting export.
    Apply(ApplyArgs),
    /// Fail when ACTUAL has not converged to EXPECTED.
    Check(CheckArgs),
    /// List the sections of an export with their order mode.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    pub base: PathBuf,
    pub target: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
    /// Print only command counts.
    #[arg(long)]
    pub summary: bool,
    /// Write device-ready (wire) lines to this file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ApplyArgs {
    pub base: PathBuf,
    /// Script in pretty or wire form.
    pub script: PathBuf,
    /// Write the resulting export here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    pub actual: PathBuf,
    pub expected: PathBuf,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    /// Only list this section and its descendants, e.g. "/ip firewall".
    #[arg(long)]
    pub section: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Wire,
    Json,
}
