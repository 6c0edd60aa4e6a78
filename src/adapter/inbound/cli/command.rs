//! Command-line interface definitions.
//!
//! Running `jobguru` with no arguments resolves the project in the current
//! directory, provisions its virtual environment and hands off to the server.
//! Every flag is an optional override; subcommands inspect without launching.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Launcher for the Fake Job Guru scam detection service
#[derive(Parser, Debug)]
#[command(name = "jobguru")]
#[command(version)]
pub struct Cli {
    /// Project root directory
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Settings file [default: <root>/jobguru.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the jobguru CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision and start the server (the default)
    Run(RunArgs),

    /// Show the provisioning steps a launch would run
    Plan(PlanArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `jobguru config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved launch configuration
    Show(RunArgs),
}

/// Subcommands for `jobguru check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Check the project layout and application module
    Layout,
    /// Verify a running server
    Server(ServerCheckArgs),
}

/// Launch overrides, applied over settings and environment.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Bind address
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port
    #[arg(long)]
    pub port: Option<u16>,

    /// Disable live reload
    #[arg(long)]
    pub no_reload: bool,

    /// Skip dependency provisioning
    #[arg(long, conflicts_with = "reinstall")]
    pub no_install: bool,

    /// Install requirements even when the marker package is present
    #[arg(long)]
    pub reinstall: bool,
}

impl RunArgs {
    /// These overrides, falling back to `outer` for anything not given here.
    #[must_use]
    pub fn or(&self, outer: &RunArgs) -> RunArgs {
        RunArgs {
            host: self.host.clone().or_else(|| outer.host.clone()),
            port: self.port.or(outer.port),
            no_reload: self.no_reload || outer.no_reload,
            no_install: self.no_install || outer.no_install,
            reinstall: self.reinstall || outer.reinstall,
        }
    }
}

/// Arguments for `jobguru plan`.
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Plan as if the marker package were missing
    #[arg(long)]
    pub reinstall: bool,
}

/// Arguments for `jobguru check server`.
#[derive(Args, Debug, Clone)]
pub struct ServerCheckArgs {
    /// Base URL of the running server [default: http://<host>:<port>]
    #[arg(long)]
    pub url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,
}
