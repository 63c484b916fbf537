//! CLI argument definitions for keyspin.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Resilient multi-provider key lookup.
///
/// Resolves a short identifier prefix against an ordered set of configured
/// remote providers, rotating through them, caching complete answers, and
/// degrading to an "Unknown" record when every option is exhausted.
#[derive(Debug, Parser)]
#[command(name = "keyspin", version, about = "Multi-provider key lookup CLI")]
pub struct Cli {
    /// Path to the provider configuration file.
    #[arg(long, global = true, default_value = "keyspin.json")]
    pub config: PathBuf,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve an identifier through the provider rotation.
    Lookup(LookupArgs),
    /// Show the configured providers.
    Providers,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Identifier to resolve; only its leading prefix is used.
    pub identifier: String,

    /// Opaque egress descriptor (proxy URL) forwarded to the transport.
    #[arg(long)]
    pub egress: Option<String>,
}
