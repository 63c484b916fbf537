mod lookup;
mod providers;

use std::sync::Arc;

use keyspin_core::{EngineConfig, LookupEngine, ReqwestHttpClient};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = EngineConfig::load(&cli.config)?;
    let engine = LookupEngine::from_config(&config, Arc::new(ReqwestHttpClient::new()));

    match &cli.command {
        Command::Lookup(args) => lookup::run(&engine, args, cli).await,
        Command::Providers => providers::run(&engine, cli),
    }
}
