use keyspin_core::{LookupEngine, LookupOptions};
use tracing::Instrument;
use uuid::Uuid;

use crate::cli::{Cli, LookupArgs};
use crate::error::CliError;
use crate::output;

pub async fn run(engine: &LookupEngine, args: &LookupArgs, cli: &Cli) -> Result<(), CliError> {
    let options = LookupOptions {
        egress: args.egress.clone(),
    };

    let request_id = Uuid::new_v4();
    let record = engine
        .lookup(&args.identifier, &options)
        .instrument(tracing::info_span!("lookup", request_id = %request_id))
        .await?;

    output::render(&serde_json::to_value(&record)?, cli.pretty)
}
