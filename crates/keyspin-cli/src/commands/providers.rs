use serde_json::json;

use keyspin_core::LookupEngine;

use crate::cli::Cli;
use crate::error::CliError;
use crate::output;

pub fn run(engine: &LookupEngine, cli: &Cli) -> Result<(), CliError> {
    let providers = engine
        .registry()
        .configured()
        .iter()
        .map(|provider| {
            let config = provider.config();
            json!({
                "id": config.id,
                "method": config.method.as_str(),
                "endpoint": config.endpoint,
                "timeout_ms": config.timeout_ms,
            })
        })
        .collect::<Vec<_>>();

    output::render(
        &json!({
            "providers": providers,
            "active": engine.registry().active_ids(),
        }),
        cli.pretty,
    )
}
