use std::fs;

use hs_core::HostValue;
use hs_runtime::EvalConfig;
use tracing::debug;

use crate::json::json_to_host;
use crate::{
    map_cli_config_invalid, map_cli_config_read, map_cli_inputs_invalid, map_cli_inputs_read,
    map_cli_script_read, CliError, EvalArgs,
};

pub(crate) fn load_script(path: &str) -> Result<String, CliError> {
    let script = fs::read_to_string(path).map_err(map_cli_script_read)?;
    debug!(path, bytes = script.len(), "script loaded");
    Ok(script)
}

pub(crate) fn load_inputs(args: &EvalArgs) -> Result<Option<HostValue>, CliError> {
    let text = match (&args.inputs, &args.inputs_json) {
        (Some(path), _) => fs::read_to_string(path).map_err(map_cli_inputs_read)?,
        (None, Some(text)) => text.clone(),
        (None, None) => return Ok(None),
    };
    let json = serde_json::from_str(&text).map_err(map_cli_inputs_invalid)?;
    Ok(Some(json_to_host(json)))
}

/// Reads the execution config, then applies the command-line overrides.
pub(crate) fn load_config(args: &EvalArgs) -> Result<EvalConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(map_cli_config_read)?;
            serde_json::from_str::<EvalConfig>(&text).map_err(map_cli_config_invalid)?
        }
        None => EvalConfig::default(),
    };
    if let Some(max_operations) = args.max_operations {
        config.max_operations = max_operations;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = Some(timeout_ms);
    }
    Ok(config)
}
