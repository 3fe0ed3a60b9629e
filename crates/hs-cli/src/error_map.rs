use std::fmt::Display;

use hs_core::EvalError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct CliError {
    pub code: String,
    pub message: String,
}

impl CliError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<EvalError> for CliError {
    fn from(error: EvalError) -> Self {
        Self::new(error.code(), error.message())
    }
}

fn map_error(code: &'static str, error: impl Display) -> CliError {
    CliError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: CliError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).unwrap_or_else(|_| format!("{:?}", error.message))
    );
    1
}

pub(crate) fn map_cli_script_read(error: std::io::Error) -> CliError {
    map_error("CLI_SCRIPT_READ", error)
}

pub(crate) fn map_cli_inputs_read(error: std::io::Error) -> CliError {
    map_error("CLI_INPUTS_READ", error)
}

pub(crate) fn map_cli_inputs_invalid(error: serde_json::Error) -> CliError {
    map_error("CLI_INPUTS_INVALID", error)
}

pub(crate) fn map_cli_config_read(error: std::io::Error) -> CliError {
    map_error("CLI_CONFIG_READ", error)
}

pub(crate) fn map_cli_config_invalid(error: serde_json::Error) -> CliError {
    map_error("CLI_CONFIG_INVALID", error)
}

pub(crate) fn map_cli_output_encode(error: serde_json::Error) -> CliError {
    map_error("CLI_OUTPUT_ENCODE", error)
}
