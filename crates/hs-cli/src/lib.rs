use std::ffi::OsString;

use clap::Parser;
use hs_api::EvalFunction;
use hs_core::HostValue;
use hs_runtime::ScriptRunner;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod error_map;
mod json;
mod source_loader;

pub(crate) use cli_args::{Cli, EvalArgs, Mode};
pub use error_map::CliError;
pub(crate) use error_map::{
    emit_error, map_cli_config_invalid, map_cli_config_read, map_cli_inputs_invalid,
    map_cli_inputs_read, map_cli_output_encode, map_cli_script_read,
};
pub(crate) use json::host_to_json;
pub(crate) use source_loader::{load_config, load_inputs, load_script};

const DEFAULT_LOG_FILTER: &str = "warn,hostscript=info,hs_runtime=info";

/// Installs a stderr subscriber; `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        Mode::Eval(args) => run_eval(args),
        Mode::Describe => run_describe(),
    }
}

fn run_eval(args: EvalArgs) -> Result<i32, CliError> {
    let script = load_script(&args.script)?;
    let inputs = load_inputs(&args)?;
    let config = load_config(&args)?;

    let function = EvalFunction::new(ScriptRunner::with_config(config));
    let value = function.call(&[
        HostValue::String(script),
        inputs.unwrap_or(HostValue::Null),
    ])?;
    emit_value(&value)?;
    Ok(0)
}

fn emit_value(value: &HostValue) -> Result<(), CliError> {
    let type_json =
        serde_json::to_string(&value.underlying().host_type()).map_err(map_cli_output_encode)?;
    let value_json = serde_json::to_string(&host_to_json(value)).map_err(map_cli_output_encode)?;
    println!("RESULT:OK");
    println!("TYPE_JSON:{}", type_json);
    println!("VALUE_JSON:{}", value_json);
    Ok(())
}

#[derive(Debug, Serialize)]
struct DescribeOutput {
    name: String,
    definition: hs_api::FunctionDefinition,
}

fn run_describe() -> Result<i32, CliError> {
    let function = EvalFunction::default();
    let output = DescribeOutput {
        name: function.qualified_name(),
        definition: function.definition(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).map_err(map_cli_output_encode)?
    );
    Ok(0)
}
