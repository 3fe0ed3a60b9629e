use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "hs-cli")]
#[command(about = "Run Rhai scripts against structured host inputs")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Execute a script and print its `result`.
    Eval(EvalArgs),
    /// Print the definition of the `eval` function.
    Describe,
}

#[derive(Debug, Args)]
pub(crate) struct EvalArgs {
    #[arg(long = "script")]
    pub(crate) script: String,
    /// Path to a JSON file holding the inputs object.
    #[arg(long = "inputs")]
    pub(crate) inputs: Option<String>,
    #[arg(long = "inputs-json", conflicts_with = "inputs")]
    pub(crate) inputs_json: Option<String>,
    /// Path to a JSON file with execution limits.
    #[arg(long = "config")]
    pub(crate) config: Option<String>,
    #[arg(long = "max-operations")]
    pub(crate) max_operations: Option<u64>,
    #[arg(long = "timeout-ms")]
    pub(crate) timeout_ms: Option<u64>,
}
