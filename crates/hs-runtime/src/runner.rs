use std::sync::Arc;

use hs_core::{EvalError, HostValue};
use rhai::{Engine, EvalAltResult, Scope};
use tracing::{debug, warn};

use crate::config::EvalConfig;
use crate::contract::extract_result;
use crate::decode::decode_result;
use crate::encode::encode_inputs;
use crate::engine::{build_engine, TimeBudgetExceeded};
use crate::sink::{PrintSink, TracingSink};

/// Runs scripts against host inputs.
///
/// Every call builds its own bindings and its own engine, so one runner can be
/// shared between threads. Only the print sink is shared across calls.
#[derive(Clone)]
pub struct ScriptRunner {
    config: EvalConfig,
    sink: Arc<dyn PrintSink>,
}

impl ScriptRunner {
    pub fn new(config: EvalConfig, sink: Arc<dyn PrintSink>) -> Self {
        Self { config, sink }
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self::new(config, Arc::new(TracingSink))
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Executes `script` with `inputs` bound as globals and returns the
    /// decoded value of its `result` binding, or null when the script never
    /// declares one.
    pub fn run(&self, script: &str, inputs: Option<&HostValue>) -> Result<HostValue, EvalError> {
        let label = self.config.label.as_str();
        let outcome = self.run_inner(script, inputs);
        match &outcome {
            Ok(value) => debug!(label, kind = %value.underlying().kind(), "script finished"),
            Err(error) => warn!(label, code = error.code(), "{}", error),
        }
        outcome
    }

    fn run_inner(&self, script: &str, inputs: Option<&HostValue>) -> Result<HostValue, EvalError> {
        let mut scope = encode_inputs(inputs)?;
        let predeclared = scope.len();
        debug!(
            label = self.config.label.as_str(),
            script_len = script.len(),
            bindings = predeclared,
            "script starting"
        );

        let engine = build_engine(&self.config, Arc::clone(&self.sink), predeclared);
        self.execute(&engine, &mut scope, script)?;

        match extract_result(&scope, predeclared) {
            Some(value) => decode_result(value),
            None => Ok(HostValue::dynamic(HostValue::Null)),
        }
    }

    fn execute(
        &self,
        engine: &Engine,
        scope: &mut Scope<'static>,
        script: &str,
    ) -> Result<(), EvalError> {
        let mut ast = engine
            .compile_with_scope(scope, script)
            .map_err(|error| EvalError::execution(error.to_string()))?;
        ast.set_source(self.config.label.as_str());

        engine
            .run_ast_with_scope(scope, &ast)
            .map_err(|error| execution_error(&error))
    }
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::with_config(EvalConfig::default())
    }
}

impl std::fmt::Debug for ScriptRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRunner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn execution_error(error: &EvalAltResult) -> EvalError {
    if let EvalAltResult::ErrorTerminated(token, _) = error {
        if let Some(exceeded) = token.clone().try_cast::<TimeBudgetExceeded>() {
            return EvalError::execution(format!(
                "script exceeded time budget of {}ms",
                exceeded.ms
            ));
        }
    }
    EvalError::execution(error.to_string())
}
