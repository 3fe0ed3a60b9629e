//! Host-facing `eval` function: its published definition and the binding of
//! positional host arguments onto a [`ScriptRunner`].

use hs_core::{EvalError, HostType, HostValue};
use hs_runtime::ScriptRunner;
use serde::Serialize;

pub use hs_runtime::{EvalConfig, PrintSink};

/// Namespace under which hosts publish the function.
pub const NAMESPACE: &str = "hostscript";
pub const FUNCTION_NAME: &str = "eval";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionMetadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    pub name: String,
    pub description: String,
    pub r#type: HostType,
    pub allow_null: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDefinition {
    pub summary: String,
    pub description: String,
    pub parameters: Vec<ParameterDefinition>,
    pub return_type: HostType,
}

/// The `eval(script, inputs)` function.
#[derive(Debug, Clone, Default)]
pub struct EvalFunction {
    runner: ScriptRunner,
}

impl EvalFunction {
    pub fn new(runner: ScriptRunner) -> Self {
        Self { runner }
    }

    pub fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata {
            name: FUNCTION_NAME.to_string(),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}::{}", NAMESPACE, FUNCTION_NAME)
    }

    pub fn definition(&self) -> FunctionDefinition {
        FunctionDefinition {
            summary: "Execute a Rhai script".to_string(),
            description: "Executes the provided Rhai script with the given inputs. The script \
                          returns a value by declaring a top-level variable named `result`."
                .to_string(),
            parameters: vec![
                ParameterDefinition {
                    name: "script".to_string(),
                    description: "The Rhai source code to execute.".to_string(),
                    r#type: HostType::String,
                    allow_null: false,
                },
                ParameterDefinition {
                    name: "inputs".to_string(),
                    description: "A map of variables to inject into the script's global scope."
                        .to_string(),
                    r#type: HostType::Dynamic,
                    allow_null: true,
                },
            ],
            return_type: HostType::Dynamic,
        }
    }

    /// Binds positional arguments and runs the script.
    pub fn call(&self, args: &[HostValue]) -> Result<HostValue, EvalError> {
        let [script, inputs] = args else {
            return Err(EvalError::argument(format!(
                "{} expects 2 arguments (script, inputs), got {}",
                FUNCTION_NAME,
                args.len()
            )));
        };

        let script = match script.underlying() {
            HostValue::String(script) => script.as_str(),
            HostValue::Null => {
                return Err(EvalError::argument("script must not be null"));
            }
            HostValue::Unknown => {
                return Err(EvalError::argument("script must be known"));
            }
            other => {
                return Err(EvalError::argument(format!(
                    "script must be a string, got {}",
                    other.kind()
                )));
            }
        };

        self.runner.run(script, Some(inputs))
    }

    pub fn runner(&self) -> &ScriptRunner {
        &self.runner
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use hs_runtime::CapturingSink;

    #[test]
    fn metadata_and_definition_describe_eval() {
        let function = EvalFunction::default();
        assert_eq!(function.metadata().name, "eval");
        assert_eq!(function.qualified_name(), "hostscript::eval");

        let definition = function.definition();
        let names = definition
            .parameters
            .iter()
            .map(|parameter| parameter.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["script", "inputs"]);
        assert_eq!(definition.return_type, HostType::Dynamic);

        let json = serde_json::to_value(&definition).expect("definition json");
        assert_eq!(json["parameters"][0]["type"]["kind"], "string");
        assert_eq!(json["returnType"]["kind"], "dynamic");
    }

    #[test]
    fn call_binds_script_and_inputs() {
        let function = EvalFunction::default();
        let value = function
            .call(&[
                HostValue::string("let result = a + b;"),
                HostValue::object([("a", HostValue::Int64(10)), ("b", HostValue::Int64(20))]),
            ])
            .expect("call");
        assert_eq!(value.as_i64(), Some(30));
    }

    #[test]
    fn call_accepts_dynamic_script_and_null_inputs() {
        let function = EvalFunction::default();
        let value = function
            .call(&[
                HostValue::dynamic(HostValue::string("let result = \"ok\";")),
                HostValue::Null,
            ])
            .expect("call");
        assert_eq!(value.as_str(), Some("ok"));
    }

    #[test]
    fn call_rejects_bad_arguments() {
        let function = EvalFunction::default();

        let error = function
            .call(&[HostValue::string("let result = 1;")])
            .expect_err("arity");
        assert_eq!(error.code(), "EVAL_INVALID_ARGUMENT");

        let error = function
            .call(&[HostValue::Null, HostValue::Null])
            .expect_err("null script");
        assert_eq!(error, EvalError::argument("script must not be null"));

        let error = function
            .call(&[HostValue::Int64(1), HostValue::Null])
            .expect_err("int script");
        assert!(error.message().ends_with("got int64"));
    }

    #[test]
    fn call_uses_injected_runner() {
        let sink = Arc::new(CapturingSink::new());
        let function = EvalFunction::new(ScriptRunner::new(EvalConfig::default(), sink.clone()));
        function
            .call(&[
                HostValue::string("print(greeting);"),
                HostValue::object([("greeting", HostValue::string("hi"))]),
            ])
            .expect("call");
        assert_eq!(sink.lines(), vec!["hi".to_string()]);
    }
}
