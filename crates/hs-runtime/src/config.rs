use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_LABEL: &str = "hostscript-eval";

/// Limits and options for one script execution. All limits are handed to the
/// engine as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvalConfig {
    /// Diagnostic label attached to the compiled script and to its output.
    pub label: String,
    /// Maximum number of operations the engine may perform.
    pub max_operations: u64,
    /// Maximum call stack depth, which bounds recursion.
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    pub max_function_expr_depth: usize,
    pub max_string_size: usize,
    pub max_array_size: usize,
    pub max_map_size: usize,
    /// Maximum number of variables the script itself may declare. Injected
    /// inputs are not counted against it.
    pub max_variables: usize,
    pub max_functions: usize,
    /// Maximum number of modules a script may import. No resolver is
    /// installed, so raising it only changes which error `import` reports.
    pub max_modules: usize,
    /// Wall-clock budget in milliseconds, checked between engine operations.
    pub timeout_ms: Option<u64>,
}

impl EvalConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            max_operations: 1_000_000,
            max_call_levels: 64,
            max_expr_depth: 64,
            max_function_expr_depth: 32,
            max_string_size: 1_000_000,
            max_array_size: 100_000,
            max_map_size: 100_000,
            max_variables: 10_000,
            max_functions: 1_000,
            max_modules: 0,
            timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config: EvalConfig =
            serde_json::from_str(r#"{ "maxOperations": 500, "timeoutMs": 250 }"#)
                .expect("config json");
        assert_eq!(config.max_operations, 500);
        assert_eq!(config.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.label, DEFAULT_LABEL);
        assert_eq!(config.max_call_levels, 64);
    }

    #[test]
    fn default_has_no_wall_clock_budget() {
        assert_eq!(EvalConfig::default().timeout(), None);
    }
}
