use thiserror::Error;

/// Terminal failure of a single evaluation. Nothing is retried or recovered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A host input (or its top-level shape) has no script representation.
    #[error("failed to convert inputs: {0}")]
    InputConversion(String),
    /// Parse or runtime failure reported by the engine, message kept verbatim.
    #[error("script execution failed: {0}")]
    ScriptExecution(String),
    /// The script's `result` binding has no host representation.
    #[error("failed to convert result: {0}")]
    ResultConversion(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl EvalError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputConversion(message.into())
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::ScriptExecution(message.into())
    }

    pub fn result(message: impl Into<String>) -> Self {
        Self::ResultConversion(message.into())
    }

    pub fn argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InputConversion(_) => "EVAL_INPUT_CONVERSION",
            Self::ScriptExecution(_) => "EVAL_SCRIPT_EXECUTION",
            Self::ResultConversion(_) => "EVAL_RESULT_CONVERSION",
            Self::InvalidArgument(_) => "EVAL_INVALID_ARGUMENT",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InputConversion(message)
            | Self::ScriptExecution(message)
            | Self::ResultConversion(message)
            | Self::InvalidArgument(message) => message,
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_variant() {
        assert_eq!(EvalError::input("x").code(), "EVAL_INPUT_CONVERSION");
        assert_eq!(EvalError::execution("x").code(), "EVAL_SCRIPT_EXECUTION");
        assert_eq!(EvalError::result("x").code(), "EVAL_RESULT_CONVERSION");
        assert_eq!(EvalError::argument("x").code(), "EVAL_INVALID_ARGUMENT");
    }

    #[test]
    fn execution_message_is_kept_verbatim() {
        let error = EvalError::execution("Syntax error: unexpected ';' (line 1, position 14)");
        assert_eq!(
            error.message(),
            "Syntax error: unexpected ';' (line 1, position 14)"
        );
        assert_eq!(
            error.to_string(),
            "script execution failed: Syntax error: unexpected ';' (line 1, position 14)"
        );
    }
}
