use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Invalid compiler configuration: {0}")]
    Config(String),

    #[error("'{key}' is not a valid keyword, use one of: {}", valid.join(", "))]
    UnknownOperator { key: String, valid: Vec<String> },

    #[error("Operator '{key}' returned an empty expression")]
    InvalidGeneratorResult { key: String },

    #[error("Operator '{key}' failed: {message}")]
    GeneratorFailure { key: String, message: String },

    #[error("Operator '{key}' exceeded the composition depth limit of {limit}")]
    RecursionLimit { key: String, limit: usize },
}

impl CompileError {
    /// Failure raised by an operator itself.
    pub fn failure(key: impl Into<String>, message: impl Into<String>) -> Self {
        CompileError::GeneratorFailure {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operator_lists_valid_keys() {
        let err = CompileError::UnknownOperator {
            key: "bar".to_string(),
            valid: vec!["equals".to_string(), "greaterThan".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "'bar' is not a valid keyword, use one of: equals, greaterThan"
        );
    }
}
