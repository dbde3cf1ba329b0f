use crate::error::{CompileError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENTRY_NAME: &str = "entry";
pub const DEFAULT_NEGATION_KEY: &str = "!not";
pub const DEFAULT_MAX_OPERATOR_DEPTH: usize = 32;

/// What a compile call hands back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// An evaluable predicate.
    #[default]
    Function,
    /// The rendered source of the predicate.
    String,
}

/// Compiler options. Every field has a default, so a partial JSON document
/// such as `{"optimize": false}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CompileOptions {
    /// Identifier the input is bound to in rendered output.
    #[serde(alias = "entryName", alias = "entry")]
    pub entry_name: String,

    /// Factor shared leading terms at every join point. Turn this off for
    /// dictionaries whose tests mutate the execution context.
    pub optimize: bool,

    #[serde(alias = "negationKey", alias = "negation")]
    pub negation_key: String,

    #[serde(alias = "outputMode")]
    pub output_mode: OutputMode,

    /// How deep operators may nest `call_operator` calls.
    #[serde(alias = "maxOperatorDepth")]
    pub max_operator_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            entry_name: DEFAULT_ENTRY_NAME.to_string(),
            optimize: true,
            negation_key: DEFAULT_NEGATION_KEY.to_string(),
            output_mode: OutputMode::Function,
            max_operator_depth: DEFAULT_MAX_OPERATOR_DEPTH,
        }
    }
}

impl CompileOptions {
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.entry_name) {
            return Err(CompileError::Config(format!(
                "entry name '{}' is not a valid identifier",
                self.entry_name
            )));
        }

        if self.negation_key.is_empty() {
            return Err(CompileError::Config(
                "negation key must not be empty".to_string(),
            ));
        }

        if self.max_operator_depth == 0 {
            return Err(CompileError::Config(
                "max operator depth must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
