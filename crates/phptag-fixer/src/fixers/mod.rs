//! Fixer implementations for PHP-CS-Fixer compatibility
//!
//! Each fixer rewrites a lexed `TokenStream` in place. Fixers are looked up
//! by name through the `FixerRegistry` and run in priority order.

mod registry;
pub mod php_tag;

pub use php_tag::{EchoTagSyntaxFixer, NoShortEchoTagFixer};
pub use registry::{FixerInfo, FixerRegistry};

use std::collections::HashMap;
use std::fmt;

use phptag_core::{StreamError, TokenStream};
use thiserror::Error;

/// Errors raised while configuring or running a fixer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixerError {
    #[error("Token stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("Unknown option '{option}' for fixer '{fixer}'")]
    UnknownOption { fixer: String, option: String },

    #[error("Option '{option}' must be of type {expected}")]
    InvalidOptionType { option: String, expected: String },

    #[error("Invalid value '{value}' for option '{option}', expected one of: {allowed}")]
    InvalidOptionValue {
        option: String,
        value: String,
        allowed: String,
    },

    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),
}

/// Configuration passed to fixers
#[derive(Debug, Clone, Default)]
pub struct FixerConfig {
    /// Rule-specific options
    pub options: HashMap<String, ConfigValue>,
}

impl FixerConfig {
    /// Add or replace an option
    pub fn with_option(mut self, name: impl Into<String>, value: ConfigValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    pub fn with_str(self, name: impl Into<String>, value: &str) -> Self {
        self.with_option(name, ConfigValue::String(value.to_string()))
    }

    pub fn with_bool(self, name: impl Into<String>, value: bool) -> Self {
        self.with_option(name, ConfigValue::Bool(value))
    }
}

/// Configuration value types for fixer options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    String(String),
    Number(i64),
    Array(Vec<String>),
    StringMap(HashMap<String, String>),
}

/// A code sample shown in fixer documentation
#[derive(Debug, Clone)]
pub struct CodeSample {
    pub source: &'static str,
    pub options: Vec<(&'static str, ConfigValue)>,
}

impl CodeSample {
    /// Build the `FixerConfig` this sample runs with
    pub fn config(&self) -> FixerConfig {
        self.options
            .iter()
            .fold(FixerConfig::default(), |config, (name, value)| {
                config.with_option(*name, value.clone())
            })
    }
}

/// A formatting fixer that rewrites a PHP token stream
pub trait Fixer: Send + Sync {
    /// Internal name for this fixer
    fn name(&self) -> &'static str;

    /// PHP-CS-Fixer compatible name
    fn php_cs_fixer_name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Execution priority (higher = runs first)
    fn priority(&self) -> i32;

    /// Whether this fixer makes risky changes
    fn is_risky(&self) -> bool {
        false
    }

    /// Whether this fixer only survives under a legacy name
    fn is_deprecated(&self) -> bool {
        false
    }

    /// Names of the fixers replacing a deprecated one
    fn successors(&self) -> Vec<&'static str> {
        vec![]
    }

    /// Get configurable options for this fixer
    fn options(&self) -> Vec<FixerOption> {
        vec![]
    }

    /// Example inputs with the options they run under
    fn samples(&self) -> Vec<CodeSample> {
        vec![]
    }

    /// Cheap pre-check: can `fix` change anything in this stream?
    fn is_candidate(&self, _tokens: &TokenStream, _config: &FixerConfig) -> bool {
        true
    }

    /// Rewrite the stream in place, returning the number of changes made
    fn fix(&self, tokens: &mut TokenStream, config: &FixerConfig) -> Result<usize, FixerError>;
}

/// A configurable option for a fixer
#[derive(Debug, Clone)]
pub struct FixerOption {
    pub name: &'static str,
    pub description: &'static str,
    pub option_type: OptionType,
    pub default: Option<ConfigValue>,
}

impl FixerOption {
    /// Check that `value` has this option's type and, for enums, an allowed value
    pub fn validate(&self, value: &ConfigValue) -> Result<(), FixerError> {
        match (&self.option_type, value) {
            (OptionType::Bool, ConfigValue::Bool(_))
            | (OptionType::String, ConfigValue::String(_))
            | (OptionType::Number, ConfigValue::Number(_))
            | (OptionType::StringArray, ConfigValue::Array(_)) => Ok(()),
            (OptionType::Enum(allowed), ConfigValue::String(s)) => {
                if allowed.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(FixerError::InvalidOptionValue {
                        option: self.name.to_string(),
                        value: s.clone(),
                        allowed: allowed.join(", "),
                    })
                }
            }
            (expected, _) => Err(FixerError::InvalidOptionType {
                option: self.name.to_string(),
                expected: expected.to_string(),
            }),
        }
    }
}

/// Type of a fixer option
#[derive(Debug, Clone)]
pub enum OptionType {
    Bool,
    String,
    Number,
    StringArray,
    Enum(Vec<&'static str>),
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Bool => f.write_str("bool"),
            OptionType::String => f.write_str("string"),
            OptionType::Number => f.write_str("number"),
            OptionType::StringArray => f.write_str("string[]"),
            OptionType::Enum(values) => write!(f, "enum({})", values.join("|")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_option() -> FixerOption {
        FixerOption {
            name: "format",
            description: "Tag format",
            option_type: OptionType::Enum(vec!["short", "long"]),
            default: Some(ConfigValue::String("short".to_string())),
        }
    }

    #[test]
    fn test_validate_enum() {
        let option = format_option();
        assert!(option.validate(&ConfigValue::String("long".to_string())).is_ok());

        let err = option
            .validate(&ConfigValue::String("medium".to_string()))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value 'medium' for option 'format', expected one of: short, long"
        );
    }

    #[test]
    fn test_validate_type_mismatch() {
        let option = format_option();
        assert!(matches!(
            option.validate(&ConfigValue::Bool(true)),
            Err(FixerError::InvalidOptionType { .. })
        ));
    }

    #[test]
    fn test_validate_bool() {
        let option = FixerOption {
            name: "always_short",
            description: "",
            option_type: OptionType::Bool,
            default: Some(ConfigValue::Bool(false)),
        };
        assert!(option.validate(&ConfigValue::Bool(true)).is_ok());
        assert!(option.validate(&ConfigValue::Number(1)).is_err());
    }

    #[test]
    fn test_sample_config() {
        let sample = CodeSample {
            source: "<?= 1 ?>",
            options: vec![("direction", ConfigValue::String("long".to_string()))],
        };
        let config = sample.config();
        assert_eq!(
            config.options.get("direction"),
            Some(&ConfigValue::String("long".to_string()))
        );
    }
}
