//! Echo tag rewrite configuration
//!
//! Resolves a raw option map into a `RewriteConfiguration`. Three option
//! shapes are accepted:
//!
//! - `direction` / `long_function` / `always_short`
//! - php-cs-fixer's `format` (`short`|`long`) / `long_function` /
//!   `shorten_simple_statements_only`
//! - the legacy hyphenated `format` (`short`|`long-echo`|`long-print`) /
//!   `short-always`

use std::collections::HashMap;

use phptag_core::{Token, TokenKind};
use serde::{Deserialize, Serialize};

use crate::fixers::{ConfigValue, FixerError, FixerOption, OptionType};

pub const OPTION_DIRECTION: &str = "direction";
pub const OPTION_LONG_FUNCTION: &str = "long_function";
pub const OPTION_ALWAYS_SHORT: &str = "always_short";
pub const OPTION_FORMAT: &str = "format";
pub const OPTION_SHORTEN_SIMPLE_ONLY: &str = "shorten_simple_statements_only";
pub const OPTION_LEGACY_SHORT_ALWAYS: &str = "short-always";

/// Keyword emitted when expanding `<?=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LongFunction {
    #[default]
    Echo,
    Print,
}

impl LongFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "echo" => Some(LongFunction::Echo),
            "print" => Some(LongFunction::Print),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LongFunction::Echo => "echo",
            LongFunction::Print => "print",
        }
    }

    /// The keyword token for this function
    pub fn token(self) -> Token {
        match self {
            LongFunction::Echo => Token::new(TokenKind::Echo, "echo"),
            LongFunction::Print => Token::new(TokenKind::Print, "print"),
        }
    }
}

/// Which tag form to produce, with the options meaningful for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum Direction {
    /// `<?php echo` / `<?php print` become `<?=`
    Short {
        /// Shorten even when more statements follow the echo
        #[serde(default)]
        always_short: bool,
    },
    /// `<?=` becomes `<?php echo` / `<?php print`
    Long {
        #[serde(default)]
        long_function: LongFunction,
    },
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Short {
            always_short: false,
        }
    }
}

/// Resolved options for one run of the echo tag rewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewriteConfiguration {
    #[serde(flatten)]
    pub direction: Direction,
}

impl RewriteConfiguration {
    pub fn short(always_short: bool) -> Self {
        Self {
            direction: Direction::Short { always_short },
        }
    }

    pub fn long(long_function: LongFunction) -> Self {
        Self {
            direction: Direction::Long { long_function },
        }
    }

    /// Resolve a raw option map, validating types and enum values
    ///
    /// Unknown keys are rejected. Keys that are only meaningful for the other
    /// direction are validated but otherwise ignored.
    pub fn from_options(options: &HashMap<String, ConfigValue>) -> Result<Self, FixerError> {
        let mut resolver = Resolver::default();

        let mut keys: Vec<&String> = options.keys().collect();
        keys.sort();

        for key in keys {
            let value = &options[key];
            let definition = option_definition(key).ok_or_else(|| FixerError::UnknownOption {
                fixer: "echo_tag_syntax".to_string(),
                option: key.clone(),
            })?;
            definition.validate(value)?;

            match (key.as_str(), value) {
                (OPTION_DIRECTION, ConfigValue::String(s)) => {
                    resolver.set_long(key, s == "long")?;
                }
                (OPTION_FORMAT, ConfigValue::String(s)) => match s.as_str() {
                    "short" => resolver.set_long(key, false)?,
                    "long" => resolver.set_long(key, true)?,
                    legacy => {
                        tracing::debug!(format = legacy, "resolving legacy echo tag format");
                        resolver.set_long(key, true)?;
                        let function = if legacy == "long-print" {
                            LongFunction::Print
                        } else {
                            LongFunction::Echo
                        };
                        resolver.set_function(key, function)?;
                    }
                },
                (OPTION_LONG_FUNCTION, ConfigValue::String(s)) => {
                    if let Some(function) = LongFunction::from_name(s) {
                        resolver.set_function(key, function)?;
                    }
                }
                (OPTION_ALWAYS_SHORT, ConfigValue::Bool(b)) => {
                    resolver.set_always_short(key, *b)?;
                }
                (OPTION_LEGACY_SHORT_ALWAYS, ConfigValue::Bool(b)) => {
                    tracing::debug!("resolving legacy 'short-always' option");
                    resolver.set_always_short(key, *b)?;
                }
                (OPTION_SHORTEN_SIMPLE_ONLY, ConfigValue::Bool(b)) => {
                    resolver.set_always_short(key, !*b)?;
                }
                _ => {}
            }
        }

        Ok(resolver.finish())
    }
}

/// Collects resolved values, rejecting keys that contradict each other
#[derive(Default)]
struct Resolver {
    long: Option<(bool, String)>,
    function: Option<(LongFunction, String)>,
    always_short: Option<(bool, String)>,
}

impl Resolver {
    fn set_long(&mut self, key: &str, long: bool) -> Result<(), FixerError> {
        set_once(&mut self.long, key, long)
    }

    fn set_function(&mut self, key: &str, function: LongFunction) -> Result<(), FixerError> {
        set_once(&mut self.function, key, function)
    }

    fn set_always_short(&mut self, key: &str, always: bool) -> Result<(), FixerError> {
        set_once(&mut self.always_short, key, always)
    }

    fn finish(self) -> RewriteConfiguration {
        match self.long {
            Some((true, _)) => {
                RewriteConfiguration::long(self.function.map(|(f, _)| f).unwrap_or_default())
            }
            _ => RewriteConfiguration::short(self.always_short.is_some_and(|(b, _)| b)),
        }
    }
}

fn set_once<T: PartialEq + Copy>(
    slot: &mut Option<(T, String)>,
    key: &str,
    value: T,
) -> Result<(), FixerError> {
    if let Some((existing, from)) = slot.as_ref() {
        if *existing != value {
            return Err(FixerError::ConflictingOptions(format!(
                "'{}' contradicts '{}'",
                key, from
            )));
        }
        return Ok(());
    }

    *slot = Some((value, key.to_string()));
    Ok(())
}

/// Options documented for `echo_tag_syntax`
pub fn option_definitions() -> Vec<FixerOption> {
    [OPTION_DIRECTION, OPTION_LONG_FUNCTION, OPTION_ALWAYS_SHORT]
        .into_iter()
        .filter_map(option_definition)
        .collect()
}

/// Definition of any accepted key, including aliases
pub fn option_definition(name: &str) -> Option<FixerOption> {
    let option = match name {
        OPTION_DIRECTION => FixerOption {
            name: OPTION_DIRECTION,
            description: "Which tag form to produce: 'short' (<?=) or 'long' (<?php echo)",
            option_type: OptionType::Enum(vec!["short", "long"]),
            default: Some(ConfigValue::String("short".to_string())),
        },
        OPTION_LONG_FUNCTION => FixerOption {
            name: OPTION_LONG_FUNCTION,
            description: "Keyword to use when expanding <?= ('echo' or 'print')",
            option_type: OptionType::Enum(vec!["echo", "print"]),
            default: Some(ConfigValue::String("echo".to_string())),
        },
        OPTION_ALWAYS_SHORT => FixerOption {
            name: OPTION_ALWAYS_SHORT,
            description: "Shorten tags even when other statements follow the echo",
            option_type: OptionType::Bool,
            default: Some(ConfigValue::Bool(false)),
        },
        OPTION_FORMAT => FixerOption {
            name: OPTION_FORMAT,
            description: "Alias of 'direction'; also accepts legacy 'long-echo' and 'long-print'",
            option_type: OptionType::Enum(vec!["short", "long", "long-echo", "long-print"]),
            default: None,
        },
        OPTION_SHORTEN_SIMPLE_ONLY => FixerOption {
            name: OPTION_SHORTEN_SIMPLE_ONLY,
            description: "Negation of 'always_short'",
            option_type: OptionType::Bool,
            default: None,
        },
        OPTION_LEGACY_SHORT_ALWAYS => FixerOption {
            name: OPTION_LEGACY_SHORT_ALWAYS,
            description: "Legacy alias of 'always_short'",
            option_type: OptionType::Bool,
            default: None,
        },
        _ => return None,
    };
    Some(option)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, ConfigValue)]) -> HashMap<String, ConfigValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn s(value: &str) -> ConfigValue {
        ConfigValue::String(value.to_string())
    }

    #[test]
    fn test_defaults() {
        let config = RewriteConfiguration::from_options(&HashMap::new()).unwrap();
        assert_eq!(config, RewriteConfiguration::short(false));
        assert_eq!(config, RewriteConfiguration::default());
    }

    #[test]
    fn test_direction_long_with_print() {
        let config = RewriteConfiguration::from_options(&options(&[
            ("direction", s("long")),
            ("long_function", s("print")),
        ]))
        .unwrap();
        assert_eq!(config, RewriteConfiguration::long(LongFunction::Print));
    }

    #[test]
    fn test_long_function_ignored_for_short() {
        let config = RewriteConfiguration::from_options(&options(&[
            ("direction", s("short")),
            ("long_function", s("print")),
            ("always_short", ConfigValue::Bool(true)),
        ]))
        .unwrap();
        assert_eq!(config, RewriteConfiguration::short(true));
    }

    #[test]
    fn test_php_cs_fixer_shape() {
        let config = RewriteConfiguration::from_options(&options(&[
            ("format", s("short")),
            ("shorten_simple_statements_only", ConfigValue::Bool(false)),
        ]))
        .unwrap();
        assert_eq!(config, RewriteConfiguration::short(true));
    }

    #[test]
    fn test_legacy_shape() {
        let config =
            RewriteConfiguration::from_options(&options(&[("format", s("long-print"))])).unwrap();
        assert_eq!(config, RewriteConfiguration::long(LongFunction::Print));

        let config = RewriteConfiguration::from_options(&options(&[
            ("format", s("short")),
            ("short-always", ConfigValue::Bool(true)),
        ]))
        .unwrap();
        assert_eq!(config, RewriteConfiguration::short(true));
    }

    #[test]
    fn test_unknown_option() {
        let err = RewriteConfiguration::from_options(&options(&[("syntax", s("short"))]))
            .unwrap_err();
        assert_eq!(
            err,
            FixerError::UnknownOption {
                fixer: "echo_tag_syntax".to_string(),
                option: "syntax".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_value() {
        let err = RewriteConfiguration::from_options(&options(&[("long_function", s("printf"))]))
            .unwrap_err();
        assert!(matches!(err, FixerError::InvalidOptionValue { .. }));

        let err = RewriteConfiguration::from_options(&options(&[("always_short", s("yes"))]))
            .unwrap_err();
        assert!(matches!(err, FixerError::InvalidOptionType { .. }));
    }

    #[test]
    fn test_conflicting_options() {
        let err = RewriteConfiguration::from_options(&options(&[
            ("format", s("long-echo")),
            ("long_function", s("print")),
        ]))
        .unwrap_err();
        assert!(matches!(err, FixerError::ConflictingOptions(_)));

        let err = RewriteConfiguration::from_options(&options(&[
            ("direction", s("short")),
            ("format", s("long")),
        ]))
        .unwrap_err();
        assert!(matches!(err, FixerError::ConflictingOptions(_)));

        let err = RewriteConfiguration::from_options(&options(&[
            ("always_short", ConfigValue::Bool(true)),
            ("shorten_simple_statements_only", ConfigValue::Bool(true)),
        ]))
        .unwrap_err();
        assert!(matches!(err, FixerError::ConflictingOptions(_)));
    }

    #[test]
    fn test_agreeing_aliases() {
        let config = RewriteConfiguration::from_options(&options(&[
            ("direction", s("long")),
            ("format", s("long-echo")),
            ("long_function", s("echo")),
        ]))
        .unwrap();
        assert_eq!(config, RewriteConfiguration::long(LongFunction::Echo));
    }

    #[test]
    fn test_deserialize() {
        let config: RewriteConfiguration =
            serde_json::from_str(r#"{"direction":"long","long_function":"print"}"#).unwrap();
        assert_eq!(config, RewriteConfiguration::long(LongFunction::Print));

        let config: RewriteConfiguration =
            serde_json::from_str(r#"{"direction":"short"}"#).unwrap();
        assert_eq!(config, RewriteConfiguration::short(false));
    }

    #[test]
    fn test_documented_options() {
        let names: Vec<&str> = option_definitions().iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["direction", "long_function", "always_short"]);
    }
}
