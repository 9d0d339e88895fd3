//! Configuration for the echo tag fixers
//!
//! This module resolves raw fixer options into a `RewriteConfiguration` and
//! parses `.php-cs-fixer.php` configuration files into per-rule options.

mod php_parser;
mod presets;
mod rewrite;

pub use php_parser::{parse_php_cs_fixer_config, ParseError, PhpCsFixerConfig, RuleConfig};
pub use presets::{get_preset_rules, Preset};
pub use rewrite::{
    option_definition, option_definitions, Direction, LongFunction, RewriteConfiguration,
    OPTION_ALWAYS_SHORT, OPTION_DIRECTION, OPTION_FORMAT, OPTION_LEGACY_SHORT_ALWAYS,
    OPTION_LONG_FUNCTION, OPTION_SHORTEN_SIMPLE_ONLY,
};
