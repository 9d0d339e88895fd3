//! Fixer integration for the phptag CLI
//!
//! Builds the option set for the selected rule from a `.php-cs-fixer.php`
//! file and command line flags, and runs the fixer on one source text.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use colored::*;
use phptag_fixer::config::{
    OPTION_ALWAYS_SHORT, OPTION_DIRECTION, OPTION_FORMAT, OPTION_LEGACY_SHORT_ALWAYS,
    OPTION_LONG_FUNCTION, OPTION_SHORTEN_SIMPLE_ONLY,
};
use phptag_fixer::{ConfigValue, FixerConfig, FixerRegistry, PhpCsFixerConfig};

/// Option overrides given on the command line
#[derive(Debug, Default, Clone)]
pub struct CliOptions {
    pub direction: Option<String>,
    pub long_function: Option<String>,
    pub always_short: bool,
}

/// Load fixer configuration from a .php-cs-fixer.php file
pub fn load_fixer_config(path: &Path) -> Result<PhpCsFixerConfig> {
    PhpCsFixerConfig::from_file(path)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Options for `rule`: config file options first, then CLI overrides
pub fn build_fixer_config(
    rule: &str,
    php_config: Option<&PhpCsFixerConfig>,
    cli: &CliOptions,
) -> FixerConfig {
    let mut config = php_config
        .and_then(|c| c.fixer_config_for(rule))
        .unwrap_or_default();

    if let Some(direction) = &cli.direction {
        // A CLI direction replaces whichever alias the config file used,
        // but a legacy `long-print` still picks the keyword
        if let Some(ConfigValue::String(format)) = config.options.remove(OPTION_FORMAT) {
            if format == "long-print" && !config.options.contains_key(OPTION_LONG_FUNCTION) {
                config = config.with_str(OPTION_LONG_FUNCTION, "print");
            }
        }
        config.options.remove(OPTION_DIRECTION);
        config = config.with_str(OPTION_DIRECTION, direction);
    }

    if let Some(function) = &cli.long_function {
        config = config.with_str(OPTION_LONG_FUNCTION, function);
    }

    if cli.always_short {
        config.options.remove(OPTION_SHORTEN_SIMPLE_ONLY);
        config.options.remove(OPTION_LEGACY_SHORT_ALWAYS);
        config = config.with_option(OPTION_ALWAYS_SHORT, ConfigValue::Bool(true));
    }

    config
}

/// Run one fixer on a source text
///
/// Returns the rewritten source and the number of changed tags.
pub fn run_fixer(
    source: &str,
    registry: &FixerRegistry,
    rule: &str,
    config: &FixerConfig,
) -> Result<(String, usize)> {
    if registry.get_by_php_name(rule).is_none() && registry.get(rule).is_none() {
        return Err(anyhow!(
            "Unknown fixer '{}'. Use --list-fixers to see available fixers",
            rule
        ));
    }

    registry
        .check(source, &[rule], config)
        .with_context(|| format!("Failed to run {}", rule))
}

/// List available fixers
pub fn list_fixers(registry: &FixerRegistry) {
    println!("{}", "Available fixers:".bold());
    println!();

    let mut fixers = registry.list();
    fixers.sort_by(|a, b| a.php_cs_fixer_name.cmp(&b.php_cs_fixer_name));

    for info in fixers {
        let marker = if info.is_deprecated {
            format!(" [deprecated, use {}]", info.successors.join(", "))
                .yellow()
                .to_string()
        } else {
            String::new()
        };

        println!(
            "  {} - {} (priority: {}){}",
            info.php_cs_fixer_name.green(),
            info.description,
            info.priority,
            marker
        );

        if let Some(fixer) = registry.get(info.name) {
            for option in fixer.options() {
                println!(
                    "      {} <{}> - {}",
                    option.name.cyan(),
                    option.option_type,
                    option.description
                );
            }
        }
    }
}
