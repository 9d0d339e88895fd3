//! Parser for .php-cs-fixer.php configuration files
//!
//! Extracts the `->setRules([...])` array using regex patterns on the PHP
//! code directly. Only rule names, booleans, and scalar or string-list
//! options are understood.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use thiserror::Error;

use crate::fixers::{ConfigValue, FixerConfig};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid PHP config format: {0}")]
    InvalidFormat(String),
    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Configuration for a single fixer rule
#[derive(Debug, Clone, Default)]
pub struct RuleConfig {
    /// Whether the rule is enabled
    pub enabled: bool,
    /// Rule-specific options
    pub options: HashMap<String, ConfigValue>,
}

/// Parsed PHP-CS-Fixer configuration
#[derive(Debug, Clone, Default)]
pub struct PhpCsFixerConfig {
    /// Rules named in `setRules`, with their configurations
    pub rules: HashMap<String, RuleConfig>,
}

impl PhpCsFixerConfig {
    /// Parse a .php-cs-fixer.php file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path)?;
        parse_php_cs_fixer_config(&content)
    }

    /// Check if a specific rule is enabled
    pub fn is_rule_enabled(&self, name: &str) -> bool {
        self.rules.get(name).map(|r| r.enabled).unwrap_or(false)
    }

    /// Get configuration for a specific rule
    pub fn get_rule_config(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.get(name)
    }

    /// Options of an enabled rule as a `FixerConfig`
    pub fn fixer_config_for(&self, name: &str) -> Option<FixerConfig> {
        self.rules
            .get(name)
            .filter(|rule| rule.enabled)
            .map(|rule| FixerConfig {
                options: rule.options.clone(),
            })
    }
}

/// Parse PHP-CS-Fixer configuration from a string
pub fn parse_php_cs_fixer_config(content: &str) -> Result<PhpCsFixerConfig, ParseError> {
    if !content.contains("setRules") {
        return Err(ParseError::InvalidFormat(
            "no ->setRules([...]) call found".to_string(),
        ));
    }

    Ok(PhpCsFixerConfig {
        rules: parse_rules(content)?,
    })
}

/// Parse rules configuration
fn parse_rules(content: &str) -> Result<HashMap<String, RuleConfig>, ParseError> {
    let mut rules = HashMap::new();

    // Match ->setRules([...]) - capture the array content
    let rules_re = Regex::new(r#"->setRules\s*\(\s*\[([\s\S]*?)\]\s*\)"#)?;

    let Some(caps) = rules_re.captures(content) else {
        return Ok(rules);
    };
    let rules_content = &caps[1];

    // Presets first so explicit rules below override them
    let preset_re = Regex::new(r#"['"]@([A-Za-z0-9_-]+)['"](?:\s*=>\s*(true|false))?"#)?;
    for cap in preset_re.captures_iter(rules_content) {
        let enabled = cap.get(2).map(|m| m.as_str() == "true").unwrap_or(true);
        if !enabled {
            continue;
        }
        for rule_name in super::presets::get_preset_rules(&cap[1]) {
            rules.insert(rule_name.to_string(), RuleConfig {
                enabled: true,
                options: HashMap::new(),
            });
        }
    }

    // Rules with array options: 'rule_name' => ['option' => 'value']
    let array_rule_re = Regex::new(r#"['"]([a-z_]+)['"]\s*=>\s*\[((?:[^\[\]]|\[[^\]]*\])*)\]"#)?;
    for cap in array_rule_re.captures_iter(rules_content) {
        rules.insert(cap[1].to_string(), RuleConfig {
            enabled: true,
            options: parse_options(&cap[2])?,
        });
    }

    // Simple rules: 'rule_name' => true/false, outside any option array
    let remaining = array_rule_re.replace_all(rules_content, "");
    let simple_rule_re = Regex::new(r#"['"]([a-z_]+)['"]\s*=>\s*(true|false)"#)?;
    for cap in simple_rule_re.captures_iter(&remaining) {
        rules.insert(cap[1].to_string(), RuleConfig {
            enabled: &cap[2] == "true",
            options: HashMap::new(),
        });
    }

    Ok(rules)
}

/// Parse the option array of one rule
fn parse_options(options_str: &str) -> Result<HashMap<String, ConfigValue>, ParseError> {
    let mut options = HashMap::new();

    // Option keys may be hyphenated ('short-always')
    let string_opt_re = Regex::new(r#"['"]([a-z_-]+)['"]\s*=>\s*['"]([^'"]*)['"]"#)?;
    for cap in string_opt_re.captures_iter(options_str) {
        options.insert(cap[1].to_string(), ConfigValue::String(cap[2].to_string()));
    }

    let bool_opt_re = Regex::new(r#"['"]([a-z_-]+)['"]\s*=>\s*(true|false)\b"#)?;
    for cap in bool_opt_re.captures_iter(options_str) {
        options.insert(cap[1].to_string(), ConfigValue::Bool(&cap[2] == "true"));
    }

    let number_opt_re = Regex::new(r#"['"]([a-z_-]+)['"]\s*=>\s*(-?\d+)\b"#)?;
    for cap in number_opt_re.captures_iter(options_str) {
        let number = cap[2]
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("number out of range: {}", &cap[2])))?;
        options.insert(cap[1].to_string(), ConfigValue::Number(number));
    }

    let arr_opt_re = Regex::new(r#"['"]([a-z_-]+)['"]\s*=>\s*\[([^\]]*)\]"#)?;
    let item_re = Regex::new(r#"['"]([^'"]+)['"]"#)?;
    for cap in arr_opt_re.captures_iter(options_str) {
        let values: Vec<String> = item_re
            .captures_iter(&cap[2])
            .map(|c| c[1].to_string())
            .collect();
        options.insert(cap[1].to_string(), ConfigValue::Array(values));
    }

    Ok(options)
}
