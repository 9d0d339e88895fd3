//! Fixer registry for managing available fixers
//!
//! The registry collects all available fixers and provides methods
//! to look them up by name and apply them in priority order.

use std::collections::HashMap;
use std::sync::Arc;

use phptag_core::tokenize;

use super::{EchoTagSyntaxFixer, Fixer, FixerConfig, FixerError, NoShortEchoTagFixer};

/// Information about a registered fixer
#[derive(Debug, Clone)]
pub struct FixerInfo {
    pub name: &'static str,
    pub php_cs_fixer_name: &'static str,
    pub description: &'static str,
    pub priority: i32,
    pub is_risky: bool,
    pub is_deprecated: bool,
    pub successors: Vec<&'static str>,
}

/// Registry of all available fixers
pub struct FixerRegistry {
    fixers: Vec<Arc<dyn Fixer>>,
    by_name: HashMap<&'static str, usize>,
    by_php_name: HashMap<&'static str, usize>,
}

impl FixerRegistry {
    /// Create a new registry with all built-in fixers
    pub fn new() -> Self {
        let mut registry = Self {
            fixers: Vec::new(),
            by_name: HashMap::new(),
            by_php_name: HashMap::new(),
        };

        registry.register(Arc::new(EchoTagSyntaxFixer));
        registry.register(Arc::new(NoShortEchoTagFixer::new()));

        // Sort by priority (descending), stable so registration order breaks ties
        registry.fixers.sort_by(|a, b| b.priority().cmp(&a.priority()));

        // Rebuild indices after sorting
        registry.by_name.clear();
        registry.by_php_name.clear();
        for (idx, fixer) in registry.fixers.iter().enumerate() {
            registry.by_name.insert(fixer.name(), idx);
            registry.by_php_name.insert(fixer.php_cs_fixer_name(), idx);
        }

        registry
    }

    /// Register a fixer
    fn register(&mut self, fixer: Arc<dyn Fixer>) {
        let idx = self.fixers.len();
        self.by_name.insert(fixer.name(), idx);
        self.by_php_name.insert(fixer.php_cs_fixer_name(), idx);
        self.fixers.push(fixer);
    }

    /// Get a fixer by its internal name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Fixer>> {
        self.by_name.get(name).map(|&idx| &self.fixers[idx])
    }

    /// Get a fixer by its PHP-CS-Fixer name
    pub fn get_by_php_name(&self, name: &str) -> Option<&Arc<dyn Fixer>> {
        self.by_php_name.get(name).map(|&idx| &self.fixers[idx])
    }

    /// Get all fixers in priority order
    pub fn all(&self) -> &[Arc<dyn Fixer>] {
        &self.fixers
    }

    /// Get information about all fixers
    pub fn list(&self) -> Vec<FixerInfo> {
        self.fixers
            .iter()
            .map(|f| FixerInfo {
                name: f.name(),
                php_cs_fixer_name: f.php_cs_fixer_name(),
                description: f.description(),
                priority: f.priority(),
                is_risky: f.is_risky(),
                is_deprecated: f.is_deprecated(),
                successors: f.successors(),
            })
            .collect()
    }

    /// Get fixer names that match a preset
    pub fn get_preset_fixers(&self, preset: &str) -> Vec<&'static str> {
        crate::config::get_preset_rules(preset)
            .iter()
            .filter(|&&name| self.by_php_name.contains_key(name))
            .copied()
            .collect()
    }

    /// Check source with specified fixers
    ///
    /// Lexes the source once and runs each fixer on the same token stream in
    /// priority order, so later fixers see earlier rewrites. Fixers whose
    /// `is_candidate` check fails are skipped. Unknown names are ignored.
    ///
    /// Returns (fixed_source, number_of_changes).
    pub fn check(
        &self,
        source: &str,
        fixer_names: &[&str],
        config: &FixerConfig,
    ) -> Result<(String, usize), FixerError> {
        let mut fixers_to_run: Vec<_> = fixer_names
            .iter()
            .filter_map(|name| {
                let fixer = self.get_by_php_name(name).or_else(|| self.get(name));
                if fixer.is_none() {
                    tracing::warn!(fixer = *name, "unknown fixer ignored");
                }
                fixer
            })
            .collect();

        // Sort by priority (higher priority runs first)
        fixers_to_run.sort_by(|a, b| b.priority().cmp(&a.priority()));

        let mut tokens = tokenize(source);
        let mut changes = 0;

        for fixer in fixers_to_run {
            if !fixer.is_candidate(&tokens, config) {
                tracing::debug!(fixer = fixer.name(), "not a candidate, skipped");
                continue;
            }

            let count = fixer.fix(&mut tokens, config)?;
            tracing::debug!(fixer = fixer.name(), changes = count, "fixer applied");
            changes += count;
        }

        if changes == 0 {
            return Ok((source.to_string(), 0));
        }

        Ok((tokens.render(), changes))
    }

    /// Check source with all non-deprecated fixers
    pub fn check_all(&self, source: &str, config: &FixerConfig) -> Result<(String, usize), FixerError> {
        let names: Vec<&str> = self
            .fixers
            .iter()
            .filter(|f| !f.is_deprecated())
            .map(|f| f.php_cs_fixer_name())
            .collect();
        self.check(source, &names, config)
    }

    /// Check source with a preset
    pub fn check_preset(
        &self,
        source: &str,
        preset: &str,
        config: &FixerConfig,
    ) -> Result<(String, usize), FixerError> {
        let names = self.get_preset_fixers(preset);
        self.check(source, &names, config)
    }

    /// Number of registered fixers
    pub fn len(&self) -> usize {
        self.fixers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.fixers.is_empty()
    }
}

impl Default for FixerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_fixers() {
        let registry = FixerRegistry::new();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_get_by_name() {
        let registry = FixerRegistry::new();

        assert!(registry.get("echo_tag_syntax").is_some());
        assert!(registry.get_by_php_name("no_short_echo_tag").is_some());
        assert!(registry.get("array_syntax").is_none());
    }

    #[test]
    fn test_priority_order() {
        let registry = FixerRegistry::new();
        let fixers = registry.all();

        for window in fixers.windows(2) {
            assert!(
                window[0].priority() >= window[1].priority(),
                "{} (priority {}) should come before {} (priority {})",
                window[0].name(),
                window[0].priority(),
                window[1].name(),
                window[1].priority()
            );
        }
    }

    #[test]
    fn test_check_simple() {
        let registry = FixerRegistry::new();
        let (fixed, changes) = registry
            .check("<?php echo $a; ?>", &["echo_tag_syntax"], &FixerConfig::default())
            .unwrap();

        assert_eq!(fixed, "<?= $a; ?>");
        assert_eq!(changes, 1);
    }

    #[test]
    fn test_check_no_changes_returns_source() {
        let registry = FixerRegistry::new();
        let source = "<?php $a = 1;\n";
        let (fixed, changes) = registry
            .check(source, &["echo_tag_syntax"], &FixerConfig::default())
            .unwrap();

        assert_eq!(fixed, source);
        assert_eq!(changes, 0);
    }

    #[test]
    fn test_check_unknown_fixer_ignored() {
        let registry = FixerRegistry::new();
        let (fixed, changes) = registry
            .check("<?php echo 1;", &["no_such_fixer"], &FixerConfig::default())
            .unwrap();

        assert_eq!(fixed, "<?php echo 1;");
        assert_eq!(changes, 0);
    }

    #[test]
    fn test_check_propagates_option_errors() {
        let registry = FixerRegistry::new();
        let config = FixerConfig::default().with_str("direction", "up");
        let result = registry.check("<?= 1;", &["echo_tag_syntax"], &config);

        assert!(matches!(result, Err(FixerError::InvalidOptionValue { .. })));
    }

    #[test]
    fn test_check_all_skips_deprecated() {
        let registry = FixerRegistry::new();
        let (fixed, _) = registry
            .check_all("<?php echo 1; ?>", &FixerConfig::default())
            .unwrap();

        // no_short_echo_tag would have expanded the tag again
        assert_eq!(fixed, "<?= 1; ?>");
    }

    #[test]
    fn test_check_preset() {
        let registry = FixerRegistry::new();
        assert_eq!(registry.get_preset_fixers("symfony"), vec!["echo_tag_syntax"]);

        let (fixed, _) = registry
            .check_preset("<?php print 1; ?>", "@Symfony", &FixerConfig::default())
            .unwrap();
        assert_eq!(fixed, "<?= 1; ?>");

        let (fixed, changes) = registry
            .check_preset("<?php print 1; ?>", "psr12", &FixerConfig::default())
            .unwrap();
        assert_eq!(fixed, "<?php print 1; ?>");
        assert_eq!(changes, 0);
    }

    #[test]
    fn test_list_fixers() {
        let registry = FixerRegistry::new();
        let list = registry.list();

        for info in &list {
            assert!(!info.name.is_empty());
            assert!(!info.php_cs_fixer_name.is_empty());
            assert!(!info.description.is_empty());
        }

        let legacy = list.iter().find(|i| i.name == "no_short_echo_tag").unwrap();
        assert!(legacy.is_deprecated);
        assert_eq!(legacy.successors, vec!["echo_tag_syntax"]);
    }
}
