//! phptag-fixer: PHP-CS-Fixer compatible echo tag rules
//!
//! This crate provides the `echo_tag_syntax` fixer, which converts between
//! the short echo tag (`<?=`) and the long form (`<?php echo` /
//! `<?php print`), and its deprecated predecessor `no_short_echo_tag`.
//!
//! # Features
//!
//! - Token-level rewriting that preserves all other source text
//! - Complexity check that keeps `<?php echo` when more statements follow
//! - Current, php-cs-fixer and legacy option shapes
//! - Rule options read from `.php-cs-fixer.php` configuration files
//!
//! # Example
//!
//! ```
//! use phptag_fixer::{FixerConfig, FixerRegistry};
//!
//! let registry = FixerRegistry::new();
//! let config = FixerConfig::default().with_str("direction", "long");
//! let (fixed, changes) = registry
//!     .check("<?= $name ?>", &["echo_tag_syntax"], &config)
//!     .unwrap();
//! assert_eq!(fixed, "<?php echo $name ?>");
//! assert_eq!(changes, 1);
//! ```

pub mod config;
pub mod fixers;

pub use config::{Direction, LongFunction, PhpCsFixerConfig, RewriteConfiguration};
pub use fixers::{
    CodeSample, ConfigValue, EchoTagSyntaxFixer, Fixer, FixerConfig, FixerError, FixerOption,
    FixerRegistry, NoShortEchoTagFixer, OptionType,
};
