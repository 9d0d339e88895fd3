//! Deprecated `no_short_echo_tag` fixer
//!
//! Kept for configurations written before `echo_tag_syntax` existed. It
//! forwards to `EchoTagSyntaxFixer` with the long direction forced.

use phptag_core::{TokenKind, TokenStream};

use crate::config::{self, LongFunction, RewriteConfiguration, OPTION_LONG_FUNCTION};
use crate::fixers::{CodeSample, ConfigValue, Fixer, FixerConfig, FixerError, FixerOption};

use super::EchoTagSyntaxFixer;

/// Replaces `<?=` with `<?php echo`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShortEchoTagFixer {
    proxy: EchoTagSyntaxFixer,
}

impl NoShortEchoTagFixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `long_function` is read; other keys belong to other rules
    fn resolve(&self, fixer_config: &FixerConfig) -> Result<RewriteConfiguration, FixerError> {
        let function = match fixer_config.options.get(OPTION_LONG_FUNCTION) {
            Some(value) => {
                if let Some(definition) = config::option_definition(OPTION_LONG_FUNCTION) {
                    definition.validate(value)?;
                }
                match value {
                    ConfigValue::String(name) => LongFunction::from_name(name).unwrap_or_default(),
                    _ => LongFunction::default(),
                }
            }
            None => LongFunction::default(),
        };

        Ok(RewriteConfiguration::long(function))
    }
}

impl Fixer for NoShortEchoTagFixer {
    fn name(&self) -> &'static str {
        "no_short_echo_tag"
    }

    fn php_cs_fixer_name(&self) -> &'static str {
        "no_short_echo_tag"
    }

    fn description(&self) -> &'static str {
        "Replace short-echo `<?=` with long format `<?php echo` syntax"
    }

    fn priority(&self) -> i32 {
        self.proxy.priority()
    }

    fn is_deprecated(&self) -> bool {
        true
    }

    fn successors(&self) -> Vec<&'static str> {
        vec![self.proxy.name()]
    }

    fn options(&self) -> Vec<FixerOption> {
        config::option_definition(OPTION_LONG_FUNCTION)
            .into_iter()
            .collect()
    }

    fn samples(&self) -> Vec<CodeSample> {
        vec![CodeSample {
            source: "<?= \"foo\";\n",
            options: vec![],
        }]
    }

    fn is_candidate(&self, tokens: &TokenStream, _config: &FixerConfig) -> bool {
        tokens.contains_kind(TokenKind::OpenTagWithEcho)
    }

    fn fix(&self, tokens: &mut TokenStream, config: &FixerConfig) -> Result<usize, FixerError> {
        let rewrite = self.resolve(config)?;
        self.proxy.rewrite(tokens, &rewrite)
    }
}
