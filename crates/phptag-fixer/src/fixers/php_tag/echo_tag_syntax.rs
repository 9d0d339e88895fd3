//! Echo tag syntax fixer
//!
//! Converts `<?php echo` / `<?php print` to `<?=`, or `<?=` to the long form.

use phptag_core::{Token, TokenKind, TokenStream};

use crate::config::{self, Direction, LongFunction, RewriteConfiguration};
use crate::fixers::{CodeSample, ConfigValue, Fixer, FixerConfig, FixerError, FixerOption};

const SAMPLE: &str = "<?=1?>\n<?php print '2' . '3'; ?>\n<?php print '2' . '3'; someFunction(); ?>\n";

/// Normalizes echo tag syntax in either direction
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoTagSyntaxFixer;

impl EchoTagSyntaxFixer {
    /// Rewrite `tokens` with an already resolved configuration
    pub fn rewrite(
        &self,
        tokens: &mut TokenStream,
        config: &RewriteConfiguration,
    ) -> Result<usize, FixerError> {
        match config.direction {
            Direction::Short { always_short } => long_to_short(tokens, always_short),
            Direction::Long { long_function } => short_to_long(tokens, long_function),
        }
    }
}

impl Fixer for EchoTagSyntaxFixer {
    fn name(&self) -> &'static str {
        "echo_tag_syntax"
    }

    fn php_cs_fixer_name(&self) -> &'static str {
        "echo_tag_syntax"
    }

    fn description(&self) -> &'static str {
        "Replace short-echo `<?=` with long format `<?php echo`/`<?php print` syntax, or vice-versa"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn options(&self) -> Vec<FixerOption> {
        config::option_definitions()
    }

    fn samples(&self) -> Vec<CodeSample> {
        let s = |value: &str| ConfigValue::String(value.to_string());
        vec![
            CodeSample { source: SAMPLE, options: vec![] },
            CodeSample {
                source: SAMPLE,
                options: vec![("direction", s("short"))],
            },
            CodeSample {
                source: SAMPLE,
                options: vec![("direction", s("long")), ("long_function", s("echo"))],
            },
            CodeSample {
                source: SAMPLE,
                options: vec![("direction", s("long")), ("long_function", s("print"))],
            },
            CodeSample {
                source: SAMPLE,
                options: vec![
                    ("direction", s("short")),
                    ("always_short", ConfigValue::Bool(true)),
                ],
            },
        ]
    }

    fn is_candidate(&self, tokens: &TokenStream, config: &FixerConfig) -> bool {
        // Let `fix` report configuration errors
        let Ok(rewrite) = RewriteConfiguration::from_options(&config.options) else {
            return true;
        };

        match rewrite.direction {
            Direction::Short { .. } => {
                tokens.find_sequence(&[TokenKind::OpenTag, TokenKind::Echo], 0).is_some()
                    || tokens.find_sequence(&[TokenKind::OpenTag, TokenKind::Print], 0).is_some()
            }
            Direction::Long { .. } => tokens.contains_kind(TokenKind::OpenTagWithEcho),
        }
    }

    fn fix(&self, tokens: &mut TokenStream, config: &FixerConfig) -> Result<usize, FixerError> {
        let rewrite = RewriteConfiguration::from_options(&config.options)?;
        self.rewrite(tokens, &rewrite)
    }
}

/// Collapse `<?php echo` and `<?php print` into `<?=`
fn long_to_short(tokens: &mut TokenStream, always_short: bool) -> Result<usize, FixerError> {
    let mut offset = 0;
    let mut rewritten = 0;

    loop {
        let found_echo = tokens.find_sequence(&[TokenKind::OpenTag, TokenKind::Echo], offset);
        let found_print = tokens.find_sequence(&[TokenKind::OpenTag, TokenKind::Print], offset);

        let found = match (found_echo, found_print) {
            (None, None) => break,
            (Some(found), None) | (None, Some(found)) => found,
            (Some(echo), Some(print)) => {
                if echo.start < print.start {
                    echo
                } else {
                    print
                }
            }
        };

        // Always move past this open tag, even when it is kept
        offset = found.start + 1;

        if !always_short && is_complex_code(tokens, offset) {
            tracing::debug!(index = found.start, "keeping long echo tag before further statements");
            continue;
        }

        tokens.replace_range(found.start, found.end, vec![Token::open_tag_with_echo()])?;
        tracing::debug!(index = found.start, "collapsed long echo tag");
        rewritten += 1;
    }

    Ok(rewritten)
}

/// Expand every `<?=` into `<?php echo` or `<?php print`
///
/// Scans backward so that growing the stream never shifts a tag that is
/// still to be visited.
fn short_to_long(tokens: &mut TokenStream, function: LongFunction) -> Result<usize, FixerError> {
    let Some(mut offset) = tokens.len().checked_sub(1) else {
        return Ok(0);
    };
    let mut rewritten = 0;

    while let Some(found) = tokens.find_prev_of_kind(TokenKind::OpenTagWithEcho, offset) {
        let mut replacement = vec![Token::open_tag(), function.token()];
        if tokens.get(found + 1).is_some_and(|next| !next.is_whitespace()) {
            replacement.push(Token::whitespace(" "));
        }

        tokens.replace_range(found, found, replacement)?;
        tracing::debug!(index = found, function = function.as_str(), "expanded short echo tag");
        rewritten += 1;

        match found.checked_sub(1) {
            Some(prev) => offset = prev,
            None => break,
        }
    }

    Ok(rewritten)
}

/// Scan state of the complexity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Scanning,
    SeenTerminator,
}

/// Whether the code from `index` up to the closing tag does more than a
/// single echo statement
///
/// A `;` followed by anything but whitespace before `?>` counts as complex.
/// Running off the end of the stream does not.
fn is_complex_code(tokens: &TokenStream, index: usize) -> bool {
    let mut state = Scan::Scanning;

    for token in tokens.iter().skip(index) {
        if token.is_kind(TokenKind::CloseTag) {
            return false;
        }

        if token.is_semicolon() {
            state = Scan::SeenTerminator;
        } else if state == Scan::SeenTerminator && !token.is_whitespace() {
            return true;
        }
    }

    false
}
