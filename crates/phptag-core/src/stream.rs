//! Indexed token sequence with search and range replacement

use std::fmt;
use std::ops::Index;

use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Errors that can occur when replacing a token range
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("Invalid token range {start}..={end}")]
    InvalidRange { start: usize, end: usize },

    #[error("Token range end {end} out of bounds for stream length {len}")]
    OutOfBounds { end: usize, len: usize },
}

/// A matched token subsequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Index of the first matched token
    pub start: usize,
    /// Index of the last matched token (inclusive)
    pub end: usize,
    /// Index of each token that matched a pattern element, in pattern order
    pub indices: Vec<usize>,
}

/// An ordered, exclusively owned sequence of tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Whether any token of the given kind is present
    pub fn contains_kind(&self, kind: TokenKind) -> bool {
        self.tokens.iter().any(|t| t.is_kind(kind))
    }

    /// Find the first occurrence of `patterns` starting at or after `from`
    ///
    /// The first pattern element must match the token at the start index.
    /// Whitespace tokens between later elements are skipped, so
    /// `[OpenTag, Echo]` also matches an open tag followed by extra
    /// whitespace and then `echo`.
    pub fn find_sequence(&self, patterns: &[TokenKind], from: usize) -> Option<MatchResult> {
        let (first, rest) = patterns.split_first()?;

        'candidates: for start in from..self.tokens.len() {
            if !self.tokens[start].is_kind(*first) {
                continue;
            }

            let mut indices = Vec::with_capacity(patterns.len());
            indices.push(start);
            let mut cursor = start;

            for kind in rest {
                match self.next_significant(cursor + 1) {
                    Some(next) if self.tokens[next].is_kind(*kind) => {
                        indices.push(next);
                        cursor = next;
                    }
                    _ => continue 'candidates,
                }
            }

            return Some(MatchResult {
                start,
                end: cursor,
                indices,
            });
        }

        None
    }

    /// Find the last token of `kind` at or before `from`
    ///
    /// `from` past the end of the stream is clamped to the last index.
    pub fn find_prev_of_kind(&self, kind: TokenKind, from: usize) -> Option<usize> {
        let last = self.tokens.len().checked_sub(1)?;
        (0..=from.min(last))
            .rev()
            .find(|&idx| self.tokens[idx].is_kind(kind))
    }

    /// Replace the inclusive range `start..=end` with `replacement`
    ///
    /// Every index after `end` shifts by the difference in length. The
    /// stream is left untouched when the range is invalid.
    pub fn replace_range(
        &mut self,
        start: usize,
        end: usize,
        replacement: Vec<Token>,
    ) -> Result<(), StreamError> {
        if start > end {
            return Err(StreamError::InvalidRange { start, end });
        }

        if end >= self.tokens.len() {
            return Err(StreamError::OutOfBounds {
                end,
                len: self.tokens.len(),
            });
        }

        self.tokens.splice(start..=end, replacement);
        Ok(())
    }

    /// Concatenate every token's content back into source text
    pub fn render(&self) -> String {
        let capacity = self.tokens.iter().map(|t| t.content().len()).sum();
        let mut out = String::with_capacity(capacity);
        for token in &self.tokens {
            out.push_str(token.content());
        }
        out
    }

    fn next_significant(&self, from: usize) -> Option<usize> {
        (from..self.tokens.len()).find(|&idx| !self.tokens[idx].is_whitespace())
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token.content())?;
        }
        Ok(())
    }
}
