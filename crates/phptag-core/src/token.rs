//! Token model shared by the lexer, the stream and the fixers

use std::fmt;

/// Kind of a lexed token
///
/// Only the kinds the tag rewriters need to tell apart are distinguished;
/// everything else inside or outside PHP code is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `<?php` plus one trailing whitespace character
    OpenTag,
    /// `<?=`
    OpenTagWithEcho,
    /// `?>` plus an optional trailing newline
    CloseTag,
    /// The `echo` language construct
    Echo,
    /// The `print` language construct
    Print,
    /// A run of whitespace inside PHP code
    Whitespace,
    /// Inline HTML, literals, identifiers, comments and punctuation
    Other,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::OpenTag => "T_OPEN_TAG",
            TokenKind::OpenTagWithEcho => "T_OPEN_TAG_WITH_ECHO",
            TokenKind::CloseTag => "T_CLOSE_TAG",
            TokenKind::Echo => "T_ECHO",
            TokenKind::Print => "T_PRINT",
            TokenKind::Whitespace => "T_WHITESPACE",
            TokenKind::Other => "T_OTHER",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single token: its kind and the exact source text it covers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    content: String,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn open_tag() -> Self {
        Self::new(TokenKind::OpenTag, "<?php ")
    }

    pub fn open_tag_with_echo() -> Self {
        Self::new(TokenKind::OpenTagWithEcho, "<?=")
    }

    pub fn whitespace(content: impl Into<String>) -> Self {
        Self::new(TokenKind::Whitespace, content)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether the content is non-empty and made only of whitespace
    ///
    /// Open tags carry their trailing whitespace but are never whitespace
    /// themselves.
    pub fn is_whitespace(&self) -> bool {
        match self.kind {
            TokenKind::Whitespace => true,
            TokenKind::Other => {
                !self.content.is_empty() && self.content.chars().all(char::is_whitespace)
            }
            _ => false,
        }
    }

    /// Whether this is the `;` statement terminator
    pub fn is_semicolon(&self) -> bool {
        self.kind == TokenKind::Other && self.content == ";"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Token::new(TokenKind::Echo, "echo"), Token::new(TokenKind::Echo, "echo"));
        assert_ne!(Token::new(TokenKind::Echo, "echo"), Token::new(TokenKind::Echo, "ECHO"));
        assert_ne!(Token::new(TokenKind::Echo, "print"), Token::new(TokenKind::Print, "print"));
    }

    #[test]
    fn test_is_whitespace() {
        assert!(Token::whitespace(" \n\t").is_whitespace());
        assert!(!Token::open_tag().is_whitespace());
        assert!(!Token::new(TokenKind::Other, "").is_whitespace());
        assert!(!Token::new(TokenKind::Other, "foo").is_whitespace());
    }

    #[test]
    fn test_is_semicolon() {
        assert!(Token::new(TokenKind::Other, ";").is_semicolon());
        assert!(!Token::new(TokenKind::Other, "';'").is_semicolon());
    }
}
