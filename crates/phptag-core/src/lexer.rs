//! Tag-level PHP lexer
//!
//! Splits source text into the tokens the tag rewriters care about. It does
//! not parse PHP: literals, comments and operators only need to be skipped
//! correctly so that `echo`, `print`, `;` and `?>` inside them are never
//! mistaken for real tokens.
//!
//! The lexer never fails. Unterminated strings and comments run to the end
//! of input, and concatenating every token's content always reproduces the
//! input exactly.

use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Lexer state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Outside PHP code, in inline HTML passthrough
    Initial,
    /// Inside PHP code
    InScripting,
}

/// Tokenize a complete source file
pub fn tokenize(source: &str) -> TokenStream {
    let tokens: TokenStream = Lexer::new(source).collect();
    tracing::trace!(tokens = tokens.len(), bytes = source.len(), "tokenized source");
    tokens
}

/// PHP tag-level lexer
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    state: State,
    /// The next identifier is a member, method or constant name, never a keyword
    name_expected: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            state: State::Initial,
            name_expected: false,
        }
    }

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn bytes(&self) -> &'src [u8] {
        self.rest().as_bytes()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Emit a token covering `len` bytes from the current position
    fn emit(&mut self, kind: TokenKind, len: usize) -> Token {
        let end = (self.pos + len).min(self.source.len());
        let token = Token::new(kind, &self.source[self.pos..end]);
        self.pos = end;
        token
    }

    fn scan_initial(&mut self) -> Option<Token> {
        if self.pos >= self.source.len() {
            return None;
        }

        if let Some(tag_len) = open_tag_len(self.rest()) {
            self.state = State::InScripting;
            self.name_expected = false;
            return Some(self.emit(TokenKind::OpenTag, tag_len));
        }

        if self.rest().starts_with("<?=") {
            self.state = State::InScripting;
            self.name_expected = false;
            return Some(self.emit(TokenKind::OpenTagWithEcho, 3));
        }

        // Inline HTML up to the next opening tag
        let rest = self.rest();
        let html_len = rest
            .match_indices("<?")
            .map(|(idx, _)| idx)
            .find(|&idx| idx > 0 && is_opening_tag(&rest[idx..]))
            .unwrap_or(rest.len());

        Some(self.emit(TokenKind::Other, html_len))
    }

    fn scan_scripting(&mut self) -> Option<Token> {
        let c = self.peek()?;
        let bytes = self.bytes();

        if c.is_ascii_whitespace() {
            let len = bytes
                .iter()
                .position(|b| !b.is_ascii_whitespace())
                .unwrap_or(bytes.len());
            return Some(self.emit(TokenKind::Whitespace, len));
        }

        if bytes.starts_with(b"?>") {
            self.state = State::Initial;
            let len = if bytes[2..].starts_with(b"\r\n") {
                4
            } else if bytes[2..].starts_with(b"\n") {
                3
            } else {
                2
            };
            return Some(self.emit(TokenKind::CloseTag, len));
        }

        if bytes.starts_with(b"//") || (c == '#' && !bytes.starts_with(b"#[")) {
            let len = line_comment_len(self.rest());
            return Some(self.emit(TokenKind::Other, len));
        }

        if bytes.starts_with(b"/*") {
            let len = self.rest()[2..]
                .find("*/")
                .map(|idx| idx + 4)
                .unwrap_or(bytes.len());
            return Some(self.emit(TokenKind::Other, len));
        }

        if bytes.starts_with(b"<<<") {
            if let Some(len) = heredoc_len(self.rest()) {
                self.name_expected = false;
                return Some(self.emit(TokenKind::Other, len));
            }
        }

        if matches!(c, '\'' | '"' | '`') {
            let len = quoted_len(self.rest(), c as u8);
            self.name_expected = false;
            return Some(self.emit(TokenKind::Other, len));
        }

        if bytes.starts_with(b"->") || bytes.starts_with(b"::") {
            self.name_expected = true;
            return Some(self.emit(TokenKind::Other, 2));
        }

        if bytes.starts_with(b"?->") {
            self.name_expected = true;
            return Some(self.emit(TokenKind::Other, 3));
        }

        if is_ident_start(c) {
            let len = ident_len(self.rest());
            let word = &self.rest()[..len];
            let kind = if self.name_expected {
                TokenKind::Other
            } else if word.eq_ignore_ascii_case("echo") {
                TokenKind::Echo
            } else if word.eq_ignore_ascii_case("print") {
                TokenKind::Print
            } else {
                TokenKind::Other
            };
            self.name_expected =
                word.eq_ignore_ascii_case("function") || word.eq_ignore_ascii_case("const");
            return Some(self.emit(kind, len));
        }

        if c == '$' && self.rest()[1..].chars().next().is_some_and(is_ident_start) {
            let len = 1 + ident_len(&self.rest()[1..]);
            self.name_expected = false;
            return Some(self.emit(TokenKind::Other, len));
        }

        if c.is_ascii_digit() {
            let len = bytes
                .iter()
                .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_' || b == b'.'))
                .unwrap_or(bytes.len());
            self.name_expected = false;
            return Some(self.emit(TokenKind::Other, len));
        }

        self.name_expected = false;
        Some(self.emit(TokenKind::Other, c.len_utf8()))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.state {
            State::Initial => self.scan_initial(),
            State::InScripting => self.scan_scripting(),
        }
    }
}

/// Length of a `<?php` open tag at the start of `input`, including its
/// single trailing whitespace character
fn open_tag_len(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.len() < 5 || !bytes[..5].eq_ignore_ascii_case(b"<?php") {
        return None;
    }

    match &bytes[5..] {
        [] => Some(5),
        [b'\r', b'\n', ..] => Some(7),
        [b, ..] if b.is_ascii_whitespace() => Some(6),
        _ => None,
    }
}

fn is_opening_tag(input: &str) -> bool {
    input.starts_with("<?=") || open_tag_len(input).is_some()
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn ident_len(input: &str) -> usize {
    input
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()))
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

/// A `//` or `#` comment ends before the newline or before `?>`
fn line_comment_len(input: &str) -> usize {
    let newline = input.find(['\n', '\r']).unwrap_or(input.len());
    let close = input.find("?>").unwrap_or(input.len());
    newline.min(close)
}

/// Length of a quoted literal including both quotes and backslash escapes
fn quoted_len(input: &str, quote: u8) -> usize {
    let bytes = input.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Length of a heredoc or nowdoc literal, or `None` if `<<<` does not start one
fn heredoc_len(input: &str) -> Option<usize> {
    let header = &input[3..];
    let trimmed = header.trim_start_matches([' ', '\t']);
    let mut offset = 3 + (header.len() - trimmed.len());

    let quote = trimmed.chars().next().filter(|c| *c == '\'' || *c == '"');
    let name_start = offset + quote.map_or(0, |_| 1);
    let name_len = ident_len(&input[name_start..]);
    if name_len == 0 || !input[name_start..].starts_with(|c: char| is_ident_start(c)) {
        return None;
    }
    let name = &input[name_start..name_start + name_len];
    offset = name_start + name_len;

    if let Some(q) = quote {
        if !input[offset..].starts_with(q) {
            return None;
        }
        offset += 1;
    }

    if !input[offset..].starts_with(['\n', '\r']) {
        return None;
    }

    let body = &input[offset..];
    let mut line_start = 0;
    while let Some(newline) = body[line_start..].find('\n') {
        line_start += newline + 1;
        let line = &body[line_start..];
        let indented = line.trim_start_matches([' ', '\t']);
        if indented.starts_with(name) {
            let after = &indented[name.len()..];
            if !after.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()) {
                let end = offset + line_start + (line.len() - indented.len()) + name.len();
                return Some(end);
            }
        }
    }

    Some(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .iter()
            .map(|t| (t.kind(), t.content().to_string()))
            .collect()
    }

    fn kind_list(source: &str) -> Vec<TokenKind> {
        tokenize(source).iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn test_open_tag_carries_one_whitespace() {
        let tokens = kinds("<?php  echo 1;");
        assert_eq!(tokens[0], (TokenKind::OpenTag, "<?php ".to_string()));
        assert_eq!(tokens[1], (TokenKind::Whitespace, " ".to_string()));
        assert_eq!(tokens[2], (TokenKind::Echo, "echo".to_string()));
    }

    #[test]
    fn test_open_tag_crlf() {
        let tokens = kinds("<?php\r\necho 1;");
        assert_eq!(tokens[0], (TokenKind::OpenTag, "<?php\r\n".to_string()));
        assert_eq!(tokens[1].0, TokenKind::Echo);
    }

    #[test]
    fn test_open_tag_at_eof() {
        assert_eq!(kinds("<?php"), vec![(TokenKind::OpenTag, "<?php".to_string())]);
    }

    #[test]
    fn test_phpinfo_is_not_an_open_tag() {
        assert_eq!(kind_list("<?phpinfo"), vec![TokenKind::Other]);
    }

    #[test]
    fn test_short_echo_tag() {
        assert_eq!(
            kind_list("<?=foo();"),
            vec![
                TokenKind::OpenTagWithEcho,
                TokenKind::Other,
                TokenKind::Other,
                TokenKind::Other,
                TokenKind::Other,
            ]
        );
    }

    #[test]
    fn test_inline_html_and_close_tag() {
        let tokens = kinds("PLAIN <?php echo 'a'; ?>\nTEXT");
        assert_eq!(tokens[0], (TokenKind::Other, "PLAIN ".to_string()));
        assert_eq!(tokens[1].0, TokenKind::OpenTag);
        assert!(tokens.contains(&(TokenKind::CloseTag, "?>\n".to_string())));
        assert_eq!(tokens.last().unwrap(), &(TokenKind::Other, "TEXT".to_string()));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let list = kind_list("<?php ECHO 1; Print 2;");
        assert!(list.contains(&TokenKind::Echo));
        assert!(list.contains(&TokenKind::Print));
    }

    #[test]
    fn test_keywords_inside_literals_and_comments() {
        let list = kind_list("<?php $a = 'echo'; // print\n/* echo */ \"print\";");
        assert!(!list.contains(&TokenKind::Echo));
        assert!(!list.contains(&TokenKind::Print));
    }

    #[test]
    fn test_member_names_are_not_keywords() {
        let list = kind_list("<?php $obj->print(); Foo::echo(); $o?->print; function print() {}");
        assert!(!list.contains(&TokenKind::Echo));
        assert!(!list.contains(&TokenKind::Print));
    }

    #[test]
    fn test_line_comment_stops_at_close_tag() {
        let list = kind_list("<?php // note ?>html");
        assert_eq!(list.last(), Some(&TokenKind::Other));
        assert!(list.contains(&TokenKind::CloseTag));
    }

    #[test]
    fn test_heredoc() {
        let source = "<?php echo <<<EOT\necho ?> print\nEOT;\n";
        let tokens = kinds(source);
        assert!(!tokens.iter().any(|(k, _)| *k == TokenKind::CloseTag));
        assert!(tokens.iter().any(|(_, c)| c.ends_with("EOT") && c.starts_with("<<<")));
        assert_eq!(tokens.iter().filter(|(k, _)| *k == TokenKind::Echo).count(), 1);
    }

    #[test]
    fn test_nowdoc() {
        let source = "<?php print <<<'TXT'\n  a;\n  TXT;";
        let tokens = kinds(source);
        assert!(tokens.iter().any(|(_, c)| c == "<<<'TXT'\n  a;\n  TXT"));
    }

    #[test]
    fn test_semicolon_token() {
        let stream = tokenize("<?php echo 1; foo();");
        assert_eq!(stream.iter().filter(|t| t.is_semicolon()).count(), 2);
    }

    #[test]
    fn test_round_trip_preserves_source() {
        let sources = [
            "",
            "plain html only",
            "<?php echo 'Foo'; someThingElse();",
            "<? not a tag <?= $a ?> <?php\n /* unterminated",
            "<?php $s = \"unterminated \\\" string",
            "<?php echo <<<EOT\nbody\nEOT;\n?>tail",
            "<?php $x = 1.5e3 <=> $y; # comment\r\n?>\r\n<p>ü</p>",
        ];
        for source in sources {
            assert_eq!(tokenize(source).render(), source);
        }
    }
}
