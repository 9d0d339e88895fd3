//! phptag-core: Token model for PHP tag rewriting
//!
//! This crate provides:
//! - `Token` / `TokenKind`: a lexed unit of PHP source
//! - `TokenStream`: an indexed token sequence with pattern search and
//!   range replacement
//! - `tokenize()`: a tag-level lexer turning source text into a stream
//! - `TokenStream::render()`: the inverse, concatenating token contents

pub mod lexer;
mod stream;
mod token;

pub use lexer::{tokenize, Lexer};
pub use stream::{MatchResult, StreamError, TokenStream};
pub use token::{Token, TokenKind};
