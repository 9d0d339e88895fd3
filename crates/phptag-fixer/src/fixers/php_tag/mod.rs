//! PHP open/close tag fixers

mod echo_tag_syntax;
mod no_short_echo_tag;

pub use echo_tag_syntax::EchoTagSyntaxFixer;
pub use no_short_echo_tag::NoShortEchoTagFixer;
