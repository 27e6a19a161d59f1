//! incant parser: converts a token stream into an ordered list of
//! command-expression nodes.

mod parse_command;
mod parse_expr;
mod parser;

pub use parser::Parser;

use incant_lexer::Lexer;
use incant_types::ast::Node;
use incant_types::{SourceFile, SyntaxError};

/// Parse a script into its ordered command list.
///
/// Fails fast: the first structural error aborts with a positioned
/// [`SyntaxError`] and no partial node list is produced.
pub fn parse(source: &str) -> Result<Vec<Node>, SyntaxError> {
    let sf = SourceFile::new("script", source);
    let tokens = Lexer::new(&sf).lex()?;
    Parser::new(tokens).parse()
}
