//! Command-line parsing: `[module:]name arg arg ... --opt value ...`

use incant_lexer::token::TokenKind;
use incant_types::ast::{CommandExpression, CommandOpt, Node, NodeKind};
use incant_types::SyntaxError;

use crate::parser::Parser;

impl Parser {
    /// Parse one command line up to (but not including) its terminating
    /// newline.
    pub(crate) fn parse_command(&mut self) -> Result<Node, SyntaxError> {
        let (first, mut span) = self.expect_identifier("command name")?;

        // `module:name` — a single qualifier hop, `:` between two
        // identifiers.
        let (module, name) = if self.peek_kind() == &TokenKind::Colon {
            self.advance();
            let (name, name_span) = self.expect_identifier("command name after ':'")?;
            span = span.merge(name_span);
            (Some(first), name)
        } else {
            (None, first)
        };

        let mut args = Vec::new();
        let mut opts = Vec::new();

        loop {
            match self.peek_kind() {
                TokenKind::Newline | TokenKind::Eof => break,
                TokenKind::OptName(_) => {
                    let opt_token = self.advance();
                    let opt_name = match opt_token.kind {
                        TokenKind::OptName(name) => name,
                        _ => unreachable!("matched OptName above"),
                    };
                    let value = self.parse_expression()?;
                    let opt_span = opt_token.span.merge(value.span);
                    span = span.merge(opt_span);
                    opts.push(CommandOpt {
                        name: opt_name,
                        value,
                        span: opt_span,
                    });
                }
                _ => {
                    let arg = self.parse_expression()?;
                    span = span.merge(arg.span);
                    args.push(arg);
                }
            }
        }

        Ok(Node::new(
            NodeKind::CommandExpression(CommandExpression {
                module,
                name,
                args,
                opts,
            }),
            span,
        ))
    }
}
