//! Expression parsing: literals, arrays, variables, helpers, chained
//! call expressions.

use incant_lexer::token::TokenKind;
use incant_types::ast::{Node, NodeKind};
use incant_types::SyntaxError;

/// Maximum expression nesting depth (arrays, helper args, call args).
const MAX_EXPR_DEPTH: u32 = 32;

use crate::parser::Parser;

impl Parser {
    /// Parse an expression: a primary followed by any number of
    /// `::method(args)` postfix chains.
    pub(crate) fn parse_expression(&mut self) -> Result<Node, SyntaxError> {
        self.expr_depth += 1;
        if self.expr_depth > MAX_EXPR_DEPTH {
            self.expr_depth -= 1;
            return Err(self.error(format!(
                "maximum expression nesting depth is {MAX_EXPR_DEPTH}"
            )));
        }
        let result = self.parse_postfix();
        self.expr_depth -= 1;
        result
    }

    /// `PostfixExpr = PrimaryExpr { "::" Identifier "(" ArgList ")" }`
    fn parse_postfix(&mut self) -> Result<Node, SyntaxError> {
        let mut expr = self.parse_primary()?;
        while self.peek_kind() == &TokenKind::ColonColon {
            self.advance();
            let (method, _) = self.expect_identifier("method name after '::'")?;
            self.expect(&TokenKind::LParen)?;
            let args = self.parse_arg_list(&TokenKind::RParen)?;
            let close = self.expect(&TokenKind::RParen)?;
            let span = expr.span.merge(close.span);
            expr = Node::new(
                NodeKind::CallExpression {
                    target: Box::new(expr),
                    method,
                    args,
                },
                span,
            );
        }
        Ok(expr)
    }

    /// One literal, identifier, array, variable, or helper invocation.
    fn parse_primary(&mut self) -> Result<Node, SyntaxError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number {
                value,
                power,
                time_unit,
            } => {
                self.advance();
                Ok(Node::new(
                    NodeKind::NumberLiteral {
                        value,
                        power,
                        time_unit,
                    },
                    token.span,
                ))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Ok(Node::new(NodeKind::StringLiteral(s), token.span))
            }
            TokenKind::True => {
                self.advance();
                Ok(Node::new(NodeKind::BoolLiteral(true), token.span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Node::new(NodeKind::BoolLiteral(false), token.span))
            }
            TokenKind::VarIdent(name) => {
                self.advance();
                Ok(Node::new(NodeKind::VariableIdentifier(name), token.span))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Node::new(NodeKind::ProbableIdentifier(name), token.span))
            }
            TokenKind::HelperName(name) => {
                self.advance();
                // Parens are mandatory even for zero-argument helpers.
                self.expect(&TokenKind::LParen)?;
                let args = self.parse_arg_list(&TokenKind::RParen)?;
                let close = self.expect(&TokenKind::RParen)?;
                Ok(Node::new(
                    NodeKind::HelperFunctionExpression { name, args },
                    token.span.merge(close.span),
                ))
            }
            TokenKind::LBracket => {
                self.advance();
                let elements = self.parse_arg_list(&TokenKind::RBracket)?;
                let close = self.expect(&TokenKind::RBracket)?;
                Ok(Node::new(
                    NodeKind::ArrayExpression(elements),
                    token.span.merge(close.span),
                ))
            }
            other => Err(self.error(format!("expected an expression, got '{other}'"))),
        }
    }

    /// Comma-separated expressions up to (but not consuming) `closing`.
    ///
    /// Arrays and argument lists may span multiple lines, so newlines
    /// around elements are skipped here.
    fn parse_arg_list(&mut self, closing: &TokenKind) -> Result<Vec<Node>, SyntaxError> {
        let mut items = Vec::new();
        self.skip_newlines();
        if self.peek_kind() == closing {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression()?);
            self.skip_newlines();
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }
        Ok(items)
    }
}
