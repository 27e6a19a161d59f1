//! Core parser infrastructure: token cursor and expect helpers.
//!
//! Parsing fails fast — every helper returns `Result` and the first
//! structural error aborts the whole parse with a positioned
//! [`SyntaxError`]. Parsing has no side effects and never consults
//! binding state.

use incant_lexer::token::{Token, TokenKind};
use incant_types::ast::Node;
use incant_types::{Position, Span, SyntaxError};

/// The incant parser.
///
/// Consumes a token stream produced by the lexer and builds the ordered
/// list of command-expression nodes.
pub struct Parser {
    /// The token stream (always ends with `Eof`).
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Current expression nesting depth (arrays, helper args, calls).
    pub(crate) expr_depth: u32,
}

impl Parser {
    /// Wrap a token stream for parsing.
    ///
    /// The lexer always terminates its output with `Eof`; a stream
    /// built by hand may not, so a missing terminator is appended here.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
            let at = tokens
                .last()
                .map(|t| t.span.end)
                .unwrap_or_else(|| Position::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, Span::new(at, at)));
        }
        Self {
            tokens,
            pos: 0,
            expr_depth: 0,
        }
    }

    // ── Token cursor ──────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        // `new` guarantees a trailing Eof, so the stream is non-empty.
        self.tokens
            .get(self.pos)
            .unwrap_or(&self.tokens[self.tokens.len() - 1])
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Look ahead by `n` tokens from the current position.
    pub(crate) fn look_ahead(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    pub(crate) fn current_position(&self) -> Position {
        self.peek().span.start
    }

    /// If the current token matches exactly, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip all consecutive newline tokens.
    pub(crate) fn skip_newlines(&mut self) {
        while self.peek_kind() == &TokenKind::Newline {
            self.advance();
        }
    }

    // ── Expect helpers ────────────────────────────────────────────────

    /// Expect a specific token kind, failing with a positioned error.
    pub(crate) fn expect(&mut self, expected: &TokenKind) -> Result<Token, SyntaxError> {
        if self.peek_kind() == expected {
            Ok(self.advance())
        } else {
            Err(self.error(format!(
                "expected '{expected}', got '{}'",
                self.peek_kind()
            )))
        }
    }

    /// Expect an identifier token, returning its text and span.
    pub(crate) fn expect_identifier(&mut self, what: &str) -> Result<(String, Span), SyntaxError> {
        match self.peek_kind().clone() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            other => Err(self.error(format!("expected {what}, got '{other}'"))),
        }
    }

    /// Report an error at the current token position.
    pub(crate) fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.current_position(), message)
    }

    // ── Public API ────────────────────────────────────────────────────

    /// Parse the token stream into the script's command list.
    pub fn parse(mut self) -> Result<Vec<Node>, SyntaxError> {
        let mut commands = Vec::new();
        loop {
            self.skip_newlines();
            if self.at_end() {
                break;
            }
            commands.push(self.parse_command()?);
        }
        Ok(commands)
    }
}
