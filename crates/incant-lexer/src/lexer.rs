//! Core incant lexer — converts script text to a token stream.
//!
//! One command per line, so newlines are tokens. `#` comments run to end
//! of line. Lexing fails fast: the first invalid character aborts with a
//! positioned [`SyntaxError`].

use incant_types::ast::TimeUnit;
use incant_types::{Position, SourceFile, Span, SyntaxError};

use crate::token::{Token, TokenKind};

/// The incant lexer.
pub struct Lexer<'src> {
    /// The full script text as bytes.
    source: &'src [u8],
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given script.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source: source_file.source.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the entire script into a token stream ending with `Eof`.
    pub fn lex(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    // ── Character-level helpers ───────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Decode the full UTF-8 character whose lead byte sits at
    /// `lead_pos`, returning it with the byte offset one past its end.
    ///
    /// The source comes from a `&str`, so the sequence is always valid.
    fn char_at(&self, lead_pos: usize) -> (char, usize) {
        let len = match self.source.get(lead_pos) {
            Some(0x00..=0x7f) | None => 1,
            Some(0xc0..=0xdf) => 2,
            Some(0xe0..=0xef) => 3,
            Some(_) => 4,
        };
        let end = (lead_pos + len).min(self.source.len());
        let ch = std::str::from_utf8(&self.source[lead_pos..end])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        (ch, end)
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    fn span_from(&self, start: Position) -> Span {
        let end = Position::new(self.line, self.col.saturating_sub(1).max(1));
        Span::new(start, end)
    }

    fn error(&self, position: Position, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(position, message)
    }

    /// Slice of the source consumed since `start_pos`.
    fn lexeme_since(&self, start_pos: usize) -> &str {
        std::str::from_utf8(&self.source[start_pos..self.pos]).unwrap_or("")
    }

    // ── Whitespace & comments ─────────────────────────────────────────

    /// Skip spaces and tabs (NOT newlines — those are tokens) and `#`
    /// comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r') => {
                    self.advance();
                }
                Some(b'#') => {
                    while let Some(ch) = self.peek() {
                        if ch == b'\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    // ── Scanning ──────────────────────────────────────────────────────

    fn scan_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace_and_comments();

        if self.at_end() {
            return Ok(Token::new(TokenKind::Eof, Span::new(self.position(), self.position())));
        }

        let start = self.position();
        let start_pos = self.pos;
        let ch = self.advance().ok_or_else(|| self.error(start, "unexpected end of script"))?;

        match ch {
            b'\n' => Ok(Token::new(TokenKind::Newline, self.span_from(start))),

            b'"' | b'\'' => self.scan_string(ch, start),

            b'0' if self.peek() == Some(b'x') => {
                // Hex literal — lexed as an identifier, the evaluator
                // decides whether it is an address or a byte payload.
                self.scan_identifier_tail();
                let text = self.lexeme_since(start_pos).to_string();
                Ok(Token::new(TokenKind::Ident(text), self.span_from(start)))
            }

            b'0'..=b'9' => self.scan_number(start, start_pos),

            b'-' => {
                if self.peek() == Some(b'-') {
                    self.advance();
                    let name_start = self.pos;
                    if !matches!(self.peek(), Some(b'a'..=b'z' | b'A'..=b'Z' | b'_')) {
                        return Err(self.error(start, "expected option name after '--'"));
                    }
                    self.scan_identifier_tail();
                    let name = self.lexeme_since(name_start).to_string();
                    Ok(Token::new(TokenKind::OptName(name), self.span_from(start)))
                } else if matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.scan_number(start, start_pos)
                } else {
                    Err(self.error(start, "unexpected character '-'"))
                }
            }

            b'$' => {
                let name_start = self.pos;
                if !matches!(self.peek(), Some(b'a'..=b'z' | b'A'..=b'Z' | b'_')) {
                    return Err(self.error(start, "expected variable name after '$'"));
                }
                self.scan_identifier_tail();
                let name = self.lexeme_since(name_start).to_string();
                Ok(Token::new(TokenKind::VarIdent(name), self.span_from(start)))
            }

            b'@' => {
                let name_start = self.pos;
                if !matches!(self.peek(), Some(b'a'..=b'z' | b'A'..=b'Z' | b'_')) {
                    return Err(self.error(start, "expected helper name after '@'"));
                }
                self.scan_identifier_tail();
                let name = self.lexeme_since(name_start).to_string();
                Ok(Token::new(TokenKind::HelperName(name), self.span_from(start)))
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.scan_identifier_tail();
                let text = self.lexeme_since(start_pos);
                let kind = match text {
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    _ => TokenKind::Ident(text.to_string()),
                };
                Ok(Token::new(kind, self.span_from(start)))
            }

            b'(' => Ok(Token::new(TokenKind::LParen, self.span_from(start))),
            b')' => Ok(Token::new(TokenKind::RParen, self.span_from(start))),
            b'[' => Ok(Token::new(TokenKind::LBracket, self.span_from(start))),
            b']' => Ok(Token::new(TokenKind::RBracket, self.span_from(start))),
            b',' => Ok(Token::new(TokenKind::Comma, self.span_from(start))),

            b':' => {
                if self.peek() == Some(b':') {
                    self.advance();
                    Ok(Token::new(TokenKind::ColonColon, self.span_from(start)))
                } else {
                    Ok(Token::new(TokenKind::Colon, self.span_from(start)))
                }
            }

            _ => {
                // Re-decode from the lead byte so a multi-byte character
                // renders whole in the diagnostic.
                let (ch, _) = self.char_at(start_pos);
                Err(self.error(start, format!("unexpected character '{ch}'")))
            }
        }
    }

    /// Consume the remainder of an identifier. Identifiers may contain
    /// `.` and `-` after the first character (`aragon:token-manager`,
    /// `mydao.open`).
    fn scan_identifier_tail(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'.' || ch == b'-' {
                self.advance();
            } else {
                break;
            }
        }
    }

    // ── Number literals ───────────────────────────────────────────────

    /// Scan a number literal: mantissa, optional `e<digits>` power,
    /// optional time-unit suffix.
    fn scan_number(&mut self, start: Position, start_pos: usize) -> Result<Token, SyntaxError> {
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance();
        }
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            self.advance();
            while let Some(b'0'..=b'9') = self.peek() {
                self.advance();
            }
        }
        let value = self.lexeme_since(start_pos).to_string();

        // `e18`-style exponent — only when a digit follows the `e`.
        let mut power = None;
        if self.peek() == Some(b'e') && matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            self.advance();
            let digits_start = self.pos;
            while let Some(b'0'..=b'9') = self.peek() {
                self.advance();
            }
            let digits = self.lexeme_since(digits_start);
            power = Some(digits.parse().map_err(|_| {
                self.error(start, format!("exponent '{digits}' out of range"))
            })?);
        }

        // Time-unit suffix: `mo` must be checked before `m`.
        let time_unit = if self.peek() == Some(b'm') && self.peek_at(1) == Some(b'o') {
            self.advance();
            self.advance();
            Some(TimeUnit::Months)
        } else {
            let unit = match self.peek() {
                Some(b's') => Some(TimeUnit::Seconds),
                Some(b'm') => Some(TimeUnit::Minutes),
                Some(b'h') => Some(TimeUnit::Hours),
                Some(b'd') => Some(TimeUnit::Days),
                Some(b'w') => Some(TimeUnit::Weeks),
                Some(b'y') => Some(TimeUnit::Years),
                _ => None,
            };
            if unit.is_some() {
                self.advance();
            }
            unit
        };

        // A trailing identifier character means a malformed literal
        // (`145e18years`, `1inch`).
        if let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' || ch >= 0x80 {
                let (ch, _) = self.char_at(self.pos);
                return Err(self.error(
                    start,
                    format!("invalid character '{ch}' in number literal"),
                ));
            }
        }

        Ok(Token::new(
            TokenKind::Number {
                value,
                power,
                time_unit,
            },
            self.span_from(start),
        ))
    }

    // ── String literals ───────────────────────────────────────────────

    /// Scan a string literal after its opening quote.
    fn scan_string(&mut self, quote: u8, start: Position) -> Result<Token, SyntaxError> {
        let mut buf = String::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(self.error(start, "unterminated string literal"));
                }
                Some(ch) if ch == quote => {
                    self.advance();
                    return Ok(Token::new(TokenKind::StringLit(buf), self.span_from(start)));
                }
                Some(b'\\') => {
                    self.advance();
                    let escape_pos = self.position();
                    match self.advance() {
                        Some(b'"') => buf.push('"'),
                        Some(b'\'') => buf.push('\''),
                        Some(b'\\') => buf.push('\\'),
                        Some(b'n') => buf.push('\n'),
                        Some(b't') => buf.push('\t'),
                        Some(_) => {
                            let (ch, _) = self.char_at(self.pos - 1);
                            return Err(self.error(
                                escape_pos,
                                format!("invalid escape sequence '\\{ch}'"),
                            ));
                        }
                        None => {
                            return Err(self.error(start, "unterminated string literal"));
                        }
                    }
                }
                Some(ch) if ch.is_ascii() => {
                    self.advance();
                    buf.push(ch as char);
                }
                Some(_) => {
                    // Consume the whole UTF-8 sequence. A multi-byte
                    // character counts as one column and is never '\n'.
                    let (ch, end) = self.char_at(self.pos);
                    self.pos = end;
                    self.col += 1;
                    buf.push(ch);
                }
            }
        }
    }
}
