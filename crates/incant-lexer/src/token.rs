//! Token types for the incant lexer.

use incant_types::ast::TimeUnit;
use incant_types::Span;
use std::fmt;

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Every token kind in the script grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Number literal with its raw mantissa text and optional suffixes:
    /// `42`, `3.14e18`, `145e18y`, `2w`.
    Number {
        value: String,
        power: Option<u32>,
        time_unit: Option<TimeUnit>,
    },
    /// Quoted string literal (quotes stripped, escapes resolved).
    StringLit(String),
    /// `true`
    True,
    /// `false`
    False,
    /// Plain identifier: command names, probable identifiers, hex
    /// literals. May contain `.` and `-` after the first character.
    Ident(String),
    /// `$name` — name stored without the prefix.
    VarIdent(String),
    /// `@name` — name stored without the prefix.
    HelperName(String),
    /// `--name` — name stored without the dashes.
    OptName(String),

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:` — module-qualifier separator.
    Colon,
    /// `::` — call-expression separator.
    ColonColon,

    /// Statement separator.
    Newline,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number { value, power, time_unit } => {
                write!(f, "{value}")?;
                if let Some(p) = power {
                    write!(f, "e{p}")?;
                }
                if let Some(u) = time_unit {
                    write!(f, "{}", u.suffix())?;
                }
                Ok(())
            }
            TokenKind::StringLit(s) => write!(f, "\"{s}\""),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Ident(name) => write!(f, "{name}"),
            TokenKind::VarIdent(name) => write!(f, "${name}"),
            TokenKind::HelperName(name) => write!(f, "@{name}"),
            TokenKind::OptName(name) => write!(f, "--{name}"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::ColonColon => write!(f, "::"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Eof => write!(f, "end of script"),
        }
    }
}
