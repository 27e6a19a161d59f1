//! Integration tests for the incant lexer.

use incant_lexer::{Lexer, TokenKind};
use incant_types::ast::TimeUnit;
use incant_types::SourceFile;

/// Lex a script into token kinds (panics on lex errors, drops Eof).
fn lex(source: &str) -> Vec<TokenKind> {
    let sf = SourceFile::new("test", source);
    let tokens = Lexer::new(&sf).lex().expect("lex error");
    tokens
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| *k != TokenKind::Eof)
        .collect()
}

fn lex_err(source: &str) -> incant_types::SyntaxError {
    let sf = SourceFile::new("test", source);
    Lexer::new(&sf).lex().expect_err("expected lex error")
}

// ── Numbers ───────────────────────────────────────────────────────────

#[test]
fn plain_number() {
    assert_eq!(
        lex("42"),
        vec![TokenKind::Number {
            value: "42".into(),
            power: None,
            time_unit: None
        }]
    );
}

#[test]
fn number_with_power() {
    assert_eq!(
        lex("145e18"),
        vec![TokenKind::Number {
            value: "145".into(),
            power: Some(18),
            time_unit: None
        }]
    );
}

#[test]
fn number_with_power_and_time_unit() {
    assert_eq!(
        lex("145e18y"),
        vec![TokenKind::Number {
            value: "145".into(),
            power: Some(18),
            time_unit: Some(TimeUnit::Years)
        }]
    );
}

#[test]
fn number_with_each_time_unit() {
    for (suffix, unit) in [
        ("s", TimeUnit::Seconds),
        ("m", TimeUnit::Minutes),
        ("h", TimeUnit::Hours),
        ("d", TimeUnit::Days),
        ("w", TimeUnit::Weeks),
        ("mo", TimeUnit::Months),
        ("y", TimeUnit::Years),
    ] {
        assert_eq!(
            lex(&format!("10{suffix}")),
            vec![TokenKind::Number {
                value: "10".into(),
                power: None,
                time_unit: Some(unit)
            }],
            "suffix {suffix}"
        );
    }
}

#[test]
fn decimal_number() {
    assert_eq!(
        lex("3.14e18"),
        vec![TokenKind::Number {
            value: "3.14".into(),
            power: Some(18),
            time_unit: None
        }]
    );
}

#[test]
fn negative_number() {
    assert_eq!(
        lex("-5"),
        vec![TokenKind::Number {
            value: "-5".into(),
            power: None,
            time_unit: None
        }]
    );
}

#[test]
fn trailing_letters_on_number_rejected() {
    let err = lex_err("145e18years");
    assert!(err.message.contains("number literal"), "{}", err.message);
}

// ── Identifiers, hex, bools ───────────────────────────────────────────

#[test]
fn identifier_with_dots_and_dashes() {
    assert_eq!(
        lex("token-manager.open"),
        vec![TokenKind::Ident("token-manager.open".into())]
    );
}

#[test]
fn hex_literal_is_an_identifier_token() {
    assert_eq!(lex("0x1234"), vec![TokenKind::Ident("0x1234".into())]);
}

#[test]
fn bool_keywords() {
    assert_eq!(lex("true false"), vec![TokenKind::True, TokenKind::False]);
}

// ── Prefixed names ────────────────────────────────────────────────────

#[test]
fn variable_identifier() {
    assert_eq!(lex("$fDAIx"), vec![TokenKind::VarIdent("fDAIx".into())]);
}

#[test]
fn helper_name() {
    assert_eq!(lex("@token"), vec![TokenKind::HelperName("token".into())]);
}

#[test]
fn option_name() {
    assert_eq!(lex("--from"), vec![TokenKind::OptName("from".into())]);
}

#[test]
fn bare_dollar_rejected() {
    let err = lex_err("$ 1");
    assert!(err.message.contains("variable name"));
}

// ── Strings ───────────────────────────────────────────────────────────

#[test]
fn double_and_single_quoted_strings() {
    assert_eq!(
        lex("\"a text string\" 'single'"),
        vec![
            TokenKind::StringLit("a text string".into()),
            TokenKind::StringLit("single".into())
        ]
    );
}

#[test]
fn string_escapes() {
    assert_eq!(
        lex(r#""a\"b\\c""#),
        vec![TokenKind::StringLit("a\"b\\c".into())]
    );
}

#[test]
fn multi_byte_characters_in_strings_survive() {
    assert_eq!(
        lex("\"café ₿ 日本語\""),
        vec![TokenKind::StringLit("café ₿ 日本語".into())]
    );
}

#[test]
fn columns_count_characters_not_bytes() {
    let sf = SourceFile::new("test", "\"héllo\" x");
    let tokens = Lexer::new(&sf).lex().expect("lex error");
    // The string spans columns 1..7; `x` starts at column 9.
    assert_eq!(tokens[0].span.end.col, 7);
    assert_eq!(tokens[1].span.start.col, 9);
}

#[test]
fn unterminated_string_rejected() {
    let err = lex_err("\"oops");
    assert!(err.message.contains("unterminated"));
}

#[test]
fn diagnostics_render_whole_characters() {
    assert!(lex_err("é").message.contains("unexpected character 'é'"));
    assert!(lex_err("1é").message.contains("invalid character 'é'"));
    assert!(lex_err("\"a\\éb\"").message.contains("invalid escape sequence '\\é'"));
}

// ── Punctuation & separators ──────────────────────────────────────────

#[test]
fn colon_vs_double_colon() {
    assert_eq!(
        lex("a:b c::d"),
        vec![
            TokenKind::Ident("a".into()),
            TokenKind::Colon,
            TokenKind::Ident("b".into()),
            TokenKind::Ident("c".into()),
            TokenKind::ColonColon,
            TokenKind::Ident("d".into()),
        ]
    );
}

#[test]
fn newlines_are_tokens() {
    assert_eq!(
        lex("a\nb"),
        vec![
            TokenKind::Ident("a".into()),
            TokenKind::Newline,
            TokenKind::Ident("b".into()),
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        lex("a # comment with $stuff\nb"),
        vec![
            TokenKind::Ident("a".into()),
            TokenKind::Newline,
            TokenKind::Ident("b".into()),
        ]
    );
}

#[test]
fn full_command_line() {
    assert_eq!(
        lex("raw $target 0x1234 1e18 --from @me()"),
        vec![
            TokenKind::Ident("raw".into()),
            TokenKind::VarIdent("target".into()),
            TokenKind::Ident("0x1234".into()),
            TokenKind::Number {
                value: "1".into(),
                power: Some(18),
                time_unit: None
            },
            TokenKind::OptName("from".into()),
            TokenKind::HelperName("me".into()),
            TokenKind::LParen,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn spans_are_one_based() {
    let sf = SourceFile::new("test", "set $a 1");
    let tokens = Lexer::new(&sf).lex().unwrap();
    assert_eq!(tokens[0].span.start.line, 1);
    assert_eq!(tokens[0].span.start.col, 1);
    assert_eq!(tokens[0].span.end.col, 3);
    assert_eq!(tokens[1].span.start.col, 5);
}
