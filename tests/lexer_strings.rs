// tests/lexer_strings.rs
use g5_front::error::LexErrorKind;
use g5_front::lexer::{Lexer, Token, TokenKind, tokenize};

fn lex1(input: &str) -> Token<'_> {
    Lexer::new(input).next_token().expect("lex ok")
}

fn lex_err(input: &str) -> LexErrorKind {
    match tokenize(input) {
        Ok(toks) => panic!("expected error for {input:?}, got {toks:?}"),
        Err(e) => e.kind,
    }
}

#[test]
fn rune_basic() {
    for s in [
        "'a'",
        "'é'",
        r"'\n'",
        r"'\\'",
        r"'\''",
        r#"'\"'"#,
        r"'\x41'",
        r"'A'",
        r"'\U00000041'",
        r"'\141'",
    ] {
        let tok = lex1(s);
        assert_eq!(tok.kind, TokenKind::RuneLit, "{s}");
        assert_eq!(tok.text, s);
    }
}

#[test]
fn rune_escape_digit_counts_are_not_checked() {
    for s in [r"'\x4'", r"'\u41'", r"'\7'", r"'\x'"] {
        assert_eq!(lex1(s).kind, TokenKind::RuneLit, "{s}");
    }
}

#[test]
fn rune_illegal_escape() {
    assert_eq!(lex_err(r"'\q'"), LexErrorKind::IllegalRuneEscape);
    assert_eq!(lex_err(r"'\8'"), LexErrorKind::IllegalRuneEscape);
}

#[test]
fn rune_unterminated() {
    for s in ["'ab'", r"'\'", "'", "'a", "'\n'", r"'\x41"] {
        assert_eq!(lex_err(s), LexErrorKind::UnterminatedRune, "{s:?}");
    }
}

#[test]
fn rune_error_span_starts_at_quote() {
    let err = Lexer::new("x 'ab'").nth(1).expect("second item").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedRune);
    assert_eq!(err.span.start, 2);
    assert_eq!((err.pos.line, err.pos.column), (1, 3));
}

#[test]
fn interpreted_string_basic() {
    for s in [
        r#""""#,
        r#""hello""#,
        r#""\n""#,
        r#""\\\"""#,
        r#""\x41""#,
        r#""ünïcödé""#,
        r#""a 'quoted' rune""#,
    ] {
        let tok = lex1(s);
        assert_eq!(tok.kind, TokenKind::StringLit, "{s}");
        assert_eq!(tok.text, s);
    }
}

#[test]
fn interpreted_string_escape_is_not_validated() {
    assert_eq!(lex1(r#""\q""#).kind, TokenKind::StringLit);
}

#[test]
fn escaped_quote_does_not_close_string() {
    let toks = tokenize(r#""a\"b" x"#).expect("lex ok");
    assert_eq!(toks.len(), 2);
    assert_eq!(toks[0].text, r#""a\"b""#);
    assert_eq!(toks[1].kind, TokenKind::Ident);
}

#[test]
fn interpreted_string_unterminated() {
    assert_eq!(lex_err("\"abc"), LexErrorKind::UnterminatedString);
    assert_eq!(lex_err("\"abc\ndef\""), LexErrorKind::UnterminatedString);
    assert_eq!(lex_err("\"abc\\"), LexErrorKind::UnterminatedString);
}

#[test]
fn raw_string_basic() {
    let tok = lex1("`abc`");
    assert_eq!(tok.kind, TokenKind::StringLit);
    assert_eq!(tok.text, "`abc`");
    assert_eq!(lex1(r"`\n`").text, r"`\n`");
}

#[test]
fn raw_string_spans_lines() {
    let mut lx = Lexer::new("`a\nb`\nx");
    let raw = lx.next_token().unwrap();
    assert_eq!(raw.kind, TokenKind::StringLit);
    assert_eq!(raw.text, "`a\nb`");
    assert_eq!((raw.pos.line, raw.pos.column), (1, 1));
    assert_eq!((lx.position().line, lx.position().column), (2, 3));

    let semi = lx.next_token().unwrap();
    assert!(semi.is_inserted_terminator());
    assert_eq!((semi.pos.line, semi.pos.column), (2, 3));

    let x = lx.next_token().unwrap();
    assert_eq!(x.kind, TokenKind::Ident);
    assert_eq!((x.pos.line, x.pos.column), (3, 1));
}

#[test]
fn raw_string_counts_every_embedded_newline() {
    let mut lx = Lexer::new("`a\nb\n\nc` x");
    let raw = lx.next_token().unwrap();
    assert_eq!(raw.text, "`a\nb\n\nc`");
    assert_eq!((lx.position().line, lx.position().column), (4, 3));

    let x = lx.next_token().unwrap();
    assert_eq!(x.kind, TokenKind::Ident);
    assert_eq!((x.pos.line, x.pos.column), (4, 4));
}

#[test]
fn raw_string_unterminated() {
    assert_eq!(lex_err("`abc"), LexErrorKind::UnterminatedRawString);
    assert_eq!(lex_err("`abc\n\n"), LexErrorKind::UnterminatedRawString);
}

#[test]
fn error_clears_last_token() {
    let mut lx = Lexer::new("x \"oops");
    lx.next_token().unwrap();
    assert_eq!(lx.last_kind(), Some(TokenKind::Ident));
    assert!(lx.next_token().is_err());
    assert_eq!(lx.last_kind(), None);
}
