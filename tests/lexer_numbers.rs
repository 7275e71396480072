// tests/lexer_numbers.rs
use g5_front::lexer::{Lexer, TokenKind, tokenize};

fn lex1(input: &str) -> (TokenKind, &str) {
    let mut lx = Lexer::new(input);
    let tok = lx.next_token().expect("lex ok");
    (tok.kind, tok.text)
}

fn kinds_and_texts(input: &str) -> Vec<(TokenKind, &str)> {
    tokenize(input)
        .expect("lex ok")
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

fn assert_whole(input: &str, kind: TokenKind) {
    assert_eq!(kinds_and_texts(input), vec![(kind, input)], "{input:?}");
}

#[test]
fn classification_table() {
    let table = [
        ("0x1F", TokenKind::IntLit),
        ("0X1f", TokenKind::IntLit),
        ("0", TokenKind::IntLit),
        ("7", TokenKind::IntLit),
        ("42", TokenKind::IntLit),
        ("0755", TokenKind::IntLit),
        ("3.14", TokenKind::FloatLit),
        ("3.14e-2", TokenKind::FloatLit),
        ("1e10", TokenKind::FloatLit),
        ("1E+10", TokenKind::FloatLit),
        ("0.5", TokenKind::FloatLit),
        (".5", TokenKind::FloatLit),
        (".25e3", TokenKind::FloatLit),
        ("2i", TokenKind::ImagLit),
        ("0i", TokenKind::ImagLit),
        ("1.5i", TokenKind::ImagLit),
        ("1e3i", TokenKind::ImagLit),
        ("0755i", TokenKind::ImagLit),
    ];

    for (src, kind) in table {
        assert_whole(src, kind);
    }
}

#[test]
fn octal_run_hands_off_to_decimal_scanner() {
    // no digit-range validation: 8/9 after a leading 0 just keep scanning
    assert_whole("089", TokenKind::IntLit);
    assert_whole("0128", TokenKind::IntLit);
    assert_whole("017.5", TokenKind::FloatLit);
    assert_whole("00e1", TokenKind::FloatLit);
}

#[test]
fn hex_prefix_without_digits_is_accepted() {
    assert_whole("0x", TokenKind::IntLit);
}

#[test]
fn hex_literal_stops_at_non_hex() {
    assert_eq!(
        kinds_and_texts("0xFFg"),
        vec![(TokenKind::IntLit, "0xFF"), (TokenKind::Ident, "g")]
    );
}

#[test]
fn dangling_exponent_and_point_are_accepted_as_floats() {
    assert_whole("1.", TokenKind::FloatLit);
    assert_whole("1e", TokenKind::FloatLit);
    assert_whole("1e+", TokenKind::FloatLit);
    assert_whole("1.e", TokenKind::FloatLit);
}

#[test]
fn at_most_one_point_and_one_exponent() {
    assert_eq!(
        kinds_and_texts("1.5.3"),
        vec![(TokenKind::FloatLit, "1.5"), (TokenKind::FloatLit, ".3")]
    );
    assert_eq!(
        kinds_and_texts("1e5e3"),
        vec![(TokenKind::FloatLit, "1e5"), (TokenKind::Ident, "e3")]
    );
    assert_eq!(
        kinds_and_texts("1e5.5"),
        vec![(TokenKind::FloatLit, "1e5"), (TokenKind::FloatLit, ".5")]
    );
}

#[test]
fn number_does_not_swallow_ellipsis() {
    assert_eq!(
        kinds_and_texts("1..."),
        vec![(TokenKind::IntLit, "1"), (TokenKind::Ellipsis, "...")]
    );
}

#[test]
fn imaginary_suffix_ends_the_literal() {
    assert_eq!(
        kinds_and_texts("2ii"),
        vec![(TokenKind::ImagLit, "2i"), (TokenKind::Ident, "i")]
    );
}

#[test]
fn sign_is_only_part_of_an_exponent() {
    assert_eq!(
        kinds_and_texts("1+2"),
        vec![
            (TokenKind::IntLit, "1"),
            (TokenKind::Plus, "+"),
            (TokenKind::IntLit, "2"),
        ]
    );
}

#[test]
fn numbers_followed_by_letters_split() {
    assert_eq!(
        kinds_and_texts("123abc"),
        vec![(TokenKind::IntLit, "123"), (TokenKind::Ident, "abc")]
    );
}

#[test]
fn selector_after_number_literal_is_not_a_float() {
    assert_eq!(lex1("3.14"), (TokenKind::FloatLit, "3.14"));
    assert_eq!(lex1("x.5").0, TokenKind::Ident);
}
