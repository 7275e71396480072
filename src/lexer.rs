use crate::cursor::{Position, SourceCursor};
use crate::error::{LexError, LexErrorKind, Span};
use logos::{Lexer as LogosLexer, Logos};
use std::fmt;
use std::io::Write;
use std::iter::FusedIterator;
use std::ops::Range;

// =============================================================================
// 0. Character classes
// =============================================================================

#[inline(always)]
const fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}

#[inline(always)]
const fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

// Characters that move a legacy-octal run over to the decimal/float scanner.
#[inline(always)]
const fn is_float_marker(c: char) -> bool {
    matches!(c, '.' | 'e' | 'E' | 'i')
}

// =============================================================================
// 1. Block comment scanner
// =============================================================================

/// Skips to the closing `*/`. An unterminated comment swallows the rest of
/// the input without raising an error.
#[inline]
fn lex_block_comment(lex: &mut LogosLexer<'_, RawTok>) {
    use memchr::memchr;

    let rem = lex.remainder().as_bytes();
    let mut search_start = 0;

    while let Some(star_pos) = memchr(b'*', &rem[search_start..]) {
        let abs_pos = search_start + star_pos;
        if rem.get(abs_pos + 1) == Some(&b'/') {
            lex.bump(abs_pos + 2);
            return;
        }
        search_start = abs_pos + 1;
    }

    lex.bump(rem.len());
}

// =============================================================================
// 2. String literals
// =============================================================================

mod strings {
    use super::*;

    /// `"..."`: a backslash swallows exactly one following character, whatever
    /// it is. A bare newline or end of input before the closing quote fails.
    pub fn lex_interpreted(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
        let mut cur = SourceCursor::new(lex.remainder());
        let result = loop {
            match cur.peek() {
                None | Some('\n') => break Err(LexErrorKind::UnterminatedString),
                Some('"') => {
                    cur.consume();
                    break Ok(());
                }
                Some('\\') => {
                    cur.consume();
                    if cur.consume().is_none() {
                        break Err(LexErrorKind::UnterminatedString);
                    }
                }
                Some(_) => {
                    cur.consume();
                }
            }
        };
        lex.bump(cur.offset());
        result
    }

    /// `` `...` ``: everything up to the closing backtick, newlines included.
    pub fn lex_raw(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
        let rem = lex.remainder();
        match memchr::memchr(b'`', rem.as_bytes()) {
            Some(close) => {
                lex.bump(close + 1);
                Ok(())
            }
            None => {
                lex.bump(rem.len());
                Err(LexErrorKind::UnterminatedRawString)
            }
        }
    }
}

// =============================================================================
// 3. Rune literals
// =============================================================================

mod rune {
    use super::*;

    /// Called after the opening `'`. Digit counts of `\x`, `\u`, `\U` and octal
    /// escapes are not checked; each takes the maximal run of its digits.
    pub fn lex_rune(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
        let mut cur = SourceCursor::new(lex.remainder());
        let result = scan_body(&mut cur);
        lex.bump(cur.offset());
        result
    }

    fn scan_body(cur: &mut SourceCursor<'_>) -> Result<(), LexErrorKind> {
        match cur.peek() {
            None | Some('\n') => return Err(LexErrorKind::UnterminatedRune),
            Some('\\') => {
                cur.consume();
                scan_escape(cur)?;
            }
            Some(_) => {
                cur.consume();
            }
        }

        if cur.eat('\'') {
            Ok(())
        } else {
            Err(LexErrorKind::UnterminatedRune)
        }
    }

    fn scan_escape(cur: &mut SourceCursor<'_>) -> Result<(), LexErrorKind> {
        match cur.peek() {
            Some('U' | 'u' | 'x' | 'X') => {
                cur.consume();
                cur.eat_while(is_hex_digit);
            }
            Some(c) if is_octal_digit(c) => {
                cur.eat_while(is_octal_digit);
            }
            Some('a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' | '\'' | '"') => {
                cur.consume();
            }
            _ => return Err(LexErrorKind::IllegalRuneEscape),
        }
        Ok(())
    }
}

// =============================================================================
// 4. Number scanning (maximal munch, permissive)
// =============================================================================

mod num {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum NumKind {
        Int,
        Float,
        Imaginary,
    }

    impl NumKind {
        #[inline]
        pub const fn token_kind(self) -> TokenKind {
            match self {
                NumKind::Int => TokenKind::IntLit,
                NumKind::Float => TokenKind::FloatLit,
                NumKind::Imaginary => TokenKind::ImagLit,
            }
        }
    }

    /// Logos callback: restarts at the token start and extends the token to
    /// the end of the literal.
    pub fn lex_number(lex: &mut LogosLexer<'_, RawTok>) -> NumKind {
        let start = lex.span().start;
        let mut cur = SourceCursor::new(&lex.source()[start..]);
        let kind = scan(&mut cur);

        let already = lex.span().len();
        let total = cur.offset();
        if total > already {
            lex.bump(total - already);
        }
        kind
    }

    /// Dangling `.`/`e`/sign endings are accepted as they are (`1.`, `1e`,
    /// `1e+` all scan as floats); no exponent digits are required.
    pub fn scan(cur: &mut SourceCursor<'_>) -> NumKind {
        if cur.eat('0') {
            if cur.eat_if(|c| matches!(c, 'x' | 'X')).is_some() {
                cur.eat_while(is_hex_digit);
                return NumKind::Int;
            }

            cur.eat_while(is_octal_digit);
            return match cur.peek() {
                Some(c) if c.is_ascii_digit() || is_float_marker(c) => scan_decimal(cur, false),
                _ => NumKind::Int,
            };
        }

        let seen_dot = cur.eat('.');
        scan_decimal(cur, seen_dot)
    }

    fn scan_decimal(cur: &mut SourceCursor<'_>, mut seen_dot: bool) -> NumKind {
        let mut seen_exp = false;

        loop {
            match cur.peek() {
                Some(c) if c.is_ascii_digit() => {
                    cur.consume();
                }
                // never take the first dot of `..`/`...`
                Some('.') if !seen_dot && !seen_exp && cur.peek_second() != Some('.') => {
                    seen_dot = true;
                    cur.consume();
                }
                Some('e' | 'E') if !seen_exp => {
                    seen_exp = true;
                    cur.consume();
                    cur.eat_if(|c| matches!(c, '+' | '-'));
                }
                Some('i') => {
                    cur.consume();
                    return NumKind::Imaginary;
                }
                _ => break,
            }
        }

        if seen_dot || seen_exp {
            NumKind::Float
        } else {
            NumKind::Int
        }
    }
}

// =============================================================================
// 5. Raw token definition (logos DFA)
// =============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r]+")]
#[rustfmt::skip]
enum RawTok {
    // Trivia
    #[token("\n")] Newline,
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)] _LineComment,
    #[token("/*", lex_block_comment)] BlockComment,

    // Keywords (before Ident)
    #[token("break")] KwBreak,
    #[token("default")] KwDefault,
    #[token("func")] KwFunc,
    #[token("interface")] KwInterface,
    #[token("select")] KwSelect,
    #[token("case")] KwCase,
    #[token("defer")] KwDefer,
    #[token("go")] KwGo,
    #[token("map")] KwMap,
    #[token("struct")] KwStruct,
    #[token("chan")] KwChan,
    #[token("else")] KwElse,
    #[token("goto")] KwGoto,
    #[token("package")] KwPackage,
    #[token("switch")] KwSwitch,
    #[token("const")] KwConst,
    #[token("fallthrough")] KwFallthrough,
    #[token("if")] KwIf,
    #[token("range")] KwRange,
    #[token("type")] KwType,
    #[token("continue")] KwContinue,
    #[token("for")] KwFor,
    #[token("import")] KwImport,
    #[token("return")] KwReturn,
    #[token("var")] KwVar,

    // Identifiers (ASCII only)
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")] Ident,

    // Literals (bodies scanned in callbacks)
    #[regex(r"[0-9]|\.[0-9]", num::lex_number)] Number(num::NumKind),
    #[token("'", rune::lex_rune)] Rune,
    #[token("\"", strings::lex_interpreted)] String,
    #[token("`", strings::lex_raw)] RawString,

    // Operators
    #[token("...")] Ellipsis,
    #[token("..")] ShortEllipsis,
    #[token("<<=")] ShlAssign,
    #[token(">>=")] ShrAssign,
    #[token("&^=")] AndNotAssign,
    #[token("+=")] AddAssign,
    #[token("-=")] SubAssign,
    #[token("*=")] MulAssign,
    #[token("/=")] DivAssign,
    #[token("%=")] ModAssign,
    #[token("&=")] AndAssign,
    #[token("|=")] OrAssign,
    #[token("^=")] XorAssign,
    #[token("<<")] Shl,
    #[token(">>")] Shr,
    #[token("&^")] AndNot,
    #[token("&&")] LAnd,
    #[token("||")] LOr,
    #[token("==")] EqEq,
    #[token("!=")] NotEq,
    #[token("<=")] Le,
    #[token(">=")] Ge,
    #[token("++")] Inc,
    #[token("--")] Dec,
    #[token(":=")] Define,
    #[token("<-")] Arrow,
    #[token("=")] Assign,
    #[token("+")] Plus,
    #[token("-")] Minus,
    #[token("*")] Star,
    #[token("/")] Slash,
    #[token("%")] Percent,
    #[token("&")] Amp,
    #[token("|")] Pipe,
    #[token("^")] Caret,
    #[token("!")] Bang,
    #[token("<")] Lt,
    #[token(">")] Gt,

    // Delimiters
    #[token("(")] LParen,
    #[token(")")] RParen,
    #[token("[")] LBrack,
    #[token("]")] RBrack,
    #[token("{")] LBrace,
    #[token("}")] RBrace,
    #[token(",")] Comma,
    #[token(";")] Semi,
    #[token(":")] Colon,
    // Not an illegal token: the dot-import alias needs it.
    #[token(".")] Dot,
}

impl RawTok {
    /// Public kind of a real token; `None` for trivia and `..`.
    #[inline]
    const fn kind(self) -> Option<TokenKind> {
        macro_rules! simple_tok {
            ($raw:expr; $($name:ident),* $(,)?) => {
                match $raw {
                    $(Self::$name => Some(TokenKind::$name),)*
                    Self::Number(num) => Some(num.token_kind()),
                    Self::Rune => Some(TokenKind::RuneLit),
                    Self::String | Self::RawString => Some(TokenKind::StringLit),
                    Self::Newline | Self::_LineComment | Self::BlockComment | Self::ShortEllipsis => None,
                }
            };
        }

        simple_tok! {
            self;

            KwBreak, KwDefault, KwFunc, KwInterface, KwSelect, KwCase, KwDefer, KwGo, KwMap,
            KwStruct, KwChan, KwElse, KwGoto, KwPackage, KwSwitch, KwConst, KwFallthrough, KwIf,
            KwRange, KwType, KwContinue, KwFor, KwImport, KwReturn, KwVar,

            Ident,

            Ellipsis, ShlAssign, ShrAssign, AndNotAssign, AddAssign, SubAssign, MulAssign,
            DivAssign, ModAssign, AndAssign, OrAssign, XorAssign, Shl, Shr, AndNot, LAnd, LOr,
            EqEq, NotEq, Le, Ge, Inc, Dec, Define, Arrow, Assign, Plus, Minus, Star, Slash,
            Percent, Amp, Pipe, Caret, Bang, Lt, Gt,

            LParen, RParen, LBrack, RBrack, LBrace, RBrace, Comma, Semi, Colon, Dot,
        }
    }
}

// =============================================================================
// 6. Public token kinds
// =============================================================================

/// Lexical class of a token.
///
/// The discriminants are stable and are what [`dump_tokens`] prints:
/// keywords `0..=24`, operators and delimiters `25..=71`, then identifier,
/// the five literal kinds and end of input.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Keywords
    KwBreak,
    KwDefault,
    KwFunc,
    KwInterface,
    KwSelect,
    KwCase,
    KwDefer,
    KwGo,
    KwMap,
    KwStruct,
    KwChan,
    KwElse,
    KwGoto,
    KwPackage,
    KwSwitch,
    KwConst,
    KwFallthrough,
    KwIf,
    KwRange,
    KwType,
    KwContinue,
    KwFor,
    KwImport,
    KwReturn,
    KwVar,

    // Operators / Delimiters
    Plus,
    Amp,
    AddAssign,
    AndAssign,
    LAnd,
    EqEq,
    NotEq,
    LParen,
    RParen,
    Minus,
    Pipe,
    SubAssign,
    OrAssign,
    LOr,
    Lt,
    Le,
    LBrack,
    RBrack,
    Star,
    Caret,
    MulAssign,
    XorAssign,
    Arrow,
    Gt,
    Ge,
    LBrace,
    RBrace,
    Slash,
    Shl,
    DivAssign,
    ShlAssign,
    Inc,
    Assign,
    Define,
    Comma,
    Semi,
    Percent,
    Shr,
    ModAssign,
    ShrAssign,
    Dec,
    Bang,
    Ellipsis,
    Dot,
    Colon,
    AndNot,
    AndNotAssign,

    Ident,
    IntLit,
    FloatLit,
    ImagLit,
    RuneLit,
    StringLit,

    Eof,
}

macro_rules! gen_lookup_table {
    ($($variant:ident),* $(,)?) => {{
        let mut table = [false; TokenKind::COUNT];
        $(table[TokenKind::$variant as usize] = true;)*
        table
    }};
}

// Tokens after which a newline ends the statement.
const ENDS_STATEMENT_TABLE: [bool; TokenKind::COUNT] = gen_lookup_table!(
    Ident,
    IntLit,
    FloatLit,
    ImagLit,
    RuneLit,
    StringLit,
    KwBreak,
    KwContinue,
    KwFallthrough,
    KwReturn,
    Inc,
    Dec,
    RParen,
    RBrack,
    RBrace,
);

impl TokenKind {
    pub const COUNT: usize = TokenKind::Eof as usize + 1;

    #[rustfmt::skip]
    pub const KEYWORDS: [TokenKind; 25] = [
        TokenKind::KwBreak, TokenKind::KwDefault, TokenKind::KwFunc, TokenKind::KwInterface,
        TokenKind::KwSelect, TokenKind::KwCase, TokenKind::KwDefer, TokenKind::KwGo,
        TokenKind::KwMap, TokenKind::KwStruct, TokenKind::KwChan, TokenKind::KwElse,
        TokenKind::KwGoto, TokenKind::KwPackage, TokenKind::KwSwitch, TokenKind::KwConst,
        TokenKind::KwFallthrough, TokenKind::KwIf, TokenKind::KwRange, TokenKind::KwType,
        TokenKind::KwContinue, TokenKind::KwFor, TokenKind::KwImport, TokenKind::KwReturn,
        TokenKind::KwVar,
    ];

    /// Whether a newline right after this token is a statement terminator.
    #[inline(always)]
    pub const fn ends_statement(self) -> bool {
        ENDS_STATEMENT_TABLE[self as usize]
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        (self as u8) <= TokenKind::KwVar as u8
    }

    /// Fixed spelling for keywords and operators, a class name otherwise.
    #[rustfmt::skip]
    pub const fn as_str(self) -> &'static str {
        use TokenKind::*;
        match self {
            KwBreak => "break", KwDefault => "default", KwFunc => "func",
            KwInterface => "interface", KwSelect => "select", KwCase => "case",
            KwDefer => "defer", KwGo => "go", KwMap => "map", KwStruct => "struct",
            KwChan => "chan", KwElse => "else", KwGoto => "goto", KwPackage => "package",
            KwSwitch => "switch", KwConst => "const", KwFallthrough => "fallthrough",
            KwIf => "if", KwRange => "range", KwType => "type", KwContinue => "continue",
            KwFor => "for", KwImport => "import", KwReturn => "return", KwVar => "var",

            Plus => "+", Amp => "&", AddAssign => "+=", AndAssign => "&=", LAnd => "&&",
            EqEq => "==", NotEq => "!=", LParen => "(", RParen => ")", Minus => "-",
            Pipe => "|", SubAssign => "-=", OrAssign => "|=", LOr => "||", Lt => "<",
            Le => "<=", LBrack => "[", RBrack => "]", Star => "*", Caret => "^",
            MulAssign => "*=", XorAssign => "^=", Arrow => "<-", Gt => ">", Ge => ">=",
            LBrace => "{", RBrace => "}", Slash => "/", Shl => "<<", DivAssign => "/=",
            ShlAssign => "<<=", Inc => "++", Assign => "=", Define => ":=", Comma => ",",
            Semi => ";", Percent => "%", Shr => ">>", ModAssign => "%=", ShrAssign => ">>=",
            Dec => "--", Bang => "!", Ellipsis => "...", Dot => ".", Colon => ":",
            AndNot => "&^", AndNotAssign => "&^=",

            Ident => "identifier", IntLit => "integer literal", FloatLit => "float literal",
            ImagLit => "imaginary literal", RuneLit => "rune literal",
            StringLit => "string literal", Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (*self as u8) <= TokenKind::AndNotAssign as u8 {
            write!(f, "`{}`", self.as_str())
        } else {
            f.write_str(self.as_str())
        }
    }
}

// =============================================================================
// 7. Token value (zero-copy)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
    /// Line/column of the first character.
    pub pos: Position,
}

impl Token<'_> {
    /// A terminator synthesized from a newline rather than written as `;`.
    #[inline]
    pub fn is_inserted_terminator(&self) -> bool {
        self.kind == TokenKind::Semi && self.text == "\n"
    }
}

// =============================================================================
// 8. Lexer wrapper: terminator insertion + positions
// =============================================================================

/// Pull-based tokenizer over one source text.
///
/// Each [`Lexer::next_token`] call returns exactly one token. Once the input
/// is exhausted every further call returns [`TokenKind::Eof`].
pub struct Lexer<'src> {
    logos: LogosLexer<'src, RawTok>,
    cursor: SourceCursor<'src>,
    last: Option<TokenKind>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            logos: RawTok::lexer(input),
            cursor: SourceCursor::new(input),
            last: None,
            finished: false,
        }
    }

    /// Line/column just past the most recently returned token.
    #[inline]
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Kind of the most recently returned token.
    #[inline]
    pub fn last_kind(&self) -> Option<TokenKind> {
        self.last
    }

    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        loop {
            let Some(raw) = self.logos.next() else {
                return Ok(self.eof());
            };

            let range = self.logos.span();
            let pos = self.sync(&range);

            let raw = match raw {
                Ok(raw) => raw,
                Err(kind) => return Err(self.fail(kind, range, pos)),
            };

            match raw {
                RawTok::Newline => {
                    if self.last.is_some_and(TokenKind::ends_statement) {
                        return Ok(self.emit(TokenKind::Semi, range, pos));
                    }
                }
                RawTok::ShortEllipsis => {
                    return Err(self.fail(LexErrorKind::MalformedEllipsis, range, pos));
                }
                _ => {
                    if let Some(kind) = raw.kind() {
                        return Ok(self.emit(kind, range, pos));
                    }
                }
            }
        }
    }

    /// Moves the position cursor over `range`; returns the position of its start.
    #[inline]
    fn sync(&mut self, range: &Range<usize>) -> Position {
        self.cursor.advance_to(range.start);
        let pos = self.cursor.position();
        self.cursor.advance_to(range.end);
        pos
    }

    #[inline]
    fn emit(&mut self, kind: TokenKind, range: Range<usize>, pos: Position) -> Token<'src> {
        self.last = Some(kind);
        Token {
            kind,
            text: &self.logos.source()[range.clone()],
            span: Span::from_range(range),
            pos,
        }
    }

    #[inline]
    fn fail(&mut self, kind: LexErrorKind, range: Range<usize>, pos: Position) -> LexError {
        self.last = None;
        LexError::new(kind, Span::from_range(range), pos)
    }

    #[inline]
    fn eof(&mut self) -> Token<'src> {
        let end = self.logos.source().len();
        self.cursor.advance_to(end);
        let pos = self.cursor.position();
        self.emit(TokenKind::Eof, end..end, pos)
    }
}

/// Yields every token before end of input, then stops; stops after the
/// first error as well.
impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_token() {
            Ok(tok) if tok.kind == TokenKind::Eof => {
                self.finished = true;
                None
            }
            Ok(tok) => Some(Ok(tok)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenizes the whole input; the trailing end-of-input token is not included.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(input).collect()
}

/// Writes one `<kind,lexeme,line,column>` record per token, end of input
/// included. `kind` is the numeric [`TokenKind`], the lexeme is escaped so
/// each record stays on one line, and line/column are those just past the
/// token. Records written before a lexing error are kept.
pub fn dump_tokens<W: Write>(input: &str, out: &mut W) -> crate::error::Result<()> {
    let mut lexer = Lexer::new(input);
    loop {
        let tok = lexer.next_token()?;
        let end = lexer.position();
        writeln!(
            out,
            "<{},{},{},{}>",
            tok.kind as u8,
            tok.text.escape_debug(),
            end.line,
            end.column
        )?;
        if tok.kind == TokenKind::Eof {
            return Ok(());
        }
    }
}
