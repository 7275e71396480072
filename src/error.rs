use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::cursor::Position;
use crate::lexer::TokenKind;

/// Compact byte-span used across the front end.
///
/// Offsets are stored as `u32`; inputs above 4GiB clamp instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32, // exclusive
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        let s = if start > u32::MAX as usize {
            u32::MAX
        } else {
            start as u32
        };
        let e = if end > u32::MAX as usize {
            u32::MAX
        } else {
            end as u32
        };
        Self { start: s, end: e }
    }

    pub const fn from_range(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }

    #[inline]
    pub const fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new((span.start as usize).into(), span.len())
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("illegal token")]
    IllegalToken,
    #[error("expected variadic notation `...`")]
    MalformedEllipsis,
    #[error("illegal rune escape")]
    IllegalRuneEscape,
    #[error("unterminated rune literal")]
    UnterminatedRune,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated raw string literal")]
    UnterminatedRawString,
}

// logos reports unmatched input through the error type's default.
impl Default for LexErrorKind {
    #[inline]
    fn default() -> Self {
        LexErrorKind::IllegalToken
    }
}

#[derive(Debug, Error, Diagnostic, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at {pos}")]
#[diagnostic(code(g5::lex))]
pub struct LexError {
    pub kind: LexErrorKind,
    #[label("{kind}")]
    pub span: Span,
    pub pos: Position,
}

impl LexError {
    #[inline]
    pub fn new(kind: LexErrorKind, span: Span, pos: Position) -> Self {
        Self { kind, span, pos }
    }
}

/// Grammar violation in the package/import header. The first one aborts the
/// whole file.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error("{message}, found {found} at {pos}")]
    #[diagnostic(code(g5::parse))]
    Unexpected {
        message: &'static str,
        found: TokenKind,
        #[label("{message}")]
        span: Span,
        pos: Position,
    },

    #[error("import path must not be empty at {pos}")]
    #[diagnostic(code(g5::parse::empty_import))]
    EmptyImportPath {
        #[label("empty import path")]
        span: Span,
        pos: Position,
    },
}

impl ParseError {
    /// Line/column where parsing stopped.
    pub fn pos(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.pos,
            ParseError::Unexpected { pos, .. } | ParseError::EmptyImportPath { pos, .. } => *pos,
        }
    }
}

/// File-level failure: reading the input, writing a dump, or processing it.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read `{}`", .path.display())]
    #[diagnostic(code(g5::io))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write token dump")]
    #[diagnostic(code(g5::io))]
    Write(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
