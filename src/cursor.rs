use std::fmt;
use std::str::Chars;

/// 1-based line/column of a character in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Single-character lookahead over source text.
///
/// Every consumed character advances the column; a consumed `'\n'` moves to
/// the next line and resets the column to 1. Past the end `peek` and
/// `consume` keep returning `None`.
#[derive(Clone)]
pub struct SourceCursor<'src> {
    src: &'src str,
    chars: Chars<'src>,
    pos: Position,
}

impl<'src> SourceCursor<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            chars: src.chars(),
            pos: Position::START,
        }
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    #[inline]
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    #[inline]
    pub fn consume(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    /// Consumes `expected` if it is next.
    #[inline]
    pub fn eat(&mut self, expected: char) -> bool {
        self.eat_if(|c| c == expected).is_some()
    }

    #[inline]
    pub fn eat_if(&mut self, predicate: impl FnOnce(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(c) if predicate(c) => self.consume(),
            _ => None,
        }
    }

    /// Consumes the maximal run matching `predicate`; returns its length in chars.
    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> usize {
        let mut n = 0;
        while self.eat_if(&mut predicate).is_some() {
            n += 1;
        }
        n
    }

    /// Consumes characters until the byte offset reaches `offset` (or input ends).
    pub fn advance_to(&mut self, offset: usize) {
        while self.offset() < offset {
            if self.consume().is_none() {
                break;
            }
        }
    }

    /// Byte offset of the next unconsumed character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.src.len() - self.chars.as_str().len()
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }
}
