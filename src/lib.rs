//! Go source front end: tokenizer + package/import header reader.
//!
//! - Lexer uses Logos for fixed spellings, hand-written scanners for literal
//!   bodies, and implements Go semicolon insertion at newlines.
//! - Parser reads the package clause and import declarations into an
//!   [`ImportTable`].

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;

use std::path::Path;

// Re-exports for convenience
pub use cursor::{Position, SourceCursor};
pub use error::{Error, LexError, LexErrorKind, ParseError, Span};
pub use lexer::{Lexer, Token, TokenKind, dump_tokens, tokenize};
pub use parser::{DeclParser, ImportTable, SourceHeader};

/// Parse the package clause and imports of in-memory source text.
pub fn parse_source(src: &str) -> Result<SourceHeader, ParseError> {
    DeclParser::new(src)?.parse_header()
}

/// Parse the package clause and imports of a file.
///
/// The file is read as bytes; invalid UTF-8 is replaced rather than rejected.
pub fn parse_file(path: impl AsRef<Path>) -> error::Result<SourceHeader> {
    let src = read_source(path)?;
    Ok(parse_source(&src)?)
}

/// Read a source file the way [`parse_file`] does.
pub fn read_source(path: impl AsRef<Path>) -> error::Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
