//! Package clause and import declarations.
//!
//! ```text
//! SourceFile    = PackageClause ";" { ImportDecl ";" } ...
//! PackageClause = "package" PackageName .
//! ImportDecl    = "import" ( ImportSpec | "(" { ImportSpec ";" } ")" ) .
//! ImportSpec    = [ "." | PackageName ] ImportPath .
//! ImportPath    = string_lit .
//! ```
//!
//! Parsing stops at the first token after the import declarations.

use std::collections::BTreeMap;

use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Import path → alias.
///
/// An empty alias keeps the imported package's own name; [`ImportTable::DOT`]
/// marks a dot import. A path imported twice keeps the last alias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    entries: BTreeMap<String, String>,
}

impl ImportTable {
    pub const DOT: &'static str = ".";

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the alias previously stored for `path`, if any.
    pub fn insert(&mut self, path: impl Into<String>, alias: impl Into<String>) -> Option<String> {
        self.entries.insert(path.into(), alias.into())
    }

    pub fn alias(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_dot_import(&self, path: &str) -> bool {
        self.alias(path) == Some(Self::DOT)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }
}

impl<P: Into<String>, A: Into<String>> FromIterator<(P, A)> for ImportTable {
    fn from_iter<I: IntoIterator<Item = (P, A)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (path, alias) in iter {
            table.insert(path, alias);
        }
        table
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHeader {
    pub package: String,
    pub imports: ImportTable,
}

/// Recursive-descent reader for the file header with one token of lookahead.
pub struct DeclParser<'src> {
    lexer: Lexer<'src>,
    tok: Token<'src>,
}

impl<'src> DeclParser<'src> {
    pub fn new(input: &'src str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let tok = lexer.next_token()?;
        Ok(Self { lexer, tok })
    }

    /// The lookahead token.
    #[inline]
    pub fn current(&self) -> &Token<'src> {
        &self.tok
    }

    pub fn parse_header(mut self) -> Result<SourceHeader, ParseError> {
        self.expect(
            TokenKind::KwPackage,
            "a source file must start with the `package` clause",
        )?;
        let name = self.expect(TokenKind::Ident, "expected a package name after `package`")?;
        self.expect_terminator("expected `;` or a newline after the package clause")?;

        let mut imports = ImportTable::new();
        while self.tok.kind == TokenKind::KwImport {
            self.bump()?;
            if self.tok.kind == TokenKind::LParen {
                self.bump()?;
                self.import_group(&mut imports)?;
            } else {
                self.import_spec(&mut imports)?;
            }
            self.expect_terminator("expected `;` or a newline after the import declaration")?;
        }

        Ok(SourceHeader {
            package: name.text.to_owned(),
            imports,
        })
    }

    // Called after `(`; consumes the closing `)`.
    fn import_group(&mut self, imports: &mut ImportTable) -> Result<(), ParseError> {
        while self.tok.kind != TokenKind::RParen {
            self.import_spec(imports)?;
            if self.tok.kind == TokenKind::RParen {
                break;
            }
            self.expect(
                TokenKind::Semi,
                "expected `;` or a newline between import specs",
            )?;
        }
        self.bump()?;
        Ok(())
    }

    fn import_spec(&mut self, imports: &mut ImportTable) -> Result<(), ParseError> {
        let alias = match self.tok.kind {
            TokenKind::Ident | TokenKind::Dot => self.bump()?.text,
            _ => "",
        };

        let path_tok = self.expect(TokenKind::StringLit, "expected an import path string")?;
        let path = unquote(path_tok.text);
        if path.is_empty() {
            return Err(ParseError::EmptyImportPath {
                span: path_tok.span,
                pos: path_tok.pos,
            });
        }

        imports.insert(path, alias);
        Ok(())
    }

    /// Returns the current token and advances the lookahead.
    #[inline]
    fn bump(&mut self) -> Result<Token<'src>, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.tok, next))
    }

    fn expect(&mut self, kind: TokenKind, message: &'static str) -> Result<Token<'src>, ParseError> {
        if self.tok.kind != kind {
            return Err(self.unexpected(message));
        }
        self.bump()
    }

    // End of input also closes a declaration: the lexer never synthesizes a
    // trailing terminator.
    fn expect_terminator(&mut self, message: &'static str) -> Result<(), ParseError> {
        match self.tok.kind {
            TokenKind::Semi => self.bump().map(drop),
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected(message)),
        }
    }

    fn unexpected(&self, message: &'static str) -> ParseError {
        ParseError::Unexpected {
            message,
            found: self.tok.kind,
            span: self.tok.span,
            pos: self.tok.pos,
        }
    }
}

// Strips the delimiters of a string literal; no escape processing.
#[inline]
fn unquote(lit: &str) -> &str {
    lit.strip_prefix(['"', '`'])
        .and_then(|s| s.strip_suffix(['"', '`']))
        .unwrap_or(lit)
}
