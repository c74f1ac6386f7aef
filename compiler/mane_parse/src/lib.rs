//! Declaration-level parser for Go source.
//!
//! Builds a [`SourceUnit`] from a file: the package clause, imports, and
//! every top-level declaration. Type declarations are parsed in full;
//! function and var/const bodies are skipped by delimiter matching.
//!
//! Errors do not abort the file. Each failing declaration is reported and
//! the parser resumes at the next top-level keyword, so callers always get
//! a (possibly partial) unit together with the error list.

mod cursor;
mod error;
mod grammar;

pub use error::{ParseError, ParseErrorKind};

/// Deepest type expression nesting accepted (`*` counts one level, as does
/// each `[]`, `map`, `func` parameter or struct field type).
pub const MAX_TYPE_DEPTH: usize = 1_000;

use cursor::Cursor;
use mane_ir::{Ident, SourceUnit, Span};

/// Result of parsing one file.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutput {
    pub unit: SourceUnit,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse one Go source file. `path` is recorded on the unit as-is.
#[tracing::instrument(level = "debug", skip(source), fields(bytes = source.len()))]
pub fn parse(source: &str, path: &str) -> ParseOutput {
    match mane_lexer::lex(source) {
        Ok(tokens) => {
            let mut parser = Parser::new(Cursor::new(&tokens, source));
            let unit = parser.parse_file(path);
            ParseOutput {
                unit,
                errors: parser.errors,
            }
        }
        Err(_) => ParseOutput {
            unit: SourceUnit {
                path: path.to_owned(),
                package: Ident::new("", Span::DUMMY),
                imports: Vec::new(),
                decls: Vec::new(),
            },
            errors: vec![ParseError::new(ParseErrorKind::SourceTooLarge, Span::DUMMY)],
        },
    }
}

/// Recursive-descent parser state.
pub(crate) struct Parser<'a> {
    pub(crate) cursor: Cursor<'a>,
    errors: Vec<ParseError>,
    /// Type expressions currently open, for [`MAX_TYPE_DEPTH`].
    type_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(cursor: Cursor<'a>) -> Self {
        Parser {
            cursor,
            errors: Vec::new(),
            type_depth: 0,
        }
    }

    fn report(&mut self, error: ParseError) {
        tracing::trace!(%error, span = %error.span, "parse error");
        self.errors.push(error);
    }

    /// Run `f` from the current position; on failure rewind and return `None`.
    pub(crate) fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Option<T> {
        let start = self.cursor.position();
        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.cursor.set_position(start);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
