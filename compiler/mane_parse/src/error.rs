//! Parse error types.

use mane_ir::{Span, TokenKind};

/// What went wrong while parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },
    #[error("expected type, found {0}")]
    ExpectedType(TokenKind),
    #[error("file does not start with a package clause")]
    MissingPackageClause,
    #[error("unclosed {0}")]
    UnclosedDelimiter(&'static str),
    #[error("source file exceeds {} bytes", u32::MAX)]
    SourceTooLarge,
    #[error("type expression nested deeper than {0} levels")]
    TypeTooDeep(usize),
}

impl ParseErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedToken { .. } => "E1001",
            ParseErrorKind::ExpectedType(_) => "E1002",
            ParseErrorKind::MissingPackageClause => "E1003",
            ParseErrorKind::UnclosedDelimiter(_) => "E1004",
            ParseErrorKind::SourceTooLarge => "E1005",
            ParseErrorKind::TypeTooDeep(_) => "E1006",
        }
    }
}

/// A parse error at a source location.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    #[cold]
    pub fn unexpected(expected: &'static str, found: TokenKind, span: Span) -> Self {
        ParseError::new(ParseErrorKind::UnexpectedToken { expected, found }, span)
    }

    /// 1-based line and column of the error start within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = (self.span.start as usize).min(source.len());
        let before = source.get(..offset).unwrap_or("");
        let line = before.matches('\n').count() + 1;
        let column = before.rfind('\n').map_or(offset, |nl| offset - nl - 1) + 1;
        (line, column)
    }

    /// `path:line:col: message [code]`
    pub fn render(&self, path: &str, source: &str) -> String {
        let (line, column) = self.line_col(source);
        format!(
            "{path}:{line}:{column}: {} [{}]",
            self.kind,
            self.kind.code()
        )
    }
}
