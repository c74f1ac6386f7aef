//! Token cursor for navigating the token stream.

use mane_ir::{Span, Token, TokenKind, TokenList};

use crate::ParseError;

/// Position in a `TokenList`, plus the source it was lexed from.
///
/// Invariant: the list ends with `Eof` and the cursor never moves past it.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        debug_assert_eq!(tokens.last_kind(), Some(TokenKind::Eof));
        Cursor {
            tokens: tokens.as_slice(),
            source,
            pos: 0,
        }
    }

    /// Current position, for snapshot/restore around speculative parses.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos < self.tokens.len(), "cursor position out of bounds");
        self.pos = pos;
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Kind of the token `n` positions ahead; `Eof` past the end.
    #[inline]
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Kind of the token just consumed, if any.
    pub fn previous_kind(&self) -> Option<TokenKind> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.kind)
    }

    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn check_semicolon(&self) -> bool {
        self.current_kind().is_semicolon()
    }

    /// Consume and return the current token. Stays put at `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail describing `expected`.
    pub fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(
                expected,
                self.current_kind(),
                self.current_span(),
            ))
        }
    }

    /// Consume an identifier and return its text and span.
    pub fn expect_ident(&mut self) -> Result<(&'a str, Span), ParseError> {
        let token = self.expect(TokenKind::Ident, "identifier")?;
        Ok((self.text(token.span), token.span))
    }

    /// Statement terminator: `;`, inserted `;`, or a closing `)`/`}` which
    /// allows the semicolon to be omitted.
    pub fn expect_terminator(&mut self) -> Result<(), ParseError> {
        if self.check_semicolon() {
            self.advance();
            Ok(())
        } else if matches!(
            self.current_kind(),
            TokenKind::RParen | TokenKind::RBrace | TokenKind::Eof
        ) {
            Ok(())
        } else {
            Err(ParseError::unexpected(
                "`;` or newline",
                self.current_kind(),
                self.current_span(),
            ))
        }
    }

    pub fn skip_semicolons(&mut self) {
        while self.check_semicolon() {
            self.advance();
        }
    }

    /// Source text covered by `span`.
    #[inline]
    pub fn text(&self, span: Span) -> &'a str {
        span.text(self.source)
    }
}
