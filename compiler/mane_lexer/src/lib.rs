//! Lexer for Go source using logos.
//!
//! Produces a `TokenList` for the declaration parser. Comments are dropped,
//! newlines are not tokens: a line break becomes `Semicolon { auto: true }`
//! wherever Go's automatic semicolon rule would insert one.

use logos::Logos;
use mane_ir::{Span, SpanError, Token, TokenKind, TokenList};

/// Raw token from logos, before keyword resolution and semicolon insertion.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("\n")]
    Newline,

    // Keywords are resolved from identifiers in `convert_token`
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"0[oO][0-7_]+")]
    Int,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    Float,

    #[regex(r"[0-9][0-9_]*i")]
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?i")]
    Imaginary,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Rune,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"`[^`]*`")]
    RawString,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&^")]
    AndNot,
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&^=")]
    AssignOp,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("<-")]
    Arrow,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("==")]
    EqEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token(":=")]
    Define,
}

/// Consume a block comment through its closing `*/`. An unterminated
/// comment is an error token.
fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Lex Go source into a `TokenList`.
///
/// The only failure is a source larger than `u32::MAX` bytes; invalid input
/// produces `TokenKind::Error` tokens instead.
pub fn lex(source: &str) -> Result<TokenList, SpanError> {
    // Every span below fits once the whole source does.
    Span::try_from_range(0..source.len())?;

    let mut result = TokenList::with_capacity(source.len() / 4);
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = span_of(logos.span());
        match token_result {
            Ok(RawToken::LineComment) => {}
            Ok(RawToken::BlockComment) => {
                if logos.slice().contains('\n') {
                    insert_semicolon(&mut result, Span::point(span.start));
                }
            }
            Ok(RawToken::Newline) => insert_semicolon(&mut result, Span::point(span.start)),
            Ok(raw) => {
                let kind = convert_token(raw, logos.slice());
                result.push(Token::new(kind, span));
            }
            Err(()) => result.push(Token::new(TokenKind::Error, span)),
        }
    }

    let eof = span_of(source.len()..source.len());
    insert_semicolon(&mut result, eof);
    result.push(Token::new(TokenKind::Eof, eof));
    Ok(result)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "lex() rejects sources longer than u32::MAX up front"
)]
fn span_of(range: std::ops::Range<usize>) -> Span {
    Span::new(range.start as u32, range.end as u32)
}

/// Go's rule: a line break after a statement-ending token is a semicolon.
fn insert_semicolon(tokens: &mut TokenList, span: Span) {
    if tokens.last_kind().is_some_and(TokenKind::ends_statement) {
        tokens.push(Token::new(TokenKind::Semicolon { auto: true }, span));
    }
}

fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Ident => TokenKind::keyword(slice).unwrap_or(TokenKind::Ident),
        RawToken::Int => TokenKind::Int,
        RawToken::Float => TokenKind::Float,
        RawToken::Imaginary => TokenKind::Imaginary,
        RawToken::Rune => TokenKind::Rune,
        RawToken::String => TokenKind::String,
        RawToken::RawString => TokenKind::RawString,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon { auto: false },

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::AndNot => TokenKind::AndNot,
        RawToken::AssignOp => TokenKind::AssignOp,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::Inc => TokenKind::Inc,
        RawToken::Dec => TokenKind::Dec,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Define => TokenKind::Define,

        // Trivia is consumed in `lex` before conversion
        RawToken::LineComment | RawToken::BlockComment | RawToken::Newline => TokenKind::Error,
    }
}
