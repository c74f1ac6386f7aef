//! Type expressions, signatures and field lists.

use mane_ir::{
    ChanDir, Field, FieldList, FuncType, Ident, InterfaceElem, InterfaceType, MethodSpec,
    NamedType, Span, TokenKind, TypeExpr,
};
use smallvec::SmallVec;

use crate::{ParseError, ParseErrorKind, Parser, MAX_TYPE_DEPTH};

/// What a bracketed or parenthesized field entry holds.
#[derive(Copy, Clone, PartialEq, Eq)]
enum EntryMode {
    /// Function parameters and results: plain types.
    Param,
    /// Type parameters: constraint unions with `~` terms.
    Constraint,
}

/// One comma-separated entry before names and types are regrouped.
struct Entry {
    name: Option<Ident>,
    ty: TypeExpr,
}

/// Tokens that may begin a type expression (other than `(`).
fn starts_type(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Star
            | TokenKind::LBracket
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Func
            | TokenKind::Struct
            | TokenKind::Interface
            | TokenKind::Arrow
    )
}

/// The bare identifier a lone entry like `a` in `(a, b int)` stands for.
fn as_plain_name(ty: &TypeExpr) -> Option<&Ident> {
    match ty {
        TypeExpr::Named(NamedType {
            package: None,
            name,
            args,
        }) if args.is_empty() => Some(name),
        _ => None,
    }
}

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        if self.type_depth >= MAX_TYPE_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::TypeTooDeep(MAX_TYPE_DEPTH),
                self.cursor.current_span(),
            ));
        }
        self.type_depth += 1;
        let result = mane_stack::with_stack(|| self.parse_type_inner());
        self.type_depth -= 1;
        result
    }

    fn parse_type_inner(&mut self) -> Result<TypeExpr, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident => self.parse_type_name().map(TypeExpr::Named),
            TokenKind::Star => {
                self.cursor.advance();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            TokenKind::LBracket => self.parse_slice_or_array(),
            TokenKind::Map => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::LBracket, "`[`")?;
                let key = self.parse_type()?;
                self.cursor.expect(TokenKind::RBracket, "`]`")?;
                let value = self.parse_type()?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            TokenKind::Chan => {
                self.cursor.advance();
                let dir = if self.cursor.eat(TokenKind::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(elem),
                })
            }
            TokenKind::Arrow => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::Chan, "`chan`")?;
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(elem),
                })
            }
            TokenKind::Func => {
                self.cursor.advance();
                Ok(TypeExpr::Func(Box::new(self.parse_signature(None)?)))
            }
            TokenKind::Struct => {
                self.cursor.advance();
                self.parse_struct_body().map(TypeExpr::Struct)
            }
            TokenKind::Interface => {
                self.cursor.advance();
                self.parse_interface_body().map(TypeExpr::Interface)
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_type()?;
                self.cursor.expect(TokenKind::RParen, "`)`")?;
                Ok(TypeExpr::Paren(Box::new(inner)))
            }
            TokenKind::Ellipsis => {
                self.cursor.advance();
                Ok(TypeExpr::Variadic(Box::new(self.parse_type()?)))
            }
            found => Err(ParseError::new(
                ParseErrorKind::ExpectedType(found),
                self.cursor.current_span(),
            )),
        }
    }

    /// `Name`, `pkg.Name`, optionally followed by `[Args]`.
    ///
    /// Type arguments are tried speculatively: `a [4]int` in a parameter
    /// list is a name followed by an array type, not an instantiation.
    fn parse_type_name(&mut self) -> Result<NamedType, ParseError> {
        let (first, first_span) = self.cursor.expect_ident()?;
        let (package, name) = if self.cursor.eat(TokenKind::Dot) {
            let (name, span) = self.cursor.expect_ident()?;
            (Some(Ident::new(first, first_span)), Ident::new(name, span))
        } else {
            (None, Ident::new(first, first_span))
        };
        let args = if self.cursor.check(TokenKind::LBracket)
            && self.cursor.peek_kind(1) != TokenKind::RBracket
        {
            self.speculate(|p| p.parse_type_args()).unwrap_or_default()
        } else {
            Vec::new()
        };
        Ok(NamedType {
            package,
            name,
            args,
        })
    }

    fn parse_type_args(&mut self) -> Result<Vec<TypeExpr>, ParseError> {
        self.cursor.expect(TokenKind::LBracket, "`[`")?;
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RBracket) {
            args.push(self.parse_type()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RBracket, "`]`")?;
        Ok(args)
    }

    /// `[]T`, `[...]T` or `[len]T`. The length is kept as raw source text.
    fn parse_slice_or_array(&mut self) -> Result<TypeExpr, ParseError> {
        let open = self.cursor.expect(TokenKind::LBracket, "`[`")?;
        if self.cursor.eat(TokenKind::RBracket) {
            return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
        }
        let mut depth = 0usize;
        loop {
            match self.cursor.current_kind() {
                TokenKind::RBracket if depth == 0 => break,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnclosedDelimiter("array length"),
                        open.span,
                    ))
                }
                _ => {}
            }
            self.cursor.advance();
        }
        let close = self.cursor.advance();
        let len = self
            .cursor
            .text(Span::new(open.span.end, close.span.start))
            .trim()
            .to_owned();
        let elem = self.parse_type()?;
        Ok(TypeExpr::Array {
            len,
            elem: Box::new(elem),
        })
    }

    /// `(Params) [Results]`, with already-parsed type parameters.
    pub(crate) fn parse_signature(
        &mut self,
        type_params: Option<FieldList>,
    ) -> Result<FuncType, ParseError> {
        let params = self.parse_params()?;
        let results = self.parse_results()?;
        Ok(FuncType {
            type_params,
            params,
            results,
        })
    }

    pub(crate) fn parse_params(&mut self) -> Result<FieldList, ParseError> {
        let open = self.cursor.expect(TokenKind::LParen, "`(`")?;
        let fields = self.parse_field_entries(TokenKind::RParen, EntryMode::Param)?;
        let close = self.cursor.expect(TokenKind::RParen, "`)`")?;
        Ok(FieldList::new(fields, open.span.merge(close.span)))
    }

    fn parse_results(&mut self) -> Result<Option<FieldList>, ParseError> {
        if self.cursor.check(TokenKind::LParen) {
            return self.parse_params().map(Some);
        }
        if !starts_type(self.cursor.current_kind()) {
            return Ok(None);
        }
        let start = self.cursor.current_span();
        let ty = self.parse_type()?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Some(FieldList::new(vec![Field::unnamed(ty)], span)))
    }

    /// `[T any, K comparable]`
    pub(crate) fn parse_type_params(&mut self) -> Result<FieldList, ParseError> {
        let open = self.cursor.expect(TokenKind::LBracket, "`[`")?;
        let fields = self.parse_field_entries(TokenKind::RBracket, EntryMode::Constraint)?;
        let close = self.cursor.expect(TokenKind::RBracket, "`]`")?;
        Ok(FieldList::new(fields, open.span.merge(close.span)))
    }

    /// Comma-separated entries up to (not including) `close`, regrouped the
    /// way Go groups them: once any entry is `name Type`, every lone entry is
    /// a name sharing the next entry's type.
    fn parse_field_entries(
        &mut self,
        close: TokenKind,
        mode: EntryMode,
    ) -> Result<Vec<Field>, ParseError> {
        let mut entries = Vec::new();
        while !self.cursor.check(close) {
            entries.push(self.parse_entry(close, mode)?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }

        if entries.iter().all(|entry| entry.name.is_none()) {
            return Ok(entries
                .into_iter()
                .map(|entry| Field::unnamed(entry.ty))
                .collect());
        }

        let mut fields = Vec::new();
        let mut pending: SmallVec<[Ident; 2]> = SmallVec::new();
        for entry in entries {
            match entry.name {
                Some(name) => {
                    pending.push(name);
                    fields.push(Field {
                        names: std::mem::take(&mut pending),
                        ty: entry.ty,
                        tag: None,
                    });
                }
                None => match as_plain_name(&entry.ty) {
                    Some(name) => pending.push(name.clone()),
                    None => {
                        return Err(ParseError::unexpected(
                            "parameter name",
                            self.cursor.current_kind(),
                            self.cursor.current_span(),
                        ))
                    }
                },
            }
        }
        if !pending.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedType(close),
                self.cursor.current_span(),
            ));
        }
        Ok(fields)
    }

    fn parse_entry(&mut self, close: TokenKind, mode: EntryMode) -> Result<Entry, ParseError> {
        let ty = self.parse_entry_type(mode)?;
        let current = self.cursor.current_kind();
        if current == TokenKind::Comma || current == close {
            return Ok(Entry { name: None, ty });
        }

        if let Some(name) = as_plain_name(&ty) {
            let name = name.clone();
            let ty = self.parse_entry_type(mode)?;
            return Ok(Entry {
                name: Some(name),
                ty,
            });
        }

        // `m [N]T` was read as the instantiation `m[N]`; it is a name and an
        // array type.
        if let TypeExpr::Named(NamedType {
            package: None,
            name,
            args,
        }) = ty
        {
            if args.len() == 1 {
                let len = args[0].to_string();
                let elem = self.parse_type()?;
                return Ok(Entry {
                    name: Some(name),
                    ty: TypeExpr::Array {
                        len,
                        elem: Box::new(elem),
                    },
                });
            }
        }

        Err(ParseError::unexpected(
            "`,` or closing delimiter",
            current,
            self.cursor.current_span(),
        ))
    }

    fn parse_entry_type(&mut self, mode: EntryMode) -> Result<TypeExpr, ParseError> {
        match mode {
            EntryMode::Param => self.parse_type(),
            EntryMode::Constraint => self.parse_constraint(),
        }
    }

    /// `Term { | Term }` where `Term = [~] Type`.
    fn parse_constraint(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.parse_term()?;
        if !self.cursor.check(TokenKind::Pipe) {
            return Ok(first);
        }
        let mut terms = vec![first];
        while self.cursor.eat(TokenKind::Pipe) {
            terms.push(self.parse_term()?);
        }
        Ok(TypeExpr::Union(terms))
    }

    fn parse_term(&mut self) -> Result<TypeExpr, ParseError> {
        if self.cursor.eat(TokenKind::Tilde) {
            Ok(TypeExpr::Tilde(Box::new(self.parse_type()?)))
        } else {
            self.parse_type()
        }
    }

    /// `{ Elem ; ... }` after `interface`.
    fn parse_interface_body(&mut self) -> Result<InterfaceType, ParseError> {
        self.cursor.expect(TokenKind::LBrace, "`{`")?;
        let mut elems = Vec::new();
        loop {
            self.cursor.skip_semicolons();
            if self.cursor.eat(TokenKind::RBrace) {
                return Ok(InterfaceType { elems });
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed("interface body"));
            }
            elems.push(self.parse_interface_elem()?);
            self.cursor.expect_terminator()?;
        }
    }

    fn parse_interface_elem(&mut self) -> Result<InterfaceElem, ParseError> {
        if self.cursor.check(TokenKind::Ident) {
            match self.cursor.peek_kind(1) {
                TokenKind::LParen => {
                    let (name, span) = self.cursor.expect_ident()?;
                    let ty = self.parse_signature(None)?;
                    return Ok(InterfaceElem::Method(MethodSpec {
                        name: Ident::new(name, span),
                        ty,
                    }));
                }
                // `Get[T any](...)` is a method; `Base[T]` is an embed.
                TokenKind::LBracket => {
                    let generic_method = self.speculate(|p| {
                        let (name, span) = p.cursor.expect_ident()?;
                        let type_params = p.parse_type_params()?;
                        p.cursor.expect(TokenKind::LParen, "`(`")?;
                        Ok((Ident::new(name, span), type_params))
                    });
                    if let Some((name, type_params)) = generic_method {
                        // Back up over the `(` the speculation consumed.
                        self.cursor.set_position(self.cursor.position() - 1);
                        let ty = self.parse_signature(Some(type_params))?;
                        return Ok(InterfaceElem::Method(MethodSpec { name, ty }));
                    }
                }
                _ => {}
            }
        }
        self.parse_constraint().map(InterfaceElem::Embed)
    }

    /// `{ Field ; ... }` after `struct`.
    fn parse_struct_body(&mut self) -> Result<FieldList, ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace, "`{`")?;
        let mut fields = Vec::new();
        loop {
            self.cursor.skip_semicolons();
            if self.cursor.check(TokenKind::RBrace) {
                let close = self.cursor.advance();
                return Ok(FieldList::new(fields, open.span.merge(close.span)));
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed("struct body"));
            }
            fields.push(self.parse_struct_field()?);
            self.cursor.expect_terminator()?;
        }
    }

    /// `a, b T "tag"` or an embedded `T`, `*T`, `pkg.T`, `T[Args]`.
    fn parse_struct_field(&mut self) -> Result<Field, ParseError> {
        let embedded = match self.cursor.current_kind() {
            TokenKind::Star => true,
            TokenKind::Ident => match self.cursor.peek_kind(1) {
                TokenKind::Dot
                | TokenKind::RBrace
                | TokenKind::String
                | TokenKind::RawString
                | TokenKind::Semicolon { .. } => true,
                TokenKind::LBracket => self.embeds_instantiation(),
                _ => false,
            },
            found => {
                return Err(ParseError::unexpected(
                    "field name or embedded type",
                    found,
                    self.cursor.current_span(),
                ))
            }
        };

        let (names, ty) = if embedded {
            (SmallVec::new(), self.parse_type()?)
        } else {
            let mut names = SmallVec::new();
            loop {
                let (name, span) = self.cursor.expect_ident()?;
                names.push(Ident::new(name, span));
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            (names, self.parse_type()?)
        };

        let tag = match self.cursor.current_kind() {
            TokenKind::String | TokenKind::RawString => {
                let token = self.cursor.advance();
                Some(self.cursor.text(token.span).to_owned())
            }
            _ => None,
        };
        Ok(Field { names, ty, tag })
    }

    /// Whether `Name[...]` at the cursor is an embedded instantiation rather
    /// than a field named `Name` with an array type. Does not move the cursor.
    fn embeds_instantiation(&mut self) -> bool {
        let start = self.cursor.position();
        let embedded = self
            .speculate(|p| {
                p.parse_type_name()?;
                Ok(p.cursor.check_semicolon()
                    || matches!(
                        p.cursor.current_kind(),
                        TokenKind::RBrace | TokenKind::String | TokenKind::RawString
                    ))
            })
            .unwrap_or(false);
        self.cursor.set_position(start);
        embedded
    }
}

#[cfg(test)]
mod tests;
