//! File structure and top-level declarations.

use mane_ir::{
    Decl, FuncDecl, Ident, ImportSpec, SourceUnit, Span, TokenKind, TypeSpec, ValueDecl,
    ValueKeyword,
};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `PackageClause ; { ImportDecl ; } { TopLevelDecl ; }`
    pub(crate) fn parse_file(&mut self, path: &str) -> SourceUnit {
        self.cursor.skip_semicolons();
        let package = match self.parse_package_clause() {
            Ok(ident) => ident,
            Err(error) => {
                self.report(error);
                Ident::new("", Span::DUMMY)
            }
        };

        let mut imports = Vec::new();
        loop {
            self.cursor.skip_semicolons();
            if !self.cursor.check(TokenKind::Import) {
                break;
            }
            let result = self
                .parse_import_decl(&mut imports)
                .and_then(|()| self.cursor.expect_terminator());
            if let Err(error) = result {
                self.report(error);
                self.recover_to_top_level();
            }
        }

        let mut decls = Vec::new();
        loop {
            self.cursor.skip_semicolons();
            if self.cursor.is_at_end() {
                break;
            }
            let result = self.parse_top_level_decl().and_then(|decl| {
                self.cursor.expect_terminator()?;
                Ok(decl)
            });
            match result {
                Ok(decl) => decls.push(decl),
                Err(error) => {
                    self.report(error);
                    self.recover_to_top_level();
                }
            }
        }

        SourceUnit {
            path: path.to_owned(),
            package,
            imports,
            decls,
        }
    }

    fn parse_package_clause(&mut self) -> Result<Ident, ParseError> {
        if !self.cursor.check(TokenKind::Package) {
            return Err(ParseError::new(
                ParseErrorKind::MissingPackageClause,
                self.cursor.current_span(),
            ));
        }
        self.cursor.advance();
        let (name, span) = self.cursor.expect_ident()?;
        self.cursor.expect_terminator()?;
        Ok(Ident::new(name, span))
    }

    /// `import spec` or `import ( spec ; ... )`
    fn parse_import_decl(&mut self, imports: &mut Vec<ImportSpec>) -> Result<(), ParseError> {
        self.cursor.expect(TokenKind::Import, "`import`")?;
        if !self.cursor.eat(TokenKind::LParen) {
            imports.push(self.parse_import_spec()?);
            return Ok(());
        }
        loop {
            self.cursor.skip_semicolons();
            if self.cursor.eat(TokenKind::RParen) {
                return Ok(());
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed("import group"));
            }
            imports.push(self.parse_import_spec()?);
            self.cursor.expect_terminator()?;
        }
    }

    /// `[name | .] "path"`
    fn parse_import_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let start = self.cursor.current_span();
        let name = match self.cursor.current_kind() {
            TokenKind::Ident => {
                let (name, span) = self.cursor.expect_ident()?;
                Some(Ident::new(name, span))
            }
            TokenKind::Dot => {
                let token = self.cursor.advance();
                Some(Ident::new(".", token.span))
            }
            _ => None,
        };
        let token = self.cursor.current();
        if !matches!(token.kind, TokenKind::String | TokenKind::RawString) {
            return Err(ParseError::unexpected(
                "import path",
                token.kind,
                token.span,
            ));
        }
        self.cursor.advance();
        let path = unquote(self.cursor.text(token.span)).to_owned();
        Ok(ImportSpec {
            name,
            path,
            span: start.merge(token.span),
        })
    }

    fn parse_top_level_decl(&mut self) -> Result<Decl, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Type => Ok(Decl::Type(self.parse_type_decl()?)),
            TokenKind::Func => Ok(Decl::Func(self.parse_func_decl()?)),
            TokenKind::Var => Ok(Decl::Value(self.parse_value_decl(ValueKeyword::Var)?)),
            TokenKind::Const => Ok(Decl::Value(self.parse_value_decl(ValueKeyword::Const)?)),
            found => Err(ParseError::unexpected(
                "declaration",
                found,
                self.cursor.current_span(),
            )),
        }
    }

    /// `type spec` or `type ( spec ; ... )`
    fn parse_type_decl(&mut self) -> Result<Vec<TypeSpec>, ParseError> {
        self.cursor.expect(TokenKind::Type, "`type`")?;
        if !self.cursor.eat(TokenKind::LParen) {
            return Ok(vec![self.parse_type_spec()?]);
        }
        let mut specs = Vec::new();
        loop {
            self.cursor.skip_semicolons();
            if self.cursor.eat(TokenKind::RParen) {
                return Ok(specs);
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed("type group"));
            }
            specs.push(self.parse_type_spec()?);
            self.cursor.expect_terminator()?;
        }
    }

    /// `Name [TypeParams] [=] Type`
    fn parse_type_spec(&mut self) -> Result<TypeSpec, ParseError> {
        let (name, name_span) = self.cursor.expect_ident()?;
        // `[N * 2]int` looks like `[P *C]` until the length fails to parse
        // as a constraint; fall back to an array type then.
        let type_params = if self.at_type_param_list() {
            self.speculate(|p| p.parse_type_params())
        } else {
            None
        };
        let alias = self.cursor.eat(TokenKind::Eq);
        let ty = self.parse_type()?;
        Ok(TypeSpec {
            name: Ident::new(name, name_span),
            type_params,
            alias,
            ty,
            span: name_span.merge(self.cursor.previous_span()),
        })
    }

    /// After a type name, `[` opens either a type parameter list or an array
    /// length. It is a parameter list when the first entry is a name followed
    /// by something that can only start a constraint.
    fn at_type_param_list(&self) -> bool {
        self.cursor.check(TokenKind::LBracket)
            && self.cursor.peek_kind(1) == TokenKind::Ident
            && matches!(
                self.cursor.peek_kind(2),
                TokenKind::Ident
                    | TokenKind::Comma
                    | TokenKind::Star
                    | TokenKind::Tilde
                    | TokenKind::LBracket
                    | TokenKind::LParen
                    | TokenKind::Arrow
                    | TokenKind::Interface
                    | TokenKind::Func
                    | TokenKind::Map
                    | TokenKind::Chan
                    | TokenKind::Struct
            )
    }

    /// `func [(recv)] Name [TypeParams] Signature [Body]`
    fn parse_func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        let start = self.cursor.expect(TokenKind::Func, "`func`")?.span;
        let recv = if self.cursor.check(TokenKind::LParen) {
            Some(self.parse_params()?)
        } else {
            None
        };
        let (name, name_span) = self.cursor.expect_ident()?;
        let type_params = if self.cursor.check(TokenKind::LBracket) {
            Some(self.parse_type_params()?)
        } else {
            None
        };
        let ty = self.parse_signature(type_params)?;
        if self.cursor.check(TokenKind::LBrace) {
            self.skip_block("function body")?;
        }
        Ok(FuncDecl {
            recv,
            name: Ident::new(name, name_span),
            ty,
            span: start.merge(self.cursor.previous_span()),
        })
    }

    /// `var`/`const`, keeping only the bound names.
    fn parse_value_decl(&mut self, keyword: ValueKeyword) -> Result<ValueDecl, ParseError> {
        let start = self.cursor.advance().span;
        let mut names = Vec::new();
        if self.cursor.eat(TokenKind::LParen) {
            loop {
                self.cursor.skip_semicolons();
                if self.cursor.eat(TokenKind::RParen) {
                    break;
                }
                if self.cursor.is_at_end() {
                    return Err(self.unclosed("declaration group"));
                }
                self.parse_value_names(&mut names)?;
                self.skip_value_spec(true);
                self.cursor.expect_terminator()?;
            }
        } else {
            self.parse_value_names(&mut names)?;
            self.skip_value_spec(false);
        }
        Ok(ValueDecl {
            keyword,
            names,
            span: start.merge(self.cursor.previous_span()),
        })
    }

    fn parse_value_names(&mut self, names: &mut Vec<Ident>) -> Result<(), ParseError> {
        loop {
            let (name, span) = self.cursor.expect_ident()?;
            names.push(Ident::new(name, span));
            if !self.cursor.eat(TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    /// Skip a value spec's type and initializer, up to the terminating `;`
    /// (or the group's closing `)`), balancing nested delimiters.
    fn skip_value_spec(&mut self, grouped: bool) {
        let mut depth = 0usize;
        loop {
            let kind = self.cursor.current_kind();
            match kind {
                TokenKind::Eof => return,
                _ if depth == 0 && kind.is_semicolon() => return,
                TokenKind::RParen if depth == 0 && grouped => return,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.cursor.advance();
        }
    }

    /// Skip a `{ ... }` block including nested blocks.
    pub(crate) fn skip_block(&mut self, what: &'static str) -> Result<(), ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace, "`{`")?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.cursor.advance().kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnclosedDelimiter(what),
                        open.span,
                    ))
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Skip to the next declaration keyword at the start of a line, outside
    /// any delimiters. Always consumes at least one token.
    fn recover_to_top_level(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.cursor.advance().kind {
                TokenKind::Eof => return,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            let at_line_start = self.cursor.previous_kind().is_some_and(TokenKind::is_semicolon);
            if depth == 0 && at_line_start && self.cursor.current_kind().starts_top_level_decl() {
                return;
            }
            if self.cursor.is_at_end() {
                return;
            }
        }
    }

    pub(crate) fn unclosed(&self, what: &'static str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnclosedDelimiter(what),
            self.cursor.current_span(),
        )
    }
}

/// Strip the surrounding quotes or backticks of a string literal.
fn unquote(literal: &str) -> &str {
    literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or("")
}
