//! Pratt/TDOP parser for the build-file dialect.
//!
//! Prefix and infix dispatch are implemented as exhaustive `match`es on
//! [`TokenKind`] rather than a runtime function-pointer table: the source
//! material uses dynamic method references keyed by token kind, which has
//! no equivalent concern in Rust, so there is nothing to keep a table for.
//!
//! Parser state is just `(pos, errors)` plus an optional [`Tracer`]. The
//! convention throughout is that every `parse_*` routine leaves `current`
//! sitting on the *last* token it consumed; advancing past that token is
//! always the caller's job. This mirrors the teacher's own parser
//! conventions and keeps each routine's token bookkeeping local.

use crate::ast::*;
use crate::error::{ParseError, ParseErrors};
use crate::lexer::{Token, TokenKind};
use crate::precedence::{precedence_of, Precedence};
use crate::tracer::{NullTracer, Tracer};

pub struct Parser<'t> {
    tokens: Vec<Token>,
    pos: usize,
    errors: ParseErrors,
    tracer: Box<dyn Tracer + 't>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_tracer(tokens, NullTracer)
    }

    pub fn with_tracer(tokens: Vec<Token>, tracer: impl Tracer + 't) -> Self {
        let tokens = if tokens.is_empty() {
            vec![Token::eof(0)]
        } else {
            tokens
        };
        Self {
            tokens,
            pos: 0,
            errors: ParseErrors::default(),
            tracer: Box::new(tracer),
        }
    }

    /// Parses a full token vector into a [`Root`] plus any accumulated
    /// non-fatal errors.
    pub fn parse(tokens: Vec<Token>) -> (Root, Vec<ParseError>) {
        let mut parser = Parser::new(tokens);
        parser.parse_program()
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Bounds-checked one-token lookahead; never reads past the final
    /// (`EOF`) token.
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos + 1).unwrap_or_else(|| self.tokens.last().unwrap())
    }

    fn peek2(&self) -> &Token {
        self.tokens.get(self.pos + 2).unwrap_or_else(|| self.tokens.last().unwrap())
    }

    /// `getNextToken`: advances one step. Bounds-checked — never advances
    /// past the final `EOF` token.
    fn get_next_token(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// `getNextRealToken`: advances one step, then skips any
    /// `DOUBLE_NEW_LINE` tokens.
    fn get_next_real_token(&mut self) {
        self.get_next_token();
        while self.current().kind == TokenKind::DoubleNewLine {
            self.get_next_token();
        }
    }

    /// `getNextTokenOfTypeOrFail`: advances only if the *next* token has
    /// the expected kind; otherwise records a `NextTokenError` and leaves
    /// the cursor in place.
    fn expect_next(&mut self, expected: TokenKind) -> bool {
        if self.peek().kind == expected {
            self.get_next_token();
            self.tracer.assert_next(expected, expected);
            true
        } else {
            let actual = self.peek().kind;
            self.tracer.assert_next(expected, actual);
            self.errors.push(ParseError::NextTokenError { expected, actual });
            false
        }
    }

    fn push_error(&mut self, err: ParseError) {
        tracing::debug!(error = %err, "recording non-fatal parse error");
        self.tracer.error(&err.to_string());
        self.errors.push(err);
    }

    // ---- top level -------------------------------------------------

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_program(&mut self) -> (Root, Vec<ParseError>) {
        self.tracer.enter("parseProgram");
        if self.current().kind == TokenKind::DoubleNewLine {
            self.get_next_token();
        }
        let mut statements = Vec::new();
        while self.current().kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.get_next_real_token();
        }
        self.tracer.exit("parseProgram");
        let errors = std::mem::take(&mut self.errors).into_inner();
        (Root { statements }, errors)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_statement(&mut self) -> Option<Statement> {
        self.tracer.enter("parseStatement");
        let result = match self.current().kind {
            TokenKind::Def => self.parse_function_definition().map(Statement::FunctionDefinition),
            TokenKind::Return | TokenKind::Comment => self.parse_comment_or_next_statement(),
            _ => self.parse_expression_statement().map(Statement::Expression),
        };
        self.tracer.exit("parseStatement");
        result
    }

    /// Shared dispatch for `RETURN` and `COMMENT`: there is no dedicated
    /// `ReturnStatement` node. A `return expr` line is parsed by treating
    /// the `return` token itself as a pseudo leading-comment carrier, then
    /// recursing into the next real statement and attaching that
    /// pseudo-comment as its leading comment. This is a faithful
    /// replication of the documented quirk (see DESIGN.md, Open Question
    /// on RETURN/COMMENT dispatch), not a bug in this implementation.
    fn parse_comment_or_next_statement(&mut self) -> Option<Statement> {
        if self.current().kind == TokenKind::Comment {
            let first_token = self.current().clone();
            let comment = self.current_comment_group();
            self.get_next_token();
            if self.current().kind == TokenKind::DoubleNewLine {
                return Some(Statement::Comment(CommentStatement {
                    token: first_token,
                    comment,
                }));
            }
            let mut next = self.parse_statement()?;
            next.attach_leading(comment);
            return Some(next);
        }

        let comment_token = self.current().clone();
        let comment = Comment::Single(SingleLineComment {
            text: comment_token.value.clone(),
            token: comment_token.clone(),
        });
        self.get_next_token();
        if self.current().kind == TokenKind::DoubleNewLine {
            return Some(Statement::Comment(CommentStatement {
                token: comment_token,
                comment,
            }));
        }
        let mut next = self.parse_statement()?;
        next.attach_leading(comment);
        Some(next)
    }

    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        self.tracer.enter("parseExpressionStatement");
        let token = self.current().clone();
        let expression = self.parse_expression(Precedence::Lowest, None);
        self.tracer.exit("parseExpressionStatement");
        Some(ExpressionStatement {
            token,
            expression,
            comments: CommentMap::empty(),
        })
    }

    /// Record the opening token's scope `S`; repeatedly parse statements
    /// while the *next* real token's scope is still `>= S`. The dedent test
    /// is a non-consuming lookahead: advancing only happens when the next
    /// real token is confirmed to still belong to this block, so — per the
    /// crate's convention that every `parse_*` routine leaves `current` on
    /// the last token it consumed — this leaves `current` on the block's
    /// final body token rather than stepping one token past the dedent,
    /// which would otherwise make the enclosing routine's own advance skip
    /// the statement that follows the block.
    fn parse_block_statement(&mut self) -> BlockStatement {
        self.tracer.enter("parseBlockStatement");
        let token = self.current().clone();
        let scope = token.scope;
        let mut statements = Vec::new();
        loop {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            let next = self.peek_real_token();
            if next.kind == TokenKind::Eof || next.scope < scope {
                break;
            }
            self.get_next_real_token();
        }
        self.tracer.exit("parseBlockStatement");
        BlockStatement { token, statements }
    }

    /// Non-consuming lookahead at the token `get_next_real_token` would land
    /// on, without moving `pos`. Mirrors that method's own bounded-advance-
    /// then-skip-`DOUBLE_NEW_LINE` logic exactly, just read-only.
    fn peek_real_token(&self) -> &Token {
        let last = self.tokens.len() - 1;
        let mut idx = self.pos;
        if idx < last {
            idx += 1;
        }
        while self.tokens[idx].kind == TokenKind::DoubleNewLine && idx < last {
            idx += 1;
        }
        &self.tokens[idx]
    }

    // ---- expressions -------------------------------------------------

    #[tracing::instrument(level = "trace", skip(self, leading_comment))]
    fn parse_expression(
        &mut self,
        min_prec: Precedence,
        leading_comment: Option<Comment>,
    ) -> Option<Expression> {
        self.tracer.enter("parseExpression");
        let kind = self.current().kind;
        let mut left = match self.parse_prefix(kind) {
            Some(expr) => expr,
            None => {
                self.push_error(ParseError::MissingPrefixParseFunctionError { kind });
                self.tracer.exit("parseExpression");
                return None;
            }
        };
        if let Some(comment) = leading_comment {
            left.attach_leading(comment);
        }

        loop {
            let next = self.peek().clone();
            if !is_infix_kind(next.kind) {
                break;
            }
            if !(min_prec < precedence_of(&next.value)) {
                break;
            }
            self.get_next_token();
            match self.parse_infix(next.kind, left) {
                Some(expr) => left = expr,
                None => {
                    self.tracer.exit("parseExpression");
                    return None;
                }
            }
        }

        if self.peek().kind == TokenKind::Comment {
            self.get_next_token();
            let comment = self.current_comment_group();
            left.attach_trailing(comment);
        }

        self.tracer.exit("parseExpression");
        Some(left)
    }

    fn parse_prefix(&mut self, kind: TokenKind) -> Option<Expression> {
        match kind {
            TokenKind::Ident | TokenKind::TypeHint | TokenKind::None_ => {
                Some(Expression::Identifier(self.parse_identifier()))
            }
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::String => Some(self.parse_string_literal(StringPrefix::Plain)),
            TokenKind::FString => Some(self.parse_string_literal(StringPrefix::F)),
            TokenKind::RString => Some(self.parse_string_literal(StringPrefix::R)),
            TokenKind::BString => Some(self.parse_string_literal(StringPrefix::B)),
            TokenKind::UString => Some(self.parse_string_literal(StringPrefix::U)),
            TokenKind::Docstring => Some(self.parse_string_literal(StringPrefix::Doc)),
            TokenKind::True | TokenKind::False => Some(self.parse_boolean_literal()),
            TokenKind::Bang | TokenKind::Minus => Some(self.parse_prefix_expression()),
            TokenKind::OpenParen => self.parse_grouped_expression(),
            TokenKind::OpenBracket => Some(self.parse_array_literal()),
            TokenKind::OpenBrace => Some(self.parse_map_literal()),
            _ => None,
        }
    }

    fn parse_infix(&mut self, kind: TokenKind, left: Expression) -> Option<Expression> {
        match kind {
            TokenKind::OpenParen => self.parse_call_expression(left),
            TokenKind::OpenBracket => self.parse_index_expression(left),
            TokenKind::Dot => Some(self.parse_dot_expression(left)),
            _ => Some(self.parse_infix_expression(left)),
        }
    }

    fn parse_identifier(&mut self) -> Identifier {
        let token = self.current().clone();
        Identifier {
            value: token.value.clone(),
            token,
            comments: CommentMap::empty(),
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current().clone();
        match token.value.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(IntegerLiteral {
                token,
                value,
                comments: CommentMap::empty(),
            })),
            Err(_) => {
                self.push_error(ParseError::IntegerParseError {
                    value: token.value.clone(),
                });
                None
            }
        }
    }

    fn parse_string_literal(&mut self, prefix: StringPrefix) -> Expression {
        let token = self.current().clone();
        Expression::StringLiteral(StringLiteral {
            value: token.value.clone(),
            token,
            prefix,
            comments: CommentMap::empty(),
        })
    }

    fn parse_boolean_literal(&mut self) -> Expression {
        let token = self.current().clone();
        let value = token.kind == TokenKind::True;
        Expression::BooleanLiteral(BooleanLiteral {
            token,
            value,
            comments: CommentMap::empty(),
        })
    }

    fn parse_prefix_expression(&mut self) -> Expression {
        let token = self.current().clone();
        let operator = token.value.clone();
        self.get_next_token();
        let right = self.parse_expression(Precedence::Prefix, None);
        Expression::PrefixExpression(Box::new(PrefixExpression {
            token,
            operator,
            right,
            comments: CommentMap::empty(),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Expression {
        let token = self.current().clone();
        let operator = token.value.clone();
        let prec = precedence_of(&token.value);
        self.get_next_token();
        let right = self.parse_expression(prec, None);
        Expression::InfixExpression(Box::new(InfixExpression {
            token,
            operator,
            left: Some(left),
            right,
            comments: CommentMap::empty(),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.get_next_token();
        let expr = self.parse_expression(Precedence::Lowest, None);
        if !self.expect_next(TokenKind::CloseParen) {
            return expr;
        }
        expr
    }

    fn parse_dot_expression(&mut self, left: Expression) -> Expression {
        let token = self.current().clone();
        self.get_next_token();
        let right = self.parse_expression(Precedence::Member, None);
        Expression::DotExpression(Box::new(DotExpression {
            token,
            left: Some(left),
            right,
            comments: CommentMap::empty(),
        }))
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current().clone();
        let args = self.parse_expression_list(TokenKind::CloseParen);
        Some(Expression::CallExpression(Box::new(CallExpression {
            token,
            function: Some(function),
            args: Some(args),
            comments: CommentMap::empty(),
        })))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current().clone();
        self.get_next_token();
        let index = self.parse_expression(Precedence::Lowest, None);
        if !self.expect_next(TokenKind::CloseBracket) {
            return None;
        }
        Some(Expression::IndexExpression(Box::new(IndexExpression {
            token,
            left: Some(left),
            index,
            comments: CommentMap::empty(),
        })))
    }

    fn parse_array_literal(&mut self) -> Expression {
        let token = self.current().clone();
        let elements = self.parse_expression_list(TokenKind::CloseBracket);
        Expression::ArrayLiteral(ArrayLiteral {
            token,
            elements,
            comments: CommentMap::empty(),
        })
    }

    fn parse_map_literal(&mut self) -> Expression {
        let token = self.current().clone();
        let map = self.parse_key_value_expression_list();
        Expression::MapLiteral(MapLiteral {
            token,
            map,
            comments: CommentMap::empty(),
        })
    }

    // ---- shared comma-separated list parsing -------------------------
    //
    // One generic core used by ExpressionList, KeyValueExpressionList, and
    // ParameterList, per the Open Question's recommendation to unify the
    // duplicated comma/comment state machine (see DESIGN.md). `current()`
    // starts on the opening delimiter and ends on the closing delimiter.

    fn parse_comma_list<T>(
        &mut self,
        end: TokenKind,
        mut parse_element: impl FnMut(&mut Self, Option<Comment>) -> Option<T>,
        mut attach_trailing: impl FnMut(&mut T, Comment),
    ) -> (Vec<T>, Option<Comment>) {
        let mut elements = Vec::new();
        let mut list_trailing = None;

        if self.peek().kind == end {
            self.get_next_token();
            return (elements, list_trailing);
        }

        self.get_next_token();
        let mut leading = self.take_leading_comment();
        loop {
            let element = parse_element(self, leading.take());
            if let Some(el) = element {
                elements.push(el);
            }

            // absorb a trailing comment for the element just parsed
            if self.peek().kind == TokenKind::Comment && element_exists(&elements) {
                self.get_next_token();
                let comment = self.current_comment_group();
                if let Some(last) = elements.last_mut() {
                    attach_trailing(last, comment);
                }
            }

            if self.peek().kind != TokenKind::Comma {
                break;
            }
            self.get_next_token(); // on comma
            self.get_next_token(); // past comma

            if self.current().kind == TokenKind::Comment {
                let comment = self.current_comment_group();
                if self.peek().kind == end {
                    // trailing comma + trailing comment: list's own trailing
                    list_trailing = Some(comment);
                    self.get_next_token();
                    break;
                } else {
                    leading = Some(comment);
                    self.get_next_token();
                    continue;
                }
            }

            if self.current().kind == end {
                break;
            }
        }

        if self.peek().kind == TokenKind::Comment {
            self.get_next_token();
            list_trailing = Some(self.current_comment_group());
        }

        if self.peek().kind == end {
            self.get_next_token();
        } else if self.current().kind != end {
            self.push_error(ParseError::NextTokenError {
                expected: end,
                actual: self.peek().kind,
            });
        }

        (elements, list_trailing)
    }

    fn current_comment(&self) -> Comment {
        Comment::Single(SingleLineComment {
            text: self.current().value.clone(),
            token: self.current().clone(),
        })
    }

    /// Reads the comment at `current()` plus any immediately-contiguous
    /// `COMMENT` tokens that follow it, gluing them into a `CommentGroup`
    /// (single-line if only one). Leaves `current()` on the last comment
    /// token of the run. This is the "multi-line mode" the decision table
    /// calls for at every comment-attachment position — without it, all but
    /// the last of several contiguous `#` lines would be silently dropped
    /// rather than surfacing anywhere in the tree.
    fn current_comment_group(&mut self) -> Comment {
        let mut comment = self.current_comment();
        while self.peek().kind == TokenKind::Comment {
            self.get_next_token();
            comment = comment.push(SingleLineComment {
                text: self.current().value.clone(),
                token: self.current().clone(),
            });
        }
        comment
    }

    /// If `current()` is a `COMMENT` immediately before the first element,
    /// captures the whole contiguous comment run and advances past it.
    fn take_leading_comment(&mut self) -> Option<Comment> {
        if self.current().kind == TokenKind::Comment {
            let comment = self.current_comment_group();
            self.get_next_token();
            Some(comment)
        } else {
            None
        }
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> ExpressionList {
        let token = self.current().clone();
        let (elements, trailing) = self.parse_comma_list(
            end,
            |p, leading| p.parse_expression_list_element(leading),
            |el, comment| el.attach_trailing(comment),
        );
        ExpressionList {
            token,
            elements,
            comments: CommentMap {
                leading: None,
                trailing,
            },
        }
    }

    /// Parses one `ExpressionList` element, then applies the two post-hoc
    /// promotions: `ASSIGN` following folds into a keyword-argument
    /// `InfixExpression`; `DOT` following folds into a `DotExpression`.
    fn parse_expression_list_element(&mut self, leading: Option<Comment>) -> Option<Expression> {
        let mut expr = self.parse_expression(Precedence::Lowest, leading)?;
        loop {
            match self.peek().kind {
                TokenKind::Assign => {
                    let token = self.peek().clone();
                    self.get_next_token();
                    self.get_next_token();
                    let value = self.parse_expression(Precedence::Lowest, None);
                    expr = Expression::InfixExpression(Box::new(InfixExpression {
                        token,
                        operator: "=".to_string(),
                        left: Some(expr),
                        right: value,
                        comments: CommentMap::empty(),
                    }));
                }
                TokenKind::Dot => {
                    let token = self.peek().clone();
                    self.get_next_token();
                    self.get_next_token();
                    let right = self.parse_expression(Precedence::Member, None);
                    expr = Expression::DotExpression(Box::new(DotExpression {
                        token,
                        left: Some(expr),
                        right,
                        comments: CommentMap::empty(),
                    }));
                }
                _ => break,
            }
        }
        Some(expr)
    }

    fn parse_key_value_expression_list(&mut self) -> KeyValueExpressionList {
        let token = self.current().clone();
        let (pairs, trailing) = self.parse_comma_list(
            TokenKind::CloseBrace,
            |p, leading| p.parse_key_value_expression(leading),
            |kv, comment| kv.comments.trailing = Some(comment),
        );
        KeyValueExpressionList {
            token,
            pairs,
            comments: CommentMap {
                leading: None,
                trailing,
            },
        }
    }

    fn parse_key_value_expression(&mut self, leading: Option<Comment>) -> Option<KeyValueExpression> {
        let token = self.current().clone();
        let mut key = self.parse_expression(Precedence::Lowest, leading)?;

        // "# c between key and : in map literal" -> trailing comment of the key
        if self.peek().kind == TokenKind::Comment {
            self.get_next_token();
            key.attach_trailing(self.current_comment_group());
        }

        if !self.expect_next(TokenKind::Colon) {
            return Some(KeyValueExpression {
                token,
                key,
                value: None,
                comments: CommentMap::empty(),
            });
        }
        self.get_next_token();
        let value = self.parse_expression(Precedence::Lowest, None);
        if value.is_none() {
            self.push_error(ParseError::MapLiteralParseError {
                key: Some(key.token().value.clone()),
                value: None,
            });
        }
        Some(KeyValueExpression {
            token,
            key,
            value,
            comments: CommentMap::empty(),
        })
    }

    fn parse_parameter_list(&mut self) -> ParameterList {
        let token = self.current().clone();
        let (elements, trailing) = self.parse_comma_list(
            TokenKind::CloseParen,
            |p, leading| p.parse_parameter(leading),
            |param, comment| param.comments.trailing = Some(comment),
        );
        ParameterList {
            token,
            elements,
            comments: CommentMap {
                leading: None,
                trailing,
            },
        }
    }

    fn parse_parameter(&mut self, leading: Option<Comment>) -> Option<Parameter> {
        let token = self.current().clone();
        let mut name = Expression::Identifier(self.parse_identifier());
        if let Some(comment) = leading {
            name.attach_leading(comment);
        }

        // Only a single identifier, never a full expression (no type-hint
        // grammar beyond that) — otherwise a following `= default` would
        // be swallowed by parse_expression's assign-precedence handling.
        let mut type_hint = None;
        if self.peek().kind == TokenKind::Colon {
            self.get_next_token();
            self.get_next_token();
            type_hint = Some(Expression::Identifier(self.parse_identifier()));
        }

        let mut default_value = None;
        if self.peek().kind == TokenKind::Assign {
            self.get_next_token();
            self.get_next_token();
            default_value = self.parse_expression(Precedence::Lowest, None);
        }

        Some(Parameter {
            token,
            name,
            type_hint,
            default_value,
            comments: CommentMap::empty(),
        })
    }

    // ---- function definitions -----------------------------------------

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_function_definition(&mut self) -> Option<FunctionDefinition> {
        self.tracer.enter("parseFunctionDefinition");
        let token = self.current().clone();

        if !self.expect_next(TokenKind::Ident) {
            self.tracer.exit("parseFunctionDefinition");
            return None;
        }
        let name = self.parse_identifier();

        if !self.expect_next(TokenKind::OpenParen) {
            self.tracer.exit("parseFunctionDefinition");
            return None;
        }
        let params = self.parse_parameter_list();

        let mut type_hint = None;
        if self.peek().kind == TokenKind::Point {
            self.get_next_token();
            self.get_next_token();
            type_hint = match self.current().kind {
                TokenKind::TypeHint | TokenKind::None_ | TokenKind::Ident => {
                    Some(Expression::Identifier(self.parse_identifier()))
                }
                _ => None,
            };
        }

        if !self.expect_next(TokenKind::Colon) {
            self.tracer.exit("parseFunctionDefinition");
            return None;
        }
        self.get_next_token();
        let body = self.parse_block_statement();

        self.tracer.exit("parseFunctionDefinition");
        Some(FunctionDefinition {
            token,
            name,
            params,
            type_hint,
            body,
            comments: CommentMap::empty(),
        })
    }
}

fn element_exists<T>(elements: &[T]) -> bool {
    !elements.is_empty()
}

fn is_infix_kind(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Assign
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::LtEq
            | TokenKind::GtEq
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::ForwardSlash
            | TokenKind::Modulo
            | TokenKind::OpenParen
            | TokenKind::OpenBracket
            | TokenKind::Dot
    )
}

/// Tokenizes and parses `source` in one call, using the default identifier
/// classifier. This is the convenience entry point most callers want;
/// `tokenize`/`Parser::parse` remain available for callers who need the
/// two phases separately (e.g. to supply a custom classifier).
pub fn parse_source(source: &str) -> Result<(Root, Vec<ParseError>), crate::error::LexError> {
    let tokens = crate::lexer::Lexer::tokenize(source)?;
    Ok(Parser::parse(tokens))
}
