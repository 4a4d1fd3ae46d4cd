//! Cursor-based lexer for the build-file dialect.
//!
//! The lexer is a single forward pass over the source bytes. It tracks two
//! cursor positions (`current`, `read = current + 1`) so multi-character
//! lexemes (`==`, `->`, triple-quoted strings) can be built up without
//! repeated re-scans, and a small amount of line state (`scope_locked`,
//! `indent`) that records each line's indentation depth for the parser to
//! use as its sole block-boundary signal.

use std::fmt;

use crate::error::LexError;

/// A lexical token. `scope` is the indentation depth (leading space count)
/// of the token's physical line, frozen at the first non-whitespace,
/// non-comment token on that line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub scope: u32,
}

impl Token {
    pub fn new(kind: TokenKind, value: String, scope: u32) -> Self {
        Self { kind, value, scope }
    }

    pub fn eof(scope: u32) -> Self {
        Self {
            kind: TokenKind::Eof,
            value: String::new(),
            scope,
        }
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::eof(0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.value)
    }
}

/// Closed set of token kinds, partitioned into symbols, reserved words,
/// type hints, and primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    // Symbols
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,
    Dot,
    Plus,
    Minus,
    Asterisk,
    ForwardSlash,
    Modulo,
    Assign,
    Bang,
    Asperand,
    PoundSign,
    Pipe,
    Ampersand,
    NewLine,
    DoubleNewLine,
    Space,
    Point,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    Eof,
    Illegal,

    // Reserved words
    True,
    False,
    None_,
    If,
    Elif,
    Else,
    For,
    Def,
    Return,
    Is,
    Not,
    With,
    As,
    And,
    Or,
    In,
    Lambda,
    Assert,
    Pass,
    Continue,

    // Type hints
    TypeHint,

    // Primitives
    Ident,
    Int,
    String,
    FString,
    RString,
    BString,
    UString,
    Docstring,
    Comment,
    Decorator,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::True
                | TokenKind::False
                | TokenKind::None_
                | TokenKind::If
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::Def
                | TokenKind::Return
                | TokenKind::Is
                | TokenKind::Not
                | TokenKind::With
                | TokenKind::As
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::In
                | TokenKind::Lambda
                | TokenKind::Assert
                | TokenKind::Pass
                | TokenKind::Continue
        )
    }

    pub fn is_type_hint(&self) -> bool {
        matches!(self, TokenKind::TypeHint)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

fn keyword_kind(ident: &str) -> Option<TokenKind> {
    Some(match ident {
        "True" => TokenKind::True,
        "False" => TokenKind::False,
        "None" => TokenKind::None_,
        "if" => TokenKind::If,
        "elif" => TokenKind::Elif,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "def" => TokenKind::Def,
        "return" => TokenKind::Return,
        "is" => TokenKind::Is,
        "not" => TokenKind::Not,
        "with" => TokenKind::With,
        "as" => TokenKind::As,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "in" => TokenKind::In,
        "lambda" => TokenKind::Lambda,
        "assert" => TokenKind::Assert,
        "pass" => TokenKind::Pass,
        "continue" => TokenKind::Continue,
        _ => return None,
    })
}

fn type_hint_kind(ident: &str) -> bool {
    matches!(
        ident,
        "str" | "bool" | "float" | "bytes" | "int" | "list" | "set" | "tuple"
    )
}

/// Total, pure hook for overriding `IDENT` classification. Must default to
/// `TokenKind::Ident` when no override applies.
pub type ClassifierFn<'a> = dyn Fn(&str) -> TokenKind + 'a;

fn default_classifier(_lexeme: &str) -> TokenKind {
    TokenKind::Ident
}

/// Cursor-based lexer. Construct with [`Lexer::new`] and drive either via
/// [`Lexer::next_token`] or the `Iterator` implementation, which yields
/// tokens until (and including) `EOF`.
pub struct Lexer<'a> {
    source: &'a [u8],
    current: usize,
    read: usize,
    line_start: usize,
    scope_locked: bool,
    indent: u32,
    classifier: Box<ClassifierFn<'a>>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_classifier(source, default_classifier)
    }

    pub fn with_classifier(source: &'a str, classifier: impl Fn(&str) -> TokenKind + 'a) -> Self {
        Self {
            source: source.as_bytes(),
            current: 0,
            read: 1,
            line_start: 0,
            scope_locked: false,
            indent: 0,
            classifier: Box::new(classifier),
            done: false,
        }
    }

    /// Tokenizes the whole source, stopping (and returning an error) if an
    /// unterminated string is encountered. On success the final token is
    /// always `EOF`.
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, LexError> {
        Self::new(source).collect_all()
    }

    pub fn tokenize_with_classifier(
        source: &'a str,
        classifier: impl Fn(&str) -> TokenKind + 'a,
    ) -> Result<Vec<Token>, LexError> {
        Self::with_classifier(source, classifier).collect_all()
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn collect_all(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Some(Ok(tok)) => {
                    let is_eof = tok.kind == TokenKind::Eof;
                    tokens.push(tok);
                    if is_eof {
                        break;
                    }
                }
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "tokenization aborted");
                    return Err(e);
                }
                None => break,
            }
        }
        tracing::trace!(token_count = tokens.len(), "tokenization complete");
        Ok(tokens)
    }

    fn at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn byte_at(&self, idx: usize) -> Option<u8> {
        self.source.get(idx).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.byte_at(self.read)
    }

    fn peek2(&self) -> Option<u8> {
        self.byte_at(self.read + 1)
    }

    fn current_byte(&self) -> Option<u8> {
        self.byte_at(self.current)
    }

    /// Advances `current` to `read`, then bumps `read` by one.
    fn consume(&mut self) -> Option<u8> {
        let b = self.current_byte();
        self.current = self.read;
        self.read += 1;
        b
    }

    /// Advances only `read`, for building a lexeme before committing.
    fn push_cursor(&mut self) {
        self.read += 1;
    }

    fn slice(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.source[start..end.min(self.source.len())]).into_owned()
    }

    fn mark_scope_lock(&mut self) {
        self.scope_locked = true;
    }

    /// Skips whitespace and blank lines, updating scope/indent state.
    /// Returns `Some(DoubleNewLine token)` if two-or-more consecutive
    /// newlines were collapsed into one.
    fn skip_whitespace(&mut self) -> Option<Token> {
        let mut newline_count = 0usize;
        loop {
            match self.current_byte() {
                Some(b' ') => {
                    let start = self.current;
                    while self.current_byte() == Some(b' ') {
                        self.current += 1;
                        self.read = self.current + 1;
                    }
                    if !self.scope_locked {
                        self.indent += (self.current - start) as u32;
                    }
                }
                Some(b'\r') => {
                    self.current += 1;
                    self.read = self.current + 1;
                }
                Some(b'\n') => {
                    newline_count += 1;
                    self.current += 1;
                    self.read = self.current + 1;
                    self.line_start = self.current;
                    self.indent = 0;
                    self.scope_locked = false;
                }
                _ => break,
            }
        }
        if newline_count >= 2 {
            Some(Token::new(TokenKind::DoubleNewLine, String::new(), 0))
        } else {
            None
        }
    }

    fn make(&mut self, kind: TokenKind, value: String) -> Token {
        self.mark_scope_lock();
        Token::new(kind, value, self.indent)
    }

    /// Produces the next token, or `None` once EOF has already been
    /// returned once. `Err` is fatal and aborts tokenization.
    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        if self.done {
            return None;
        }

        if let Some(double_nl) = self.skip_whitespace() {
            let scope = self.indent;
            return Some(Ok(Token::new(
                TokenKind::DoubleNewLine,
                double_nl.value,
                scope,
            )));
        }

        if self.at_end() {
            self.done = true;
            return Some(Ok(Token::new(TokenKind::Eof, String::new(), self.indent)));
        }

        let c = match self.current_byte() {
            Some(c) => c,
            None => {
                self.done = true;
                return Some(Ok(Token::new(TokenKind::Eof, String::new(), self.indent)));
            }
        };

        let tok = match c {
            b'#' => self.lex_comment(),
            b'\'' | b'"' => match self.lex_string(c as char, None) {
                Ok(t) => t,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            },
            b'f' | b'r' | b'b' | b'u' if self.is_string_prefix() => {
                match self.lex_prefixed_string() {
                    Ok(t) => t,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }
            b'@' => self.lex_decorator(),
            b'0'..=b'9' => self.lex_number(),
            c if is_ident_start(c) => self.lex_ident_or_keyword(),
            _ => self.lex_operator_or_illegal(),
        };

        Some(Ok(tok))
    }

    fn is_string_prefix(&self) -> bool {
        matches!(self.peek(), Some(b'\'') | Some(b'"'))
    }

    fn lex_comment(&mut self) -> Token {
        let start = self.current;
        while let Some(c) = self.current_byte() {
            if c == b'\n' {
                break;
            }
            self.current += 1;
            self.read = self.current + 1;
        }
        let text = self.slice(start, self.current);
        self.make(TokenKind::Comment, text)
    }

    fn is_quote(b: Option<u8>, q: u8) -> bool {
        b == Some(q)
    }

    /// Lexes a string body starting at the opening quote `q`. If `prefix`
    /// is `Some`, the prefix character has already been consumed by the
    /// caller and the resulting token kind reflects it; prefixed strings
    /// never become docstrings even when empty.
    fn lex_string(&mut self, q: char, prefix: Option<u8>) -> Result<Token, LexError> {
        let qb = q as u8;
        debug_assert_eq!(self.current_byte(), Some(qb));

        let is_docstring = prefix.is_none()
            && self.peek() == Some(qb)
            && self.peek2() == Some(qb);

        if is_docstring {
            self.current += 3;
            self.read = self.current + 1;
            let start = self.current;
            loop {
                if self.current_byte() == Some(qb)
                    && self.byte_at(self.current + 1) == Some(qb)
                    && self.byte_at(self.current + 2) == Some(qb)
                {
                    let text = self.slice(start, self.current);
                    self.current += 3;
                    self.read = self.current + 1;
                    return Ok(self.make(TokenKind::Docstring, text));
                }
                if self.at_end() {
                    return Err(LexError::UnterminatedString {
                        lexeme: self.slice(start, self.current),
                    });
                }
                self.current += 1;
                self.read = self.current + 1;
            }
        }

        self.current += 1;
        self.read = self.current + 1;
        let start = self.current;
        loop {
            if Self::is_quote(self.current_byte(), qb) {
                let text = self.slice(start, self.current);
                self.current += 1;
                self.read = self.current + 1;
                let kind = match prefix {
                    Some(b'f') => TokenKind::FString,
                    Some(b'r') => TokenKind::RString,
                    Some(b'b') => TokenKind::BString,
                    Some(b'u') => TokenKind::UString,
                    _ => TokenKind::String,
                };
                return Ok(self.make(kind, text));
            }
            if self.current_byte() == Some(b'\\') && self.peek().is_some() {
                self.current += 2;
                self.read = self.current + 1;
                continue;
            }
            if self.at_end() || self.current_byte() == Some(b'\n') {
                return Err(LexError::UnterminatedString {
                    lexeme: self.slice(start, self.current),
                });
            }
            self.current += 1;
            self.read = self.current + 1;
        }
    }

    fn lex_prefixed_string(&mut self) -> Result<Token, LexError> {
        let prefix = self.current_byte().unwrap();
        self.current += 1;
        self.read = self.current + 1;
        let q = self.current_byte().unwrap() as char;
        self.lex_string(q, Some(prefix))
    }

    fn lex_decorator(&mut self) -> Token {
        let start = self.current;
        self.current += 1;
        self.read = self.current + 1;
        let ident_start = self.current;
        while self
            .current_byte()
            .map(is_ident_continue)
            .unwrap_or(false)
        {
            self.current += 1;
            self.read = self.current + 1;
        }
        if self.current == ident_start {
            return self.make(TokenKind::Asperand, self.slice(start, self.current));
        }
        self.make(TokenKind::Decorator, self.slice(start, self.current))
    }

    fn lex_number(&mut self) -> Token {
        let start = self.current;
        while self
            .current_byte()
            .map(|c| c.is_ascii_digit())
            .unwrap_or(false)
        {
            self.current += 1;
            self.read = self.current + 1;
        }
        self.make(TokenKind::Int, self.slice(start, self.current))
    }

    fn lex_ident_or_keyword(&mut self) -> Token {
        let start = self.current;
        while self
            .current_byte()
            .map(is_ident_continue)
            .unwrap_or(false)
        {
            self.current += 1;
            self.read = self.current + 1;
        }
        let text = self.slice(start, self.current);
        let kind = keyword_kind(&text)
            .or_else(|| type_hint_kind(&text).then_some(TokenKind::TypeHint))
            .unwrap_or_else(|| (self.classifier)(&text));
        self.make(kind, text)
    }

    fn lex_operator_or_illegal(&mut self) -> Token {
        let start = self.current;
        let c = self.current_byte().unwrap();
        self.current += 1;
        self.read = self.current + 1;

        macro_rules! two_char {
            ($next:expr, $two:expr, $one:expr) => {{
                if self.current_byte() == Some($next) {
                    self.current += 1;
                    self.read = self.current + 1;
                    $two
                } else {
                    $one
                }
            }};
        }

        let kind = match c {
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'{' => TokenKind::OpenBrace,
            b'}' => TokenKind::CloseBrace,
            b'[' => TokenKind::OpenBracket,
            b']' => TokenKind::CloseBracket,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'.' => TokenKind::Dot,
            b'+' => TokenKind::Plus,
            b'-' => two_char!(b'>', TokenKind::Point, TokenKind::Minus),
            b'*' => TokenKind::Asterisk,
            b'/' => TokenKind::ForwardSlash,
            b'%' => TokenKind::Modulo,
            b'=' => two_char!(b'=', TokenKind::Eq, TokenKind::Assign),
            b'!' => two_char!(b'=', TokenKind::NotEq, TokenKind::Bang),
            b'<' => two_char!(b'=', TokenKind::LtEq, TokenKind::Lt),
            b'>' => two_char!(b'=', TokenKind::GtEq, TokenKind::Gt),
            b'|' => TokenKind::Pipe,
            b'&' => TokenKind::Ampersand,
            _ => TokenKind::Illegal,
        };
        self.make(kind, self.slice(start, self.current))
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
