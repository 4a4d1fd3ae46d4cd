//! Error types for the lexer and parser.
//!
//! Two tiers, per the crate's error-handling design: a single fatal
//! [`LexError`] that aborts tokenization, and four non-fatal [`ParseError`]
//! variants that accumulate in a list without aborting parsing.

use thiserror::Error;

use crate::lexer::TokenKind;

/// Fatal lexer error. Tokenization stops immediately; no partial token list
/// is returned to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string starting near {lexeme:?}")]
    UnterminatedString { lexeme: String },
}

/// Non-fatal parser error. Pushed onto the parser's error list; the
/// offending sub-tree is omitted or left partial and parsing continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected next token to be {expected:?}, got {actual:?} instead")]
    NextTokenError {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("no prefix parse function for {kind:?} found")]
    MissingPrefixParseFunctionError { kind: TokenKind },

    #[error("could not parse {value:?} as integer")]
    IntegerParseError { value: String },

    #[error("could not parse map literal entry (key: {key:?}, value: {value:?})")]
    MapLiteralParseError {
        key: Option<String>,
        value: Option<String>,
    },
}

/// A simple collector for accumulated, non-fatal parse errors, mirroring
/// the parser's own internal error list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseErrors(pub Vec<ParseError>);

impl ParseErrors {
    pub fn push(&mut self, err: ParseError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<ParseError> {
        self.0
    }
}
