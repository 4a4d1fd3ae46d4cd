//! # buildsyntax
//!
//! A comment-preserving lexer and Pratt parser for a Python-shaped
//! build-file dialect — the `def`/call-expression/list/map/decorator
//! language used by Bazel-like build systems (`BUILD`, `BUILD.bazel`,
//! `.star`-adjacent files).
//!
//! This crate is deliberately narrow: it converts source text into a typed
//! [`ast::Root`] whose nodes retain enough information — including the
//! leading and trailing comments attached to the syntactically appropriate
//! node — that a caller can later round-trip the file back to source with
//! edits applied. Everything past that (BUILD-rule semantics, path
//! resolution, file I/O, evaluation) is left to the surrounding tool.
//!
//! ## Quick start
//!
//! ```rust
//! use buildsyntax::parse_source;
//!
//! let source = r#"
//! def greeting(name: str = "world") -> str:
//!     # say hi
//!     return name
//! "#;
//!
//! let (root, errors) = parse_source(source).expect("tokenize");
//! assert!(errors.is_empty());
//! assert_eq!(root.statements.len(), 1);
//! ```
//!
//! ## Two-phase pipeline
//!
//! ```text
//! source: &str -> Lexer -> Vec<Token> -> Parser -> (Root, Vec<ParseError>)
//! ```
//!
//! The lexer never sees the AST and the parser never re-reads source text;
//! callers who need to supply a custom identifier classifier (to promote
//! bare identifiers to e.g. `BUILTIN` or `RULE_NAME` kinds) drive the two
//! phases separately via [`lexer::Lexer::tokenize_with_classifier`] and
//! [`parser::Parser::parse`].
//!
//! ## Modules
//!
//! - [`lexer`]: indentation-aware tokenizer (scope tracking, triple-quoted
//!   docstrings, `f`/`r`/`b`/`u`-prefixed strings, multi-char operators).
//! - [`parser`]: Pratt/TDOP parser producing a [`ast::Root`], with the
//!   eleven-position comment-attachment rules baked into the grammar
//!   routines themselves.
//! - [`ast`]: the node types the parser produces.
//! - [`precedence`]: the lexeme-keyed operator precedence ladder.
//! - [`error`]: the fatal lexer error and the four non-fatal parser errors.
//! - [`tracer`]: an optional, side-effect-free observer for grammar-rule
//!   entry/exit and token assertions.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod precedence;
pub mod tracer;

pub use ast::{Comment, CommentMap, Expression, Root, Statement};
pub use error::{LexError, ParseError};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_source, Parser};
pub use tracer::{NullTracer, Tracer};
