//! Event tracer: a pure diagnostics observer the parser calls into on
//! entry/exit of grammar rules and on token assertions.
//!
//! A `Tracer` implementation must have zero effect on parser output — it
//! exists purely so a caller can build a readable trace of the parse
//! (e.g. an indented call tree) without the parser itself depending on any
//! particular presentation. [`NullTracer`] is the default, no-op sink.
//! Independent of this trait, the parser also emits `tracing` spans/events
//! at the same points, for callers who just want ambient structured
//! logging and never implement `Tracer` at all.

use crate::lexer::TokenKind;

pub trait Tracer {
    /// Called on entering a grammar rule, e.g. `"parseExpression"`.
    fn enter(&mut self, rule: &str) {
        let _ = rule;
    }

    /// Called on leaving a grammar rule.
    fn exit(&mut self, rule: &str) {
        let _ = rule;
    }

    /// Called for an arbitrary point-in-time event, e.g. `"absorbed trailing comment"`.
    fn event(&mut self, message: &str) {
        let _ = message;
    }

    /// Called when the parser asserts the current token's kind.
    fn assert_current(&mut self, expected: TokenKind, actual: TokenKind) {
        let _ = (expected, actual);
    }

    /// Called when the parser asserts the next token's kind.
    fn assert_next(&mut self, expected: TokenKind, actual: TokenKind) {
        let _ = (expected, actual);
    }

    /// Called when a non-fatal parse error is recorded.
    fn error(&mut self, message: &str) {
        let _ = message;
    }
}

/// The default tracer: every method is a no-op. Used whenever a caller
/// does not supply their own [`Tracer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTracer;

impl Tracer for NullTracer {}

/// A tracer that records every event in order, for tests and debugging.
/// Maintains only an indentation counter for pretty-printing; it does not
/// and cannot influence the parse itself.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    pub log: Vec<String>,
    depth: usize,
}

impl Tracer for RecordingTracer {
    fn enter(&mut self, rule: &str) {
        self.log.push(format!("{}> {}", "  ".repeat(self.depth), rule));
        self.depth += 1;
    }

    fn exit(&mut self, rule: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.log.push(format!("{}< {}", "  ".repeat(self.depth), rule));
    }

    fn event(&mut self, message: &str) {
        self.log.push(format!("{}- {}", "  ".repeat(self.depth), message));
    }

    fn assert_current(&mut self, expected: TokenKind, actual: TokenKind) {
        self.log.push(format!(
            "{}? current expected={:?} actual={:?}",
            "  ".repeat(self.depth),
            expected,
            actual
        ));
    }

    fn assert_next(&mut self, expected: TokenKind, actual: TokenKind) {
        self.log.push(format!(
            "{}? next expected={:?} actual={:?}",
            "  ".repeat(self.depth),
            expected,
            actual
        ));
    }

    fn error(&mut self, message: &str) {
        self.log.push(format!("{}! {}", "  ".repeat(self.depth), message));
    }
}
