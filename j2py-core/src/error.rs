//! Diagnostic and error types for the rewrite pipeline
//!
//! Stages never fail. When a stage recognises a construct but cannot rewrite
//! it, the text is left verbatim and a [`Diagnostic`] records why. Only the
//! strict entry point turns diagnostics into a [`ConvertError`].

use std::fmt;

use thiserror::Error;

/// Why a recognised construct was left verbatim
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Loop condition is not of the form `ident op expr`
    #[error("loop condition '{0}' is not of the form `ident op expr`")]
    UnparseableLoopCondition(String),

    /// Loop comparison operator has no range equivalent
    #[error("loop operator '{0}' has no range equivalent")]
    UnsupportedLoopOperator(String),

    /// Loop update is not an increment, decrement or compound add/subtract
    #[error("loop update '{0}' is not `++`, `--`, `+=` or `-=`")]
    UnsupportedLoopUpdate(String),

    /// Compound-assignment step is not an integer literal
    #[error("loop step '{0}' is not an integer literal")]
    NonLiteralLoopStep(String),

    /// Read method on a line reader that has no input() equivalent
    #[error("unknown read method '{0}' left untouched")]
    UnknownReadMethod(String),

    /// Print argument with `+` inside a string literal or parentheses
    #[error("print arguments '{0}' were split on every `+`")]
    AmbiguousConcatenation(String),

    /// Closing delimiter with no open block
    #[error("closing delimiter without an open block")]
    UnbalancedClose,
}

/// A construct a stage could not rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the stage that produced it
    pub stage: &'static str,
    /// 1-based line in the text as the stage saw it
    pub line: usize,
    /// What went wrong
    pub kind: DiagnosticKind,
    /// The source fragment left verbatim
    pub snippet: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        stage: &'static str,
        line: usize,
        kind: DiagnosticKind,
        snippet: impl Into<String>,
    ) -> Self {
        Diagnostic {
            stage,
            line,
            kind,
            snippet: snippet.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] line {}: {}", self.stage, self.line, self.kind)
    }
}

/// Errors surfaced by the strict conversion entry point
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// At least one construct was left verbatim
    #[error("conversion incomplete: {} construct(s) left verbatim", .diagnostics.len())]
    Incomplete {
        /// Everything the stages reported
        diagnostics: Vec<Diagnostic>,
        /// The best-effort output, still usable
        output: String,
    },
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
