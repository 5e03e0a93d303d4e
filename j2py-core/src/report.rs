//! The diagnostics pass
//!
//! The last stage leaves the text alone. Whether diagnostics collected along
//! the way make the conversion fail is decided by [`Options::strict`].

use tracing::warn;

use crate::error::{ConvertError, Result};
use crate::pipeline::Conversion;
use crate::stage::{Stage, StageOutput};

/// Conversion options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Fail when any construct was left verbatim
    pub strict: bool,
}

impl Options {
    /// Options that reject partial conversions
    pub fn strict() -> Self {
        Options { strict: true }
    }
}

/// Stage 8: identity on the text
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticsPassThrough;

impl Stage for DiagnosticsPassThrough {
    fn name(&self) -> &'static str {
        "diagnostics"
    }

    fn apply(&self, source: String) -> StageOutput {
        StageOutput::clean(source)
    }
}

/// Apply the strictness policy to a finished conversion
pub fn enforce(conversion: Conversion, options: &Options) -> Result<Conversion> {
    if !options.strict || conversion.is_complete() {
        return Ok(conversion);
    }

    warn!(
        count = conversion.diagnostics.len(),
        "strict mode rejected a partial conversion"
    );
    Err(ConvertError::Incomplete {
        diagnostics: conversion.diagnostics,
        output: conversion.output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Diagnostic, DiagnosticKind};

    fn partial() -> Conversion {
        Conversion {
            output: "x = 1".to_string(),
            diagnostics: vec![Diagnostic::new(
                "indent",
                1,
                DiagnosticKind::UnbalancedClose,
                "}",
            )],
        }
    }

    #[test]
    fn test_pass_through_is_identity() {
        let out = DiagnosticsPassThrough.apply("  a {\n}".to_string());
        assert_eq!(out.text, "  a {\n}");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_lenient_keeps_partial_output() {
        let conversion = enforce(partial(), &Options::default()).unwrap();
        assert_eq!(conversion.output, "x = 1");
        assert_eq!(conversion.diagnostics.len(), 1);
    }

    #[test]
    fn test_strict_rejects_partial_output() {
        let err = enforce(partial(), &Options::strict()).unwrap_err();
        let ConvertError::Incomplete { diagnostics, output } = err;
        assert_eq!(output, "x = 1");
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnbalancedClose);
    }

    #[test]
    fn test_strict_accepts_complete_output() {
        let complete = Conversion {
            output: "x = 1".to_string(),
            diagnostics: Vec::new(),
        };
        assert!(enforce(complete, &Options::strict()).is_ok());
    }
}
