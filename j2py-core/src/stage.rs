//! The stage boundary
//!
//! A stage is a pure text-to-text rewrite. It takes the buffer by value and
//! hands back a new one, together with anything it had to leave verbatim.

use crate::error::Diagnostic;

/// Text produced by one stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutput {
    /// The rewritten buffer
    pub text: String,
    /// Constructs the stage recognised but left verbatim
    pub diagnostics: Vec<Diagnostic>,
}

impl StageOutput {
    /// Output with no diagnostics
    pub fn clean(text: String) -> Self {
        StageOutput {
            text,
            diagnostics: Vec::new(),
        }
    }
}

/// One rewrite pass of the pipeline
pub trait Stage {
    /// Short name used in diagnostics and logs
    fn name(&self) -> &'static str;

    /// Rewrite the buffer
    fn apply(&self, source: String) -> StageOutput;
}
