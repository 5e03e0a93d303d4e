//! The ordered list of rewrite stages
//!
//! Later stages assume earlier ones already removed certain syntax, so the
//! order of [`Pipeline::standard`] is part of its behavior.

use tracing::{debug, debug_span};

use crate::conditional::ConditionalRewriter;
use crate::error::Diagnostic;
use crate::indent::{DepthStack, IndentRewriter};
use crate::input::InputRewriter;
use crate::keywords::KeywordRewriter;
use crate::loops::LoopRewriter;
use crate::print::PrintRewriter;
use crate::report::DiagnosticsPassThrough;
use crate::shadowing::ShadowingRewriter;
use crate::stage::Stage;

/// Result of running the pipeline over one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The rewritten text, trimmed
    pub output: String,
    /// Everything the stages left verbatim, in stage order
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Whether every recognised construct was rewritten
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// An ordered sequence of stages
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create a pipeline from explicit stages
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Pipeline { stages }
    }

    /// The eight Java-to-Python stages
    pub fn standard() -> Self {
        Pipeline::new(vec![
            Box::new(InputRewriter),
            Box::new(LoopRewriter),
            Box::new(ConditionalRewriter),
            Box::new(PrintRewriter),
            Box::new(KeywordRewriter),
            Box::new(IndentRewriter::<DepthStack>::default()),
            Box::new(ShadowingRewriter),
            Box::new(DiagnosticsPassThrough),
        ])
    }

    /// Names of the stages, in order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage and trim the result
    pub fn run(&self, source: &str) -> Conversion {
        self.run_observed(source, |_, _| {})
    }

    /// Run every stage, calling `observe` with each stage's output
    pub fn run_observed<F>(&self, source: &str, mut observe: F) -> Conversion
    where
        F: FnMut(&'static str, &str),
    {
        let mut text = source.to_string();
        let mut diagnostics = Vec::new();

        for stage in &self.stages {
            let name = stage.name();
            let _span = debug_span!("stage", name).entered();

            let before = text.clone();
            let output = stage.apply(text);
            if !output.diagnostics.is_empty() {
                debug!(count = output.diagnostics.len(), "constructs left verbatim");
            }
            if output.text != before {
                debug!(before = before.len(), after = output.text.len(), "stage changed text");
            }

            observe(name, &output.text);
            diagnostics.extend(output.diagnostics);
            text = output.text;
        }

        Conversion {
            output: text.trim().to_string(),
            diagnostics,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::standard()
    }
}
