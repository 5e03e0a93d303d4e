//! Entry points for converting Java snippets to Python
//!
//! [`translate`] is the best-effort interface: it never fails and returns
//! whatever the stages produced. [`translate_with`] also reports what was
//! left verbatim and can reject partial conversions.

use crate::error::{Diagnostic, Result};
use crate::pipeline::{Conversion, Pipeline};
use crate::report::{Options, enforce};

/// Convert a Java snippet to Python
///
/// # Example
/// ```
/// use j2py_core::translate;
///
/// let result = translate("int x = 5;\nSystem.out.println(\"x is \" + x);");
/// assert_eq!(result, "x = 5\nprint(\"x is \", x)");
/// ```
pub fn translate(source: &str) -> String {
    Pipeline::standard().run(source).output
}

/// Convert with diagnostics, honouring `options`
pub fn translate_with(source: &str, options: &Options) -> Result<Conversion> {
    enforce(Pipeline::standard().run(source), options)
}

/// Convert and keep the text after every stage
pub fn translate_debug(source: &str) -> TranslateResult {
    let mut stages = Vec::new();
    let conversion = Pipeline::standard().run_observed(source, |name, text| {
        stages.push((name, text.to_string()));
    });

    TranslateResult {
        input: source.to_string(),
        stages,
        output: conversion.output,
        diagnostics: conversion.diagnostics,
    }
}

/// Result of a conversion with per-stage snapshots
#[derive(Debug, Clone)]
pub struct TranslateResult {
    /// The original Java text
    pub input: String,
    /// Stage name and the text it produced, in order
    pub stages: Vec<(&'static str, String)>,
    /// The final Python text
    pub output: String,
    /// Constructs left verbatim
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslateResult {
    /// Print a formatted report of the conversion
    pub fn report(&self) {
        println!("Conversion Report");
        println!("=================");
        println!("Input:\n{}\n", self.input.trim());
        for (name, text) in &self.stages {
            println!("--- after {} ---", name);
            println!("{}\n", text.trim());
        }
        println!("Output:\n{}", self.output);
        if !self.diagnostics.is_empty() {
            println!("\nDiagnostics:");
            for diag in &self.diagnostics {
                println!("  {}", diag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;

    #[test]
    fn test_translate_empty() {
        assert_eq!(translate(""), "");
    }

    #[test]
    fn test_translate_if_else_chain() {
        let java = "if (x > 0) {\n    System.out.println(\"pos\");\n} else if (x < 0) {\n    System.out.println(\"neg\");\n} else {\n    System.out.println(\"zero\");\n}";
        assert_eq!(
            translate(java),
            "if x > 0:\n    print(\"pos\")\nelif x < 0:\n    print(\"neg\")\nelse:\n    print(\"zero\")"
        );
    }

    #[test]
    fn test_translate_with_lenient() {
        let conversion =
            translate_with("for (int i = 0; i != 3; i++) {\n}", &Options::default()).unwrap();
        assert_eq!(conversion.diagnostics.len(), 1);
        assert_eq!(conversion.diagnostics[0].stage, "loops");
        assert_eq!(conversion.output, "for (int i = 0 i != 3 i++)");
    }

    #[test]
    fn test_translate_with_strict() {
        let result = translate_with("x = sc.nextFloat();", &Options::strict());
        assert!(matches!(result, Err(ConvertError::Incomplete { .. })));

        let result = translate_with("int x = 1;", &Options::strict());
        assert_eq!(result.unwrap().output, "x = 1");
    }

    #[test]
    fn test_translate_debug() {
        let result = translate_debug("int x = 1;");
        assert_eq!(result.input, "int x = 1;");
        assert_eq!(result.output, "x = 1");
        assert_eq!(result.stages.len(), 8);
        assert_eq!(result.stages[4].0, "keywords");
        assert_eq!(result.stages[4].1, "x = 1");
    }
}
