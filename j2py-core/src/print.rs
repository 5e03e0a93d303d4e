//! Console output rewriting
//!
//! `System.out.println(a + b)` becomes `print(a, b)` and
//! `System.out.print(a + b)` becomes `print(a, b, end='')`. String
//! concatenation is flattened by splitting on every `+`, which is wrong for
//! arithmetic and for `+` inside string literals. Such arguments are still
//! split, but flagged.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Diagnostic, DiagnosticKind};
use crate::rewrite::{Rewrite, line_of, rewrite_matches};
use crate::stage::{Stage, StageOutput};

static PRINT_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"System\.out\.(print(?:ln)?)\s*\((.*?)\);").expect("valid print pattern")
});

static CONCAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\+\s*").expect("valid concatenation pattern"));

/// Turn a `+` chain into a comma-separated argument list
pub fn flatten_concatenation(args: &str) -> String {
    CONCAT.split(args).collect::<Vec<_>>().join(", ")
}

/// Whether a `+` appears inside a string literal or parentheses
pub fn has_nested_plus(args: &str) -> bool {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;

    for c in args.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), '+') => return true,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, '+') if depth > 0 => return true,
            (None, _) => {}
        }
    }
    false
}

/// Build the Python call for one output statement
pub fn rewrite_print(method: &str, args: &str) -> Rewrite {
    let args = args.trim();
    let flattened = flatten_concatenation(args);
    let call = match (method, args.is_empty()) {
        ("print", true) => "print(end='')".to_string(),
        ("print", false) => format!("print({}, end='')", flattened),
        (_, true) => "print()".to_string(),
        (_, false) => format!("print({})", flattened),
    };
    Rewrite::Rewritten(call)
}

/// Stage 4: output statements
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintRewriter;

impl Stage for PrintRewriter {
    fn name(&self) -> &'static str {
        "print"
    }

    fn apply(&self, source: String) -> StageOutput {
        let mut diagnostics = Vec::new();
        let mut flagged = Vec::new();

        let text = rewrite_matches(&PRINT_CALL, &source, self.name(), &mut diagnostics, |caps| {
            let args = &caps[2];
            if has_nested_plus(args) {
                let start = caps.get(0).map_or(0, |m| m.start());
                flagged.push(Diagnostic::new(
                    self.name(),
                    line_of(&source, start),
                    DiagnosticKind::AmbiguousConcatenation(args.trim().to_string()),
                    &caps[0],
                ));
            }
            rewrite_print(&caps[1], args)
        });

        diagnostics.extend(flagged);
        StageOutput { text, diagnostics }
    }
}
