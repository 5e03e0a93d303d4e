//! Console input rewriting
//!
//! Drops `Scanner` construction statements and turns reads such as
//! `x = sc.nextInt();` into `x = int(input())`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DiagnosticKind;
use crate::rewrite::{Rewrite, rewrite_matches};
use crate::stage::{Stage, StageOutput};

static READER_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Scanner\s+\w+\s*=\s*new\s+Scanner\(.*?\);").expect("valid reader pattern")
});

static READ_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+)\s*=\s*\w+\.(next\w*)\(\);").expect("valid read pattern")
});

/// Read methods and the coercion applied to `input()`
pub const READ_METHODS: &[(&str, Option<&str>)] = &[
    ("nextInt", Some("int")),
    ("nextDouble", Some("float")),
    ("nextLine", None),
    ("next", None),
];

/// Rewrite a single read call
pub fn rewrite_read(target: &str, method: &str) -> Rewrite {
    match READ_METHODS.iter().find(|(name, _)| *name == method) {
        Some((_, Some(coerce))) => Rewrite::Rewritten(format!("{} = {}(input())", target, coerce)),
        Some((_, None)) => Rewrite::Rewritten(format!("{} = input()", target)),
        None => Rewrite::Verbatim(DiagnosticKind::UnknownReadMethod(method.to_string())),
    }
}

/// Stage 1: input statements
#[derive(Debug, Clone, Copy, Default)]
pub struct InputRewriter;

impl Stage for InputRewriter {
    fn name(&self) -> &'static str {
        "input"
    }

    fn apply(&self, source: String) -> StageOutput {
        let source = READER_DECL.replace_all(&source, "");
        let mut diagnostics = Vec::new();
        let text = rewrite_matches(&READ_CALL, &source, self.name(), &mut diagnostics, |caps| {
            rewrite_read(&caps[1], &caps[2])
        });
        StageOutput { text, diagnostics }
    }
}
