//! `if` / `else if` / `else` header rewriting

use std::sync::LazyLock;

use regex::Regex;

use crate::stage::{Stage, StageOutput};

static ELSE_IF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\}\s*)?\belse\s+if\s*\((.*?)\)\s*\{").expect("valid else-if pattern")
});

static IF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bif\s*\((.*?)\)\s*\{").expect("valid if pattern"));

static ELSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\}\s*)?\belse\s*\{").expect("valid else pattern"));

/// Stage 3: branch headers.
///
/// `else if` must be handled before `if`, otherwise the bare `if` rule
/// would consume the tail of the chained header.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionalRewriter;

impl Stage for ConditionalRewriter {
    fn name(&self) -> &'static str {
        "conditionals"
    }

    fn apply(&self, source: String) -> StageOutput {
        let text = ELSE_IF.replace_all(&source, "elif $1:");
        let text = IF.replace_all(&text, "if $1:");
        let text = ELSE.replace_all(&text, "else:");
        StageOutput::clean(text.into_owned())
    }
}
