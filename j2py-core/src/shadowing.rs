//! Renaming of variables that would shadow Python built-ins

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::stage::{Stage, StageOutput};

/// Built-in names that must not be assigned to
pub const RESERVED_NAMES: &[&str] = &[
    "sum", "min", "max", "list", "dict", "str", "input", "print", "len",
];

/// Appended to every colliding identifier
pub const RENAME_SUFFIX: &str = "_var";

static ASSIGN_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*(==?)").expect("valid assignment target pattern")
});

/// Identifiers directly followed by `=` (not `==`)
pub fn assignment_targets(source: &str) -> BTreeSet<&str> {
    ASSIGN_TARGET
        .captures_iter(source)
        .filter(|caps| &caps[2] == "=")
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Reserved names that the source assigns to, in table order
pub fn colliding_names(source: &str) -> Vec<&'static str> {
    let targets = assignment_targets(source);
    RESERVED_NAMES
        .iter()
        .copied()
        .filter(|name| targets.contains(*name))
        .collect()
}

/// Stage 7: built-in collisions
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowingRewriter;

impl Stage for ShadowingRewriter {
    fn name(&self) -> &'static str {
        "shadowing"
    }

    fn apply(&self, source: String) -> StageOutput {
        let mut text = source;
        for name in colliding_names(&text) {
            let Ok(word) = Regex::new(&format!(r"\b{}\b", regex::escape(name))) else {
                continue;
            };
            let renamed = format!("{}{}", name, RENAME_SUFFIX);
            debug!(from = name, to = %renamed, "renaming built-in collision");
            text = word.replace_all(&text, renamed.as_str()).into_owned();
        }
        StageOutput::clean(text)
    }
}
