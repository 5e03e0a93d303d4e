//! Counted `for` loop rewriting
//!
//! Matches three-clause headers such as `for (int i = 0; i < n; i++)` and
//! turns them into `for i in range(0, n):`. The bound and the initial value
//! are carried through as text; only the step has to be a literal.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DiagnosticKind;
use crate::rewrite::{Rewrite, rewrite_matches};
use crate::stage::{Stage, StageOutput};

static LOOP_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bfor\s*\(\s*(?:(?:int|long|short|byte|double|float)\s+)?(\w+)\s*=\s*(.*?);\s*(.*?);\s*(.*?)\s*\)",
    )
    .expect("valid loop header pattern")
});

static CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\w+\s*([<>=!]+)\s*(.+)$").expect("valid loop condition pattern")
});

static COMPOUND_UPDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\w+\s*([+-]=)\s*(.+)$").expect("valid loop update pattern")
});

/// The three clauses of a loop header, after the type keyword is dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopHeader<'a> {
    pub var: &'a str,
    pub init: &'a str,
    pub condition: &'a str,
    pub update: &'a str,
}

/// Step implied by the update clause
fn parse_step(update: &str) -> Result<i64, DiagnosticKind> {
    let update = update.trim();
    if update.starts_with("++") || update.ends_with("++") {
        return Ok(1);
    }
    if update.starts_with("--") || update.ends_with("--") {
        return Ok(-1);
    }

    let caps = COMPOUND_UPDATE
        .captures(update)
        .ok_or_else(|| DiagnosticKind::UnsupportedLoopUpdate(update.to_string()))?;
    let operand = caps[2].trim();
    let value: i64 = operand
        .parse()
        .map_err(|_| DiagnosticKind::NonLiteralLoopStep(operand.to_string()))?;

    match (&caps[1], value) {
        (_, 0) => Err(DiagnosticKind::UnsupportedLoopUpdate(update.to_string())),
        ("+=", v) => Ok(v),
        (_, v) => v
            .checked_neg()
            .ok_or_else(|| DiagnosticKind::UnsupportedLoopUpdate(update.to_string())),
    }
}

/// Force a step negative without overflowing at `i64::MIN`
fn descending(step: i64) -> i64 {
    if step > 0 { -step } else { step }
}

impl LoopHeader<'_> {
    /// Build the equivalent `range` header
    pub fn to_range(&self) -> Rewrite {
        let Some(caps) = CONDITION.captures(self.condition) else {
            return Rewrite::Verbatim(DiagnosticKind::UnparseableLoopCondition(
                self.condition.trim().to_string(),
            ));
        };
        let op = &caps[1];
        let bound = caps[2].trim();

        let mut step = match parse_step(self.update) {
            Ok(step) => step,
            Err(kind) => return Rewrite::Verbatim(kind),
        };

        let end = match op {
            "<" => bound.to_string(),
            "<=" => format!("{} + 1", bound),
            ">" => {
                step = descending(step);
                bound.to_string()
            }
            ">=" => {
                step = descending(step);
                format!("{} - 1", bound)
            }
            other => {
                return Rewrite::Verbatim(DiagnosticKind::UnsupportedLoopOperator(
                    other.to_string(),
                ));
            }
        };

        let start = self.init.trim();
        let range = if step == 1 {
            format!("range({}, {})", start, end)
        } else {
            format!("range({}, {}, {})", start, end, step)
        };
        Rewrite::Rewritten(format!("for {} in {}:", self.var, range))
    }
}

/// Stage 2: loop headers
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopRewriter;

impl Stage for LoopRewriter {
    fn name(&self) -> &'static str {
        "loops"
    }

    fn apply(&self, source: String) -> StageOutput {
        let mut diagnostics = Vec::new();
        let text = rewrite_matches(&LOOP_HEADER, &source, self.name(), &mut diagnostics, |caps| {
            let header = LoopHeader {
                var: caps.get(1).map_or("", |m| m.as_str()),
                init: caps.get(2).map_or("", |m| m.as_str()),
                condition: caps.get(3).map_or("", |m| m.as_str()),
                update: caps.get(4).map_or("", |m| m.as_str()),
            };
            header.to_range()
        });
        StageOutput { text, diagnostics }
    }
}
