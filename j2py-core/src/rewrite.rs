//! Per-construct rewrite outcomes
//!
//! Every stage that recognises a construct decides between replacing it and
//! leaving it alone. [`Rewrite`] makes that choice explicit so callers can
//! tell a coverage gap from a successful rewrite.

use regex::{Captures, Regex};
use tracing::trace;

use crate::error::{Diagnostic, DiagnosticKind};

/// Outcome of rewriting one recognised construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Replacement text for the matched construct
    Rewritten(String),
    /// The construct stays as it was, for the given reason
    Verbatim(DiagnosticKind),
}

impl Rewrite {
    /// Whether the construct was replaced
    pub fn is_rewritten(&self) -> bool {
        matches!(self, Rewrite::Rewritten(_))
    }
}

/// 1-based line number of a byte offset
pub fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

/// Replace every match of `re` in `source` with the outcome of `f`.
///
/// Verbatim outcomes copy the match through unchanged and push a diagnostic
/// tagged with `stage`.
pub fn rewrite_matches<F>(
    re: &Regex,
    source: &str,
    stage: &'static str,
    diagnostics: &mut Vec<Diagnostic>,
    mut f: F,
) -> String
where
    F: FnMut(&Captures<'_>) -> Rewrite,
{
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in re.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&source[last..whole.start()]);

        match f(&caps) {
            Rewrite::Rewritten(text) => {
                trace!(stage, from = whole.as_str(), to = %text, "rewrote");
                out.push_str(&text);
            }
            Rewrite::Verbatim(kind) => {
                let line = line_of(source, whole.start());
                trace!(stage, line, reason = %kind, "left verbatim");
                diagnostics.push(Diagnostic::new(stage, line, kind, whole.as_str()));
                out.push_str(whole.as_str());
            }
        }

        last = whole.end();
    }

    out.push_str(&source[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of() {
        let text = "a\nb\nc";
        assert_eq!(line_of(text, 0), 1);
        assert_eq!(line_of(text, 2), 2);
        assert_eq!(line_of(text, 4), 3);
    }

    #[test]
    fn test_rewrite_matches_mixed_outcomes() {
        let re = Regex::new(r"\d+").unwrap();
        let mut diags = Vec::new();
        let out = rewrite_matches(&re, "1 22\n333", "test", &mut diags, |caps| {
            let digits = &caps[0];
            if digits.len() == 2 {
                Rewrite::Verbatim(DiagnosticKind::UnbalancedClose)
            } else {
                Rewrite::Rewritten(format!("<{}>", digits))
            }
        });

        assert_eq!(out, "<1> 22\n<333>");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 1);
        assert_eq!(diags[0].snippet, "22");
        assert_eq!(diags[0].stage, "test");
    }

    #[test]
    fn test_rewrite_matches_no_match_is_identity() {
        let re = Regex::new(r"xyz").unwrap();
        let mut diags = Vec::new();
        let out = rewrite_matches(&re, "abc", "test", &mut diags, |_| {
            Rewrite::Rewritten(String::new())
        });
        assert_eq!(out, "abc");
        assert!(diags.is_empty());
    }
}
