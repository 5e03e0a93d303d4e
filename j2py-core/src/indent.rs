//! Block delimiter removal and indentation rebuilding
//!
//! Block structure is recovered line by line from a depth stack rather than
//! from a parse. This assumes one statement per line and balanced braces;
//! anything else degrades rather than fails. [`BlockStructure`] is the seam
//! where a real parser could replace [`DepthStack`].

use crate::error::{Diagnostic, DiagnosticKind};
use crate::stage::{Stage, StageOutput};

/// One level of indentation
pub const INDENT_UNIT: &str = "    ";

/// Turns brace-delimited lines into indentation-delimited lines
pub trait BlockStructure {
    /// Rewrite the lines, reporting anything that did not balance
    fn rewrite(&self, lines: &[&str], diagnostics: &mut Vec<Diagnostic>) -> Vec<String>;
}

/// Remove `{` and `}` that are not inside a string or character literal
pub fn strip_delimiters(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }
        match (quote, c) {
            (None, '{' | '}') => continue,
            (None, '"' | '\'') => quote = Some(c),
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Number of `{` outside string and character literals
fn count_opens(line: &str) -> usize {
    let mut opens = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (None, '{') => opens += 1,
            (None, '"' | '\'') => quote = Some(c),
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            _ => {}
        }
    }
    opens
}

/// Whether a line continues an `if` chain rather than nesting under it
fn is_branch_continuation(line: &str) -> bool {
    line.starts_with("elif ") || line.starts_with("else:")
}

/// The line-oriented depth stack heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthStack;

impl BlockStructure for DepthStack {
    fn rewrite(&self, lines: &[&str], diagnostics: &mut Vec<Diagnostic>) -> Vec<String> {
        // Each entry is the level a header opened; len() is the current depth.
        let mut stack: Vec<usize> = Vec::new();
        // Braces that opened no block, e.g. what is left of a class line.
        // Their closing lines are expected and not reported.
        let mut orphan_opens = 0usize;
        let mut out = Vec::with_capacity(lines.len());

        for (idx, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                out.push(String::new());
                continue;
            }

            if trimmed.starts_with('}') {
                if stack.pop().is_some() {
                    continue;
                }
                if orphan_opens > 0 {
                    orphan_opens -= 1;
                } else {
                    diagnostics.push(Diagnostic::new(
                        "indent",
                        idx + 1,
                        DiagnosticKind::UnbalancedClose,
                        trimmed,
                    ));
                }
                continue;
            }

            let opens = count_opens(trimmed);
            let stripped = strip_delimiters(trimmed);
            let stripped = stripped.trim();
            if stripped.is_empty() {
                orphan_opens += opens;
                out.push(String::new());
                continue;
            }

            let continues_chain = is_branch_continuation(stripped);
            if continues_chain {
                stack.pop();
            }
            out.push(format!("{}{}", INDENT_UNIT.repeat(stack.len()), stripped));

            if continues_chain || stripped.ends_with(':') {
                stack.push(stack.len() + 1);
                orphan_opens += opens.saturating_sub(1);
            } else {
                orphan_opens += opens;
            }
        }

        out
    }
}

/// Stage 6: braces to indentation
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentRewriter<B = DepthStack> {
    structure: B,
}

impl<B: BlockStructure> IndentRewriter<B> {
    /// Use a different block structure strategy
    pub fn with_structure(structure: B) -> Self {
        IndentRewriter { structure }
    }
}

impl<B: BlockStructure> Stage for IndentRewriter<B> {
    fn name(&self) -> &'static str {
        "indent"
    }

    fn apply(&self, source: String) -> StageOutput {
        let lines: Vec<&str> = source.split('\n').collect();
        let mut diagnostics = Vec::new();
        let text = self.structure.rewrite(&lines, &mut diagnostics).join("\n");
        StageOutput { text, diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(source: &str) -> StageOutput {
        IndentRewriter::<DepthStack>::default().apply(source.to_string())
    }

    #[test]
    fn test_header_opens_block() {
        let out = rewrite("for i in range(0, n): {\nx = i\n}\ny = 1");
        assert_eq!(out.text, "for i in range(0, n):\n    x = i\ny = 1");
    }

    #[test]
    fn test_branch_chain_aligns_with_if() {
        let out = rewrite("if a:\nx\nelif b:\ny\nelse:\nz\n}\nw");
        assert_eq!(out.text, "if a:\n    x\nelif b:\n    y\nelse:\n    z\nw");
    }

    #[test]
    fn test_nested_blocks() {
        let out = rewrite("for i in range(0, 3):\nif i > 1:\nprint(i)\n}\n}\ndone = True");
        assert_eq!(
            out.text,
            "for i in range(0, 3):\n    if i > 1:\n        print(i)\ndone = True"
        );
    }

    #[test]
    fn test_blank_lines_preserved_without_depth_change() {
        let out = rewrite("if a:\n\nx\n}");
        assert_eq!(out.text, "if a:\n\n    x");
    }

    #[test]
    fn test_close_only_lines_leave_no_artifact() {
        let out = rewrite("x = 1\n  {\n}\n}");
        assert_eq!(out.text, "x = 1\n");
    }

    #[test]
    fn test_unbalanced_close_is_tolerated() {
        let out = rewrite("}\nx = 1");
        assert_eq!(out.text, "x = 1");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::UnbalancedClose);
    }

    #[test]
    fn test_orphan_open_absorbs_close() {
        let out = rewrite(" {\n     {\nx = 1\n}\n}");
        assert_eq!(out.text, "\n\nx = 1");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_brace_on_unrecognised_header_absorbs_close() {
        let out = rewrite("while (running) {\ntick()\n}");
        assert_eq!(out.text, "while (running)\ntick()");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_braces_inside_strings_survive() {
        assert_eq!(strip_delimiters(r#"print("{}") {"#), r#"print("{}") "#);
        assert_eq!(strip_delimiters(r#"c = '}'"#), r#"c = '}'"#);
    }

    #[test]
    fn test_custom_structure() {
        struct Flat;
        impl BlockStructure for Flat {
            fn rewrite(&self, lines: &[&str], _: &mut Vec<Diagnostic>) -> Vec<String> {
                lines.iter().map(|l| l.trim().to_string()).collect()
            }
        }
        let out = IndentRewriter::with_structure(Flat).apply("  a\n    b".to_string());
        assert_eq!(out.text, "a\nb");
    }
}
