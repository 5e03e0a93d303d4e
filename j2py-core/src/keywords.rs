//! Literal substitutions and primitive declarations
//!
//! The substitution table is an ordered list, applied front to back. A key
//! that is a prefix of a later key must come after it (`System.out.print`
//! after `System.out.printf`), otherwise the longer key never matches.
//!
//! Declarations are rewritten after the table has run. By then `;` is gone,
//! so the declaration pattern treats the terminator as optional and relies on
//! the type keywords, which the table never touches.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::stage::{Stage, StageOutput};

/// Ordered literal substitutions
pub const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("System.out.println", "print"),
    ("System.out.printf", "print"),
    ("System.out.print", "print"),
    ("true", "True"),
    ("false", "False"),
    ("null", "None"),
    (";", ""),
    ("public class Main", ""),
    ("public class Fibonacci", ""),
    ("public static void main(String[] args)", ""),
    ("import java.util.Scanner", ""),
];

/// Value assigned to declarations without an initializer
pub const NULL_SENTINEL: &str = "None";

// Scaffolding patterns only match at the start of a line and leave the `{`
// behind, so the re-indenter can pair it with its close.
static CLASS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:public[ \t]+)?(?:final[ \t]+)?class[ \t]+\w+")
        .expect("valid class pattern")
});

static ENTRY_POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:public[ \t]+)?static[ \t]+void[ \t]+main[ \t]*\([^)\n]*\)")
        .expect("valid entry point pattern")
});

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^([ \t]*)(?:final[ \t]+)?(?:byte|short|int|long|double|float|String|boolean|char)[ \t]+([^;\n]+);?",
    )
    .expect("valid declaration pattern")
});

/// Apply the substitution table in order
pub fn substitute(source: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(source.to_string(), |text, &(from, to)| text.replace(from, to))
}

/// Split on commas outside parentheses, brackets and quotes
pub fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            (None, _) => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Rewrite one declaration's declarators as separate assignments
pub fn declarators_to_assignments(indent: &str, declarators: &str) -> String {
    split_top_level(declarators)
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            if d.contains('=') {
                format!("{}{}", indent, d)
            } else {
                format!("{}{} = {}", indent, d, NULL_SENTINEL)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stage 5: keywords, scaffolding and declarations
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRewriter;

impl Stage for KeywordRewriter {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn apply(&self, source: String) -> StageOutput {
        let text = substitute(&source);
        let text = CLASS_HEADER.replace_all(&text, "");
        let text = ENTRY_POINT.replace_all(&text, "");
        let text = DECLARATION.replace_all(&text, |caps: &Captures<'_>| {
            declarators_to_assignments(&caps[1], caps[2].trim_end())
        });
        StageOutput::clean(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(source: &str) -> String {
        KeywordRewriter.apply(source.to_string()).text
    }

    #[test]
    fn test_literals() {
        assert_eq!(substitute("x = true; y = false; z = null;"), "x = True y = False z = None");
    }

    #[test]
    fn test_println_before_print_ordering() {
        assert_eq!(substitute("System.out.println(a)"), "print(a)");
        assert_eq!(substitute("System.out.printf(a)"), "print(a)");
        assert_eq!(substitute("System.out.print(a)"), "print(a)");
    }

    #[test]
    fn test_print_keys_follow_their_extensions() {
        for (i, (key, _)) in SUBSTITUTIONS.iter().enumerate() {
            for (later, _) in &SUBSTITUTIONS[i + 1..] {
                assert!(
                    !(later.starts_with(key) && later != key),
                    "'{}' shadows later key '{}'",
                    key,
                    later
                );
            }
        }
    }

    #[test]
    fn test_multi_declaration() {
        assert_eq!(
            rewrite("        int n = 10, t1 = 0, t2 = 1;"),
            "        n = 10\n        t1 = 0\n        t2 = 1"
        );
    }

    #[test]
    fn test_uninitialized_defaults_to_sentinel() {
        assert_eq!(rewrite("int a, b = 2;"), "a = None\nb = 2");
    }

    #[test]
    fn test_commas_inside_calls_do_not_split() {
        assert_eq!(
            rewrite("double m = Math.max(a, b), s = 0.5;"),
            "m = Math.max(a, b)\ns = 0.5"
        );
        assert_eq!(rewrite("char c = ',';"), "c = ','");
    }

    #[test]
    fn test_final_modifier() {
        assert_eq!(rewrite("final int LIMIT = 3;"), "LIMIT = 3");
    }

    #[test]
    fn test_type_inside_string_is_not_a_declaration() {
        assert_eq!(rewrite(r#"print("int value")"#), r#"print("int value")"#);
    }

    #[test]
    fn test_coerced_read_is_not_a_declaration() {
        assert_eq!(rewrite("x = int(input())"), "x = int(input())");
        assert_eq!(rewrite("int x = int(input())"), "x = int(input())");
    }

    #[test]
    fn test_scaffolding_removed() {
        let out = rewrite("public class Greeter {\n    public static void main(String[] args) {\n    }\n}");
        assert_eq!(out, " {\n     {\n    }\n}");

        let out = rewrite("public class Calculator {\nstatic void main(String[] argv) {");
        assert_eq!(out, " {\n {");
    }

    #[test]
    fn test_scaffolding_words_inside_strings_survive() {
        assert_eq!(rewrite(r#"print("a class act")"#), r#"print("a class act")"#);
        assert_eq!(
            rewrite(r#"print("static void main(x) is the entry")"#),
            r#"print("static void main(x) is the entry")"#
        );
    }
}
