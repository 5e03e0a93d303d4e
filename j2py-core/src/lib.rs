//! j2py Core Library
//!
//! Best-effort, pattern-based rewriting of simple Java snippets into Python.
//! There is no parser: a fixed sequence of text rewrites handles console
//! I/O, counted loops, `if`/`else` chains, primitive declarations and
//! printing, then braces are turned into indentation line by line.

pub mod conditional;
pub mod demo;
pub mod error;
pub mod indent;
pub mod input;
pub mod keywords;
pub mod loops;
pub mod pipeline;
pub mod print;
pub mod report;
pub mod rewrite;
pub mod shadowing;
pub mod stage;
pub mod translator;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{ConvertError, Diagnostic, DiagnosticKind, Result};
pub use indent::{BlockStructure, DepthStack};
pub use keywords::{NULL_SENTINEL, SUBSTITUTIONS};
pub use pipeline::{Conversion, Pipeline};
pub use report::Options;
pub use rewrite::Rewrite;
pub use shadowing::{RENAME_SUFFIX, RESERVED_NAMES};
pub use stage::{Stage, StageOutput};
pub use translator::{TranslateResult, translate, translate_debug, translate_with};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        let java = "int total = 0;\nfor (int i = 0; i < 5; i++) {\n    total += i;\n}\nSystem.out.println(total);";
        assert_eq!(
            translate(java),
            "total = 0\nfor i in range(0, 5):\n    total += i\nprint(total)"
        );
    }

    #[test]
    fn test_reading_input() {
        let java = "Scanner in = new Scanner(System.in);\nint n = in.nextInt();\nString name = in.nextLine();";
        assert_eq!(translate(java), "n = int(input())\nname = input()");
    }
}
