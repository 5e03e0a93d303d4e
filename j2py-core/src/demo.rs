//! The built-in demonstration snippet

use crate::translator::translate;

/// Banner printed before the converted demo
pub const BANNER: &str = "Converted Python Code:\n";

/// A Fibonacci program exercising declarations, printing, a counted loop
/// and a variable named after a built-in
pub const FIBONACCI: &str = r#"
import java.util.Scanner;

public class Fibonacci {
    public static void main(String[] args) {
        int n = 10, t1 = 0, t2 = 1;
        System.out.println("First " + n + " terms: ");

        for (int i = 1; i <= n; ++i) {
            System.out.print(t1 + " + ");
            int sum = t1 + t2;
            t1 = t2;
            t2 = sum;
        }
    }
}
"#;

/// The banner followed by the converted snippet
pub fn render() -> String {
    format!("{}\n{}", BANNER, translate(FIBONACCI))
}
