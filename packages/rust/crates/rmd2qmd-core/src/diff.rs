//! Diff generation utilities.
//!
//! Provides unified diff output for conversions using the `similar` crate.

use similar::{ChangeTag, TextDiff};

/// Header label for the original side when none is given.
pub const DEFAULT_FROM_LABEL: &str = "original";
/// Header label for the converted side when none is given.
pub const DEFAULT_TO_LABEL: &str = "converted";

const CONTEXT_LINES: usize = 3;

/// Generate a unified diff between two strings with default header labels.
///
/// Returns an empty string when the inputs are identical.
#[must_use]
pub fn diff(original: &str, converted: &str) -> String {
    unified_diff_with_headers(original, converted, DEFAULT_FROM_LABEL, DEFAULT_TO_LABEL)
}

/// Generate a unified diff between two strings.
///
/// Uses the `similar` crate for line-by-line diffing with 3 lines of context.
///
/// # Arguments
/// * `original` - The original content
/// * `converted` - The converted content
/// * `from` - Label for the `---` header line
/// * `to` - Label for the `+++` header line
///
/// # Returns
/// The `---`/`+++` header followed by `@@` hunks whose lines carry `+`, `-`
/// and ` ` prefixes, or an empty string if nothing changed.
#[must_use]
pub fn unified_diff_with_headers(original: &str, converted: &str, from: &str, to: &str) -> String {
    let diff = TextDiff::from_lines(original, converted);
    let mut output = String::new();

    for hunk in diff.unified_diff().context_radius(CONTEXT_LINES).iter_hunks() {
        if output.is_empty() {
            output.push_str(&format!("--- {from}\n+++ {to}\n"));
        }
        output.push_str(&format!("{}\n", hunk.header()));
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            output.push_str(sign);
            output.push_str(change.value());
            if change.missing_newline() {
                output.push('\n');
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_diff() {
        let diff = diff("a\nb\n", "a\nc\n");
        assert_eq!(
            diff,
            "--- original\n+++ converted\n@@ -1,2 +1,2 @@\n a\n-b\n+c\n"
        );
    }

    #[test]
    fn test_no_changes() {
        let content = "unchanged content\n";
        assert_eq!(diff(content, content), "");
    }

    #[test]
    fn test_custom_labels() {
        let diff = unified_diff_with_headers("x\n", "y\n", "report.Rmd", "report.qmd");
        assert!(diff.starts_with("--- report.Rmd\n+++ report.qmd\n"));
    }

    #[test]
    fn test_missing_trailing_newline() {
        let diff = diff("line1\nold", "line1\nnew");
        assert!(diff.contains("-old\n"));
        assert!(diff.ends_with("+new\n"));
    }
}
