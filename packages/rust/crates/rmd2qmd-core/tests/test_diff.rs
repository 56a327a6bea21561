//! Tests for diff module - unified diff generation.

use rmd2qmd_core::{convert, diff, unified_diff_with_headers};

#[test]
fn test_changed_line_with_context() {
    let diff = diff("a\nb\n", "a\nc\n");

    assert!(diff.starts_with("--- original\n+++ converted\n"));
    assert!(diff.contains("\n a\n-b\n+c\n"));
}

#[test]
fn test_identical_inputs_give_empty_diff() {
    for text in ["", "one line", "a\nb\nc\n"] {
        assert_eq!(diff(text, text), "");
    }
}

#[test]
fn test_context_radius_is_three() {
    let original = "1\n2\n3\n4\n5\n6\n7\n8\n9\n";
    let modified = "1\n2\n3\n4\nfive\n6\n7\n8\n9\n";
    let diff = diff(original, modified);

    assert!(diff.contains("@@ -2,7 +2,7 @@\n"));
    assert!(!diff.contains(" 1\n"));
    assert!(!diff.contains(" 9\n"));
}

#[test]
fn test_distant_changes_make_two_hunks() {
    let original: String = (1..=20).map(|n| format!("{n}\n")).collect();
    let modified: String = (1..=20)
        .map(|n| match n {
            2 => "two\n".to_string(),
            19 => "nineteen\n".to_string(),
            _ => format!("{n}\n"),
        })
        .collect();
    let diff = diff(&original, &modified);

    assert_eq!(diff.matches("@@ ").count(), 2);
    assert_eq!(diff.matches("--- ").count(), 1);
}

#[test]
fn test_addition_only() {
    let diff = diff("", "new line\n");
    assert!(diff.contains("+new line\n"));
}

#[test]
fn test_conversion_diff_uses_file_labels() {
    let original = "See \\@ref(fig:plot).\n";
    let converted = convert(original);
    let diff = unified_diff_with_headers(original, &converted, "a.Rmd", "a.qmd");

    assert_eq!(
        diff,
        "--- a.Rmd\n+++ a.qmd\n@@ -1 +1 @@\n-See \\@ref(fig:plot).\n+See @fig-plot.\n"
    );
}
