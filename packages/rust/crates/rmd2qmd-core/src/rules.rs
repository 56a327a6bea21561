//! Fixed rewrite table for cross-reference syntax.
//!
//! R Markdown writes references as `\@ref(id)`, `\@ref(fig:id)` and
//! `\@ref(tab:id)`. Quarto uses `@sec-id`, `@fig-id` and `@tab-id`.
//! The rules run in table order, each one over the output of the previous.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::RuleStats;

/// A single `(pattern, replacement)` entry of the rewrite table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    /// Short name used in logs.
    pub name: &'static str,
    /// Regular expression matching the R Markdown reference.
    pub pattern: &'static str,
    /// Replacement template (`$`-style group syntax).
    pub replacement: &'static str,
}

/// Ordered rewrite table.
///
/// The section rule excludes `:` from the identifier, so it never touches
/// `fig:`/`tab:` references and the later rules see them intact.
pub const RULES: [RewriteRule; 3] = [
    RewriteRule {
        name: "section",
        pattern: r"\\@ref\(([^:]*?)\)",
        replacement: "@sec-${1}",
    },
    RewriteRule {
        name: "figure",
        pattern: r"\\@ref\(fig:(.*?)\)",
        replacement: "@fig-${1}",
    },
    RewriteRule {
        name: "table",
        pattern: r"\\@ref\(tab:(.*?)\)",
        replacement: "@tab-${1}",
    },
];

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

// Pre-compiled, index-aligned with `RULES`.
static COMPILED_RULES: LazyLock<[Regex; 3]> =
    LazyLock::new(|| RULES.map(|rule| compile_regex(rule.pattern)));

/// Convert R Markdown cross-references to Quarto syntax.
///
/// Never fails: text without references comes back unchanged.
#[must_use]
pub fn convert(source: &str) -> String {
    convert_with_stats(source).0
}

/// Convert and report how many references each rule rewrote.
#[must_use]
pub fn convert_with_stats(source: &str) -> (String, RuleStats) {
    let mut current = source.to_string();
    let mut counts = [0usize; 3];

    for (idx, (rule, regex)) in RULES.iter().zip(COMPILED_RULES.iter()).enumerate() {
        let count = regex.find_iter(&current).count();
        if count > 0 {
            current = regex.replace_all(&current, rule.replacement).into_owned();
        }
        tracing::debug!(rule = rule.name, count, "applied rewrite rule");
        counts[idx] = count;
    }

    let [sections, figures, tables] = counts;
    (
        current,
        RuleStats {
            sections,
            figures,
            tables,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_reference() {
        assert_eq!(convert(r"\@ref(intro)"), "@sec-intro");
    }

    #[test]
    fn test_figure_reference() {
        assert_eq!(convert(r"\@ref(fig:plot1)"), "@fig-plot1");
    }

    #[test]
    fn test_table_reference() {
        assert_eq!(convert(r"\@ref(tab:summary)"), "@tab-summary");
    }

    #[test]
    fn test_section_rule_skips_prefixed_references() {
        let regex = &COMPILED_RULES[0];
        assert!(!regex.is_match(r"\@ref(fig:plot1)"));
        assert!(!regex.is_match(r"\@ref(tab:summary)"));
    }

    #[test]
    fn test_stats_count_each_rule() {
        let text = r"\@ref(a) \@ref(b) \@ref(fig:c) \@ref(tab:d) \@ref(tab:e)";
        let (converted, stats) = convert_with_stats(text);
        assert_eq!(converted, "@sec-a @sec-b @fig-c @tab-d @tab-e");
        assert_eq!(stats.sections, 2);
        assert_eq!(stats.figures, 1);
        assert_eq!(stats.tables, 2);
        assert_eq!(stats.total(), 5);
    }

    #[test]
    fn test_no_references_is_noop() {
        let text = "# Title\n\nNo references here, only @ and (parens).\n";
        let (converted, stats) = convert_with_stats(text);
        assert_eq!(converted, text);
        assert_eq!(stats.total(), 0);
    }
}
