//! Ad-hoc find/replace over a block of text.
//!
//! Patterns are compiled in multi-line mode so `^` and `$` match at every
//! line boundary. Replacements use backslash templates (see [`ReplaceTemplate`]).

use regex::{Captures, RegexBuilder};

use crate::error::PatternError;
use crate::template::ReplaceTemplate;

/// Default find pattern: an R chunk embedding a Shiny app via
/// `knitr::include_app` with a figure caption.
pub const DEFAULT_FIND_PATTERN: &str = r#"```\{r ([\S\s]*?),.*fig\.cap="([\S\s]*?)".*\n^#[\S\s]*?knitr::include_app\("([\S\s]*?)", (height="[0-9]{3}px")\)\n```"#;

/// Default replacement: a Quarto figure div wrapping an iframe.
pub const DEFAULT_REPLACE_PATTERN: &str = r#"::: {#fig-\1}\n\n```{=html}\n<iframe src="\3" width="100%" \4 style="border:none;">\n</iframe>\n``` \n\2\n:::"#;

/// Replace every non-overlapping match of `find_pattern` in `text`.
///
/// Matches are found leftmost-first on the original text; replaced output is
/// never rescanned. An empty pattern matches at every position.
///
/// # Errors
/// Returns [`PatternError`] when the pattern does not compile or the
/// replacement template is malformed. Its `Display` is the message shown in
/// place of output (`Regex Error: ...`).
pub fn apply_pattern(
    text: &str,
    find_pattern: &str,
    replace_pattern: &str,
) -> Result<String, PatternError> {
    let regex = RegexBuilder::new(find_pattern)
        .multi_line(true)
        .build()
        .inspect_err(|e| tracing::debug!(error = %e, "find pattern failed to compile"))?;

    let template = ReplaceTemplate::parse(replace_pattern)?;
    template.validate(&regex)?;

    let modified = regex.replace_all(text, |caps: &Captures<'_>| {
        let mut expanded = String::new();
        template.expand(caps, &mut expanded);
        expanded
    });

    Ok(modified.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_collapse() {
        assert_eq!(apply_pattern("foo bar", "o+", "0").unwrap(), "f0 bar");
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let err = apply_pattern("x", "(unclosed", "y").unwrap_err();
        assert!(matches!(err, PatternError::Pattern(_)));
        assert!(err.to_string().starts_with("Regex Error: "));
    }

    #[test]
    fn test_multiline_anchors() {
        let result = apply_pattern("one\ntwo\nthree", "^t", "T").unwrap();
        assert_eq!(result, "one\nTwo\nThree");
    }

    #[test]
    fn test_empty_pattern_inserts_everywhere() {
        assert_eq!(apply_pattern("abc", "", "-").unwrap(), "-a-b-c-");
    }

    #[test]
    fn test_replacement_not_rescanned() {
        assert_eq!(apply_pattern("aa", "a", "aa").unwrap(), "aaaa");
    }
}
