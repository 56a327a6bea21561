//! Core types for conversion results.
//!
//! Defines the data structures a front end renders after a conversion.

use serde::Serialize;

use crate::diff::unified_diff_with_headers;
use crate::error::PatternError;
use crate::rules::convert_with_stats;

/// Media type offered for converted documents.
pub const MEDIA_TYPE: &str = "text/markdown";
/// File name fragment identifying R Markdown documents.
pub const SOURCE_EXTENSION: &str = ".Rmd";
/// File name fragment that replaces [`SOURCE_EXTENSION`].
pub const TARGET_EXTENSION: &str = ".qmd";

/// Number of references rewritten by each rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuleStats {
    /// `\@ref(id)` -> `@sec-id`
    pub sections: usize,
    /// `\@ref(fig:id)` -> `@fig-id`
    pub figures: usize,
    /// `\@ref(tab:id)` -> `@tab-id`
    pub tables: usize,
}

impl RuleStats {
    /// Total number of rewritten references.
    #[must_use]
    pub fn total(&self) -> usize {
        self.sections + self.figures + self.tables
    }
}

/// Result of converting one document.
///
/// Contains both the converted content and what a front end needs to offer it.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Name of the input document.
    pub input_file_name: String,
    /// Suggested name for the converted document.
    pub output_file_name: String,
    /// Media type of the converted document.
    pub media_type: &'static str,
    /// Original content before conversion.
    pub original: String,
    /// Converted content.
    pub converted: String,
    /// Unified diff between original and converted content.
    pub diff: String,
    /// Rewrites per rule.
    pub stats: RuleStats,
}

impl ConversionReport {
    /// Convert `original` and bundle the result with the default extensions.
    #[must_use]
    pub fn build(input_file_name: &str, original: &str) -> Self {
        Self::build_with_extensions(input_file_name, original, SOURCE_EXTENSION, TARGET_EXTENSION)
    }

    /// Convert `original` and bundle the result, naming the output by
    /// replacing `source_ext` with `target_ext` in the input name.
    #[must_use]
    pub fn build_with_extensions(
        input_file_name: &str,
        original: &str,
        source_ext: &str,
        target_ext: &str,
    ) -> Self {
        let (converted, stats) = convert_with_stats(original);
        let output_file_name = output_file_name(input_file_name, source_ext, target_ext);
        let diff = unified_diff_with_headers(original, &converted, input_file_name, &output_file_name);

        Self {
            input_file_name: input_file_name.to_string(),
            output_file_name,
            media_type: MEDIA_TYPE,
            original: original.to_string(),
            converted,
            diff,
            stats,
        }
    }

    /// Whether the conversion changed anything.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.original != self.converted
    }
}

/// Derive the output file name by replacing every `source_ext` with `target_ext`.
///
/// Names without `source_ext` come back unchanged.
#[must_use]
pub fn output_file_name(input_file_name: &str, source_ext: &str, target_ext: &str) -> String {
    if source_ext.is_empty() {
        return input_file_name.to_string();
    }
    input_file_name.replace(source_ext, target_ext)
}

/// Result text plus error flag, for front ends that show errors in place of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternOutcome {
    /// Modified text, or the error message when `is_error` is set.
    pub text: String,
    /// Whether `text` is an error message.
    pub is_error: bool,
}

impl From<Result<String, PatternError>> for PatternOutcome {
    fn from(result: Result<String, PatternError>) -> Self {
        match result {
            Ok(text) => Self {
                text,
                is_error: false,
            },
            Err(err) => Self {
                text: err.to_string(),
                is_error: true,
            },
        }
    }
}
