#![allow(clippy::doc_markdown)]

//! rmd2qmd-core - Text transformations for R Markdown to Quarto conversion
//!
//! Pure, stateless functions that rewrite cross-reference syntax, apply
//! user-supplied find/replace patterns, and render unified diffs.
//!
//! # Features
//!
//! - **Reference Rewriting**: `\@ref(id)`, `\@ref(fig:id)`, `\@ref(tab:id)` become
//!   `@sec-id`, `@fig-id`, `@tab-id`
//! - **Ad-hoc Patterns**: multi-line regex find/replace with `\1` back-references
//! - **Diff Preview**: unified diffs between original and converted text
//! - **Reports**: serializable bundle of everything a front end renders
//!
//! # Architecture
//!
//! ```text
//! rmd2qmd-core/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── error.rs     # PatternError enum (thiserror)
//! ├── rules.rs     # Fixed reference rewrite table
//! ├── template.rs  # Backslash replacement templates
//! ├── pattern.rs   # Ad-hoc find/replace
//! ├── diff.rs      # Unified diff generation
//! └── types.rs     # ConversionReport, RuleStats, PatternOutcome
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use rmd2qmd_core::{apply_pattern, convert, diff};
//!
//! let original = "See Figure \\@ref(fig:plot1).\n";
//! let converted = convert(original);
//! assert_eq!(converted, "See Figure @fig-plot1.\n");
//!
//! let patch = diff(original, &converted);
//! let modified = apply_pattern("foo bar", "o+", "0")?;
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod diff;
mod error;
mod pattern;
mod rules;
mod template;
mod types;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use diff::{DEFAULT_FROM_LABEL, DEFAULT_TO_LABEL, diff, unified_diff_with_headers};
pub use error::PatternError;
pub use pattern::{DEFAULT_FIND_PATTERN, DEFAULT_REPLACE_PATTERN, apply_pattern};
pub use rules::{RULES, RewriteRule, convert, convert_with_stats};
pub use template::ReplaceTemplate;
pub use types::{
    ConversionReport, MEDIA_TYPE, PatternOutcome, RuleStats, SOURCE_EXTENSION, TARGET_EXTENSION,
    output_file_name,
};
