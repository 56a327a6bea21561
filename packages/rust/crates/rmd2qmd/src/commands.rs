//! Command handlers behind the CLI.
//!
//! Each handler does the I/O for one subcommand and returns data; printing
//! is left to `main`.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rmd2qmd_core::{ConversionReport, PatternOutcome, apply_pattern, unified_diff_with_headers};

use crate::input::{read_text_from, read_text_safe};
use crate::settings::Settings;

/// Where `convert` puts the converted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertTarget {
    /// Next to the input, named by the extension rule.
    Derived,
    /// An explicit path.
    Path(PathBuf),
    /// Nowhere; the caller prints it.
    Stdout,
}

/// Outcome of `convert`.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    pub report: ConversionReport,
    /// Path written, if any.
    pub written: Option<PathBuf>,
}

/// Convert one R Markdown file.
///
/// # Errors
/// Fails when the input cannot be read, the derived output path would
/// overwrite the input, or the output cannot be written.
pub fn convert_file(path: &Path, target: &ConvertTarget, settings: &Settings) -> Result<ConvertOutcome> {
    let original = read_text_safe(path, settings.max_file_size())
        .with_context(|| format!("failed to read {}", path.display()))?;

    let input_file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let report = ConversionReport::build_with_extensions(
        &input_file_name,
        &original,
        settings.source_extension(),
        settings.target_extension(),
    );
    tracing::debug!(
        input = %path.display(),
        sections = report.stats.sections,
        figures = report.stats.figures,
        tables = report.stats.tables,
        "converted document"
    );

    let destination = match target {
        ConvertTarget::Stdout => None,
        ConvertTarget::Path(dest) => Some(dest.clone()),
        ConvertTarget::Derived => {
            if report.output_file_name == input_file_name {
                bail!(
                    "output name for {} equals the input name (no '{}' in the file name); pass --output or --stdout",
                    path.display(),
                    settings.source_extension()
                );
            }
            Some(path.with_file_name(&report.output_file_name))
        }
    };

    if let Some(dest) = &destination {
        std::fs::write(dest, &report.converted)
            .with_context(|| format!("failed to write {}", dest.display()))?;
        tracing::info!(
            output = %dest.display(),
            references = report.stats.total(),
            "wrote converted document"
        );
    }

    Ok(ConvertOutcome {
        report,
        written: destination,
    })
}

/// Unified diff of two files, labelled with their paths.
///
/// # Errors
/// Fails when either file cannot be read.
pub fn diff_files(original: &Path, converted: &Path, settings: &Settings) -> Result<String> {
    let max = settings.max_file_size();
    let left = read_text_safe(original, max)
        .with_context(|| format!("failed to read {}", original.display()))?;
    let right = read_text_safe(converted, max)
        .with_context(|| format!("failed to read {}", converted.display()))?;

    Ok(unified_diff_with_headers(
        &left,
        &right,
        &original.display().to_string(),
        &converted.display().to_string(),
    ))
}

/// Read the text for `apply` from a file, or from `stdin` when no path is given.
///
/// # Errors
/// Fails when the input cannot be read or decoded.
pub fn read_apply_input<R: Read>(path: Option<&Path>, stdin: R, settings: &Settings) -> Result<String> {
    let max = settings.max_file_size();
    match path {
        Some(path) => read_text_safe(path, max)
            .with_context(|| format!("failed to read {}", path.display())),
        None => read_text_from(stdin, max).context("failed to read stdin"),
    }
}

/// Apply a find/replace pattern, falling back to the configured defaults.
///
/// An invalid pattern is not an `Err`: it comes back as an outcome with
/// `is_error` set and the message as its text.
///
/// # Errors
/// Fails when the text or the find pattern is empty.
pub fn apply_text(
    text: &str,
    find: Option<&str>,
    replace: Option<&str>,
    settings: &Settings,
) -> Result<PatternOutcome> {
    let find = find.unwrap_or_else(|| settings.find_pattern());
    let replace = replace.unwrap_or_else(|| settings.replace_pattern());

    if text.is_empty() {
        bail!("Please enter some text.");
    }
    if find.is_empty() {
        bail!("Please enter a regex find pattern.");
    }

    let outcome = PatternOutcome::from(apply_pattern(text, find, replace));
    if outcome.is_error {
        tracing::warn!(find, "find/replace pattern rejected");
    }
    Ok(outcome)
}
