use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "rmd2qmd")]
#[command(version, about = "Convert R Markdown cross-references to Quarto syntax.")]
pub(crate) struct Cli {
    /// Override config directory (settings live in `<conf>/rmd2qmd/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Debug logging on stderr (ignored when RUST_LOG is set).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Diff (or converted text with --stdout).
    #[default]
    Text,
    /// Full conversion report as JSON.
    Json,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert an .Rmd file; writes the .qmd next to it and prints the diff.
    Convert {
        /// Path to the R Markdown file.
        path: PathBuf,

        /// Write the converted document here instead of next to the input.
        #[arg(long, short, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the converted document instead of writing a file.
        #[arg(long)]
        stdout: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the unified diff between two files.
    Diff {
        /// Original file.
        original: PathBuf,

        /// Converted file.
        converted: PathBuf,
    },
    /// Apply a regex find/replace (multi-line mode) to a file or stdin.
    Apply {
        /// Input file (default: stdin).
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Find pattern (default: settings `pattern.find`, the include_app chunk).
        #[arg(long)]
        find: Option<String>,

        /// Replacement with `\1` back-references (default: settings `pattern.replace`).
        #[arg(long)]
        replace: Option<String>,
    },
}
