//! rmd2qmd CLI: convert, diff, or apply.
//!
//! Settings from `packages/conf/rmd2qmd.yaml` and `<config home>/rmd2qmd/settings.yaml`.
//! Override the config home with `--conf <dir>`.
//!
//! Logging: set `RUST_LOG=rmd2qmd=debug` (or `warn`, `info`) to see logs on stderr.

mod cli;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rmd2qmd::{
    ConvertTarget, apply_text, convert_file, diff_files, load_settings, read_apply_input,
    set_config_home_override,
};

use crate::cli::{Cli, Command, OutputFormat};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // Initialize tracing: RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "rmd2qmd=debug,rmd2qmd_core=debug"
        } else {
            "rmd2qmd=info,rmd2qmd_core=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let settings = load_settings();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Convert {
            path,
            output,
            stdout: to_stdout,
            format,
        } => {
            let target = match (output, to_stdout) {
                (_, true) => ConvertTarget::Stdout,
                (Some(dest), false) => ConvertTarget::Path(dest),
                (None, false) => ConvertTarget::Derived,
            };
            let outcome = convert_file(&path, &target, &settings)?;
            match format {
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut stdout, &outcome.report)
                        .context("failed to serialize report")?;
                    writeln!(stdout)?;
                }
                OutputFormat::Text if outcome.written.is_none() => {
                    write!(stdout, "{}", outcome.report.converted)?;
                }
                OutputFormat::Text => write!(stdout, "{}", outcome.report.diff)?,
            }
        }
        Command::Diff {
            original,
            converted,
        } => {
            let diff = diff_files(&original, &converted, &settings)?;
            write!(stdout, "{diff}")?;
        }
        Command::Apply {
            input,
            find,
            replace,
        } => {
            let text = read_apply_input(input.as_deref(), std::io::stdin().lock(), &settings)?;
            let outcome = apply_text(&text, find.as_deref(), replace.as_deref(), &settings)?;
            if outcome.is_error {
                writeln!(stdout, "{}", outcome.text)?;
                stdout.flush()?;
                std::process::exit(1);
            }
            write!(stdout, "{}", outcome.text)?;
        }
    }

    Ok(())
}
