//! rmd2qmd: convert R Markdown cross-references to Quarto syntax from the command line.
//!
//! - **convert**: rewrite one `.Rmd` file, write the `.qmd` next to it, show the diff.
//! - **diff**: unified diff of two files.
//! - **apply**: ad-hoc regex find/replace over a file or stdin.

#![allow(missing_docs)]

mod commands;
mod input;
mod settings;

pub use commands::{
    ConvertOutcome, ConvertTarget, apply_text, convert_file, diff_files, read_apply_input,
};
pub use input::{InputError, decode_buffer, is_binary, read_text_from, read_text_safe};
pub use settings::{
    ConvertSettings, DEFAULT_MAX_FILE_SIZE, IoSettings, PatternSettings, Settings, load_settings,
    load_settings_from_paths, set_config_home_override, settings_paths,
};
