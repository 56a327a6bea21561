//! Settings loader for rmd2qmd.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/rmd2qmd.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/rmd2qmd/settings.yaml`
//!
//! Merge precedence is user over system. Unset keys fall back to built-in defaults.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rmd2qmd_core::{DEFAULT_FIND_PATTERN, DEFAULT_REPLACE_PATTERN, SOURCE_EXTENSION, TARGET_EXTENSION};
use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/rmd2qmd.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "rmd2qmd/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
/// Default input size limit (1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Merged settings file contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub convert: ConvertSettings,
    #[serde(default)]
    pub pattern: PatternSettings,
    #[serde(default)]
    pub io: IoSettings,
}

/// File-level conversion settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertSettings {
    pub source_extension: Option<String>,
    pub target_extension: Option<String>,
}

/// Defaults for the `apply` command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatternSettings {
    pub find: Option<String>,
    pub replace: Option<String>,
}

/// Input limits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IoSettings {
    pub max_file_size: Option<u64>,
}

impl Settings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            convert: self.convert.merge(overlay.convert),
            pattern: self.pattern.merge(overlay.pattern),
            io: self.io.merge(overlay.io),
        }
    }

    /// Extension replaced when naming converted files.
    #[must_use]
    pub fn source_extension(&self) -> &str {
        self.convert
            .source_extension
            .as_deref()
            .unwrap_or(SOURCE_EXTENSION)
    }

    /// Extension substituted when naming converted files.
    #[must_use]
    pub fn target_extension(&self) -> &str {
        self.convert
            .target_extension
            .as_deref()
            .unwrap_or(TARGET_EXTENSION)
    }

    /// Find pattern used when `apply` gets no `--find`.
    #[must_use]
    pub fn find_pattern(&self) -> &str {
        self.pattern.find.as_deref().unwrap_or(DEFAULT_FIND_PATTERN)
    }

    /// Replacement used when `apply` gets no `--replace`.
    #[must_use]
    pub fn replace_pattern(&self) -> &str {
        self.pattern
            .replace
            .as_deref()
            .unwrap_or(DEFAULT_REPLACE_PATTERN)
    }

    /// Largest input accepted, in bytes.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.io.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }
}

impl ConvertSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            source_extension: overlay.source_extension.or(self.source_extension),
            target_extension: overlay.target_extension.or(self.target_extension),
        }
    }
}

impl PatternSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            find: overlay.find.or(self.find),
            replace: overlay.replace.or(self.replace),
        }
    }
}

impl IoSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            max_file_size: overlay.max_file_size.or(self.max_file_size),
        }
    }
}

/// Load merged settings (user overrides system).
#[must_use]
pub fn load_settings() -> Settings {
    let (system_path, user_path) = settings_paths();
    load_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
#[must_use]
pub fn settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
#[must_use]
pub fn load_settings_from_paths(system: &Path, user: &Path) -> Settings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return Settings::default();
        }
    };
    if raw.trim().is_empty() {
        return Settings::default();
    }
    match serde_yaml::from_str::<Settings>(&raw) {
        Ok(value) => {
            tracing::debug!(path = %path.display(), "loaded settings file");
            value
        }
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            Settings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
