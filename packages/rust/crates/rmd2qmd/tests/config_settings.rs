#![allow(missing_docs)]

use std::path::PathBuf;

use rmd2qmd::load_settings_from_paths;
use rmd2qmd_core::DEFAULT_FIND_PATTERN;
use tempfile::TempDir;

fn write_file(path: PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write yaml");
}

#[test]
fn merge_user_overrides_system() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("packages/conf/rmd2qmd.yaml");
    let user = tmp.path().join(".config/rmd2qmd/settings.yaml");

    write_file(
        system.clone(),
        r#"
convert:
  source_extension: ".rmd"
  target_extension: ".qmd"
pattern:
  find: "foo"
  replace: "bar"
io:
  max_file_size: 2048
"#,
    );
    write_file(
        user.clone(),
        r#"
convert:
  source_extension: ".Rmarkdown"
pattern:
  replace: "baz"
"#,
    );

    let settings = load_settings_from_paths(&system, &user);
    assert_eq!(settings.source_extension(), ".Rmarkdown");
    assert_eq!(settings.target_extension(), ".qmd");
    assert_eq!(settings.find_pattern(), "foo");
    assert_eq!(settings.replace_pattern(), "baz");
    assert_eq!(settings.max_file_size(), 2048);
}

#[test]
fn missing_files_yield_defaults() {
    let tmp = TempDir::new().expect("tempdir");
    let settings = load_settings_from_paths(
        &tmp.path().join("missing-system.yaml"),
        &tmp.path().join("missing-user.yaml"),
    );

    assert_eq!(settings.source_extension(), ".Rmd");
    assert_eq!(settings.target_extension(), ".qmd");
    assert_eq!(settings.find_pattern(), DEFAULT_FIND_PATTERN);
    assert_eq!(settings.max_file_size(), 1024 * 1024);
}

#[test]
fn malformed_user_file_is_ignored() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    let user = tmp.path().join("user.yaml");
    write_file(system.clone(), "io:\n  max_file_size: 4096\n");
    write_file(user.clone(), "io: [not, a, map\n");

    let settings = load_settings_from_paths(&system, &user);
    assert_eq!(settings.max_file_size(), 4096);
}

#[test]
fn empty_file_is_ignored() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    let user = tmp.path().join("user.yaml");
    write_file(system.clone(), "pattern:\n  find: \"x+\"\n");
    write_file(user.clone(), "\n");

    let settings = load_settings_from_paths(&system, &user);
    assert_eq!(settings.find_pattern(), "x+");
}
