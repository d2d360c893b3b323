/* src/cli/core/src/config/tests/mod.rs */

use super::*;

fn write(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
  let path = dir.join(name);
  std::fs::write(&path, content).unwrap();
  path
}

#[test]
fn empty_config_uses_defaults() {
  let config: FolioConfig = toml::from_str("").unwrap();
  assert!(config.preview.partials.is_none());
  assert!(!config.preview.nested_partials);
  assert_eq!(config.preview.max_partial_depth, 8);
}

#[test]
fn preview_section_fields() {
  let config: FolioConfig = toml::from_str(
    r#"
[preview]
partials = "partials"
nested_partials = true
max_partial_depth = 3
generated_by = "Folio CI"
"#,
  )
  .unwrap();
  assert_eq!(config.preview.partials.as_deref(), Some("partials"));
  assert!(config.preview.nested_partials);
  assert_eq!(config.preview.max_partial_depth, 3);
  assert_eq!(config.preview.generated_by.as_deref(), Some("Folio CI"));
}

#[test]
fn zero_depth_rejected() {
  let tmp = tempfile::tempdir().unwrap();
  let path = write(tmp.path(), "folio.toml", "[preview]\nmax_partial_depth = 0\n");
  let err = load_folio_config(&path).unwrap_err();
  assert!(format!("{err:#}").contains("max_partial_depth must be at least 1"));
}

#[test]
fn empty_path_rejected() {
  let tmp = tempfile::tempdir().unwrap();
  let path = write(tmp.path(), "folio.toml", "[preview]\ncontext = \"  \"\n");
  let err = load_folio_config(&path).unwrap_err();
  assert!(format!("{err:#}").contains("preview.context must not be empty"));
}

#[test]
fn unparseable_config_reports_path() {
  let tmp = tempfile::tempdir().unwrap();
  let path = write(tmp.path(), "folio.toml", "[preview\n");
  let err = load_folio_config(&path).unwrap_err();
  assert!(err.to_string().starts_with("failed to parse"));
}

#[test]
fn find_config_walks_upward() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "folio.toml", "[preview]\n");
  let nested = tmp.path().join("templates/letters");
  std::fs::create_dir_all(&nested).unwrap();

  let found = find_folio_config(&nested).unwrap();
  assert_eq!(found, tmp.path().canonicalize().unwrap().join("folio.toml"));
}

#[test]
fn find_config_missing() {
  let tmp = tempfile::tempdir().unwrap();
  // tempdir parents are not expected to carry a folio.toml
  assert!(find_folio_config(tmp.path()).is_err());
}
