//! Window specifications and the startup configuration resolver.
//!
//! A `WindowSpec` describes one overlay window: the URL it hosts and its
//! display parameters. Specs come from exactly one of two places, decided at
//! startup:
//! - any explicit CLI argument builds a single spec and bypasses the file;
//! - otherwise `config.json` next to the executable is loaded as a JSON array
//!   of entries, each requiring a string `url`.
//!
//! Config entries outlive their windows so the tray can re-open them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Immutable description of one overlay window.
///
/// File entries default `title` to the empty string so the tray can apply its
/// positional fallback label; the OS window title falls back separately at
/// creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSpec {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_coord")]
    pub x: i32,
    #[serde(default = "default_coord")]
    pub y: i32,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub fullscreen: bool,
}

fn default_width() -> u32 {
    450
}

fn default_height() -> u32 {
    650
}

fn default_coord() -> i32 {
    -1
}

fn default_opacity() -> f64 {
    1.0
}

/// Fatal configuration problems. Reported to the operator and the process
/// exits with status 1; a partial startup with dropped entries is never
/// allowed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("config is not an array")]
    NotAnArray,
    #[error("config array is empty")]
    Empty,
    #[error("config entry is not valid (url is required): {entry}")]
    InvalidEntry { entry: String },
}

/// The config file lives next to the executable.
pub fn config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Produce the ordered spec list for this run.
///
/// `configured` is true when the user passed any explicit CLI argument, in
/// which case `cli_spec` wins and the file is not consulted.
pub fn resolve(
    cli_spec: WindowSpec,
    configured: bool,
    path: &Path,
) -> Result<Vec<Rc<WindowSpec>>, ConfigError> {
    let specs = if !configured && path.exists() {
        debug!(path = %path.display(), "loading window specs from config file");
        load_file(path)?
    } else {
        vec![cli_spec]
    };
    Ok(specs.into_iter().map(Rc::new).collect())
}

fn load_file(path: &Path) -> Result<Vec<WindowSpec>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;
    let entries = value.as_array().ok_or(ConfigError::NotAnArray)?;
    if entries.is_empty() {
        return Err(ConfigError::Empty);
    }

    let mut specs = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.get("url").is_some_and(serde_json::Value::is_string) {
            return Err(ConfigError::InvalidEntry {
                entry: entry.to_string(),
            });
        }
        let spec: WindowSpec =
            serde_json::from_value(entry.clone()).map_err(|_| ConfigError::InvalidEntry {
                entry: entry.to_string(),
            })?;
        specs.push(spec);
    }
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli_defaults() -> WindowSpec {
        WindowSpec {
            url: "./help.html".to_string(),
            title: "Stream Overlay".to_string(),
            width: 450,
            height: 650,
            x: -1,
            y: -1,
            opacity: 1.0,
            fullscreen: false,
        }
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn file_entry_with_only_url_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"[{"url":"a.html"}]"#);

        let specs = resolve(cli_defaults(), false, &path).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].url, "a.html");
        assert_eq!(specs[0].title, "");
        assert_eq!(specs[0].width, 450);
        assert_eq!(specs[0].height, 650);
        assert_eq!(specs[0].x, -1);
        assert_eq!(specs[0].y, -1);
        assert_eq!(specs[0].opacity, 1.0);
        assert!(!specs[0].fullscreen);
    }

    #[test]
    fn file_entries_resolve_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"[{"url":"a.html"},{"url":"b.html","title":"B"}]"#);

        let specs = resolve(cli_defaults(), false, &path).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].url, "a.html");
        assert_eq!(specs[1].url, "b.html");
        assert_eq!(specs[1].title, "B");
    }

    #[test]
    fn explicit_args_bypass_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"[{"url":"a.html"},{"url":"b.html"}]"#);

        let mut spec = cli_defaults();
        spec.url = "cli.html".to_string();
        let specs = resolve(spec, true, &path).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].url, "cli.html");
    }

    #[test]
    fn missing_file_falls_back_to_cli_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let specs = resolve(cli_defaults(), false, &path).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].url, "./help.html");
        assert_eq!(specs[0].title, "Stream Overlay");
    }

    #[test]
    fn empty_array_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[]");

        let err = resolve(cli_defaults(), false, &path).unwrap_err();
        assert!(matches!(err, ConfigError::Empty));
    }

    #[test]
    fn non_array_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"url":"a.html"}"#);

        let err = resolve(cli_defaults(), false, &path).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnArray));
    }

    #[test]
    fn entry_without_url_names_the_offender() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"[{"url":"a.html"},{"title":"no url"}]"#);

        let err = resolve(cli_defaults(), false, &path).unwrap_err();
        match err {
            ConfigError::InvalidEntry { entry } => assert!(entry.contains("no url")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn entry_with_non_string_url_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"[{"url":42}]"#);

        let err = resolve(cli_defaults(), false, &path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[{");

        let err = resolve(cli_defaults(), false, &path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
