//! User configuration loaded from `config.toml`.
//!
//! Every key is optional. A missing file means defaults; an unreadable or
//! malformed file is logged and also means defaults, so a typo in config never
//! prevents the report from opening.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Directory (relative to the working directory) holding the handoff database
/// and the log file.
pub const STATE_DIR: &str = ".codesense";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme name passed to `Theme::from_name`.
    pub theme: String,
    /// Handoff database path.
    pub handoff_db: PathBuf,
    /// `tracing` filter directive, e.g. `"debug"` or `"codesense_core=trace"`.
    pub log_level: String,
    /// Extension used to choose a syntax for code highlighting.
    pub syntax: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            handoff_db: Path::new(STATE_DIR).join("handoff.db"),
            log_level: "info".to_owned(),
            syntax: "txt".to_owned(),
        }
    }
}

impl Config {
    /// Loads the config from [`config_path`].
    ///
    /// Returns the config plus an optional warning; logging is not set up yet
    /// when this runs, so the caller reports the warning once it is.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(&config_path())
    }

    /// Loads the config from `path`. See [`Config::load`].
    pub fn load_from(path: &Path) -> (Self, Option<String>) {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (Self::default(), None),
            Err(e) => {
                return (Self::default(), Some(format!("cannot read {}: {e}", path.display())))
            }
        };
        match toml::from_str(&raw) {
            Ok(config) => (config, None),
            Err(e) => (
                Self::default(),
                Some(format!("config parse error in {}: {e}", path.display())),
            ),
        }
    }

    /// Applies command-line overrides on top of the file values.
    pub fn merge_cli(mut self, cli: &crate::cli::Cli) -> Self {
        if let Some(theme) = &cli.theme {
            self.theme = theme.clone();
        }
        if let Some(db) = &cli.db {
            self.handoff_db = db.clone();
        }
        if let Some(syntax) = &cli.syntax {
            self.syntax = syntax.clone();
        }
        self
    }
}

/// Returns the path to the codesense config file.
///
/// Prefers `$XDG_CONFIG_HOME/codesense/config.toml`; falls back to
/// `~/.config/codesense/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("codesense").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_gives_defaults_silently() {
        let dir = tempfile::TempDir::new().unwrap();
        let (config, warning) = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let (_dir, path) = write_config("theme = \"dark\"\nsyntax = \"py\"\n");
        let (config, warning) = Config::load_from(&path);
        assert!(warning.is_none());
        assert_eq!(config.theme, "dark");
        assert_eq!(config.syntax, "py");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.handoff_db, Path::new(".codesense").join("handoff.db"));
    }

    #[test]
    fn malformed_file_warns_and_uses_defaults() {
        let (_dir, path) = write_config("theme = [unterminated");
        let (config, warning) = Config::load_from(&path);
        assert_eq!(config, Config::default());
        assert!(warning.unwrap().contains("config parse error"));
    }

    #[test]
    fn cli_overrides_file_values() {
        use clap::Parser;
        let cli = crate::cli::Cli::try_parse_from([
            "codesense", "--theme", "dark", "--db", "/tmp/h.db",
        ])
        .unwrap();
        let config = Config::default().merge_cli(&cli);
        assert_eq!(config.theme, "dark");
        assert_eq!(config.handoff_db, PathBuf::from("/tmp/h.db"));
        assert_eq!(config.syntax, "txt");
    }
}
