//! Tagger configuration: a tiny JSON file in the home directory.
//!
//! `{"discogs_token": "..."}`. A missing, unreadable or invalid file means
//! "not configured"; the tagger keeps working with MusicBrainz only.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = ".mp3_tagger_config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discogs_token: Option<String>,
}

impl Config {
    /// Token with surrounding whitespace removed, if there is a usable one.
    pub fn discogs_token(&self) -> Option<&str> {
        self.discogs_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// `~/.mp3_tagger_config.json`, or `None` when the home directory is unknown.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Load from the default location.
pub fn load() -> Config {
    match default_path() {
        Some(path) => load_from(&path),
        None => {
            warn!("could not determine home directory; Discogs not configured");
            Config::default()
        }
    }
}

pub fn load_from(path: &Path) -> Config {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file");
            return Config::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config");
            return Config::default();
        }
    };

    serde_json::from_str(&text).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "invalid config; ignoring");
        Config::default()
    })
}

/// Save to the default location; returns where it was written.
pub fn save(config: &Config) -> io::Result<PathBuf> {
    let path = default_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "home directory not found"))?;
    save_to(config, &path)?;
    Ok(path)
}

pub fn save_to(config: &Config, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_configured() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(&dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.discogs_token(), None);
    }

    #[test]
    fn invalid_json_is_not_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_from(&path), Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let cfg = Config { discogs_token: Some("abc123".into()) };

        save_to(&cfg, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"discogs_token\": \"abc123\""));
        assert_eq!(load_from(&path).discogs_token(), Some("abc123"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let cfg: Config = serde_json::from_str(r#"{"discogs_token": "   "}"#).unwrap();
        assert_eq!(cfg.discogs_token(), None);

        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.discogs_token, None);
    }
}
