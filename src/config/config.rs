use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub bind_address: String,
    pub endpoint: String,
    pub model_name: String,
    pub model_directory: String,
    // "builtin", a local path, or an http(s) URL
    pub package_source: String,
    // None leaves the download unbounded
    pub download_timeout_secs: Option<u64>,
    pub preload_model: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_address: "127.0.0.1:3000".to_string(),
            endpoint: "/api/lemmatize".to_string(),
            model_name: "en_core_lexicon".to_string(),
            model_directory: "models".to_string(),
            package_source: "builtin".to_string(),
            download_timeout_secs: None,
            preload_model: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn model_directory_path(&self) -> PathBuf {
        PathBuf::from(&self.model_directory)
    }

    pub fn download_timeout(&self) -> Option<Duration> {
        self.download_timeout_secs.map(Duration::from_secs)
    }
}

pub fn try_load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

// Falls back to defaults on a missing or broken file; the service must still come up.
pub fn load_config<P: AsRef<Path>>(path: P) -> Config {
    let path = path.as_ref();
    if !path.exists() {
        info!("{} not found, using default configuration", path.display());
        return Config::default();
    }

    match try_load_config(path) {
        Ok(config) => {
            info!("loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            warn!(
                "error reading {}: {}, using default configuration",
                path.display(),
                e
            );
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"model_directory": "/var/lib/lemma", "preload_model": true}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = load_config(file.path());
        assert_eq!(config.model_directory, "/var/lib/lemma");
        assert!(config.preload_model);
        assert_eq!(config.endpoint, "/api/lemmatize");
        assert_eq!(config.package_source, "builtin");
        assert!(config.download_timeout().is_none());
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        file.flush().unwrap();

        assert!(try_load_config(file.path()).is_err());
        assert_eq!(load_config(file.path()), Config::default());
    }

    #[test]
    fn test_download_timeout() {
        let config = Config {
            download_timeout_secs: Some(90),
            ..Config::default()
        };
        assert_eq!(config.download_timeout(), Some(Duration::from_secs(90)));
    }
}
