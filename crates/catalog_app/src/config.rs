use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_engine::FetchSettings;
use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

const DEFAULT_CONFIG_FILENAME: &str = "catalog.ron";

/// Optional on-disk settings. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub favorites_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read `path`, or `./catalog.ron` when no path is given. A missing file
    /// yields defaults; a malformed one is logged and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                engine_warn!("Failed to read config from {:?}: {}", path, err);
                return Self::default();
            }
        };

        match ron::from_str(&content) {
            Ok(config) => {
                engine_info!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                engine_warn!("Failed to parse config from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    /// Command-line flags take precedence over file values.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(dir) = &cli.favorites_dir {
            self.favorites_dir = Some(dir.clone());
        }
        self
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        let defaults = FetchSettings::default();
        FetchSettings {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            request_timeout: self
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            ..FetchSettings::default()
        }
    }

    pub fn favorites_dir(&self) -> PathBuf {
        self.favorites_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
