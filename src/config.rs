use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cli::{ColorMode, SortOrder};
use crate::core::{RankBy, WeekStart};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) order: Option<SortOrder>,
    pub(crate) color: Option<ColorMode>,
    pub(crate) no_color: bool,
    pub(crate) week_start: Option<WeekStart>,
    pub(crate) rank_by: Option<RankBy>,
    pub(crate) summary_url: Option<String>,
    pub(crate) summary_timeout_secs: Option<u64>,
    pub(crate) debug: bool,
    pub(crate) file: Option<PathBuf>,
}

/// A parsed config plus what happened while looking for it.
///
/// Loading runs before logging is installed, so outcomes are kept and
/// reported through [`LoadedConfig::log`] afterwards.
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    pub(crate) rejected: Vec<(PathBuf, String)>,
}

impl LoadedConfig {
    pub(crate) fn log(&self) {
        for (path, error) in &self.rejected {
            warn!("Ignoring config {}: {}", path.display(), error);
        }
        match &self.path {
            Some(path) => debug!(path = %path.display(), "loaded config"),
            None => debug!("no config file, using defaults"),
        }
    }
}

impl Config {
    pub(crate) fn load() -> LoadedConfig {
        Self::load_from(&Self::config_paths())
    }

    /// First readable, well-formed file wins; malformed files are skipped.
    pub(crate) fn load_from(paths: &[PathBuf]) -> LoadedConfig {
        let mut loaded = LoadedConfig::default();
        for path in paths {
            let Ok(content) = fs::read_to_string(path) else {
                continue;
            };
            match Self::parse(&content) {
                Ok(config) => {
                    loaded.config = config;
                    loaded.path = Some(path.clone());
                    break;
                }
                Err(e) => loaded.rejected.push((path.clone(), e.to_string())),
            }
        }
        loaded
    }

    fn parse(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // ~/.config/sessionstats/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(app_config_file(&home.join(".config")));
        }

        // Platform config dir, e.g. ~/Library/Application Support on macOS
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = app_config_file(&config_dir);
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".sessionstats.toml"));
        }

        paths
    }
}

fn app_config_file(base: &Path) -> PathBuf {
    base.join("sessionstats").join("config.toml")
}
