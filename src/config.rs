use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};
use crate::timer::TICK_RATE_MS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tick_rate_ms: u64,
    pub db_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: TICK_RATE_MS,
            db_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

pub trait ConfigStore {
    /// Strict read: `Ok(None)` when no config exists yet
    fn try_load(&self) -> Result<Option<Config>>;
    fn save(&self, cfg: &Config) -> Result<()>;

    /// Defaults stand in for a missing or unreadable config. The error, if
    /// any, is handed back so it can be reported once logging is up.
    fn load_or_default(&self) -> (Config, Option<Error>) {
        match self.try_load() {
            Ok(cfg) => (cfg.unwrap_or_default(), None),
            Err(err) => (Config::default(), Some(err)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("quickfox_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn try_load(&self) -> Result<Option<Config>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice::<Config>(&bytes)
            .map(Some)
            .map_err(|source| Error::ConfigMalformed {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(|source| Error::ConfigMalformed {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
