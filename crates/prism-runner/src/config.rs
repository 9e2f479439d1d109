//! Runner configuration, loaded from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::WrapErr;
use prism_core::WorldRef;
use prism_persist::StaticWorlds;
use serde::Deserialize;
use tracing::info;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_dir: PathBuf,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    #[serde(default)]
    pub worlds: Vec<WorldConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorldConfig {
    pub name: String,
    pub id: u32,
}

const fn default_tick_rate() -> f64 {
    20.0
}

impl Config {
    /// Read `path`, writing the bundled default there first if it is missing.
    pub fn load(path: &Path) -> eyre::Result<Self> {
        if path.exists() {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("read config {}", path.display()))?;
            return toml::from_str(&text)
                .wrap_err_with(|| format!("parse config {}", path.display()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).wrap_err("create config dir")?;
        }
        fs::write(path, DEFAULT_CONFIG).wrap_err("write default config")?;
        info!("Created default config at {}", path.display());
        toml::from_str(DEFAULT_CONFIG).wrap_err("parse default config")
    }

    /// Load from `PRISM_CONFIG` (default `config.toml`), then apply `PRISM_DATA_DIR`.
    pub fn from_env() -> eyre::Result<Self> {
        let path = std::env::var("PRISM_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));
        let data_dir = std::env::var("PRISM_DATA_DIR").ok().map(PathBuf::from);

        Ok(Self::load(&path)?.with_data_dir(data_dir))
    }

    #[must_use]
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    pub fn areas_path(&self) -> PathBuf {
        self.data_dir.join("areas.json")
    }

    pub fn worlds(&self) -> StaticWorlds {
        StaticWorlds::new(
            self.worlds
                .iter()
                .map(|w| WorldRef::new(w.id, w.name.clone())),
        )
    }

    /// Time per tick. Rates below one tick per second are raised to one.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1.0))
    }
}
