//! Application config persisted at `~/.taskflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskflowError};
use crate::store::DEFAULT_PAGE_LIMIT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Task file; defaults to `~/.taskflow/tasks.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ThemeConfig {
    #[serde(default)]
    pub dark_mode: bool,
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            log_file: None,
            page_limit: default_page_limit(),
            theme: ThemeConfig::default(),
        }
    }
}

/// `~/.taskflow/`, or `./.taskflow` when no home directory is known.
pub fn taskflow_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taskflow")
}

pub fn config_path() -> PathBuf {
    taskflow_dir().join("config.toml")
}

pub fn session_path() -> PathBuf {
    taskflow_dir().join("session.json")
}

impl Config {
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| taskflow_dir().join("tasks.json"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| taskflow_dir().join("taskflow.log"))
    }
}

/// Missing file yields the defaults; a malformed one is an error.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    if config.page_limit == 0 {
        return Err(TaskflowError::config("page_limit must be at least 1"));
    }
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(&config_path(), config)
}
