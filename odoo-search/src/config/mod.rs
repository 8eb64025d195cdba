use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OdooSearchError, Result};

const ENV_URL: &str = "ODOO_URL";
const ENV_DATABASE: &str = "ODOO_DATABASE";
const ENV_USERNAME: &str = "ODOO_USERNAME";
const ENV_PASSWORD: &str = "ODOO_PASSWORD";

/// Connection settings that may come from the config file or environment.
/// Command-line flags take precedence over everything here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub url: Option<String>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let file = match Self::global_path() {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        Ok(file.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Only the `ODOO_*` variables, without touching the config file.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "odoo-search")
            .map(|d| d.config_dir().join("config.toml"))
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| OdooSearchError::Config(format!("{}: {e}", path.display())))
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &'static str| lookup(key).filter(|v| !v.is_empty());
        if let Some(url) = non_empty(ENV_URL) {
            self.url = Some(url);
        }
        if let Some(database) = non_empty(ENV_DATABASE) {
            self.database = Some(database);
        }
        if let Some(username) = non_empty(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = non_empty(ENV_PASSWORD) {
            self.password = Some(password);
        }
        self
    }
}
