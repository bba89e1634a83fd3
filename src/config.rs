// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Ledgerdash", "ledgerdash"));

pub const DATA_FILE_NAME: &str = "ledger.csv";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Category suggestions offered by the menu. Entry is not restricted to these.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food",
    "Transportation",
    "Housing",
    "Entertainment",
    "Utilities",
    "Shopping",
    "Health",
    "Education",
    "Income",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub currency_symbol: String,
    pub categories: Vec<String>,
    pub recent_limit: usize,
    pub dashboard_months: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            currency_symbol: "₹".into(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            recent_limit: 10,
            dashboard_months: 6,
        }
    }
}

impl Config {
    /// Reads `path` if it exists, otherwise returns the defaults.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Parse config at {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolves the ledger file: explicit override, then config, then the platform data dir.
    pub fn data_path(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(p) = override_path {
            return Ok(p.to_path_buf());
        }
        if let Some(p) = &self.data_file {
            return Ok(p.clone());
        }
        default_data_path()
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

pub fn default_data_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join(DATA_FILE_NAME))
}
