// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for persistent data (catalog, history)
    pub data_dir: std::path::PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = std::env::var_os("PARTLEDGER_DATA_DIR")
            .map(std::path::PathBuf::from)
            .or_else(|| {
                directories::ProjectDirs::from("org", "hyperpolymath", "partledger")
                    .map(|d| d.data_dir().to_path_buf())
            })
            .unwrap_or_else(|| std::path::PathBuf::from("~/.local/share/partledger"));

        Self {
            data_dir,
            log_level: "info".to_string(),
        }
    }
}

/// Load configuration from the environment or use defaults
pub fn load() -> Result<Config> {
    Ok(Config::default())
}
