// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - inspect the effective configuration

use crate::config;
use anyhow::Result;

/// Run the config command
pub fn run(key: &str, value: Option<String>) -> Result<()> {
    let cfg = config::load()?;

    match value {
        Some(v) => {
            // Persisted configuration is not supported yet; report the
            // attempt instead of silently dropping it.
            anyhow::bail!("Setting configuration is not supported (tried {} = {})", key, v);
        }
        None => match key {
            "data_dir" => println!("{}", cfg.data_dir.display()),
            "log_level" => println!("{}", cfg.log_level),
            other => anyhow::bail!("Unknown config key: {}. Valid: data_dir, log_level", other),
        },
    }

    Ok(())
}
