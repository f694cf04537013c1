// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order (later overrides earlier): compiled defaults,
//! `/etc/lightup/lightup.toml`, `~/.config/lightup/lightup.toml`,
//! `./lightup.toml`, then `LIGHTUP_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use tracing::{debug, info};

use crate::model::LightupConfig;

/// Top-level tables an environment variable may address.
const SECTIONS: &[&str] = &[
    "app",
    "storage",
    "memory",
    "providers",
    "rate_limit",
    "follow_up",
];

const SYSTEM_CONFIG: &str = "/etc/lightup/lightup.toml";
const LOCAL_CONFIG: &str = "lightup.toml";

/// Candidate config files in merge order.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("lightup").join(LOCAL_CONFIG));
    }
    paths.push(PathBuf::from(LOCAL_CONFIG));
    paths
}

/// Builds the full figment before extraction.
pub fn build_figment() -> Figment {
    config_paths()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(LightupConfig::default())),
            |figment, path| {
                if path.is_file() {
                    debug!(path = %path.display(), "merging config file");
                }
                figment.merge(Toml::file(path))
            },
        )
        .merge(env_provider())
}

/// Loads configuration from the standard hierarchy with env overrides.
pub fn load_config() -> Result<LightupConfig, figment::Error> {
    let config: LightupConfig = build_figment().extract()?;
    info!(
        database = %config.storage.database_path,
        log_level = %config.app.log_level,
        "configuration loaded"
    );
    Ok(config)
}

/// Loads configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LightupConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LightupConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Loads configuration from an explicit file, still honoring env overrides.
pub fn load_config_from_path(path: &Path) -> Result<LightupConfig, figment::Error> {
    debug!(path = %path.display(), "loading config from explicit path");
    Figment::new()
        .merge(Serialized::defaults(LightupConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Maps `LIGHTUP_MEMORY_MAX_BUFFER_SIZE` to `memory.max_buffer_size`.
///
/// Only the first segment that names a known section becomes a table, so
/// underscores inside key names survive.
fn env_provider() -> Env {
    Env::prefixed("LIGHTUP_").map(|key| {
        let key = key.as_str();
        SECTIONS
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key.to_string())
            .into()
    })
}
