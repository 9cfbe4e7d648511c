// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./localauth.toml` > `~/.config/localauth/localauth.toml` >
//! `/etc/localauth/localauth.toml` with environment variable overrides via `LOCALAUTH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LocalAuthConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/localauth/localauth.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "localauth.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/localauth/localauth.toml`
/// 3. `~/.config/localauth/localauth.toml`
/// 4. `./localauth.toml`
/// 5. `LOCALAUTH_*` environment variables
pub fn load_config() -> Result<LocalAuthConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LocalAuthConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LocalAuthConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LocalAuthConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LocalAuthConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LocalAuthConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Per-user configuration file, if a config directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("localauth/localauth.toml"))
}

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that
/// `LOCALAUTH_DETECTION_UNKNOWN_MODALITY` maps to `detection.unknown_modality`.
fn env_provider() -> Env {
    Env::prefixed("LOCALAUTH_").map(|key| {
        key.as_str()
            .replacen("detection_", "detection.", 1)
            .replacen("gate_", "gate.", 1)
            .into()
    })
}
