// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for localauth.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use localauth_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Prompt reason: {}", config.gate.reason);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{DetectionConfig, GateConfig, LocalAuthConfig, UnknownModalityPolicy};

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<LocalAuthConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<LocalAuthConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

fn finish(
    loaded: Result<LocalAuthConfig, figment::Error>,
) -> Result<LocalAuthConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                unknown_modality = ?config.detection.unknown_modality,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
