// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::LocalAuthConfig;

/// Validate a deserialized configuration, collecting every failure.
pub fn validate_config(config: &LocalAuthConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.gate.reason.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gate.reason must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
