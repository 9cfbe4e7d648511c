// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at load time.

use serde::{Deserialize, Serialize};

/// Top-level localauth configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LocalAuthConfig {
    /// Capability detection settings.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Host access gate settings.
    #[serde(default)]
    pub gate: GateConfig,
}

/// Capability detection configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionConfig {
    /// What a biometric-capable context with an unrecognized modality resolves to.
    #[serde(default)]
    pub unknown_modality: UnknownModalityPolicy,
}

/// Resolution for a biometric probe that succeeds with an unrecognized modality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownModalityPolicy {
    /// Declare the device unavailable without probing further.
    #[default]
    Unavailable,
    /// Continue with the device-owner probe.
    PassphraseFallback,
}

/// Host access gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Justification shown to the user by the verification prompt.
    #[serde(default = "default_reason")]
    pub reason: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            reason: default_reason(),
        }
    }
}

fn default_reason() -> String {
    "Please login to continue".to_string()
}
