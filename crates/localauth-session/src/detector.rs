// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability detection: classifies what a verification context can do.
//!
//! Probes run in two tiers. The biometric tier is sub-classified by the
//! reported modality; if it is unsupported the device-owner tier decides
//! between `PassphraseFallback` and `Unavailable`. A probe that errors is
//! treated the same as an unsupported tier.

use localauth_config::{DetectionConfig, UnknownModalityPolicy};
use localauth_core::{
    BiometryModality, EvaluationPolicy, VerificationCapability, VerificationContext,
};
use tracing::debug;

/// Classifies a [`VerificationContext`] into a [`VerificationCapability`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityDetector {
    unknown_modality: UnknownModalityPolicy,
}

impl CapabilityDetector {
    pub fn new(unknown_modality: UnknownModalityPolicy) -> Self {
        Self { unknown_modality }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.unknown_modality)
    }

    pub fn unknown_modality(&self) -> UnknownModalityPolicy {
        self.unknown_modality
    }

    /// Runs both probe tiers against `context`. Never fails.
    pub fn detect(&self, context: &dyn VerificationContext) -> VerificationCapability {
        if probe(context, EvaluationPolicy::BiometricPreferred) {
            let modality = context.biometry_modality();
            match modality {
                BiometryModality::Face => return VerificationCapability::PrimaryBiometric,
                BiometryModality::Fingerprint => {
                    return VerificationCapability::SecondaryBiometric;
                }
                BiometryModality::None | BiometryModality::Unrecognized(_) => {
                    debug!(%modality, policy = ?self.unknown_modality, "biometric probe passed without a known modality");
                    if self.unknown_modality == UnknownModalityPolicy::Unavailable {
                        return VerificationCapability::Unavailable;
                    }
                }
            }
        }

        if probe(context, EvaluationPolicy::DeviceOwnerAny) {
            VerificationCapability::PassphraseFallback
        } else {
            VerificationCapability::Unavailable
        }
    }
}

fn probe(context: &dyn VerificationContext, policy: EvaluationPolicy) -> bool {
    match context.can_evaluate(policy) {
        Ok(supported) => supported,
        Err(err) => {
            debug!(%policy, error = %err, "capability probe failed, treating tier as unsupported");
            false
        }
    }
}
