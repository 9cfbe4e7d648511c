// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes an authentication request to the evaluation path for a capability.

use std::sync::Weak;

use localauth_core::{EvaluationPolicy, SessionError, VerificationCapability, VerificationContext};
use tracing::debug;

use crate::channel::{Liveness, SessionChannel};

/// Capability-to-strategy routing.
///
/// Both biometric tiers share the biometric-preferred path. `Unavailable`
/// never reaches the provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyDispatcher;

impl StrategyDispatcher {
    /// The evaluation policy used for `capability`, or `None` if it cannot be evaluated.
    pub fn policy_for(capability: VerificationCapability) -> Option<EvaluationPolicy> {
        match capability {
            VerificationCapability::PrimaryBiometric | VerificationCapability::SecondaryBiometric => {
                Some(EvaluationPolicy::BiometricPreferred)
            }
            VerificationCapability::PassphraseFallback => Some(EvaluationPolicy::DeviceOwnerAny),
            VerificationCapability::Unavailable => None,
        }
    }

    pub(crate) fn dispatch(
        capability: VerificationCapability,
        context: &dyn VerificationContext,
        reason: &str,
        owner: Weak<Liveness>,
    ) -> SessionChannel {
        match Self::policy_for(capability) {
            Some(policy) => SessionChannel::evaluate(context, policy, reason, owner),
            None => {
                debug!(%capability, "no verification capability, failing without evaluation");
                SessionChannel::failed(SessionError::CapabilityUnavailable)
            }
        }
    }
}
