// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The verification context: one epoch of the device's identity-check subsystem.

use crate::error::ProviderError;
use crate::types::{BiometryModality, EvaluationPolicy};

/// Completion callback handed to [`VerificationContext::evaluate`].
///
/// `Ok(success)` carries the provider's verdict; `Err` carries its error unchanged.
pub type EvaluationReply = Box<dyn FnOnce(Result<bool, ProviderError>) + Send + 'static>;

/// Opaque, stateful handle onto the platform's local verification capability.
///
/// A context is single-epoch: once [`invalidate`](Self::invalidate) has been
/// called it must never be evaluated again.
pub trait VerificationContext: Send + Sync + 'static {
    /// Probes whether `policy` can currently be evaluated.
    ///
    /// Both `Ok(false)` and `Err(_)` mean the tier is not supported.
    fn can_evaluate(&self, policy: EvaluationPolicy) -> Result<bool, ProviderError>;

    /// The biometric modality the device reports.
    fn biometry_modality(&self) -> BiometryModality;

    /// Starts an evaluation. `reply` may be invoked synchronously, later from
    /// another thread, or never.
    fn evaluate(&self, policy: EvaluationPolicy, reason: &str, reply: EvaluationReply);

    /// Ends this epoch.
    fn invalidate(&self);
}

/// Produces fresh verification contexts for session rotation.
pub trait ContextFactory: Send + Sync {
    fn create(&self) -> Box<dyn VerificationContext>;
}

impl<F> ContextFactory for F
where
    F: Fn() -> Box<dyn VerificationContext> + Send + Sync,
{
    fn create(&self) -> Box<dyn VerificationContext> {
        self()
    }
}
