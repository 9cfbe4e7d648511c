// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock verification context for deterministic testing.
//!
//! `MockContext` implements `VerificationContext` with scripted probe outcomes.
//! Evaluations are recorded, and their replies are either fired immediately
//! or parked until the test completes them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use localauth_core::{
    BiometryModality, EvaluationPolicy, EvaluationReply, ProviderError, ProviderErrorCode,
    VerificationContext,
};

/// Scripted outcome of a capability probe.
#[derive(Debug, Clone)]
pub enum Probe {
    Supported,
    Unsupported,
    /// The probe call itself errors.
    Fails(ProviderError),
}

/// One recorded `evaluate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub policy: EvaluationPolicy,
    pub reason: String,
    /// Whether the context had already been invalidated when evaluated.
    pub after_invalidate: bool,
}

enum ReplyMode {
    Deferred,
    Immediate(Result<bool, ProviderError>),
}

struct MockState {
    biometric: Probe,
    device_owner: Probe,
    modality: BiometryModality,
    reply_mode: ReplyMode,
    evaluations: Vec<Evaluation>,
    pending: VecDeque<EvaluationReply>,
    invalidated: bool,
    probes: usize,
}

/// A verification context for tests.
///
/// Clones share state, so a test can hand one clone to a session and keep
/// another to drive and inspect it. By default nothing is supported and
/// evaluation replies are deferred.
#[derive(Clone)]
pub struct MockContext {
    state: Arc<Mutex<MockState>>,
}

impl MockContext {
    /// A context that supports nothing.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                biometric: Probe::Unsupported,
                device_owner: Probe::Unsupported,
                modality: BiometryModality::None,
                reply_mode: ReplyMode::Deferred,
                evaluations: Vec::new(),
                pending: VecDeque::new(),
                invalidated: false,
                probes: 0,
            })),
        }
    }

    /// Biometric support with a face modality (device-owner also supported).
    pub fn face() -> Self {
        Self::new()
            .with_biometric(Probe::Supported)
            .with_device_owner(Probe::Supported)
            .with_modality(BiometryModality::Face)
    }

    /// Biometric support with a fingerprint modality (device-owner also supported).
    pub fn fingerprint() -> Self {
        Self::face().with_modality(BiometryModality::Fingerprint)
    }

    /// Only device-owner (passcode) verification is supported.
    pub fn passcode_only() -> Self {
        Self::new().with_device_owner(Probe::Supported)
    }

    pub fn with_biometric(self, probe: Probe) -> Self {
        self.lock().biometric = probe;
        self
    }

    pub fn with_device_owner(self, probe: Probe) -> Self {
        self.lock().device_owner = probe;
        self
    }

    pub fn with_modality(self, modality: BiometryModality) -> Self {
        self.lock().modality = modality;
        self
    }

    /// Reply to every evaluation synchronously with `outcome`.
    pub fn replying(self, outcome: Result<bool, ProviderError>) -> Self {
        self.lock().reply_mode = ReplyMode::Immediate(outcome);
        self
    }

    /// Box a clone of this context for handing to a session.
    pub fn boxed(&self) -> Box<dyn VerificationContext> {
        Box::new(self.clone())
    }

    /// All evaluations recorded so far.
    pub fn evaluations(&self) -> Vec<Evaluation> {
        self.lock().evaluations.clone()
    }

    /// Number of evaluations made with `policy`.
    pub fn evaluation_count(&self, policy: EvaluationPolicy) -> usize {
        self.lock()
            .evaluations
            .iter()
            .filter(|e| e.policy == policy)
            .count()
    }

    /// Whether any evaluation happened after invalidation.
    pub fn evaluated_after_invalidate(&self) -> bool {
        self.lock().evaluations.iter().any(|e| e.after_invalidate)
    }

    /// Number of parked replies awaiting completion.
    pub fn pending_replies(&self) -> usize {
        self.lock().pending.len()
    }

    /// Fire the oldest parked reply with `outcome`. Returns `false` if none was parked.
    pub fn complete_next(&self, outcome: Result<bool, ProviderError>) -> bool {
        // Release the lock before running the reply.
        let reply = self.lock().pending.pop_front();
        match reply {
            Some(reply) => {
                reply(outcome);
                true
            }
            None => false,
        }
    }

    /// Drop every parked reply without invoking it.
    pub fn abandon_pending(&self) {
        let abandoned: Vec<_> = self.lock().pending.drain(..).collect();
        drop(abandoned);
    }

    pub fn is_invalidated(&self) -> bool {
        self.lock().invalidated
    }

    /// Number of `can_evaluate` calls seen.
    pub fn probe_count(&self) -> usize {
        self.lock().probes
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockContext {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationContext for MockContext {
    fn can_evaluate(&self, policy: EvaluationPolicy) -> Result<bool, ProviderError> {
        let mut state = self.lock();
        state.probes += 1;
        if state.invalidated {
            return Err(ProviderError::new(
                ProviderErrorCode::InvalidContext,
                "context has been invalidated",
            ));
        }
        let probe = match policy {
            EvaluationPolicy::BiometricPreferred => &state.biometric,
            EvaluationPolicy::DeviceOwnerAny => &state.device_owner,
        };
        match probe {
            Probe::Supported => Ok(true),
            Probe::Unsupported => Ok(false),
            Probe::Fails(err) => Err(err.clone()),
        }
    }

    fn biometry_modality(&self) -> BiometryModality {
        self.lock().modality.clone()
    }

    fn evaluate(&self, policy: EvaluationPolicy, reason: &str, reply: EvaluationReply) {
        let mut state = self.lock();
        let after_invalidate = state.invalidated;
        state.evaluations.push(Evaluation {
            policy,
            reason: reason.to_string(),
            after_invalidate,
        });
        let immediate = match &state.reply_mode {
            ReplyMode::Immediate(outcome) => Some(outcome.clone()),
            ReplyMode::Deferred => None,
        };
        match immediate {
            Some(outcome) => {
                drop(state);
                tracing::trace!(%policy, "mock context replying immediately");
                reply(outcome);
            }
            None => state.pending.push_back(reply),
        }
    }

    fn invalidate(&self) {
        self.lock().invalidated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn default_supports_nothing() {
        let ctx = MockContext::new();
        assert_eq!(ctx.can_evaluate(EvaluationPolicy::BiometricPreferred), Ok(false));
        assert_eq!(ctx.can_evaluate(EvaluationPolicy::DeviceOwnerAny), Ok(false));
        assert_eq!(ctx.probe_count(), 2);
    }

    #[test]
    fn deferred_replies_are_parked_until_completed() {
        let ctx = MockContext::face();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        ctx.evaluate(
            EvaluationPolicy::BiometricPreferred,
            "why",
            Box::new(move |outcome| {
                assert_eq!(outcome, Ok(true));
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(ctx.pending_replies(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        assert!(ctx.complete_next(Ok(true)));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!ctx.complete_next(Ok(true)));
    }

    #[test]
    fn clones_share_state() {
        let ctx = MockContext::passcode_only();
        let handle = ctx.clone();
        ctx.invalidate();
        assert!(handle.is_invalidated());
        assert!(handle.can_evaluate(EvaluationPolicy::DeviceOwnerAny).is_err());
    }

    #[test]
    fn evaluation_after_invalidate_is_recorded() {
        let ctx = MockContext::face().replying(Ok(true));
        ctx.invalidate();
        ctx.evaluate(EvaluationPolicy::BiometricPreferred, "late", Box::new(|_| {}));
        assert!(ctx.evaluated_after_invalidate());
    }
}
