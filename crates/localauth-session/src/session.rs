// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session facade over one live verification context.
//!
//! The session owns its context exclusively and caches the detected
//! capability. Detection runs on construction and on every rotation:
//! `Uninitialized -> Detected(c)`, then `Detected(c1) -> Detected(c2)` per
//! `invalidate`. `authenticate` only reads that state.

use std::fmt;
use std::sync::Arc;

use localauth_config::LocalAuthConfig;
use localauth_core::{DetectionState, VerificationCapability, VerificationContext};
use tracing::{debug, info};

use crate::channel::{Liveness, SessionChannel};
use crate::detector::CapabilityDetector;
use crate::dispatcher::StrategyDispatcher;

/// An authentication session bound to one verification epoch at a time.
pub struct AuthSession {
    session_id: String,
    context: Box<dyn VerificationContext>,
    detector: CapabilityDetector,
    state: DetectionState,
    epoch: u64,
    liveness: Arc<Liveness>,
}

impl AuthSession {
    /// Creates a session with the default detector. Detection runs before this returns.
    pub fn new(context: Box<dyn VerificationContext>) -> Self {
        Self::with_detector(context, CapabilityDetector::default())
    }

    /// Creates a session whose detector follows `config.detection`.
    pub fn from_config(context: Box<dyn VerificationContext>, config: &LocalAuthConfig) -> Self {
        Self::with_detector(context, CapabilityDetector::from_config(&config.detection))
    }

    pub fn with_detector(context: Box<dyn VerificationContext>, detector: CapabilityDetector) -> Self {
        let mut session = Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            context,
            detector,
            state: DetectionState::Uninitialized,
            epoch: 0,
            liveness: Arc::new(Liveness),
        };
        session.detect();
        info!(
            session_id = %session.session_id,
            state = %session.state,
            "auth session created"
        );
        session
    }

    /// Starts an authentication against the live context.
    ///
    /// `reason` is handed to the provider unchanged. The returned channel is
    /// independent of the session: it survives `invalidate`, and yields no
    /// value if the session is dropped before the provider replies.
    pub fn authenticate(&self, reason: &str) -> SessionChannel {
        let capability = self.capability();
        debug!(
            session_id = %self.session_id,
            epoch = self.epoch,
            %capability,
            "authenticate requested"
        );
        StrategyDispatcher::dispatch(
            capability,
            self.context.as_ref(),
            reason,
            Arc::downgrade(&self.liveness),
        )
    }

    /// Tears down the live context, installs `new_context`, and re-detects.
    ///
    /// Channels already handed out keep running against the context they
    /// started on.
    pub fn invalidate(&mut self, new_context: Box<dyn VerificationContext>) {
        self.context.invalidate();
        self.context = new_context;
        self.epoch += 1;

        let previous = self.state;
        self.detect();
        info!(
            session_id = %self.session_id,
            epoch = self.epoch,
            from = %previous,
            to = %self.state,
            "verification context rotated"
        );
    }

    /// Cached capability as `(has_capability, kind)`. Does not re-probe.
    pub fn current_capability(&self) -> (bool, Option<VerificationCapability>) {
        match self.state.capability() {
            Some(capability) if capability.is_available() => (true, Some(capability)),
            _ => (false, None),
        }
    }

    pub fn state(&self) -> DetectionState {
        self.state
    }

    /// Number of completed context rotations.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn capability(&self) -> VerificationCapability {
        self.state
            .capability()
            .unwrap_or(VerificationCapability::Unavailable)
    }

    fn detect(&mut self) {
        let capability = self.detector.detect(self.context.as_ref());
        debug!(session_id = %self.session_id, %capability, "capability detected");
        self.state = DetectionState::Detected(capability);
    }
}

impl Drop for AuthSession {
    fn drop(&mut self) {
        debug!(session_id = %self.session_id, epoch = self.epoch, "auth session torn down");
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}
