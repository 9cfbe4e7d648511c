// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login/logout access gate for host applications.
//!
//! Publishes an access flag over a `watch` channel, classifies failures into
//! [`ErrorKind`](localauth_core::ErrorKind) for logging, and rotates the
//! verification context on logout.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use localauth_config::LocalAuthConfig;
use localauth_core::{ContextFactory, SessionResult};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::session::AuthSession;

/// Owns an [`AuthSession`] and the access flag derived from it.
pub struct AccessGate {
    session: AuthSession,
    factory: Box<dyn ContextFactory>,
    reason: String,
    access: Arc<watch::Sender<bool>>,
    generation: Arc<AtomicU64>,
}

impl AccessGate {
    /// Builds a gate whose first context comes from `factory`.
    pub fn new(factory: impl ContextFactory + 'static, config: &LocalAuthConfig) -> Self {
        let session = AuthSession::from_config(factory.create(), config);
        let (access, _) = watch::channel(false);
        Self {
            session,
            factory: Box::new(factory),
            reason: config.gate.reason.clone(),
            access: Arc::new(access),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Subscribes to the access flag.
    pub fn access(&self) -> watch::Receiver<bool> {
        self.access.subscribe()
    }

    pub fn is_allowed(&self) -> bool {
        *self.access.borrow()
    }

    /// Authenticates and publishes the verdict.
    ///
    /// The returned future does not borrow the gate, so `logout` may run while
    /// it is pending. A result that lands after a logout is returned to the
    /// caller but not published.
    pub fn login(&self) -> impl Future<Output = Option<SessionResult>> + Send + use<> {
        let channel = self.session.authenticate(&self.reason);
        let access = Arc::clone(&self.access);
        let generation = Arc::clone(&self.generation);
        let started_in = generation.load(Ordering::Acquire);
        let session_id = self.session.session_id().to_string();

        async move {
            let outcome = channel.await;
            match &outcome {
                Some(Ok(granted)) => {
                    if publish(&access, &generation, started_in, *granted) {
                        info!(%session_id, granted = *granted, "login completed");
                    } else {
                        debug!(%session_id, "login completed after logout, not publishing");
                    }
                }
                Some(Err(err)) => {
                    let kind = err.kind();
                    warn!(%session_id, %kind, error = %err, "{}", kind.message());
                }
                None => debug!(%session_id, "login ended without a result"),
            }
            outcome
        }
    }

    /// Revokes access and rotates to a fresh verification context.
    pub fn logout(&mut self) {
        // Bumped under the watch lock so no login can publish in between.
        self.access.send_modify(|allowed| {
            self.generation.fetch_add(1, Ordering::AcqRel);
            *allowed = false;
        });
        self.session.invalidate(self.factory.create());
        info!(
            session_id = %self.session.session_id(),
            epoch = self.session.epoch(),
            "logged out"
        );
    }
}

/// Writes `granted` unless a logout happened since `started_in`.
///
/// The generation check and the write happen under the watch lock, which
/// `logout` also holds while bumping the generation. Returns whether the
/// value was published.
fn publish(
    access: &watch::Sender<bool>,
    generation: &AtomicU64,
    started_in: u64,
    granted: bool,
) -> bool {
    let mut published = false;
    access.send_if_modified(|allowed| {
        if generation.load(Ordering::Acquire) != started_in {
            return false;
        }
        *allowed = granted;
        published = true;
        true
    });
    published
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_writes_while_generation_is_current() {
        let (access, mut rx) = watch::channel(false);
        let generation = AtomicU64::new(3);

        assert!(publish(&access, &generation, 3, true));
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());
    }

    #[test]
    fn publish_is_refused_once_generation_moves() {
        let (access, mut rx) = watch::channel(false);
        let generation = AtomicU64::new(0);
        generation.fetch_add(1, Ordering::AcqRel);

        assert!(!publish(&access, &generation, 0, true));
        assert!(!rx.has_changed().unwrap());
        assert!(!*rx.borrow_and_update());
    }

    #[test]
    fn concurrent_logout_never_leaves_access_granted() {
        use std::thread;

        for _ in 0..500 {
            let access = Arc::new(watch::channel(false).0);
            let generation = Arc::new(AtomicU64::new(0));

            let login = {
                let access = Arc::clone(&access);
                let generation = Arc::clone(&generation);
                thread::spawn(move || publish(&access, &generation, 0, true))
            };
            access.send_modify(|allowed| {
                generation.fetch_add(1, Ordering::AcqRel);
                *allowed = false;
            });
            let published = login.join().unwrap();

            // Either the login landed first and logout cleared it, or the
            // login saw the new generation and stayed silent.
            assert!(!*access.borrow());
            if !published {
                assert_eq!(generation.load(Ordering::Acquire), 1);
            }
        }
    }
}
