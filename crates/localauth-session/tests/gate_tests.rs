// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login/logout flow tests for `AccessGate`.

use std::sync::{Arc, Mutex};

use localauth_config::{load_and_validate_str, LocalAuthConfig};
use localauth_core::{
    ErrorKind, EvaluationPolicy, ProviderError, ProviderErrorCode, VerificationContext,
};
use localauth_session::AccessGate;
use localauth_test_utils::MockContext;

type Created = Arc<Mutex<Vec<MockContext>>>;

/// A context factory that remembers every context it hands out.
fn recording_factory(
    make: fn() -> MockContext,
) -> (
    impl Fn() -> Box<dyn VerificationContext> + Send + Sync + 'static,
    Created,
) {
    let created: Created = Arc::default();
    let sink = Arc::clone(&created);
    let factory = move || {
        let ctx = make();
        sink.lock().unwrap().push(ctx.clone());
        ctx.boxed()
    };
    (factory, created)
}

fn nth(created: &Created, n: usize) -> MockContext {
    created.lock().unwrap()[n].clone()
}

#[tokio::test]
async fn successful_login_grants_access() {
    let (factory, created) = recording_factory(MockContext::face);
    let gate = AccessGate::new(factory, &LocalAuthConfig::default());
    let mut access = gate.access();
    assert!(!gate.is_allowed());

    let login = gate.login();
    nth(&created, 0).complete_next(Ok(true));
    assert_eq!(login.await, Some(Ok(true)));

    assert!(gate.is_allowed());
    assert!(access.has_changed().unwrap());
    assert!(*access.borrow_and_update());
}

#[tokio::test]
async fn negative_verdict_keeps_access_closed() {
    let (factory, created) = recording_factory(MockContext::face);
    let gate = AccessGate::new(factory, &LocalAuthConfig::default());

    let login = gate.login();
    nth(&created, 0).complete_next(Ok(false));
    assert_eq!(login.await, Some(Ok(false)));
    assert!(!gate.is_allowed());
}

#[tokio::test]
async fn failed_login_is_classified_and_denied() {
    let (factory, created) = recording_factory(MockContext::passcode_only);
    let gate = AccessGate::new(factory, &LocalAuthConfig::default());

    let login = gate.login();
    nth(&created, 0).complete_next(Err(ProviderError::new(
        ProviderErrorCode::PasscodeNotSet,
        "no passcode",
    )));

    let err = login.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PasscodeNotSet);
    assert!(!gate.is_allowed());
}

#[tokio::test]
async fn login_uses_configured_reason() {
    let config = load_and_validate_str(
        r#"
[gate]
reason = "Unlock your journal"
"#,
    )
    .unwrap();
    let (factory, created) = recording_factory(|| MockContext::face().replying(Ok(true)));
    let gate = AccessGate::new(factory, &config);

    assert_eq!(gate.login().await, Some(Ok(true)));

    let evaluations = nth(&created, 0).evaluations();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].reason, "Unlock your journal");
    assert_eq!(evaluations[0].policy, EvaluationPolicy::BiometricPreferred);
}

#[tokio::test]
async fn logout_revokes_access_and_rotates_context() {
    let (factory, created) = recording_factory(|| MockContext::face().replying(Ok(true)));
    let mut gate = AccessGate::new(factory, &LocalAuthConfig::default());

    assert_eq!(gate.login().await, Some(Ok(true)));
    assert!(gate.is_allowed());

    gate.logout();

    assert!(!gate.is_allowed());
    assert_eq!(gate.session().epoch(), 1);
    assert_eq!(created.lock().unwrap().len(), 2);
    assert!(nth(&created, 0).is_invalidated());
    assert!(!nth(&created, 1).is_invalidated());

    assert_eq!(gate.login().await, Some(Ok(true)));
    assert_eq!(nth(&created, 1).evaluations().len(), 1);
    assert!(!nth(&created, 0).evaluated_after_invalidate());
}

#[tokio::test]
async fn login_landing_after_logout_is_not_published() {
    let (factory, created) = recording_factory(MockContext::face);
    let mut gate = AccessGate::new(factory, &LocalAuthConfig::default());

    let stale = gate.login();
    gate.logout();

    nth(&created, 0).complete_next(Ok(true));
    assert_eq!(stale.await, Some(Ok(true)));
    assert!(!gate.is_allowed());
}

#[tokio::test]
async fn dropping_the_gate_abandons_pending_login() {
    let (factory, created) = recording_factory(MockContext::face);
    let gate = AccessGate::new(factory, &LocalAuthConfig::default());

    let login = gate.login();
    drop(gate);

    nth(&created, 0).complete_next(Ok(true));
    assert_eq!(login.await, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn logout_racing_a_completing_login_leaves_access_revoked() {
    for _ in 0..200 {
        let (factory, created) = recording_factory(MockContext::face);
        let mut gate = AccessGate::new(factory, &LocalAuthConfig::default());

        let login = tokio::spawn(gate.login());
        let driver = nth(&created, 0);
        let completion = std::thread::spawn(move || driver.complete_next(Ok(true)));

        gate.logout();
        assert!(completion.join().unwrap());
        assert_eq!(login.await.unwrap(), Some(Ok(true)));

        assert!(!gate.is_allowed());
    }
}

