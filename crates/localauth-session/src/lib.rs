// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication sessions over a device's local verification capability.
//!
//! - [`CapabilityDetector`] classifies a verification context into a capability tier.
//! - [`StrategyDispatcher`] maps a tier to its evaluation policy.
//! - [`SessionChannel`] bridges one provider callback into a single-shot future.
//! - [`AuthSession`] composes the three and handles context rotation.
//! - [`AccessGate`] is a host-side login/logout flow built on a session.

pub mod channel;
pub mod detector;
pub mod dispatcher;
pub mod gate;
pub mod session;

pub use channel::{ChannelId, SessionChannel};
pub use detector::CapabilityDetector;
pub use dispatcher::StrategyDispatcher;
pub use gate::AccessGate;
pub use session::AuthSession;
