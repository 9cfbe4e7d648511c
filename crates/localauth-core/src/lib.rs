// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for localauth.
//!
//! This crate provides the closed capability model, the error taxonomy, and
//! the traits an external verification provider implements. The session
//! machinery in `localauth-session` is built on top of these.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ErrorKind, ProviderError, ProviderErrorCode, SessionError, SessionResult};
pub use traits::{ContextFactory, EvaluationReply, VerificationContext};
pub use types::{BiometryModality, DetectionState, EvaluationPolicy, VerificationCapability};
