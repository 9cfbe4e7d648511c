// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Traits implemented by the external verification provider.

pub mod context;

pub use context::{ContextFactory, EvaluationReply, VerificationContext};
