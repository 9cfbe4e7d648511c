// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for localauth.
//!
//! Provides a scriptable verification context so session behavior can be
//! exercised deterministically without platform hardware.
//!
//! # Components
//!
//! - [`MockContext`] - Verification context with configurable probes and
//!   deferred or immediate evaluation replies

pub mod mock_context;

pub use mock_context::{Evaluation, MockContext, Probe};
