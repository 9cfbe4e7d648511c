// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for local identity verification.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Result delivered exactly once per `authenticate` call.
pub type SessionResult = Result<bool, SessionError>;

/// Raw error code reported by a verification provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorCode {
    AuthenticationFailed,
    UserCancel,
    UserFallback,
    SystemCancel,
    PasscodeNotSet,
    BiometryNotAvailable,
    BiometryNotEnrolled,
    BiometryLockout,
    AppCancel,
    InvalidContext,
    NotInteractive,
    Other,
}

/// An error reported by the external verification provider, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    pub code: ProviderErrorCode,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failure branch of a [`SessionResult`].
///
/// Provider failures are carried unchanged in [`SessionError::External`];
/// classification into an [`ErrorKind`] is left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No verification method of any kind is usable. Raised without touching the provider.
    #[error("no verification method is available on this device")]
    CapabilityUnavailable,

    /// The provider's evaluation failed.
    #[error("verification provider error: {0}")]
    External(#[from] ProviderError),
}

impl SessionError {
    /// Classifies this error for host-side handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::CapabilityUnavailable => ErrorKind::CapabilityUnavailable,
            SessionError::External(err) => ErrorKind::from(err.code),
        }
    }

    /// The raw provider error, if this failure came from the provider.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            SessionError::CapabilityUnavailable => None,
            SessionError::External(err) => Some(err),
        }
    }
}

/// Host-facing error taxonomy.
///
/// Hosts are expected to match this exhaustively; [`ErrorKind::Other`] covers
/// provider-specific errors with no dedicated kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    CapabilityUnavailable,
    UserCancelled,
    SystemCancelled,
    PasscodeNotSet,
    NotEnrolled,
    AuthenticationFailed,
    Other,
}

impl ErrorKind {
    /// Human-readable description suitable for a host log line or banner.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::CapabilityUnavailable => "Biometry is not available.",
            ErrorKind::UserCancelled => "Authentication was cancelled by user.",
            ErrorKind::SystemCancelled => "Authentication was cancelled by the system.",
            ErrorKind::PasscodeNotSet => "A passcode has not been set.",
            ErrorKind::NotEnrolled => "Biometry has no enrolled identities.",
            ErrorKind::AuthenticationFailed => "Authentication failed.",
            ErrorKind::Other => "Authentication failed with a provider error.",
        }
    }
}

impl From<ProviderErrorCode> for ErrorKind {
    fn from(code: ProviderErrorCode) -> Self {
        match code {
            ProviderErrorCode::UserCancel => ErrorKind::UserCancelled,
            ProviderErrorCode::SystemCancel => ErrorKind::SystemCancelled,
            ProviderErrorCode::PasscodeNotSet => ErrorKind::PasscodeNotSet,
            ProviderErrorCode::BiometryNotEnrolled => ErrorKind::NotEnrolled,
            ProviderErrorCode::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            ProviderErrorCode::BiometryNotAvailable => ErrorKind::CapabilityUnavailable,
            ProviderErrorCode::UserFallback
            | ProviderErrorCode::BiometryLockout
            | ProviderErrorCode::AppCancel
            | ProviderErrorCode::InvalidContext
            | ProviderErrorCode::NotInteractive
            | ProviderErrorCode::Other => ErrorKind::Other,
        }
    }
}
