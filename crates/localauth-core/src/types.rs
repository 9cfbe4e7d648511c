// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the detector, dispatcher, and session facade.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The verification strategy currently usable on a device.
///
/// Exactly one value is active per session at any time. It is recomputed when
/// a session is constructed and after every context rotation, never while an
/// evaluation is in flight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationCapability {
    /// Face-class biometric verification.
    PrimaryBiometric,
    /// Fingerprint-class biometric verification.
    SecondaryBiometric,
    /// No usable biometric, but device-owner (passcode-class) verification works.
    PassphraseFallback,
    /// Nothing usable.
    Unavailable,
}

impl VerificationCapability {
    /// Returns `true` for every tier except [`Unavailable`](Self::Unavailable).
    pub fn is_available(self) -> bool {
        !matches!(self, VerificationCapability::Unavailable)
    }

    /// Returns `true` for both biometric tiers.
    pub fn is_biometric(self) -> bool {
        matches!(
            self,
            VerificationCapability::PrimaryBiometric | VerificationCapability::SecondaryBiometric
        )
    }
}

/// Evaluation policy passed to a [`VerificationContext`](crate::VerificationContext).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPolicy {
    /// Biometric-class verification or better.
    BiometricPreferred,
    /// Any device-owner verification, including passcode.
    DeviceOwnerAny,
}

/// Concrete biometric modality reported by a verification context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometryModality {
    /// The context reports no biometric hardware.
    None,
    Face,
    Fingerprint,
    /// A modality this crate does not know how to classify.
    Unrecognized(String),
}

impl std::fmt::Display for BiometryModality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiometryModality::None => write!(f, "none"),
            BiometryModality::Face => write!(f, "face"),
            BiometryModality::Fingerprint => write!(f, "fingerprint"),
            BiometryModality::Unrecognized(name) => write!(f, "unrecognized({name})"),
        }
    }
}

/// Detection state of a single session.
///
/// `Uninitialized -> Detected(c)` happens during construction and every
/// context rotation moves `Detected(c1) -> Detected(c2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionState {
    Uninitialized,
    Detected(VerificationCapability),
}

impl DetectionState {
    /// The detected capability, if detection has run.
    pub fn capability(self) -> Option<VerificationCapability> {
        match self {
            DetectionState::Uninitialized => None,
            DetectionState::Detected(capability) => Some(capability),
        }
    }
}

impl std::fmt::Display for DetectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionState::Uninitialized => write!(f, "uninitialized"),
            DetectionState::Detected(capability) => write!(f, "detected({capability})"),
        }
    }
}
