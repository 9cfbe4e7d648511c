// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the localauth configuration system.

use localauth_config::diagnostic::ConfigError;
use localauth_config::model::{LocalAuthConfig, UnknownModalityPolicy};
use localauth_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[detection]
unknown_modality = "passphrase_fallback"

[gate]
reason = "Unlock your notes"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(
        config.detection.unknown_modality,
        UnknownModalityPolicy::PassphraseFallback
    );
    assert_eq!(config.gate.reason, "Unlock your notes");
}

/// An empty document yields the compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    let defaults = LocalAuthConfig::default();
    assert_eq!(
        config.detection.unknown_modality,
        UnknownModalityPolicy::Unavailable
    );
    assert_eq!(config.gate.reason, defaults.gate.reason);
    assert_eq!(config.gate.reason, "Please login to continue");
}

/// Unknown field in [gate] is rejected with a suggestion.
#[test]
fn unknown_field_in_gate_suggests_correction() {
    let toml = r#"
[gate]
reasn = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert!(
        errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "reasn" && s == "reason"
        )),
        "expected an UnknownKey suggestion, got: {errors:?}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[detecton]
unknown_modality = "unavailable"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown section");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion: Some(s), .. }
            if key == "detecton" && s == "detection"
    )));
}

/// An unknown policy variant becomes an InvalidValue diagnostic.
#[test]
fn unknown_policy_variant_is_rejected() {
    let toml = r#"
[detection]
unknown_modality = "guess"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown variant");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidValue { .. })),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful load.
#[test]
fn blank_reason_fails_validation() {
    let toml = r#"
[gate]
reason = ""
"#;

    let errors = load_and_validate_str(toml).expect_err("blank reason should fail");
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("gate.reason")));
}
