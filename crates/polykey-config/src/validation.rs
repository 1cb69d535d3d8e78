//! Range and layout checks for [`SynthConfig`].
//!
//! Every problem is collected before reporting, so a file with several bad
//! values fails once with all of them listed.
//!
//! ```rust
//! use polykey_config::{SynthConfig, ValidationError, validate_config};
//!
//! let mut config = SynthConfig::default();
//! assert!(validate_config(&config).is_ok());
//!
//! config.mixer.master_gain = 3.0;
//! assert!(matches!(
//!     validate_config(&config),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use std::collections::HashSet;
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::settings::{AudioSettings, KeyboardSettings, MixerSettings, SynthConfig};

/// Highest note count the keyboard tracker handles.
pub const MAX_NOTE_KEYS: usize = 16;

/// Sample rates accepted for rendering and playback, in Hz.
pub const SAMPLE_RATE_RANGE: RangeInclusive<u32> = 8_000..=192_000;

/// Highest instrument selector in the standard bank.
pub const MAX_INSTRUMENT: u8 = 5;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Numeric value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted name of the setting, e.g. `audio.sample_rate`.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Key characters are missing, repeated or overlapping.
    #[error("invalid keyboard layout: {reason}")]
    InvalidKeyLayout {
        /// Description of the layout problem.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a complete configuration.
pub fn validate_config(config: &SynthConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();
    check_audio(&config.audio, &mut errors);
    check_mixer(&config.mixer, &mut errors);
    check_keyboard(&config.keyboard, &mut errors);

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn check_range(
    param: &str,
    value: f64,
    min: f64,
    max: f64,
    errors: &mut Vec<ValidationError>,
) {
    if !(min..=max).contains(&value) {
        errors.push(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min,
            max,
        });
    }
}

fn check_audio(audio: &AudioSettings, errors: &mut Vec<ValidationError>) {
    check_range(
        "audio.sample_rate",
        f64::from(audio.sample_rate),
        f64::from(*SAMPLE_RATE_RANGE.start()),
        f64::from(*SAMPLE_RATE_RANGE.end()),
        errors,
    );
    check_range(
        "audio.buffer_size",
        f64::from(audio.buffer_size),
        16.0,
        8_192.0,
        errors,
    );
    check_range("audio.channels", f64::from(audio.channels), 1.0, 8.0, errors);
}

fn check_mixer(mixer: &MixerSettings, errors: &mut Vec<ValidationError>) {
    // NaN fails the range check too
    check_range("mixer.master_gain", mixer.master_gain, 0.0, 1.0, errors);
}

fn check_keyboard(keys: &KeyboardSettings, errors: &mut Vec<ValidationError>) {
    let layout = |reason: String| ValidationError::InvalidKeyLayout { reason };

    let note_count = keys.note_count();
    if note_count == 0 || note_count > MAX_NOTE_KEYS {
        errors.push(layout(format!(
            "expected 1 to {MAX_NOTE_KEYS} note keys, found {note_count}"
        )));
    }
    if keys.instrument_keys.chars().count() > usize::from(MAX_INSTRUMENT) {
        errors.push(layout(format!(
            "at most {MAX_INSTRUMENT} instrument keys are allowed"
        )));
    }

    // Lookups fold case, so 'Z' and 'z' are the same key
    let mut seen = HashSet::new();
    for c in keys.note_keys.chars().chain(keys.instrument_keys.chars()) {
        if !seen.insert(c.to_ascii_lowercase()) {
            errors.push(layout(format!("duplicate key '{c}'")));
        }
    }

    check_range(
        "keyboard.poll_interval_ms",
        keys.poll_interval_ms as f64,
        1.0,
        100.0,
        errors,
    );
    check_range(
        "keyboard.hold_timeout_ms",
        keys.hold_timeout_ms as f64,
        20.0,
        2_000.0,
        errors,
    );
    check_range(
        "keyboard.initial_instrument",
        f64::from(keys.initial_instrument),
        0.0,
        f64::from(MAX_INSTRUMENT),
        errors,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&SynthConfig::default()), Ok(()));
    }

    #[test]
    fn test_single_error_is_not_wrapped() {
        let mut config = SynthConfig::default();
        config.audio.channels = 0;
        let err = validate_config(&config).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                param: "audio.channels".to_string(),
                value: 0.0,
                min: 1.0,
                max: 8.0,
            }
        );
    }

    #[test]
    fn test_errors_are_collected() {
        let mut config = SynthConfig::default();
        config.audio.sample_rate = 1;
        config.mixer.master_gain = -0.5;
        config.keyboard.initial_instrument = 9;

        match validate_config(&config).unwrap_err() {
            ValidationError::Multiple(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_gain_rejected() {
        let mut config = SynthConfig::default();
        config.mixer.master_gain = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_duplicate_note_key() {
        let mut config = SynthConfig::default();
        config.keyboard.note_keys = "zz".to_string();
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.to_string(), "invalid keyboard layout: duplicate key 'z'");
    }

    #[test]
    fn test_instrument_key_overlaps_note_key() {
        let mut config = SynthConfig::default();
        config.keyboard.instrument_keys = "qz".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidKeyLayout { .. })
        ));
    }

    #[test]
    fn test_duplicate_key_ignores_case() {
        let mut config = SynthConfig::default();
        config.keyboard.instrument_keys = "Zwert".to_string();
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.to_string(), "invalid keyboard layout: duplicate key 'Z'");
    }

    #[test]
    fn test_sample_rate_bounds() {
        let mut config = SynthConfig::default();
        config.audio.sample_rate = *SAMPLE_RATE_RANGE.start();
        assert!(validate_config(&config).is_ok());
        config.audio.sample_rate = *SAMPLE_RATE_RANGE.end() + 1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_too_many_note_keys() {
        let mut config = SynthConfig::default();
        config.keyboard.note_keys = "abcdefghijklmnopr".to_string();
        config.keyboard.instrument_keys = "12345".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidKeyLayout { .. })
        ));
    }

    #[test]
    fn test_empty_note_keys() {
        let mut config = SynthConfig::default();
        config.keyboard.note_keys.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::InvalidKeyLayout {
                reason: "a".to_string(),
            },
            ValidationError::InvalidKeyLayout {
                reason: "b".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: invalid keyboard layout: a; invalid keyboard layout: b"
        );
    }
}
