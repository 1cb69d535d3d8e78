//! Scale mapping from note ids to frequencies.
//!
//! Note ids are scale-relative integers: id 0 is the base frequency and every
//! step moves one scale degree. The default (and currently only) tuning is
//! twelve-tone equal temperament anchored at 256 Hz.

use libm::pow;

/// Frequency of note id 0 in the default tuning, in Hz.
pub const BASE_FREQUENCY: f64 = 256.0;

/// Ratio between adjacent semitones: 2^(1/12).
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3;

/// Number of scale steps per octave in the default tuning.
pub const STEPS_PER_OCTAVE: i32 = 12;

/// Tuning systems understood by the scale mapper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scale {
    /// Twelve-tone equal temperament, `256 Hz * 2^(id/12)`.
    #[default]
    EqualTemperament,
}

impl Scale {
    /// Resolve a raw scale id.
    ///
    /// Unknown ids fall back to [`Scale::EqualTemperament`].
    pub fn from_id(id: i32) -> Self {
        match id {
            0 => Scale::EqualTemperament,
            _ => Scale::default(),
        }
    }

    /// Frequency in Hz for a scale-relative note id.
    ///
    /// # Example
    ///
    /// ```rust
    /// use polykey_synth::Scale;
    ///
    /// let scale = Scale::EqualTemperament;
    /// assert_eq!(scale.frequency(0), 256.0);
    /// assert!((scale.frequency(12) - 512.0).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn frequency(self, note_id: i32) -> f64 {
        match self {
            Scale::EqualTemperament => BASE_FREQUENCY * pow(SEMITONE_RATIO, f64::from(note_id)),
        }
    }
}

/// Frequency in Hz for `note_id` in the scale identified by `scale_id`.
#[inline]
pub fn frequency(note_id: i32, scale_id: i32) -> f64 {
    Scale::from_id(scale_id).frequency(note_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_note_is_base_frequency() {
        assert_eq!(frequency(0, 0), BASE_FREQUENCY);
    }

    #[test]
    fn test_octave_doubles_frequency() {
        for id in -48..48 {
            let low = frequency(id, 0);
            let high = frequency(id + STEPS_PER_OCTAVE, 0);
            assert!(
                (high / low - 2.0).abs() < 1e-12,
                "id {id}: {high} / {low} is not an octave"
            );
        }
    }

    #[test]
    fn test_semitone_ratio_constant() {
        assert!((pow(SEMITONE_RATIO, 12.0) - 2.0).abs() < 1e-14);
    }

    #[test]
    fn test_unknown_scale_falls_back_to_default() {
        assert_eq!(Scale::from_id(7), Scale::EqualTemperament);
        assert_eq!(frequency(5, -1), frequency(5, 0));
        assert_eq!(frequency(5, 99), Scale::EqualTemperament.frequency(5));
    }

    #[test]
    fn test_negative_ids_go_down() {
        assert!((frequency(-12, 0) - 128.0).abs() < 1e-9);
        assert!(frequency(-30, 0) > 0.0);
    }
}
