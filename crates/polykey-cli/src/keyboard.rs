//! Terminal key mapping and held-key bookkeeping.
//!
//! Terminals report key presses, not key states. With the keyboard
//! enhancement protocol they also report releases; without it a key counts
//! as held until `hold_timeout` passes with no press or repeat event.

use polykey_config::KeyboardSettings;
use polykey_synth::input::DEFAULT_KEY_COUNT;
use std::time::{Duration, Instant};

/// What a mapped key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Play note id.
    Note(u8),
    /// Switch to instrument selector.
    Instrument(u8),
}

/// Character to action lookup built from [`KeyboardSettings`].
#[derive(Debug, Clone)]
pub struct KeyMap {
    keys: KeyboardSettings,
    notes: Vec<char>,
    instruments: Vec<char>,
}

impl KeyMap {
    /// Build the map; note keys beyond the tracker width are ignored.
    pub fn from_settings(settings: &KeyboardSettings) -> Self {
        Self {
            keys: settings.clone(),
            notes: settings
                .note_keys
                .chars()
                .take(DEFAULT_KEY_COUNT)
                .collect(),
            instruments: settings.instrument_keys.chars().collect(),
        }
    }

    /// Action bound to `c`, ignoring letter case.
    pub fn action(&self, c: char) -> Option<KeyAction> {
        self.keys
            .note_id(c)
            .filter(|&id| usize::from(id) < DEFAULT_KEY_COUNT)
            .map(KeyAction::Note)
            .or_else(|| self.keys.instrument_selector(c).map(KeyAction::Instrument))
    }

    /// Note key characters in id order, as configured.
    pub fn note_keys(&self) -> &[char] {
        &self.notes
    }

    /// Instrument key characters in selector order, as configured.
    pub fn instrument_keys(&self) -> &[char] {
        &self.instruments
    }
}

/// Per-note held state derived from terminal key events.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    last_seen: [Option<Instant>; DEFAULT_KEY_COUNT],
    // Pressed since the last sample, even if already released
    tapped: [bool; DEFAULT_KEY_COUNT],
    hold_timeout: Duration,
    release_events: bool,
}

impl HeldKeys {
    /// `release_events` tells whether the terminal reports key releases.
    pub fn new(hold_timeout: Duration, release_events: bool) -> Self {
        Self {
            last_seen: [None; DEFAULT_KEY_COUNT],
            tapped: [false; DEFAULT_KEY_COUNT],
            hold_timeout,
            release_events,
        }
    }

    /// Record a press or auto-repeat of note `id`.
    pub fn press(&mut self, id: u8, now: Instant) {
        let index = usize::from(id);
        if let Some(slot) = self.last_seen.get_mut(index) {
            *slot = Some(now);
            self.tapped[index] = true;
        }
    }

    /// Record a release of note `id`.
    pub fn release(&mut self, id: u8) {
        if let Some(slot) = self.last_seen.get_mut(usize::from(id)) {
            *slot = None;
        }
    }

    /// Key states as of `now`, expiring stale keys when releases are not
    /// reported.
    ///
    /// A key pressed and released between two samples reads as down once,
    /// so the tracker still sees the tap.
    pub fn sample(&mut self, now: Instant) -> [bool; DEFAULT_KEY_COUNT] {
        if !self.release_events {
            let timeout = self.hold_timeout;
            for slot in &mut self.last_seen {
                if slot.is_some_and(|seen| now.saturating_duration_since(seen) > timeout) {
                    *slot = None;
                }
            }
        }
        let tapped = std::mem::take(&mut self.tapped);
        std::array::from_fn(|id| self.last_seen[id].is_some() || tapped[id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keymap() -> KeyMap {
        KeyMap::from_settings(&KeyboardSettings::default())
    }

    #[test]
    fn test_default_layout() {
        let map = keymap();
        assert_eq!(map.action('z'), Some(KeyAction::Note(0)));
        assert_eq!(map.action(','), Some(KeyAction::Note(12)));
        assert_eq!(map.action('/'), Some(KeyAction::Note(15)));
        assert_eq!(map.action('q'), Some(KeyAction::Instrument(1)));
        assert_eq!(map.action('t'), Some(KeyAction::Instrument(5)));
        assert_eq!(map.action('p'), None);
    }

    #[test]
    fn test_uppercase_maps_like_lowercase() {
        let map = keymap();
        assert_eq!(map.action('Z'), map.action('z'));
        assert_eq!(map.action('W'), Some(KeyAction::Instrument(2)));
    }

    #[test]
    fn test_uppercase_layout_matches_either_case() {
        let settings = KeyboardSettings {
            note_keys: "ZSXDCVGBHNJM,L./".to_string(),
            instrument_keys: "QWERT".to_string(),
            ..KeyboardSettings::default()
        };
        let map = KeyMap::from_settings(&settings);
        assert_eq!(map.action('z'), Some(KeyAction::Note(0)));
        assert_eq!(map.action('Z'), Some(KeyAction::Note(0)));
        assert_eq!(map.action('m'), Some(KeyAction::Note(11)));
        assert_eq!(map.action('e'), Some(KeyAction::Instrument(3)));
        assert_eq!(map.note_keys()[0], 'Z');
    }

    #[test]
    fn test_note_keys_past_tracker_width_unmapped() {
        let settings = KeyboardSettings {
            note_keys: "abcdefghijklmnopr".to_string(),
            instrument_keys: "12345".to_string(),
            ..KeyboardSettings::default()
        };
        let map = KeyMap::from_settings(&settings);
        assert_eq!(map.action('p'), Some(KeyAction::Note(15)));
        assert_eq!(map.action('r'), None);
        assert_eq!(map.note_keys().len(), DEFAULT_KEY_COUNT);
    }

    #[test]
    fn test_release_events_hold_until_release() {
        let start = Instant::now();
        let mut held = HeldKeys::new(Duration::from_millis(150), true);
        held.press(3, start);

        let later = start + Duration::from_secs(5);
        assert!(held.sample(later)[3]);

        held.release(3);
        assert!(!held.sample(later)[3]);
    }

    #[test]
    fn test_timeout_expires_without_release_events() {
        let start = Instant::now();
        let mut held = HeldKeys::new(Duration::from_millis(150), false);
        held.press(0, start);

        assert!(held.sample(start + Duration::from_millis(100))[0]);
        held.press(0, start + Duration::from_millis(120));
        assert!(held.sample(start + Duration::from_millis(250))[0]);
        assert!(!held.sample(start + Duration::from_millis(300))[0]);
    }

    #[test]
    fn test_tap_between_samples_is_seen_once() {
        let start = Instant::now();
        let mut held = HeldKeys::new(Duration::from_millis(150), true);
        held.press(7, start);
        held.release(7);

        let later = start + Duration::from_millis(5);
        assert!(held.sample(later)[7]);
        assert!(!held.sample(later + Duration::from_millis(5))[7]);
    }

    #[test]
    fn test_out_of_range_id_ignored() {
        let mut held = HeldKeys::new(Duration::from_millis(150), true);
        held.press(200, Instant::now());
        assert!(held.sample(Instant::now()).iter().all(|&down| !down));
    }
}
