//! Press/release input contract.
//!
//! Front ends sample raw key state at their own cadence. [`KeyStateTracker`]
//! turns those samples into press and release edges on a [`NoteRegistry`],
//! and [`InstrumentSelector`] carries the instrument choice from the UI to
//! the input loop.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::registry::{NoteRegistry, PressOutcome};

/// Number of note keys in the reference keyboard layout.
pub const DEFAULT_KEY_COUNT: usize = 16;

/// An edge detected by [`KeyStateTracker::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    /// Key went from up to down.
    Press {
        /// Key id.
        id: u8,
        /// Effect on the registry.
        outcome: PressOutcome,
    },
    /// Key went from down to up.
    Release {
        /// Key id.
        id: u8,
    },
}

/// Edge detector over `N` boolean key states.
#[derive(Clone, Debug)]
pub struct KeyStateTracker<const N: usize = DEFAULT_KEY_COUNT> {
    previous: [bool; N],
}

impl<const N: usize> Default for KeyStateTracker<N> {
    fn default() -> Self {
        Self {
            previous: [false; N],
        }
    }
}

impl<const N: usize> KeyStateTracker<N> {
    /// Tracker with every key up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a fresh key-state sample at `time`.
    ///
    /// Rising edges press key `i` with `selector`; falling edges release it.
    /// Returns the edges in key order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use polykey_synth::{KeyEvent, KeyStateTracker, NoteRegistry};
    ///
    /// let registry = NoteRegistry::new();
    /// let mut keys = KeyStateTracker::<4>::new();
    ///
    /// let events = keys.update(&[false, true, false, false], 2, &registry, 0.0);
    /// assert_eq!(events.len(), 1);
    /// assert!(registry.get(1).is_some_and(|n| n.is_held()));
    ///
    /// keys.update(&[false; 4], 2, &registry, 0.5);
    /// assert!(registry.get(1).is_some_and(|n| n.is_released()));
    /// ```
    pub fn update(
        &mut self,
        states: &[bool; N],
        selector: u8,
        registry: &NoteRegistry,
        time: f64,
    ) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        for (index, (&now, previous)) in states
            .iter()
            .zip(self.previous.iter_mut())
            .enumerate()
        {
            if now == *previous {
                continue;
            }
            *previous = now;
            let Ok(id) = u8::try_from(index) else {
                break;
            };
            if now {
                let outcome = registry.on_press(id, selector, time);
                events.push(KeyEvent::Press { id, outcome });
            } else {
                registry.on_release(id, time);
                events.push(KeyEvent::Release { id });
            }
        }
        events
    }

    /// Last sampled state of key `id`.
    pub fn is_down(&self, id: usize) -> bool {
        self.previous.get(id).copied().unwrap_or(false)
    }

    /// Last sampled state of every key.
    pub fn states(&self) -> &[bool; N] {
        &self.previous
    }
}

/// Instrument selector shared between the UI and the input loop.
///
/// Only newly pressed notes pick up a change; sounding notes keep the
/// instrument they were created with. `0` means nothing selected.
#[derive(Debug, Default)]
pub struct InstrumentSelector(AtomicU8);

impl InstrumentSelector {
    /// Selector starting at `selector`.
    pub const fn new(selector: u8) -> Self {
        Self(AtomicU8::new(selector))
    }

    /// Current selector.
    #[inline]
    pub fn get(&self) -> u8 {
        self.0.load(Ordering::Relaxed)
    }

    /// Select another instrument for future presses.
    #[inline]
    pub fn set(&self, selector: u8) {
        self.0.store(selector, Ordering::Relaxed);
    }
}
