//! Note lifecycle state.

/// A sounding (or decaying) note keyed by its input id.
///
/// A note is held while `on_time > off_time` and released otherwise. New
/// notes start with `off_time = -∞`, so a press at `t = 0.0` is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Note {
    /// Input key id, also the scale-relative pitch of the note.
    pub id: u8,
    /// Instrument selector captured when the note was first pressed.
    pub instrument: u8,
    /// Seconds since synthesis start of the most recent press.
    pub on_time: f64,
    /// Seconds since synthesis start of the most recent release.
    pub off_time: f64,
}

impl Note {
    /// A freshly pressed note.
    pub const fn pressed(id: u8, instrument: u8, time: f64) -> Self {
        Self {
            id,
            instrument,
            on_time: time,
            off_time: f64::NEG_INFINITY,
        }
    }

    /// `true` while the key is held.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.on_time > self.off_time
    }

    /// `true` once the key has been released.
    #[inline]
    pub fn is_released(&self) -> bool {
        !self.is_held()
    }

    /// Scale-relative pitch id used for frequency lookup.
    #[inline]
    pub fn pitch(&self) -> i32 {
        i32::from(self.id)
    }
}
