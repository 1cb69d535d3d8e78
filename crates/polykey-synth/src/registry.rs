//! Thread-safe store of active notes.
//!
//! The registry is shared between the input thread, which presses and
//! releases notes, and the audio thread, which renders and prunes them. Each
//! logical operation takes the lock exactly once, so a render pass never
//! observes a half-applied press and a press never waits on more than one
//! in-flight render sample.

use parking_lot::Mutex;

use crate::instrument::Rendered;
use crate::note::Note;

/// What a press did to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// No note with this id existed; a held note was inserted.
    Inserted,
    /// A released note was pressed again before it was pruned.
    Retriggered,
    /// The note was already held.
    Ignored,
}

/// Active notes keyed by input id.
///
/// # Example
///
/// ```rust
/// use polykey_synth::{NoteRegistry, PressOutcome};
///
/// let registry = NoteRegistry::new();
/// assert_eq!(registry.on_press(3, 2, 0.0), PressOutcome::Inserted);
/// assert!(registry.on_release(3, 0.1));
/// assert_eq!(registry.on_press(3, 2, 0.2), PressOutcome::Retriggered);
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct NoteRegistry {
    notes: Mutex<Vec<Note>>,
}

impl NoteRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Press key `id` at `time`, attaching `instrument` if the note is new.
    ///
    /// A retriggered note keeps the instrument it was created with.
    pub fn on_press(&self, id: u8, instrument: u8, time: f64) -> PressOutcome {
        let mut notes = self.notes.lock();
        let outcome = match notes.iter().position(|note| note.id == id) {
            None => {
                notes.push(Note::pressed(id, instrument, time));
                PressOutcome::Inserted
            }
            Some(index) if notes[index].is_released() => {
                // Back to the fresh-press state so on == off still reads as held
                let note = &mut notes[index];
                note.on_time = time;
                note.off_time = f64::NEG_INFINITY;
                PressOutcome::Retriggered
            }
            Some(_) => PressOutcome::Ignored,
        };
        drop(notes);

        #[cfg(feature = "tracing")]
        tracing::debug!(id, instrument, time, ?outcome, "note press");

        outcome
    }

    /// Release key `id` at `time`. Returns `true` if a held note was released.
    pub fn on_release(&self, id: u8, time: f64) -> bool {
        let mut notes = self.notes.lock();
        let released = match notes.iter_mut().find(|note| note.id == id) {
            Some(note) if note.is_held() => {
                note.off_time = time;
                true
            }
            _ => false,
        };
        drop(notes);

        #[cfg(feature = "tracing")]
        if released {
            tracing::debug!(id, time, "note release");
        }

        released
    }

    /// Render every note and sum the samples in one critical section.
    ///
    /// Notes reported as finished that are also released are removed before
    /// the lock is dropped. Held notes are never removed, even when silent.
    pub fn render_and_prune<F>(&self, mut render: F) -> f64
    where
        F: FnMut(&Note) -> Rendered,
    {
        let mut notes = self.notes.lock();
        let mut sum = 0.0;
        #[cfg(feature = "tracing")]
        let before = notes.len();

        notes.retain(|note| {
            let rendered = render(note);
            sum += rendered.sample;
            !(rendered.finished && note.is_released())
        });

        #[cfg(feature = "tracing")]
        if notes.len() != before {
            tracing::trace!(
                pruned = before - notes.len(),
                remaining = notes.len(),
                "notes pruned"
            );
        }

        sum
    }

    /// Copy of the note with `id`, if present.
    pub fn get(&self, id: u8) -> Option<Note> {
        self.notes.lock().iter().find(|note| note.id == id).copied()
    }

    /// Copy of every note, in press order.
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.lock().clone()
    }

    /// Number of notes, including released ones still decaying.
    pub fn len(&self) -> usize {
        self.notes.lock().len()
    }

    /// `true` when no notes are sounding.
    pub fn is_empty(&self) -> bool {
        self.notes.lock().is_empty()
    }

    /// Drop every note immediately.
    pub fn clear(&self) {
        self.notes.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_when_released(note: &Note) -> Rendered {
        Rendered {
            sample: 0.0,
            finished: note.is_released(),
        }
    }

    #[test]
    fn test_press_inserts_held_note() {
        let registry = NoteRegistry::new();
        assert_eq!(registry.on_press(4, 1, 0.0), PressOutcome::Inserted);
        let note = registry.get(4).unwrap();
        assert!(note.is_held());
        assert_eq!(note.instrument, 1);
        assert_eq!(note.on_time, 0.0);
    }

    #[test]
    fn test_press_on_held_note_is_noop() {
        let registry = NoteRegistry::new();
        registry.on_press(4, 1, 0.0);
        assert_eq!(registry.on_press(4, 3, 0.5), PressOutcome::Ignored);
        let note = registry.get(4).unwrap();
        assert_eq!(note.on_time, 0.0);
        assert_eq!(note.instrument, 1);
    }

    #[test]
    fn test_press_release_press_retriggers() {
        let registry = NoteRegistry::new();
        registry.on_press(3, 2, 1.0);
        assert!(registry.on_release(3, 1.0));
        assert_eq!(registry.on_press(3, 5, 1.2), PressOutcome::Retriggered);

        assert_eq!(registry.len(), 1);
        let note = registry.get(3).unwrap();
        assert!(note.is_held());
        assert_eq!(note.on_time, 1.2);
        assert_eq!(note.instrument, 2, "retrigger keeps the original instrument");
    }

    #[test]
    fn test_retrigger_at_release_time_is_held() {
        let registry = NoteRegistry::new();
        registry.on_press(3, 5, 0.0);
        registry.on_release(3, 1.0);
        assert_eq!(registry.on_press(3, 5, 1.0), PressOutcome::Retriggered);

        let note = registry.get(3).unwrap();
        assert!(note.is_held());
        assert_eq!(note.on_time, 1.0);

        // Silent onset must not prune a held note
        registry.render_and_prune(|_| Rendered::SILENT);
        assert!(registry.get(3).is_some_and(|n| n.is_held()));

        assert!(registry.on_release(3, 1.0));
        assert_eq!(registry.get(3).unwrap().off_time, 1.0);
    }

    #[test]
    fn test_release_unknown_or_released_is_noop() {
        let registry = NoteRegistry::new();
        assert!(!registry.on_release(9, 1.0));
        registry.on_press(9, 1, 1.0);
        assert!(registry.on_release(9, 2.0));
        assert!(!registry.on_release(9, 3.0));
        assert_eq!(registry.get(9).unwrap().off_time, 2.0);
    }

    #[test]
    fn test_prune_only_released_and_finished() {
        let registry = NoteRegistry::new();
        registry.on_press(0, 1, 0.0);
        registry.on_press(1, 1, 0.0);
        registry.on_release(1, 0.5);

        // Every note claims to be finished; only the released one goes
        registry.render_and_prune(|_| Rendered::SILENT);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(0).is_some());
        assert!(registry.get(1).is_none());
    }

    #[test]
    fn test_render_sums_samples() {
        let registry = NoteRegistry::new();
        for id in 0..4 {
            registry.on_press(id, 1, 0.0);
        }
        let sum = registry.render_and_prune(|note| Rendered {
            sample: f64::from(note.id),
            finished: false,
        });
        assert_eq!(sum, 6.0);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_snapshot_and_clear() {
        let registry = NoteRegistry::new();
        registry.on_press(2, 1, 0.0);
        registry.on_press(7, 1, 0.1);
        let ids: Vec<u8> = registry.snapshot().iter().map(|n| n.id).collect();
        assert_eq!(ids, [2, 7]);

        registry.on_release(2, 0.2);
        registry.render_and_prune(finished_when_released);
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
    }
}
