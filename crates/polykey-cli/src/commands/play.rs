//! Interactive keyboard playback.
//!
//! Runs the key poll loop on the main thread while the output stream pulls
//! samples from the mixer on the audio thread. Both share the note registry
//! and the sample clock.

use super::common::{find_instrument, resolve_sample_rate};
use crate::keyboard::{HeldKeys, KeyAction, KeyMap};
use clap::Args;
use crossterm::{
    cursor::MoveToColumn,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use polykey_config::SynthConfig;
use polykey_io::{AudioBackend, BackendStreamConfig, CpalBackend, RenderDriver, SampleClock};
use polykey_synth::{InstrumentBank, InstrumentSelector, KeyStateTracker, Mixer, NoteRegistry};
use std::io::{Write, stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Args)]
pub struct PlayArgs {
    /// Starting instrument, selector (1-5) or name
    #[arg(short, long)]
    instrument: Option<String>,

    /// Output device (partial name match)
    #[arg(short, long)]
    device: Option<String>,

    /// Sample rate (defaults to the configured rate)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Buffer size in frames (defaults to the configured size)
    #[arg(long)]
    buffer_size: Option<u32>,
}

/// Raw mode and keyboard enhancement, undone on drop.
struct TerminalGuard {
    enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self { enhanced: false };
        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.enhanced = true;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = terminal::disable_raw_mode();
    }
}

pub fn run(args: PlayArgs, config: &SynthConfig) -> anyhow::Result<()> {
    let bank = InstrumentBank::standard();
    let initial = match &args.instrument {
        Some(spec) => find_instrument(&bank, spec)?.selector,
        None => config.keyboard.initial_instrument,
    };

    let backend = CpalBackend::new();
    let stream_config = BackendStreamConfig {
        sample_rate: resolve_sample_rate(args.sample_rate, config)?,
        buffer_size: args.buffer_size.unwrap_or(config.audio.buffer_size),
        channels: config.audio.channels,
        device_name: args.device.or_else(|| config.audio.device.clone()),
    };
    let sample_rate = backend.actual_sample_rate(&stream_config);

    let registry = Arc::new(NoteRegistry::new());
    let clock = Arc::new(SampleClock::new(sample_rate));
    let mixer = Mixer::with_bank(Arc::clone(&registry), bank)
        .with_master_gain(config.mixer.master_gain);
    let driver = RenderDriver::new(mixer, Arc::clone(&clock));

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let stream_running = Arc::clone(&running);
    let _stream = backend.build_output_stream(
        &stream_config,
        driver.into_output_callback(stream_config.channels),
        Box::new(move |_: &str| stream_running.store(false, Ordering::SeqCst)),
    )?;

    let keymap = KeyMap::from_settings(&config.keyboard);
    println!(
        "Playing at {} Hz. Notes: {}  Instruments: {}  Quit: Esc or Ctrl+C",
        sample_rate,
        keymap.note_keys().iter().collect::<String>(),
        keymap.instrument_keys().iter().collect::<String>(),
    );

    let guard = TerminalGuard::enter()?;
    let session = Session {
        keymap,
        selector: InstrumentSelector::new(initial),
        held: HeldKeys::new(
            Duration::from_millis(config.keyboard.hold_timeout_ms),
            guard.enhanced,
        ),
        tracker: KeyStateTracker::new(),
        bank,
    };
    tracing::debug!(release_events = guard.enhanced, "keyboard ready");

    let result = session.poll_loop(
        &registry,
        &clock,
        &running,
        Duration::from_millis(config.keyboard.poll_interval_ms),
    );
    drop(guard);
    println!();

    registry.clear();
    result
}

/// Input-side state of a play session.
struct Session {
    keymap: KeyMap,
    selector: InstrumentSelector,
    held: HeldKeys,
    tracker: KeyStateTracker,
    bank: InstrumentBank,
}

impl Session {
    fn poll_loop(
        mut self,
        registry: &NoteRegistry,
        clock: &SampleClock,
        running: &AtomicBool,
        poll_interval: Duration,
    ) -> anyhow::Result<()> {
        self.draw()?;

        while running.load(Ordering::SeqCst) {
            let mut redraw = false;
            if event::poll(poll_interval)? {
                // Drain everything queued so one poll tick sees all edges
                loop {
                    if let Event::Key(key) = event::read()?
                        && !self.handle_key(key, &mut redraw)
                    {
                        running.store(false, Ordering::SeqCst);
                    }
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }

            let states = self.held.sample(Instant::now());
            let edges = self
                .tracker
                .update(&states, self.selector.get(), registry, clock.time());
            if redraw || !edges.is_empty() {
                self.draw()?;
            }
        }
        Ok(())
    }

    /// Apply one key event; `false` means quit.
    fn handle_key(&mut self, key: KeyEvent, redraw: &mut bool) -> bool {
        let quit = key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if quit && key.kind == KeyEventKind::Press {
            return false;
        }

        let KeyCode::Char(c) = key.code else {
            return true;
        };
        let now = Instant::now();
        match (self.keymap.action(c), key.kind) {
            (Some(KeyAction::Note(id)), KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.held.press(id, now);
            }
            (Some(KeyAction::Note(id)), KeyEventKind::Release) => self.held.release(id),
            (Some(KeyAction::Instrument(selector)), KeyEventKind::Press) => {
                self.selector.set(selector);
                *redraw = true;
            }
            _ => {}
        }
        true
    }

    fn draw(&self) -> std::io::Result<()> {
        let name = self
            .bank
            .get(self.selector.get())
            .map_or("none", |entry| entry.instrument.name);

        let keys: String = self
            .keymap
            .note_keys()
            .iter()
            .enumerate()
            .map(|(id, &c)| {
                if self.tracker.is_down(id) {
                    '#'
                } else {
                    c
                }
            })
            .collect();

        let mut out = stdout();
        queue!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(format!("[{name:>11}] {keys}"))
        )?;
        out.flush()
    }
}
