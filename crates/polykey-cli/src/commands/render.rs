//! Offline render of the demonstration phrase.

use super::common::{find_instrument, resolve_sample_rate};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use polykey_config::SynthConfig;
use polykey_io::{RenderDriver, SampleClock, WavSpec, write_wav};
use polykey_synth::input::DEFAULT_KEY_COUNT;
use polykey_synth::{InstrumentBank, Mixer, NoteRegistry};
use std::path::PathBuf;
use std::sync::Arc;

/// Silence kept after the last release tail.
const TAIL_PADDING: f64 = 0.1;

/// Frames rendered between progress updates.
const CHUNK_FRAMES: u64 = 4096;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(short, long, default_value = "polykey-demo.wav")]
    output: PathBuf,

    /// Instrument selector (1-5) or name
    #[arg(short, long, default_value = "bell")]
    instrument: String,

    /// Sample rate (defaults to the configured rate)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Seconds each key is held
    #[arg(long, default_value = "0.2")]
    note_length: f64,

    /// Seconds between successive key presses
    #[arg(long, default_value = "0.25")]
    step: f64,

    /// Bits per sample: 16 or 24 (PCM), 32 (float)
    #[arg(long, default_value = "32")]
    bits: u16,
}

/// One key edge in the phrase.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PhraseEvent {
    time: f64,
    id: u8,
    press: bool,
}

/// Ascending run over every key: key `i` goes down at `i * step` and up
/// `note_length` later. Events are sorted by time.
fn demo_phrase(note_length: f64, step: f64) -> Vec<PhraseEvent> {
    let mut events: Vec<PhraseEvent> = (0..DEFAULT_KEY_COUNT as u8)
        .flat_map(|id| {
            let on = f64::from(id) * step;
            [
                PhraseEvent {
                    time: on,
                    id,
                    press: true,
                },
                PhraseEvent {
                    time: on + note_length,
                    id,
                    press: false,
                },
            ]
        })
        .collect();
    events.sort_by(|a, b| a.time.total_cmp(&b.time));
    events
}

fn frame_at(time: f64, sample_rate: u32) -> u64 {
    (time * f64::from(sample_rate)).round() as u64
}

pub fn run(args: RenderArgs, config: &SynthConfig) -> anyhow::Result<()> {
    if !(args.note_length > 0.0 && args.step > 0.0) {
        anyhow::bail!("--note-length and --step must be positive");
    }

    let bank = InstrumentBank::standard();
    let entry = find_instrument(&bank, &args.instrument)?;
    let sample_rate = resolve_sample_rate(args.sample_rate, config)?;

    let registry = Arc::new(NoteRegistry::new());
    let clock = Arc::new(SampleClock::new(sample_rate));
    let mixer = Mixer::with_bank(Arc::clone(&registry), bank)
        .with_master_gain(config.mixer.master_gain);
    let driver = RenderDriver::new(mixer, Arc::clone(&clock));

    let events = demo_phrase(args.note_length, args.step);
    let last_release = events.last().map_or(0.0, |e| e.time);
    let end_frame = frame_at(
        last_release + entry.instrument.envelope.release + TAIL_PADDING,
        sample_rate,
    );

    println!(
        "Rendering {} notes on {} (selector {}) at {} Hz",
        DEFAULT_KEY_COUNT, entry.instrument.name, entry.selector, sample_rate
    );

    let pb = ProgressBar::new(end_frame);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})")?
            .progress_chars("##-"),
    );

    let mut samples = Vec::with_capacity(usize::try_from(end_frame).unwrap_or(0));
    let render_to = |frame: u64, samples: &mut Vec<f32>| {
        while clock.frames() < frame {
            let next = (clock.frames() + CHUNK_FRAMES).min(frame);
            samples.extend(driver.render_until(next));
            pb.set_position(next);
        }
    };

    for event in &events {
        render_to(frame_at(event.time, sample_rate), &mut samples);
        let now = clock.time();
        if event.press {
            registry.on_press(event.id, entry.selector, now);
        } else {
            registry.on_release(event.id, now);
        }
    }
    render_to(end_frame, &mut samples);
    pb.finish_and_clear();

    if !registry.is_empty() {
        tracing::warn!(remaining = registry.len(), "notes still sounding at end of render");
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: args.bits,
    };
    write_wav(&args.output, &samples, spec)?;

    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    println!(
        "Wrote {} ({:.2}s, peak {:.3})",
        args.output.display(),
        samples.len() as f64 / f64::from(sample_rate),
        peak
    );

    Ok(())
}
