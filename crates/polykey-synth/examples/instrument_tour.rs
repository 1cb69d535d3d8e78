//! Instrument tour: envelope stages and peak levels for every instrument.
//!
//! Run with: cargo run -p polykey-synth --example instrument_tour

use std::sync::Arc;

use polykey_synth::{InstrumentBank, Mixer, NoteRegistry, RenderCallback};

fn main() {
    let sample_rate = 44_100.0;
    let bank = InstrumentBank::standard();

    println!("=== Instruments (key 0, held 0.5 s) ===\n");
    println!(
        "{:<4} {:<12} {:>8} {:>8} {:>10}",
        "sel", "name", "peak", "rms", "silent at"
    );

    for entry in bank.entries() {
        let registry = Arc::new(NoteRegistry::new());
        let mixer = Mixer::new(Arc::clone(&registry));
        registry.on_press(0, entry.selector, 0.0);
        registry.on_release(0, 0.5);

        let frames = (sample_rate * 2.0) as usize;
        let mut peak: f64 = 0.0;
        let mut energy = 0.0;
        let mut silent_at = None;
        for i in 0..frames {
            let t = i as f64 / sample_rate;
            let s = mixer.render(0, t);
            peak = peak.max(s.abs());
            energy += s * s;
            if silent_at.is_none() && registry.is_empty() {
                silent_at = Some(t);
            }
        }

        println!(
            "{:<4} {:<12} {:>8.4} {:>8.4} {:>10}",
            entry.selector,
            entry.instrument.name,
            peak,
            (energy / frames as f64).sqrt(),
            silent_at.map_or_else(|| "-".to_string(), |t| format!("{t:.3} s")),
        );
    }

    println!("\n=== Bell envelope stages ===\n");
    let Some(bell) = bank.find_by_name("bell") else {
        return;
    };
    let env = bell.instrument.envelope;
    for &t in &[0.0, 0.005, 0.01, 0.25, 0.5, 0.75, 1.5] {
        let off = if t < 0.5 { f64::NEG_INFINITY } else { 0.5 };
        println!(
            "t = {t:<6} amplitude {:.4} ({:?})",
            env.amplitude(t, 0.0, off),
            env.stage(t, 0.0, off)
        );
    }
}
