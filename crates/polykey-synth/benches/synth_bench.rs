//! Criterion benchmarks for polykey-synth components
//!
//! Run with: cargo bench -p polykey-synth

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use polykey_synth::{InstrumentBank, Mixer, Note, NoteRegistry, RenderCallback, Waveform};

const SAMPLE_RATE: f64 = 44_100.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

// ============================================================================
// Oscillator benchmarks
// ============================================================================

fn bench_oscillator_waveforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Oscillator");

    for waveform in Waveform::ALL {
        for &block_size in BLOCK_SIZES {
            group.bench_with_input(
                BenchmarkId::new(waveform.name(), block_size),
                &block_size,
                |b, &size| {
                    b.iter(|| {
                        let mut sum = 0.0f64;
                        for i in 0..size {
                            let t = i as f64 / SAMPLE_RATE;
                            sum += polykey_synth::oscillator(t, 440.0, waveform, 5.0, 0.001);
                        }
                        black_box(sum)
                    });
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Instrument benchmarks
// ============================================================================

fn bench_instruments(c: &mut Criterion) {
    let mut group = c.benchmark_group("Instrument");
    let bank = InstrumentBank::standard();

    for entry in bank.entries() {
        let note = Note::pressed(7, entry.selector, 0.0);
        group.bench_function(entry.instrument.name, |b| {
            b.iter(|| {
                let mut sum = 0.0f64;
                for i in 0..256 {
                    let t = 0.2 + f64::from(i) / SAMPLE_RATE;
                    sum += entry.instrument.render(t, black_box(&note)).sample;
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// ============================================================================
// Mixer benchmarks
// ============================================================================

fn bench_mixer_polyphony(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mixer");

    for &notes in &[1u8, 4, 16] {
        let registry = Arc::new(NoteRegistry::new());
        let mixer = Mixer::new(Arc::clone(&registry));
        for id in 0..notes {
            registry.on_press(id, id % 5 + 1, 0.0);
        }

        group.bench_with_input(BenchmarkId::new("notes", notes), &notes, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f64;
                for i in 0..512 {
                    let t = 0.5 + f64::from(i) / SAMPLE_RATE;
                    sum += mixer.render(0, t);
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_oscillator_waveforms,
    bench_instruments,
    bench_mixer_polyphony,
);
criterion_main!(benches);
