//! List the instrument bank.

use clap::Args;
use polykey_synth::{BankEntry, InstrumentBank};

#[derive(Args)]
pub struct InstrumentsArgs {
    /// Show one instrument (selector or name) in detail
    instrument: Option<String>,
}

pub fn run(args: InstrumentsArgs) -> anyhow::Result<()> {
    let bank = InstrumentBank::standard();

    if let Some(spec) = args.instrument {
        let entry = super::common::find_instrument(&bank, &spec)?;
        print_detail(entry);
        return Ok(());
    }

    println!("Available Instruments");
    println!("=====================\n");
    println!("  {:<4} {:<12} {:>6}  {:<28} Voices", "Key", "Name", "Mix", "Envelope (A/D/S/R)");
    for entry in bank.entries() {
        let env = &entry.instrument.envelope;
        println!(
            "  {:<4} {:<12} {:>6.2}  {:<28} {}",
            entry.selector,
            entry.instrument.name,
            entry.mix_weight,
            format!(
                "{:.2}/{:.2}/{:.2}/{:.2}",
                env.attack, env.decay, env.sustain_level, env.release
            ),
            entry.instrument.voices.len()
        );
    }
    println!();
    println!("Use 'polykey instruments <NAME>' for voice details.");
    Ok(())
}

fn print_detail(entry: &BankEntry) {
    let instrument = entry.instrument;
    let env = &instrument.envelope;

    println!("{} (selector {})", instrument.name, entry.selector);
    println!("  Mix weight:  {:.2}", entry.mix_weight);
    println!("  Gain:        {:.2}", instrument.gain);
    println!(
        "  Envelope:    attack {:.2}s, decay {:.2}s, sustain {:.2}, release {:.2}s",
        env.attack, env.decay, env.sustain_level, env.release
    );
    println!("  Voices:");
    for voice in instrument.voices {
        let vibrato = voice
            .oscillator
            .vibrato
            .map(|v| format!(", vibrato {} Hz x {}", v.frequency, v.depth))
            .unwrap_or_default();
        println!(
            "    {:+4} steps  {:<9} weight {:.2}{}",
            voice.pitch_offset,
            voice.oscillator.waveform.name(),
            voice.weight,
            vibrato
        );
    }
}
