//! Shared CLI helpers used across multiple commands.

use polykey_config::{SAMPLE_RATE_RANGE, SynthConfig};
use polykey_synth::{BankEntry, InstrumentBank};

/// Resolve an instrument by selector number or case-insensitive name.
pub fn find_instrument(bank: &InstrumentBank, spec: &str) -> anyhow::Result<&'static BankEntry> {
    let entry = match spec.trim().parse::<u8>() {
        Ok(selector) => bank.get(selector),
        Err(_) => bank.find_by_name(spec.trim()),
    };

    entry.ok_or_else(|| {
        anyhow::anyhow!(
            "Instrument '{}' not found. Use 'polykey instruments' to see the bank.",
            spec
        )
    })
}

/// Sample rate from `--sample-rate` or the config, held to the range the
/// config file accepts.
pub fn resolve_sample_rate(arg: Option<u32>, config: &SynthConfig) -> anyhow::Result<u32> {
    let rate = arg.unwrap_or(config.audio.sample_rate);
    if !SAMPLE_RATE_RANGE.contains(&rate) {
        anyhow::bail!(
            "sample rate {} Hz out of range [{}, {}]",
            rate,
            SAMPLE_RATE_RANGE.start(),
            SAMPLE_RATE_RANGE.end()
        );
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_selector_and_name() {
        let bank = InstrumentBank::standard();
        assert_eq!(find_instrument(&bank, "2").unwrap().instrument.name, "bell");
        assert_eq!(find_instrument(&bank, "harpsichord").unwrap().selector, 3);
        assert_eq!(find_instrument(&bank, " Ocarina ").unwrap().selector, 5);
    }

    #[test]
    fn test_unknown_instrument() {
        let bank = InstrumentBank::standard();
        assert!(find_instrument(&bank, "0").is_err());
        assert!(find_instrument(&bank, "9").is_err());
        assert!(find_instrument(&bank, "banjo").is_err());
    }

    #[test]
    fn test_resolve_sample_rate() {
        let config = SynthConfig::default();
        assert_eq!(resolve_sample_rate(None, &config).unwrap(), 44_100);
        assert_eq!(resolve_sample_rate(Some(8_000), &config).unwrap(), 8_000);
        assert!(resolve_sample_rate(Some(0), &config).is_err());
        assert!(resolve_sample_rate(Some(7_999), &config).is_err());
        assert!(resolve_sample_rate(Some(192_001), &config).is_err());
    }
}
