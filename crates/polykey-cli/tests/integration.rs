//! Integration tests for polykey-cli.
//!
//! Tests run the built `polykey` binary. Nothing here opens an audio
//! device; `render` writes to a temporary directory instead.

use polykey_io::{WavFormat, read_wav, read_wav_info};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `polykey` binary built by cargo.
fn polykey_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_polykey"))
}

/// Point `--config` at a file that does not exist so user settings never leak in.
fn isolated<'a>(cmd: &'a mut Command, dir: &Path) -> &'a mut Command {
    cmd.arg("--config").arg(dir.join("config.toml"))
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `polykey instruments`
// ---------------------------------------------------------------------------

#[test]
fn cli_instruments_lists_bank() {
    let output = polykey_bin()
        .arg("instruments")
        .output()
        .expect("failed to run polykey instruments");

    assert!(output.status.success(), "polykey instruments failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available Instruments"));
    for name in ["harmonica", "bell", "harpsichord", "bass", "ocarina"] {
        assert!(stdout.contains(name), "listing should contain '{name}'");
    }
}

#[test]
fn cli_instruments_detail_shows_voices() {
    let output = polykey_bin()
        .args(["instruments", "bell"])
        .output()
        .expect("failed to run polykey instruments bell");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("selector 2"));
    assert!(stdout.contains("Voices"));
    assert!(stdout.contains("sine"));
}

#[test]
fn cli_instruments_unknown_fails() {
    let output = polykey_bin()
        .args(["instruments", "banjo"])
        .output()
        .expect("failed to run polykey instruments banjo");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("banjo"), "error should name the instrument");
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `polykey render`
// ---------------------------------------------------------------------------

#[test]
fn cli_render_writes_phrase() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("demo").join("bell.wav");

    let output = isolated(&mut polykey_bin(), dir.path())
        .args(["render", "--instrument", "bell", "--sample-rate", "8000"])
        .arg("--output")
        .arg(&out)
        .output()
        .expect("failed to run polykey render");

    assert!(
        output.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let info = read_wav_info(&out).unwrap();
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_rate, 8000);
    assert_eq!(info.format, WavFormat::IeeeFloat);
    // 16 presses 0.25 s apart, 0.2 s hold, 1 s bell release, 0.1 s padding
    assert!((info.duration_secs - 5.05).abs() < 1e-3, "{}", info.duration_secs);

    let (samples, _) = read_wav(&out).unwrap();
    assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
    assert!(samples.iter().any(|&s| s != 0.0));
    assert!(samples[samples.len() - 100..].iter().all(|&s| s == 0.0));
}

#[test]
fn cli_render_by_selector_as_pcm() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("bass.wav");

    let output = isolated(&mut polykey_bin(), dir.path())
        .args(["render", "-i", "4", "--bits", "16", "--sample-rate", "8000"])
        .arg("-o")
        .arg(&out)
        .output()
        .expect("failed to run polykey render");

    assert!(output.status.success());
    let info = read_wav_info(&out).unwrap();
    assert_eq!(info.bits_per_sample, 16);
    assert_eq!(info.format, WavFormat::Pcm);
}

#[test]
fn cli_render_unknown_instrument_fails() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("none.wav");

    let output = isolated(&mut polykey_bin(), dir.path())
        .args(["render", "--instrument", "9"])
        .arg("--output")
        .arg(&out)
        .output()
        .expect("failed to run polykey render");

    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn cli_render_rejects_out_of_range_sample_rate() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("silent.wav");

    for rate in ["0", "1000", "500000"] {
        let output = isolated(&mut polykey_bin(), dir.path())
            .args(["render", "--sample-rate", rate])
            .arg("--output")
            .arg(&out)
            .output()
            .expect("failed to run polykey render");

        assert!(!output.status.success(), "rate {rate} should fail");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("sample rate"), "got: {stderr}");
        assert!(!out.exists());
    }
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `polykey config`
// ---------------------------------------------------------------------------

#[test]
fn cli_config_show_defaults_when_missing() {
    let dir = TempDir::new().unwrap();
    let output = isolated(&mut polykey_bin(), dir.path())
        .args(["config", "show"])
        .output()
        .expect("failed to run polykey config show");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[audio]"));
    assert!(stdout.contains("sample_rate = 44100"));
    assert!(stdout.contains("master_gain = 0.2"));
}

#[test]
fn cli_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("polykey.toml");

    let init = polykey_bin()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .output()
        .expect("failed to run polykey config init");
    assert!(init.status.success());
    assert!(path.exists());

    let again = polykey_bin()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .output()
        .expect("failed to run polykey config init");
    assert!(!again.status.success(), "init must not overwrite without --force");

    std::fs::write(&path, "[mixer]\nmaster_gain = 0.5\n").unwrap();
    let show = polykey_bin()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .output()
        .expect("failed to run polykey config show");
    assert!(show.status.success());
    assert!(String::from_utf8_lossy(&show.stdout).contains("master_gain = 0.5"));
}

#[test]
fn cli_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[audio]\nchannels = 0\n").unwrap();

    let output = polykey_bin()
        .arg("--config")
        .arg(&path)
        .args(["render", "--output"])
        .arg(dir.path().join("x.wav"))
        .output()
        .expect("failed to run polykey render");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("audio.channels"), "got: {stderr}");
}

// ---------------------------------------------------------------------------
// CLI binary tests -- help
// ---------------------------------------------------------------------------

#[test]
fn cli_help_works() {
    let output = polykey_bin()
        .arg("--help")
        .output()
        .expect("failed to run polykey --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["play", "render", "instruments", "devices", "config"] {
        assert!(stdout.contains(command), "help should list '{command}'");
    }
}
