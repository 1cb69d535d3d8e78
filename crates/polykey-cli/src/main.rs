//! polykey - play the terminal keyboard synthesizer or render it to WAV.

mod commands;
mod keyboard;

use clap::{Parser, Subcommand};
use polykey_config::{SynthConfig, default_config_path};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polykey")]
#[command(author, version, about = "Polyphonic terminal keyboard synthesizer", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config path)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the synthesizer from the computer keyboard
    Play(commands::play::PlayArgs),

    /// Render the demonstration phrase to a WAV file
    Render(commands::render::RenderArgs),

    /// List the instrument bank
    Instruments(commands::instruments::InstrumentsArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `config show` output stays valid TOML
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);

    match cli.command {
        Commands::Play(args) => commands::play::run(args, &load_config(&config_path)?),
        Commands::Render(args) => commands::render::run(args, &load_config(&config_path)?),
        Commands::Instruments(args) => commands::instruments::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Config(args) => commands::config::run(args, &config_path),
    }
}

fn load_config(path: &std::path::Path) -> anyhow::Result<SynthConfig> {
    SynthConfig::load_or_default(path)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}
