//! Configuration file commands.

use clap::{Args, Subcommand};
use polykey_config::{SynthConfig, default_config_path, ensure_user_config_dir};
use std::path::Path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs, path: &Path) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = SynthConfig::load_or_default(path)?;
            if !path.exists() {
                println!("# {} not found, showing defaults\n", path.display());
            }
            print!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            if path == default_config_path().as_path() {
                ensure_user_config_dir()?;
            }
            SynthConfig::default().save(path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}
