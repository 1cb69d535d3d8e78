//! Audio output device listing.

use clap::{Args, Subcommand};
use polykey_io::{AudioBackend, CpalBackend};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List all output devices
    List,

    /// Show the default output device
    Info,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    let backend = CpalBackend::new();

    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = backend.list_devices()?;
            if devices.is_empty() {
                println!("No output devices found.");
                return Ok(());
            }

            println!("Output Devices ({})", backend.name());
            println!("==============\n");
            for (idx, device) in devices.iter().enumerate() {
                let default = if device.is_default { " (default)" } else { "" };
                println!(
                    "  [{}] {} ({} Hz, {} ch){}",
                    idx, device.name, device.default_sample_rate, device.default_channels, default
                );
            }
            println!();
            println!("Tip: select a device by partial name:");
            println!("  polykey play --device \"USB\"");
        }

        DevicesCommand::Info => match backend.default_output_device()? {
            Some(device) => {
                println!("Default Output:");
                println!("  Name:        {}", device.name);
                println!("  Sample Rate: {} Hz", device.default_sample_rate);
                println!("  Channels:    {}", device.default_channels);
            }
            None => println!("Default Output: None"),
        },
    }

    Ok(())
}
