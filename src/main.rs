//! Keyscript - keystroke script compiler
//!
//! Compiles keystroke automation scripts into CircuitPython or Arduino code
//! for USB HID capable microcontrollers.
//!
//! # Usage
//!
//! ```bash
//! keyscript parse payload.txt -v
//! keyscript encode payload.txt -d arduino_leonardo
//! keyscript validate payload.txt
//! keyscript devices
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use keyscript_core::{
    device::DeviceRegistry,
    dsl,
    encoder::{self, Encoder, EncoderConfig},
    error::Result,
    DEFAULT_DEVICE,
};

/// Keystroke script compiler for HID microcontrollers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug logging and extra detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a script and print statistics
    Parse {
        /// Path to the script file
        #[arg(value_name = "SCRIPT_FILE")]
        input: PathBuf,
    },

    /// Encode a script into device-specific code
    Encode {
        /// Path to the script file
        #[arg(value_name = "SCRIPT_FILE")]
        input: PathBuf,

        /// Output file (default: compiled/<name>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target device identifier
        #[arg(short, long, default_value = DEFAULT_DEVICE)]
        device: String,

        /// Start without annotations (minimal header and comments)
        #[arg(long)]
        production: bool,
    },

    /// Check a script for problems without generating code
    Validate {
        /// Path to the script file
        #[arg(value_name = "SCRIPT_FILE")]
        input: PathBuf,

        /// Target device identifier
        #[arg(short, long, default_value = DEFAULT_DEVICE)]
        device: String,
    },

    /// List supported devices
    Devices,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let registry = DeviceRegistry::builtin();

    match args.command {
        Command::Parse { input } => parse_command(&input, args.verbose),
        Command::Encode {
            input,
            output,
            device,
            production,
        } => encode_command(&registry, &input, output, &device, production),
        Command::Validate { input, device } => {
            validate_command(&registry, &input, &device, args.verbose)
        }
        Command::Devices => {
            for device in registry.list() {
                println!(
                    "{:<20} {:<20} {} (.{})",
                    device.id, device.name, device.shape, device.extension
                );
            }
            Ok(())
        }
    }
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!("\nWarnings:");
    for warning in warnings {
        println!("   {}", warning);
    }
}

fn parse_command(input: &Path, verbose: bool) -> Result<()> {
    let script = dsl::parse_file(input)?;

    println!("Successfully parsed '{}'", input.display());
    println!("   Total Commands: {}", script.metadata().total_commands);
    println!("   Total Lines: {}", script.metadata().total_lines);
    println!("   Source: {}", script.metadata().source);

    if verbose {
        println!("\nCommands:");
        for (i, cmd) in script.commands().iter().enumerate() {
            println!("   {:2}. {}: {}", i + 1, cmd.kind, cmd.raw_text);
        }
    }

    print_warnings(&dsl::validate(&script));
    Ok(())
}

fn encode_command(
    registry: &DeviceRegistry,
    input: &Path,
    output: Option<PathBuf>,
    device_id: &str,
    production: bool,
) -> Result<()> {
    let device = registry.resolve(device_id)?;
    let script = dsl::parse_file(input)?;

    let output = output.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        Path::new("compiled").join(device.output_file_name(&stem))
    });

    let encoder = Encoder::with_config(EncoderConfig::new().with_safe_mode(!production));
    let code = encoder.encode(&script, device)?;
    encoder::write_program(&output, &code)?;

    println!(
        "Successfully encoded '{}' for {} to '{}'",
        input.display(),
        device.name,
        output.display()
    );
    println!("   Input Commands: {}", script.len());
    println!("   Output Lines: {}", code.lines().count());

    let mut warnings = dsl::validate(&script);
    warnings.extend(encoder::device_warnings(&script, device));
    print_warnings(&warnings);
    Ok(())
}

fn validate_command(
    registry: &DeviceRegistry,
    input: &Path,
    device_id: &str,
    verbose: bool,
) -> Result<()> {
    let device = registry.resolve(device_id)?;
    let script = dsl::parse_file(input)?;

    let parser_warnings = dsl::validate(&script);
    let device_warnings = encoder::device_warnings(&script, device);

    println!("Successfully validated '{}'", input.display());
    println!("   Total Commands: {}", script.len());
    println!("   Parser Warnings: {}", parser_warnings.len());
    println!("   Device Warnings: {}", device_warnings.len());

    let all: Vec<String> = parser_warnings.into_iter().chain(device_warnings).collect();
    if all.is_empty() {
        println!("\nNo warnings found");
    } else {
        print_warnings(&all);
    }

    if verbose {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for cmd in script.commands() {
            *counts.entry(cmd.kind.keyword()).or_default() += 1;
        }
        println!("\nCommand Summary:");
        for (kind, count) in counts {
            println!("   {}: {}", kind, count);
        }
    }

    Ok(())
}
