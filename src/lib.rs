//! # Keyscript Core
//!
//! A compiler for a small line-oriented keystroke automation language.
//!
//! This library provides:
//! - A parser that turns script text into an ordered list of commands
//! - A multi-target encoder that renders those commands as CircuitPython or
//!   Arduino source code for USB HID capable microcontrollers
//! - A small registry of known target devices
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Grammar, parser and parser-level validation for the script language
//! - [`device`] - Device descriptors (key vocabulary, code shape, file extension)
//! - [`encoder`] - Code generation for both code-shape families
//! - [`error`] - The unified error type
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! keyscript encode payload.txt -d arduino_leonardo -o payload.ino
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use keyscript_core::{device::DeviceRegistry, dsl, encoder};
//!
//! let registry = DeviceRegistry::builtin();
//! let device = registry.resolve("xiao_rp2040")?;
//! let script = dsl::parse("DELAY 1000\nSTRING hello\nENTER", "<inline>")?;
//! let code = encoder::encode(&script, device)?;
//! # Ok::<(), keyscript_core::KeyscriptError>(())
//! ```
//!
//! ## Pipeline
//!
//! Every call is an isolated, synchronous transform:
//!
//! 1. The parser matches each non-blank line against an ordered rule list
//! 2. The encoder emits a header, then one block per command, then a footer
//! 3. Generation state (verbosity, default delay, last command) lives only for
//!    the duration of a single encode call

pub mod device;
pub mod dsl;
pub mod encoder;
pub mod error;

// Re-export main types for convenience
pub use device::{CodeShape, DeviceDescriptor, DeviceRegistry};
pub use dsl::{Command, CommandKind, Script};
pub use encoder::{Compilation, Encoder, EncoderConfig};
pub use error::{KeyscriptError, Result};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCompiler;

/// Device used when none is requested
pub const DEFAULT_DEVICE: &str = "xiao_rp2040";

/// Delays longer than this (in milliseconds) are reported as likely mistakes
pub const LONG_DELAY_WARNING_MS: i64 = 60_000;

/// Literal text longer than this (in characters) is reported as a timing risk
pub const LONG_STRING_WARNING_CHARS: usize = 1000;

/// Parse, validate and encode a script in one step.
///
/// Warnings from the parser-level validation and from the device support
/// check are returned alongside the generated code.
pub fn compile(
    text: &str,
    source_name: &str,
    device: &DeviceDescriptor,
    config: EncoderConfig,
) -> Result<Compilation> {
    let script = dsl::parse(text, source_name)?;
    let mut warnings = dsl::validate(&script);
    warnings.extend(encoder::device_warnings(&script, device));
    for warning in &warnings {
        log::warn!("{}", warning);
    }

    let code = Encoder::with_config(config).encode(&script, device)?;
    Ok(Compilation { code, warnings })
}
