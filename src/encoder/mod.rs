//! Code generation for target devices.
//!
//! The encoder turns a [`Script`] into the source of a program for one of two
//! code-shape families (see [`CodeShape`](crate::device::CodeShape)). Output is
//! produced in a single linear pass:
//!
//! 1. **Header**, chosen from the *initial* safe mode setting
//! 2. **Body**, one block per command. In safe mode each block starts with a
//!    comment echoing the source line; this reads the *current* setting, so a
//!    `SAFE_MODE OFF` line silences everything after it
//! 3. **Footer**, chosen from the setting at the *end* of the body
//!
//! The header ignores later toggles while body and footer follow them. Existing
//! generated programs depend on this exact shape, so it is kept as is.
//!
//! ## Placeholders
//!
//! `IF`/`WHILE` style commands (only reachable when a [`Command`] is built by
//! hand) compile to inert scaffolds: an always-true branch and a loop that
//! exits immediately. Conditions are echoed in comments and never evaluated.

mod commands;
mod dialect;
mod keys;
mod state;

pub use dialect::{dialect_for, escape_literal, format_seconds, Arduino, CircuitPython, Dialect};
pub use keys::{classify, ComboKey};
pub use state::GenerationState;

use commands::{encode_command, Target};

use crate::device::DeviceDescriptor;
use crate::dsl::{Command, CommandKind, Script};
use crate::error::Result;
use crate::LONG_STRING_WARNING_CHARS;

/// Default wait before the payload starts, in milliseconds.
pub const DEFAULT_STARTUP_DELAY_MS: u64 = 2000;

/// Default wait emitted for `PAUSE`, in milliseconds.
pub const DEFAULT_PAUSE_MS: u64 = 5000;

/// Configuration for the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Initial safe mode (annotated output). Selects the header shape.
    pub safe_mode: bool,
    /// Settle delay emitted before the first command.
    pub startup_delay_ms: u64,
    /// Fixed wait emitted for `PAUSE`.
    pub pause_ms: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            safe_mode: true,
            startup_delay_ms: DEFAULT_STARTUP_DELAY_MS,
            pause_ms: DEFAULT_PAUSE_MS,
        }
    }
}

impl EncoderConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial safe mode.
    pub fn with_safe_mode(mut self, safe_mode: bool) -> Self {
        self.safe_mode = safe_mode;
        self
    }

    /// Set the startup settle delay (in milliseconds).
    pub fn with_startup_delay(mut self, startup_delay_ms: u64) -> Self {
        self.startup_delay_ms = startup_delay_ms;
        self
    }

    /// Set the `PAUSE` wait (in milliseconds).
    pub fn with_pause(mut self, pause_ms: u64) -> Self {
        self.pause_ms = pause_ms;
        self
    }
}

/// Generated program plus the advisory warnings collected on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub code: String,
    pub warnings: Vec<String>,
}

/// The script encoder.
///
/// Holds configuration only. Generation state is created inside every
/// [`Encoder::encode`] call, so one encoder can be reused across scripts.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// Create an encoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with custom configuration.
    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode a script for a device.
    pub fn encode(&self, script: &Script, device: &DeviceDescriptor) -> Result<String> {
        let dialect = dialect_for(device.shape);
        let target = Target {
            device,
            dialect,
            config: &self.config,
        };
        let indent = dialect.indent();

        let mut state = GenerationState::new(self.config.safe_mode);
        let mut lines = dialect.header(
            state.safe_mode,
            device,
            script.metadata(),
            self.config.startup_delay_ms,
        );

        for (index, cmd) in script.commands().iter().enumerate() {
            log::debug!(
                "encoding command {} ({}) from line {}",
                index + 1,
                cmd.kind,
                cmd.line
            );

            if state.safe_mode {
                let echo = format!("Command {}: {}", index + 1, cmd.raw_text);
                lines.push(format!("{}{}", indent, dialect.comment(&echo)));
            }

            let (body, next) = encode_command(&target, cmd, state)?;
            lines.extend(body.into_iter().map(|line| indent_line(indent, line)));

            if next.default_delay_ms > 0 && takes_default_delay(cmd) {
                lines.push(format!("{}{}", indent, dialect.sleep(next.default_delay_ms)));
            }
            lines.push(String::new());

            state = next.with_last_command(cmd);
        }

        lines.extend(dialect.footer(state.safe_mode));

        log::info!(
            "encoded {} commands for {} ({} lines)",
            script.len(),
            device.id,
            lines.len()
        );

        let mut code = lines.join("\n");
        code.push('\n');
        Ok(code)
    }
}

/// Encode a script with default configuration.
pub fn encode(script: &Script, device: &DeviceDescriptor) -> Result<String> {
    Encoder::new().encode(script, device)
}

fn indent_line(indent: &str, line: String) -> String {
    if line.is_empty() {
        line
    } else {
        format!("{}{}", indent, line)
    }
}

fn takes_default_delay(cmd: &Command) -> bool {
    !cmd.kind.is_comment() && cmd.kind != CommandKind::DefaultDelay
}

/// Check a script against what a device can express.
///
/// Never fails. Flags keys missing from the device vocabulary, commands that
/// only compile to placeholders or no-ops, and very long literal text.
pub fn device_warnings(script: &Script, device: &DeviceDescriptor) -> Vec<String> {
    let mut warnings = Vec::new();

    for cmd in script.commands() {
        let unsupported = match &cmd.kind {
            kind if kind.is_key() => !device.vocabulary.contains(kind),
            CommandKind::If
            | CommandKind::Else
            | CommandKind::EndIf
            | CommandKind::While
            | CommandKind::EndWhile
            | CommandKind::Custom(_) => true,
            _ => false,
        };
        if unsupported {
            warnings.push(format!(
                "Line {}: Command '{}' may not be fully supported on {}",
                cmd.line, cmd.kind, device.name
            ));
        }

        if cmd.kind == CommandKind::String {
            let length = cmd.first_param().map_or(0, |text| text.chars().count());
            if length > LONG_STRING_WARNING_CHARS {
                warnings.push(format!(
                    "Line {}: Very long string ({} chars) may cause timing issues",
                    cmd.line, length
                ));
            }
        }
    }

    warnings
}

/// Write a generated program, creating parent directories as needed.
#[cfg(feature = "cli")]
pub fn write_program(path: &std::path::Path, code: &str) -> Result<()> {
    let to_error = |e| crate::error::KeyscriptError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, code).map_err(to_error)
}
