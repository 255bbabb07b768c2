//! Error types for the Keyscript compiler.
//!
//! This module provides a unified error type [`KeyscriptError`] that covers
//! all error conditions that can occur while parsing a script, encoding it for
//! a device, and reading or writing files from the CLI.

use thiserror::Error;

/// Result type alias using [`KeyscriptError`].
pub type Result<T> = std::result::Result<T, KeyscriptError>;

/// Unified error type for all Keyscript operations.
#[derive(Error, Debug)]
pub enum KeyscriptError {
    // ============ Script Parsing Errors ============
    /// A line that no grammar rule accepts. Parsing stops at the first one.
    #[error("Error in {source_name}, line {line}: {message}")]
    ScriptError {
        source_name: String,
        line: usize,
        message: String,
    },

    // ============ Encoding Errors ============
    /// A command that cannot be rendered for the selected device.
    ///
    /// The message always carries the raw text of the offending command.
    #[error("Failed to encode script: {message}")]
    EncodeError { message: String },

    // ============ Device Errors ============
    /// Device identifier not present in the registry
    #[error("Unknown device '{device}'")]
    UnknownDevice { device: String },

    // ============ I/O Errors ============
    /// Error reading a script file
    #[error("Failed to read script file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the generated program
    #[error("Failed to write output file '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl KeyscriptError {
    /// Create a script (parse) error
    pub fn script(source_name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::ScriptError {
            source_name: source_name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::EncodeError {
            message: message.into(),
        }
    }

    /// Source line of a script error, if this is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ScriptError { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_error_display() {
        let err = KeyscriptError::script("payload.txt", 5, "Unknown command: FOO BAR");
        assert_eq!(
            err.to_string(),
            "Error in payload.txt, line 5: Unknown command: FOO BAR"
        );
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn test_encode_error_has_no_line() {
        let err = KeyscriptError::encode("Invalid delay value 'abc' in command: DELAY abc");
        assert!(err.to_string().contains("DELAY abc"));
        assert_eq!(err.line(), None);
    }
}
