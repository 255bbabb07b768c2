//! Parser for the keystroke scripting language.
//!
//! The language is line-oriented: one command per line, keywords are
//! case-insensitive, blank lines are ignored.
//!
//! # Grammar Overview
//!
//! ```text
//! script      = { line }
//! line        = combo | delay | string | key | safe_mode | attackmode | comment | rem | empty
//! combo       = modifier ws token { ws token }
//! delay       = "DELAY" ws any+
//! string      = "STRING" [ ws any+ ]
//! key         = key_name | modifier | "PAUSE"
//! safe_mode   = "SAFE_MODE" ws ("ON" | "OFF")
//! attackmode  = "ATTACKMODE" ws ("HID" | "STORAGE" | "HID" ws "STORAGE" | "ON" | "OFF")
//! comment     = "#" any*
//! rem         = "REM" [ ws any+ ]
//!
//! modifier    = "MOD" | "CTRL" | "SHIFT" | "ALT"
//! token       = (letter | digit)+
//! key_name    = "ENTER" | "SPACE" | "TAB" | "BACKSPACE" | "DELETE"
//!             | "UP" | "DOWN" | "LEFT" | "RIGHT"
//!             | "HOME" | "END" | "INSERT" | "PAGE_UP" | "PAGE_DOWN" | "ESCAPE"
//!             | "F1" .. "F12"
//! ```
//!
//! Rules are tried in the order above and the first match wins, so
//! `CTRL c` is a combo while a lone `CTRL` is a key.
//!
//! # Example
//!
//! ```text
//! # Open the run dialog and start notepad
//! DELAY 1000
//! MOD r
//! DELAY 500
//! STRING notepad
//! ENTER
//! ```

mod ast;
mod grammar;
mod parser;
mod validate;

pub use ast::*;
pub use grammar::{match_line, Rule, RuleMatch, GRAMMAR};
pub use parser::Parser;
pub use validate::validate;

use crate::error::Result;

/// Parse script text into a [`Script`].
pub fn parse(input: &str, source_name: &str) -> Result<Script> {
    Parser::new(input, source_name).parse()
}

/// Parse a script file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Script> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::KeyscriptError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content, &path.display().to_string())
}
