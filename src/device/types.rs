//! Core types for target devices.

use std::collections::HashMap;
use std::fmt;

use crate::dsl::CommandKind;

/// Output code-shape family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeShape {
    /// Interpreted host library (CircuitPython + adafruit_hid)
    CircuitPython,
    /// Compiled firmware (Arduino `Keyboard` library)
    Arduino,
}

impl CodeShape {
    /// Conventional output file extension, without the dot.
    pub fn default_extension(&self) -> &'static str {
        match self {
            Self::CircuitPython => "py",
            Self::Arduino => "ino",
        }
    }
}

impl fmt::Display for CodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CircuitPython => write!(f, "CircuitPython"),
            Self::Arduino => write!(f, "Arduino"),
        }
    }
}

/// Mapping from key command kinds to backend key symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyVocabulary {
    symbols: HashMap<CommandKind, String>,
}

impl KeyVocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from `(kind, symbol)` pairs.
    pub fn from_pairs<'s>(pairs: impl IntoIterator<Item = (CommandKind, &'s str)>) -> Self {
        Self {
            symbols: pairs
                .into_iter()
                .map(|(kind, symbol)| (kind, symbol.to_string()))
                .collect(),
        }
    }

    /// Add or replace a symbol.
    pub fn insert(&mut self, kind: CommandKind, symbol: impl Into<String>) {
        self.symbols.insert(kind, symbol.into());
    }

    /// Backend symbol for `kind`.
    pub fn get(&self, kind: &CommandKind) -> Option<&str> {
        self.symbols.get(kind).map(String::as_str)
    }

    /// Check if `kind` has a symbol.
    pub fn contains(&self, kind: &CommandKind) -> bool {
        self.symbols.contains_key(kind)
    }

    /// Number of mapped kinds.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if no kind is mapped.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Everything the encoder needs to know about a target device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Registry identifier, e.g. `xiao_rp2040`
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Key symbols for single-key commands
    pub vocabulary: KeyVocabulary,
    /// Code-shape family to emit
    pub shape: CodeShape,
    /// Output file extension, without the dot
    pub extension: String,
}

impl DeviceDescriptor {
    /// Create a descriptor using the family's standard vocabulary and extension.
    pub fn new(id: impl Into<String>, name: impl Into<String>, shape: CodeShape) -> Self {
        let vocabulary = match shape {
            CodeShape::CircuitPython => circuitpython_vocabulary(),
            CodeShape::Arduino => arduino_vocabulary(),
        };
        Self {
            id: id.into(),
            name: name.into(),
            vocabulary,
            shape,
            extension: shape.default_extension().to_string(),
        }
    }

    /// Replace the key vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: KeyVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Output file name for a script stem, e.g. `payload` -> `payload.ino`.
    pub fn output_file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension)
    }
}

/// `adafruit_hid.keycode.Keycode` symbols.
pub fn circuitpython_vocabulary() -> KeyVocabulary {
    KeyVocabulary::from_pairs([
        (CommandKind::Enter, "Keycode.ENTER"),
        (CommandKind::Space, "Keycode.SPACE"),
        (CommandKind::Tab, "Keycode.TAB"),
        (CommandKind::Backspace, "Keycode.BACKSPACE"),
        (CommandKind::Delete, "Keycode.DELETE"),
        (CommandKind::Up, "Keycode.UP_ARROW"),
        (CommandKind::Down, "Keycode.DOWN_ARROW"),
        (CommandKind::Left, "Keycode.LEFT_ARROW"),
        (CommandKind::Right, "Keycode.RIGHT_ARROW"),
        (CommandKind::Home, "Keycode.HOME"),
        (CommandKind::End, "Keycode.END"),
        (CommandKind::Insert, "Keycode.INSERT"),
        (CommandKind::PageUp, "Keycode.PAGE_UP"),
        (CommandKind::PageDown, "Keycode.PAGE_DOWN"),
        (CommandKind::Escape, "Keycode.ESCAPE"),
        (CommandKind::F1, "Keycode.F1"),
        (CommandKind::F2, "Keycode.F2"),
        (CommandKind::F3, "Keycode.F3"),
        (CommandKind::F4, "Keycode.F4"),
        (CommandKind::F5, "Keycode.F5"),
        (CommandKind::F6, "Keycode.F6"),
        (CommandKind::F7, "Keycode.F7"),
        (CommandKind::F8, "Keycode.F8"),
        (CommandKind::F9, "Keycode.F9"),
        (CommandKind::F10, "Keycode.F10"),
        (CommandKind::F11, "Keycode.F11"),
        (CommandKind::F12, "Keycode.F12"),
        (CommandKind::Ctrl, "Keycode.CONTROL"),
        (CommandKind::Shift, "Keycode.SHIFT"),
        (CommandKind::Alt, "Keycode.ALT"),
        (CommandKind::Mod, "Keycode.GUI"),
    ])
}

/// Arduino `Keyboard.h` key constants.
pub fn arduino_vocabulary() -> KeyVocabulary {
    KeyVocabulary::from_pairs([
        (CommandKind::Enter, "KEY_RETURN"),
        (CommandKind::Space, "' '"),
        (CommandKind::Tab, "KEY_TAB"),
        (CommandKind::Backspace, "KEY_BACKSPACE"),
        (CommandKind::Delete, "KEY_DELETE"),
        (CommandKind::Up, "KEY_UP_ARROW"),
        (CommandKind::Down, "KEY_DOWN_ARROW"),
        (CommandKind::Left, "KEY_LEFT_ARROW"),
        (CommandKind::Right, "KEY_RIGHT_ARROW"),
        (CommandKind::Home, "KEY_HOME"),
        (CommandKind::End, "KEY_END"),
        (CommandKind::Insert, "KEY_INSERT"),
        (CommandKind::PageUp, "KEY_PAGE_UP"),
        (CommandKind::PageDown, "KEY_PAGE_DOWN"),
        (CommandKind::Escape, "KEY_ESC"),
        (CommandKind::F1, "KEY_F1"),
        (CommandKind::F2, "KEY_F2"),
        (CommandKind::F3, "KEY_F3"),
        (CommandKind::F4, "KEY_F4"),
        (CommandKind::F5, "KEY_F5"),
        (CommandKind::F6, "KEY_F6"),
        (CommandKind::F7, "KEY_F7"),
        (CommandKind::F8, "KEY_F8"),
        (CommandKind::F9, "KEY_F9"),
        (CommandKind::F10, "KEY_F10"),
        (CommandKind::F11, "KEY_F11"),
        (CommandKind::F12, "KEY_F12"),
        (CommandKind::Ctrl, "KEY_LEFT_CTRL"),
        (CommandKind::Shift, "KEY_LEFT_SHIFT"),
        (CommandKind::Alt, "KEY_LEFT_ALT"),
        (CommandKind::Mod, "KEY_LEFT_GUI"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_cover_the_same_keys() {
        let py = circuitpython_vocabulary();
        let ino = arduino_vocabulary();
        assert_eq!(py.len(), ino.len());
        assert_eq!(py.get(&CommandKind::Mod), Some("Keycode.GUI"));
        assert_eq!(ino.get(&CommandKind::Enter), Some("KEY_RETURN"));
        assert!(!py.contains(&CommandKind::Pause));
    }

    #[test]
    fn test_output_file_name() {
        let device = DeviceDescriptor::new("uno", "Uno", CodeShape::Arduino);
        assert_eq!(device.output_file_name("payload"), "payload.ino");
    }
}
