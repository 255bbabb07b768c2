//! Key resolution for single-key commands and combo tokens.

use super::dialect::Dialect;
use crate::device::DeviceDescriptor;
use crate::dsl::{Command, CommandKind};
use crate::error::{KeyscriptError, Result};

/// How a combo token is turned into a key symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboKey {
    /// `MOD`, `CTRL`, `SHIFT` or `ALT`, looked up in the device vocabulary
    Modifier(CommandKind),
    /// A short alias for a named key, looked up in the device vocabulary
    Alias(CommandKind),
    /// Anything else: a same-named backend symbol by convention.
    /// Multi-character names are passed through unchecked.
    Convention(String),
}

/// Aliases accepted for named keys inside a combo.
fn alias(token: &str) -> Option<CommandKind> {
    match token {
        "DEL" | "DELETE" => Some(CommandKind::Delete),
        "BACKSPACE" => Some(CommandKind::Backspace),
        "ENTER" => Some(CommandKind::Enter),
        "SPACE" => Some(CommandKind::Space),
        "TAB" => Some(CommandKind::Tab),
        "ESC" | "ESCAPE" => Some(CommandKind::Escape),
        _ => None,
    }
}

/// Classify one token of a modifier combo.
pub fn classify(token: &str) -> ComboKey {
    if let Some(modifier) = CommandKind::modifier_from_keyword(token) {
        return ComboKey::Modifier(modifier);
    }
    let upper = token.to_ascii_uppercase();
    let single_char = token.chars().count() == 1;
    if single_char && token.chars().all(|ch| ch.is_alphanumeric()) {
        return ComboKey::Convention(token.to_string());
    }
    match alias(&upper) {
        Some(kind) => ComboKey::Alias(kind),
        None => ComboKey::Convention(token.to_string()),
    }
}

/// Look up a key kind in the device vocabulary.
pub fn vocabulary_symbol<'d>(
    kind: &CommandKind,
    device: &'d DeviceDescriptor,
    cmd: &Command,
) -> Result<&'d str> {
    device.vocabulary.get(kind).ok_or_else(|| {
        KeyscriptError::encode(format!(
            "Unsupported key: {} for device {} in command: {}",
            kind, device.id, cmd.raw_text
        ))
    })
}

/// Backend symbol for one combo token.
pub fn resolve_token(
    token: &str,
    device: &DeviceDescriptor,
    dialect: &dyn Dialect,
    cmd: &Command,
) -> Result<String> {
    match classify(token) {
        ComboKey::Modifier(kind) | ComboKey::Alias(kind) => {
            vocabulary_symbol(&kind, device, cmd).map(str::to_string)
        }
        ComboKey::Convention(name) => Ok(dialect.convention_symbol(&name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{CodeShape, KeyVocabulary};
    use crate::encoder::dialect::{Arduino, CircuitPython};

    #[test]
    fn test_classify() {
        assert_eq!(classify("ctrl"), ComboKey::Modifier(CommandKind::Ctrl));
        assert_eq!(classify("r"), ComboKey::Convention("r".into()));
        assert_eq!(classify("5"), ComboKey::Convention("5".into()));
        assert_eq!(classify("del"), ComboKey::Alias(CommandKind::Delete));
        assert_eq!(classify("Esc"), ComboKey::Alias(CommandKind::Escape));
        assert_eq!(classify("F4"), ComboKey::Convention("F4".into()));
    }

    #[test]
    fn test_resolve_token_per_family() {
        let cmd = Command::new(CommandKind::ModifierCombo, 1, "CTRL ALT DEL", vec![]);
        let py = DeviceDescriptor::new("py", "Py", CodeShape::CircuitPython);
        let ino = DeviceDescriptor::new("ino", "Ino", CodeShape::Arduino);

        assert_eq!(resolve_token("DEL", &py, &CircuitPython, &cmd).unwrap(), "Keycode.DELETE");
        assert_eq!(resolve_token("DEL", &ino, &Arduino, &cmd).unwrap(), "KEY_DELETE");
        assert_eq!(resolve_token("ALT", &ino, &Arduino, &cmd).unwrap(), "KEY_LEFT_ALT");
        assert_eq!(resolve_token("x", &ino, &Arduino, &cmd).unwrap(), "'x'");
    }

    #[test]
    fn test_missing_modifier_is_an_error() {
        let cmd = Command::new(CommandKind::ModifierCombo, 3, "MOD r", vec![]);
        let device = DeviceDescriptor::new("bare", "Bare", CodeShape::CircuitPython)
            .with_vocabulary(KeyVocabulary::new());
        let err = resolve_token("MOD", &device, &CircuitPython, &cmd).unwrap_err();
        assert!(err.to_string().contains("Unsupported key: MOD"));
        assert!(err.to_string().contains("MOD r"));
    }
}
