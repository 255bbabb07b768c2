//! Command and script types produced by the parser.

use std::fmt;

/// One parsed instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// What the command does
    pub kind: CommandKind,
    /// Source line number (1-indexed)
    pub line: usize,
    /// Trimmed source text of the line
    pub raw_text: String,
    /// Kind-dependent parameters; empty for niladic keys, never absent
    pub parameters: Vec<String>,
}

impl Command {
    /// Create a command.
    pub fn new(
        kind: CommandKind,
        line: usize,
        raw_text: impl Into<String>,
        parameters: Vec<String>,
    ) -> Self {
        Self {
            kind,
            line,
            raw_text: raw_text.into(),
            parameters,
        }
    }

    /// First parameter, if any.
    pub fn first_param(&self) -> Option<&str> {
        self.parameters.first().map(String::as_str)
    }
}

/// Command kinds understood by the encoder.
///
/// Only a subset is produced by the grammar. The remaining kinds (repeat,
/// default delay, random delay, log, validate and the conditional/loop family)
/// are reachable when tooling builds [`Command`]s directly, and
/// [`CommandKind::Custom`] carries anything the encoder does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `DELAY <ms>`
    Delay,
    /// `STRING <text>`
    String,
    Enter,
    Space,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    PageUp,
    PageDown,
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Ctrl,
    Shift,
    Alt,
    /// GUI key (Windows / Command / Super)
    Mod,
    /// Several keys held together, e.g. `CTRL ALT DEL`
    ModifierCombo,
    /// Wait in place of a user keypress
    Pause,
    /// `SAFE_MODE ON|OFF`
    SafeMode,
    /// `ATTACKMODE <mode>`
    AttackMode,
    /// `# text`
    Comment,
    /// `REM text`
    Rem,
    Repeat,
    DefaultDelay,
    RandomDelay,
    Log,
    Validate,
    If,
    Else,
    EndIf,
    While,
    EndWhile,
    /// A kind this crate has no encoding for
    Custom(String),
}

impl CommandKind {
    /// The keyword used for this kind in scripts and diagnostics.
    pub fn keyword(&self) -> &str {
        match self {
            Self::Delay => "DELAY",
            Self::String => "STRING",
            Self::Enter => "ENTER",
            Self::Space => "SPACE",
            Self::Tab => "TAB",
            Self::Backspace => "BACKSPACE",
            Self::Delete => "DELETE",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Home => "HOME",
            Self::End => "END",
            Self::Insert => "INSERT",
            Self::PageUp => "PAGE_UP",
            Self::PageDown => "PAGE_DOWN",
            Self::Escape => "ESCAPE",
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::F5 => "F5",
            Self::F6 => "F6",
            Self::F7 => "F7",
            Self::F8 => "F8",
            Self::F9 => "F9",
            Self::F10 => "F10",
            Self::F11 => "F11",
            Self::F12 => "F12",
            Self::Ctrl => "CTRL",
            Self::Shift => "SHIFT",
            Self::Alt => "ALT",
            Self::Mod => "MOD",
            Self::ModifierCombo => "MODIFIER_COMBO",
            Self::Pause => "PAUSE",
            Self::SafeMode => "SAFE_MODE",
            Self::AttackMode => "ATTACKMODE",
            Self::Comment => "COMMENT",
            Self::Rem => "REM",
            Self::Repeat => "REPEAT",
            Self::DefaultDelay => "DEFAULT_DELAY",
            Self::RandomDelay => "RANDOM_DELAY",
            Self::Log => "LOG",
            Self::Validate => "VALIDATE",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::EndIf => "ENDIF",
            Self::While => "WHILE",
            Self::EndWhile => "ENDWHILE",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Parse a single-token key command (navigation, function and modifier
    /// keys, plus `PAUSE`).
    pub fn key_from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "ENTER" => Some(Self::Enter),
            "SPACE" => Some(Self::Space),
            "TAB" => Some(Self::Tab),
            "BACKSPACE" => Some(Self::Backspace),
            "DELETE" => Some(Self::Delete),
            "UP" => Some(Self::Up),
            "DOWN" => Some(Self::Down),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "HOME" => Some(Self::Home),
            "END" => Some(Self::End),
            "INSERT" => Some(Self::Insert),
            "PAGE_UP" => Some(Self::PageUp),
            "PAGE_DOWN" => Some(Self::PageDown),
            "ESCAPE" => Some(Self::Escape),
            "F1" => Some(Self::F1),
            "F2" => Some(Self::F2),
            "F3" => Some(Self::F3),
            "F4" => Some(Self::F4),
            "F5" => Some(Self::F5),
            "F6" => Some(Self::F6),
            "F7" => Some(Self::F7),
            "F8" => Some(Self::F8),
            "F9" => Some(Self::F9),
            "F10" => Some(Self::F10),
            "F11" => Some(Self::F11),
            "F12" => Some(Self::F12),
            "CTRL" => Some(Self::Ctrl),
            "SHIFT" => Some(Self::Shift),
            "ALT" => Some(Self::Alt),
            "MOD" => Some(Self::Mod),
            "PAUSE" => Some(Self::Pause),
            _ => None,
        }
    }

    /// Parse a modifier name as used inside a combo.
    pub fn modifier_from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "CTRL" => Some(Self::Ctrl),
            "SHIFT" => Some(Self::Shift),
            "ALT" => Some(Self::Alt),
            "MOD" => Some(Self::Mod),
            _ => None,
        }
    }

    /// Check if this kind is a single press-and-release key.
    pub fn is_key(&self) -> bool {
        !matches!(
            self,
            Self::Delay
                | Self::String
                | Self::ModifierCombo
                | Self::Pause
                | Self::SafeMode
                | Self::AttackMode
                | Self::Comment
                | Self::Rem
                | Self::Repeat
                | Self::DefaultDelay
                | Self::RandomDelay
                | Self::Log
                | Self::Validate
                | Self::If
                | Self::Else
                | Self::EndIf
                | Self::While
                | Self::EndWhile
                | Self::Custom(_)
        )
    }

    /// Check if this kind only annotates the output.
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment | Self::Rem)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Information about where a script came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptMetadata {
    /// Source name (file path or `<string>`)
    pub source: String,
    /// Number of commands produced
    pub total_commands: usize,
    /// Number of physical lines in the input, blank ones included
    pub total_lines: usize,
}

/// A parsed script: commands in source order plus metadata.
///
/// A script is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    commands: Vec<Command>,
    metadata: ScriptMetadata,
}

impl Script {
    /// Build a script from commands, e.g. from tooling other than the parser.
    pub fn new(commands: Vec<Command>, source: impl Into<String>, total_lines: usize) -> Self {
        let metadata = ScriptMetadata {
            source: source.into(),
            total_commands: commands.len(),
            total_lines,
        };
        Self { commands, metadata }
    }

    /// Commands in source order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Script metadata.
    pub fn metadata(&self) -> &ScriptMetadata {
        &self.metadata
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the script has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_keywords_round_trip() {
        for word in ["enter", "PAGE_UP", "f12", "Mod", "pause"] {
            let kind = CommandKind::key_from_keyword(word).unwrap();
            assert_eq!(kind.keyword(), word.to_ascii_uppercase());
        }
        assert_eq!(CommandKind::key_from_keyword("DELAY"), None);
    }

    #[test]
    fn test_is_key() {
        assert!(CommandKind::F5.is_key());
        assert!(CommandKind::Ctrl.is_key());
        assert!(!CommandKind::Pause.is_key());
        assert!(!CommandKind::Custom("BEEP".into()).is_key());
    }

    #[test]
    fn test_script_metadata() {
        let script = Script::new(
            vec![Command::new(CommandKind::Enter, 2, "ENTER", Vec::new())],
            "payload.txt",
            3,
        );
        assert_eq!(script.metadata().total_commands, 1);
        assert_eq!(script.metadata().total_lines, 3);
        assert_eq!(script.metadata().source, "payload.txt");
    }
}
