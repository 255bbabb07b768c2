//! Per-run generation state.

use crate::dsl::Command;

/// State threaded through a single encode pass.
///
/// Each command step receives the current state and returns the next one.
/// A fresh value is created by every encode call and dropped at its end, so
/// nothing carries over between scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationState<'s> {
    /// Whether annotations are emitted ("safe mode")
    pub safe_mode: bool,
    /// Wait inserted after each command, in milliseconds (0 = none)
    pub default_delay_ms: u64,
    /// Most recently encoded command, used by repeat
    pub last_command: Option<&'s Command>,
}

impl<'s> GenerationState<'s> {
    /// Initial state for a run.
    pub fn new(safe_mode: bool) -> Self {
        Self {
            safe_mode,
            default_delay_ms: 0,
            last_command: None,
        }
    }

    pub fn with_safe_mode(self, safe_mode: bool) -> Self {
        Self { safe_mode, ..self }
    }

    pub fn with_default_delay(self, default_delay_ms: u64) -> Self {
        Self {
            default_delay_ms,
            ..self
        }
    }

    pub fn with_last_command(self, command: &'s Command) -> Self {
        Self {
            last_command: Some(command),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::CommandKind;

    #[test]
    fn test_updates_do_not_touch_other_fields() {
        let cmd = Command::new(CommandKind::Enter, 1, "ENTER", Vec::new());
        let state = GenerationState::new(true)
            .with_default_delay(250)
            .with_last_command(&cmd)
            .with_safe_mode(false);
        assert!(!state.safe_mode);
        assert_eq!(state.default_delay_ms, 250);
        assert_eq!(state.last_command, Some(&cmd));
    }
}
