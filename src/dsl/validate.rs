//! Parser-level script validation.

use super::ast::{CommandKind, Script};
use crate::LONG_DELAY_WARNING_MS;

/// Check a parsed script for likely mistakes.
///
/// Never fails. Checks:
/// - The script has at least one command
/// - No delay is longer than a minute
///
/// Delay values that are not integers are left for the encoder to reject.
pub fn validate(script: &Script) -> Vec<String> {
    let mut warnings = Vec::new();

    if script.is_empty() {
        warnings.push("Script contains no commands".to_string());
    }

    for cmd in script.commands() {
        if cmd.kind != CommandKind::Delay {
            continue;
        }
        let Some(delay_ms) = cmd.first_param().and_then(|v| v.parse::<i64>().ok()) else {
            continue;
        };
        if delay_ms > LONG_DELAY_WARNING_MS {
            warnings.push(format!(
                "Line {}: Very long delay ({}ms) - this might be an error",
                cmd.line, delay_ms
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;

    #[test]
    fn test_empty_script_warning() {
        let script = parse("\n\n   \n", "<string>").unwrap();
        assert!(script.is_empty());
        assert_eq!(validate(&script), vec!["Script contains no commands"]);
    }

    #[test]
    fn test_long_delay_warning() {
        let script = parse("DELAY 500\nDELAY 70000", "<string>").unwrap();
        let warnings = validate(&script);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Line 2: Very long delay (70000ms)"));
    }

    #[test]
    fn test_boundary_and_malformed_delays_are_quiet() {
        let script = parse("DELAY 60000\nDELAY abc\nDELAY -5", "<string>").unwrap();
        assert!(validate(&script).is_empty());
    }
}
