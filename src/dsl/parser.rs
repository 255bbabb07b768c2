//! Line-oriented parser for the script language.

use super::ast::{Command, Script};
use super::grammar;
use crate::error::{KeyscriptError, Result};

/// Parser for script text.
pub struct Parser<'a> {
    input: &'a str,
    source_name: String,
}

impl<'a> Parser<'a> {
    /// Create a new parser over `input`, reporting errors against `source_name`.
    pub fn new(input: &'a str, source_name: impl Into<String>) -> Self {
        Self {
            input,
            source_name: source_name.into(),
        }
    }

    /// Parse the entire script.
    ///
    /// Blank lines are skipped. The first line no rule accepts aborts parsing.
    pub fn parse(&self) -> Result<Script> {
        let mut commands = Vec::new();
        let mut total_lines = 0;

        for (index, line) in self.input.split('\n').enumerate() {
            total_lines += 1;
            let line_number = index + 1;
            let trimmed = line.trim();

            // Skip empty lines
            if trimmed.is_empty() {
                continue;
            }

            commands.push(self.parse_line(trimmed, line_number)?);
        }

        log::debug!(
            "parsed {} commands from {} lines of {}",
            commands.len(),
            total_lines,
            self.source_name
        );

        Ok(Script::new(commands, self.source_name.clone(), total_lines))
    }

    fn parse_line(&self, line: &str, line_number: usize) -> Result<Command> {
        let (rule, (kind, parameters)) = grammar::match_line(line).ok_or_else(|| {
            KeyscriptError::script(
                &self.source_name,
                line_number,
                format!("Unknown command: {}", line),
            )
        })?;

        log::trace!("line {} matched rule '{}'", line_number, rule.name);
        Ok(Command::new(kind, line_number, line, parameters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::CommandKind;

    #[test]
    fn test_parse_basic_script() {
        let input = "DELAY 1000\nSTRING Hello, World!\nENTER";
        let script = Parser::new(input, "<string>").parse().unwrap();
        assert_eq!(script.len(), 3);
        assert_eq!(script.commands()[0].kind, CommandKind::Delay);
        assert_eq!(script.commands()[1].parameters, vec!["Hello, World!"]);
        assert_eq!(script.commands()[2].kind, CommandKind::Enter);
        assert!(script.commands()[2].parameters.is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped_but_counted() {
        let input = "\n  \nENTER\n\t\nTAB\n";
        let script = Parser::new(input, "<string>").parse().unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.commands()[0].line, 3);
        assert_eq!(script.commands()[1].line, 5);
        assert_eq!(script.metadata().total_commands, 2);
        assert_eq!(script.metadata().total_lines, 6);
    }

    #[test]
    fn test_raw_text_is_trimmed() {
        let script = Parser::new("   STRING  hi  \r\n", "<string>").parse().unwrap();
        assert_eq!(script.commands()[0].raw_text, "STRING  hi");
        assert_eq!(script.commands()[0].parameters, vec!["hi"]);
    }

    #[test]
    fn test_unknown_command_reports_line() {
        let input = "DELAY 1\nENTER\nTAB\nSPACE\nFOO BAR\nENTER\nENTER\nENTER\nENTER\nENTER";
        let err = Parser::new(input, "payload.txt").parse().unwrap_err();
        match err {
            KeyscriptError::ScriptError {
                source_name,
                line,
                message,
            } => {
                assert_eq!(source_name, "payload.txt");
                assert_eq!(line, 5);
                assert_eq!(message, "Unknown command: FOO BAR");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
