//! Program templates for the two code-shape families.
//!
//! Statement helpers return lines without the body indentation; the encoder
//! adds [`Dialect::indent`] once per body line. Lines that must be nested one
//! level deeper (loop bodies, placeholder branches) carry one extra indent.

use crate::device::{CodeShape, DeviceDescriptor};
use crate::dsl::ScriptMetadata;

/// Rendering rules for one code-shape family.
pub trait Dialect {
    /// Indentation of one nesting level.
    fn indent(&self) -> &'static str;

    /// A single-line comment.
    fn comment(&self, text: &str) -> String;

    /// Everything before the first command, ending inside the payload body
    /// after the startup settle delay.
    fn header(
        &self,
        verbose: bool,
        device: &DeviceDescriptor,
        metadata: &ScriptMetadata,
        startup_delay_ms: u64,
    ) -> Vec<String>;

    /// Everything after the last command.
    fn footer(&self, verbose: bool) -> Vec<String>;

    /// Wait for a number of milliseconds.
    fn sleep(&self, ms: u64) -> String;

    /// Wait for a random time between two bounds, in milliseconds.
    fn random_sleep(&self, min_ms: u64, max_ms: u64) -> Vec<String>;

    /// Type a string literal; `escaped` is already escaped.
    fn type_text(&self, escaped: &str) -> String;

    fn press(&self, symbol: &str) -> String;

    fn release(&self, symbol: &str) -> String;

    /// Symbol for a combo token without a vocabulary entry.
    fn convention_symbol(&self, token: &str) -> String;

    /// Statement recording the current safe mode value.
    fn safe_mode_marker(&self, enabled: bool) -> String;

    /// Print a diagnostic message at runtime; `escaped` is already escaped.
    fn print(&self, escaped: &str) -> String;

    /// Opening line of a fixed-count repetition.
    fn repeat_open(&self, count: u64) -> String;

    /// Closing line of a fixed-count repetition, if the family needs one.
    fn repeat_close(&self) -> Option<String>;

    /// A statement that does nothing.
    fn no_op(&self) -> String;

    /// Always-true branch that does not evaluate `condition`.
    fn placeholder_if(&self, condition: &str) -> Vec<String>;

    /// Loop scaffold that exits immediately and does not evaluate `condition`.
    fn placeholder_while(&self, condition: &str) -> Vec<String>;

    /// Append a trailing comment to a statement.
    fn annotate(&self, statement: &str, note: &str) -> String {
        format!("{}  {}", statement, self.comment(note))
    }
}

/// The dialect for a code-shape family.
pub fn dialect_for(shape: CodeShape) -> &'static dyn Dialect {
    match shape {
        CodeShape::CircuitPython => &CircuitPython,
        CodeShape::Arduino => &Arduino,
    }
}

/// Escape backslashes and double quotes for a string literal.
pub fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render milliseconds as exact decimal seconds: `1500` -> `1.5`, `1000` -> `1.0`.
pub fn format_seconds(ms: u64) -> String {
    let whole = ms / 1000;
    let frac = ms % 1000;
    if frac == 0 {
        format!("{}.0", whole)
    } else {
        let digits = format!("{:03}", frac);
        format!("{}.{}", whole, digits.trim_end_matches('0'))
    }
}

fn script_information(dialect: &dyn Dialect, metadata: &ScriptMetadata) -> Vec<String> {
    vec![
        dialect.comment("Script Information:"),
        dialect.comment(&format!("Source: {}", metadata.source)),
        dialect.comment(&format!("Total Commands: {}", metadata.total_commands)),
        dialect.comment(&format!("Total Lines: {}", metadata.total_lines)),
    ]
}

/// CircuitPython with `adafruit_hid`.
pub struct CircuitPython;

const PYTHON_DIGITS: [&str; 10] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE",
];

impl Dialect for CircuitPython {
    fn indent(&self) -> &'static str {
        "    "
    }

    fn comment(&self, text: &str) -> String {
        format!("# {}", text)
    }

    fn header(
        &self,
        verbose: bool,
        device: &DeviceDescriptor,
        metadata: &ScriptMetadata,
        startup_delay_ms: u64,
    ) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        lines.push("\"\"\"".into());
        lines.push("Keyscript - Generated CircuitPython Code".into());
        if verbose {
            lines.push(format!("Target: {}", device.name));
            lines.push(String::new());
            lines.push("This code was automatically generated from a keystroke script.".into());
            lines.push("It uses the adafruit_hid library to act as a USB keyboard.".into());
            lines.push(String::new());
            lines.push(
                "IMPORTANT: Use only for educational purposes and authorized testing!".into(),
            );
        }
        lines.push("\"\"\"".into());
        lines.push(String::new());
        lines.extend(
            [
                "import time",
                "import usb_hid",
                "from adafruit_hid.keyboard import Keyboard",
                "from adafruit_hid.keyboard_layout_us import KeyboardLayoutUS",
                "from adafruit_hid.keycode import Keycode",
                "",
                "# Initialize HID devices",
                "keyboard = Keyboard(usb_hid.devices)",
                "keyboard_layout = KeyboardLayoutUS(keyboard)",
                "",
            ]
            .map(String::from),
        );
        if verbose {
            lines.push("# The computer sees this board as an ordinary USB keyboard and".into());
            lines.push("# receives its keystrokes like those of a physical one.".into());
            lines.push(String::new());
            lines.extend(script_information(self, metadata));
            lines.push(String::new());
            lines.push("# Main execution loop".into());
        }
        lines.push("def main():".into());
        if verbose {
            lines.push("    # Wait for system to recognize the device".into());
        }
        lines.push(format!("    {}", self.sleep(startup_delay_ms)));
        lines.push(String::new());
        lines
    }

    fn footer(&self, verbose: bool) -> Vec<String> {
        let mut lines = vec![String::new()];
        if verbose {
            lines.push("# Run the main function".into());
        }
        lines.push("if __name__ == '__main__':".into());
        lines.push("    main()".into());
        lines.push(String::new());
        lines.push("\"\"\"".into());
        lines.push("End of Keyscript Generated Code".into());
        if verbose {
            lines.push(String::new());
            lines.push("Notes:".into());
            lines.push("- Always test in controlled environments".into());
            lines.push("- Use responsibly and ethically".into());
            lines.push("- Consider the security implications of automated input".into());
        }
        lines.push("\"\"\"".into());
        lines
    }

    fn sleep(&self, ms: u64) -> String {
        format!("time.sleep({})", format_seconds(ms))
    }

    fn random_sleep(&self, min_ms: u64, max_ms: u64) -> Vec<String> {
        vec![
            "import random".into(),
            format!(
                "time.sleep(random.uniform({}, {}))",
                format_seconds(min_ms),
                format_seconds(max_ms)
            ),
        ]
    }

    fn type_text(&self, escaped: &str) -> String {
        format!("keyboard_layout.write(\"{}\")", escaped)
    }

    fn press(&self, symbol: &str) -> String {
        format!("keyboard.press({})", symbol)
    }

    fn release(&self, symbol: &str) -> String {
        format!("keyboard.release({})", symbol)
    }

    fn convention_symbol(&self, token: &str) -> String {
        let upper = token.to_ascii_uppercase();
        match upper.as_bytes() {
            [digit @ b'0'..=b'9'] => format!("Keycode.{}", PYTHON_DIGITS[(digit - b'0') as usize]),
            _ => format!("Keycode.{}", upper),
        }
    }

    fn safe_mode_marker(&self, enabled: bool) -> String {
        format!("safe_mode = {}", if enabled { "True" } else { "False" })
    }

    fn print(&self, escaped: &str) -> String {
        format!("print(\"{}\")", escaped)
    }

    fn repeat_open(&self, count: u64) -> String {
        format!("for _ in range({}):", count)
    }

    fn repeat_close(&self) -> Option<String> {
        None
    }

    fn no_op(&self) -> String {
        "pass".into()
    }

    fn placeholder_if(&self, condition: &str) -> Vec<String> {
        vec![
            "if True:".into(),
            format!("    pass  # Placeholder for condition: {}", condition),
        ]
    }

    fn placeholder_while(&self, condition: &str) -> Vec<String> {
        vec![
            "while True:".into(),
            format!("    break  # Placeholder for condition: {}", condition),
        ]
    }
}

/// Arduino sketch using `Keyboard.h`.
pub struct Arduino;

impl Dialect for Arduino {
    fn indent(&self) -> &'static str {
        "  "
    }

    fn comment(&self, text: &str) -> String {
        // A backslash before the newline (trailing blanks included) splices
        // the next line into the comment
        let trimmed = text.trim_end();
        if trimmed.ends_with('\\') {
            format!("// {} //", trimmed)
        } else {
            format!("// {}", text)
        }
    }

    fn header(
        &self,
        verbose: bool,
        device: &DeviceDescriptor,
        metadata: &ScriptMetadata,
        startup_delay_ms: u64,
    ) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        lines.push("/*".into());
        lines.push("Keyscript - Generated Arduino Code".into());
        if verbose {
            lines.push(format!("Target: {}", device.name));
            lines.push(String::new());
            lines.push("This code was automatically generated from a keystroke script.".into());
            lines.push("It uses the Arduino Keyboard library to act as a USB keyboard.".into());
            lines.push(String::new());
            lines.push(
                "IMPORTANT: Use only for educational purposes and authorized testing!".into(),
            );
        }
        lines.push("*/".into());
        lines.push(String::new());
        lines.push("#include <Keyboard.h>".into());
        lines.push(String::new());
        lines.push(format!("bool safeMode = {};", verbose));
        lines.push(String::new());
        if verbose {
            lines.extend(script_information(self, metadata));
            lines.push(String::new());
        }
        lines.push("void setup() {".into());
        if verbose {
            lines.push("  // Initialize HID keyboard and serial output".into());
        }
        lines.push("  Keyboard.begin();".into());
        lines.push("  Serial.begin(9600);".into());
        if verbose {
            lines.push("  // Wait for system to recognize the device".into());
        }
        lines.push(format!("  {}", self.sleep(startup_delay_ms)));
        lines.push(String::new());
        lines
    }

    fn footer(&self, verbose: bool) -> Vec<String> {
        let mut lines = Vec::new();
        if verbose {
            lines.push("  // Make sure no key is left pressed".into());
        }
        lines.push("  Keyboard.releaseAll();".into());
        lines.push("}".into());
        lines.push(String::new());
        lines.push("void loop() {".into());
        if verbose {
            lines.push("  // The payload runs once from setup()".into());
        }
        lines.push("}".into());
        lines.push(String::new());
        lines.push("/*".into());
        lines.push("End of Keyscript Generated Code".into());
        if verbose {
            lines.push(String::new());
            lines.push("Notes:".into());
            lines.push("- Always test in controlled environments".into());
            lines.push("- Use responsibly and ethically".into());
            lines.push("- Consider the security implications of automated input".into());
        }
        lines.push("*/".into());
        lines
    }

    fn sleep(&self, ms: u64) -> String {
        format!("delay({});", ms)
    }

    fn random_sleep(&self, min_ms: u64, max_ms: u64) -> Vec<String> {
        // random(min, max) excludes max
        vec![format!("delay(random({}, {}));", min_ms, max_ms + 1)]
    }

    fn type_text(&self, escaped: &str) -> String {
        format!("Keyboard.print(\"{}\");", escaped)
    }

    fn press(&self, symbol: &str) -> String {
        format!("Keyboard.press({});", symbol)
    }

    fn release(&self, symbol: &str) -> String {
        format!("Keyboard.release({});", symbol)
    }

    fn convention_symbol(&self, token: &str) -> String {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphanumeric() => {
                format!("'{}'", ch.to_ascii_lowercase())
            }
            _ => format!("KEY_{}", token.to_ascii_uppercase()),
        }
    }

    fn safe_mode_marker(&self, enabled: bool) -> String {
        format!("safeMode = {};", enabled)
    }

    fn print(&self, escaped: &str) -> String {
        format!("Serial.println(\"{}\");", escaped)
    }

    fn repeat_open(&self, count: u64) -> String {
        format!("for (unsigned long i = 0; i < {}; i++) {{", count)
    }

    fn repeat_close(&self) -> Option<String> {
        Some("}".into())
    }

    fn no_op(&self) -> String {
        "(void)0;".into()
    }

    fn placeholder_if(&self, condition: &str) -> Vec<String> {
        vec![
            "if (true) {".into(),
            format!("  // Placeholder for condition: {}", condition),
            "}".into(),
        ]
    }

    fn placeholder_while(&self, condition: &str) -> Vec<String> {
        vec![
            "while (true) {".into(),
            format!("  break;  // Placeholder for condition: {}", condition),
            "}".into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(1500), "1.5");
        assert_eq!(format_seconds(1000), "1.0");
        assert_eq!(format_seconds(0), "0.0");
        assert_eq!(format_seconds(1), "0.001");
        assert_eq!(format_seconds(1010), "1.01");
        assert_eq!(format_seconds(70_000), "70.0");
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
    }

    #[test]
    fn test_convention_symbols() {
        assert_eq!(CircuitPython.convention_symbol("r"), "Keycode.R");
        assert_eq!(CircuitPython.convention_symbol("7"), "Keycode.SEVEN");
        assert_eq!(CircuitPython.convention_symbol("PRINTSCREEN"), "Keycode.PRINTSCREEN");
        assert_eq!(Arduino.convention_symbol("R"), "'r'");
        assert_eq!(Arduino.convention_symbol("4"), "'4'");
        assert_eq!(Arduino.convention_symbol("f4"), "KEY_F4");
    }

    #[test]
    fn test_arduino_comment_never_ends_in_backslash() {
        assert_eq!(Arduino.comment("dir\\"), "// dir\\ //");
        assert_eq!(Arduino.comment("C:\\  "), "// C:\\ //");
        assert_eq!(Arduino.comment("a\\b"), "// a\\b");
        assert_eq!(
            Arduino.annotate("Keyboard.print(\"C:\\\\\");", "Type: C:\\"),
            "Keyboard.print(\"C:\\\\\");  // Type: C:\\ //"
        );
        // Python comments have no line continuation
        assert_eq!(CircuitPython.comment("dir\\"), "# dir\\");
    }

    #[test]
    fn test_random_sleep_forms() {
        assert_eq!(
            CircuitPython.random_sleep(100, 1500),
            vec!["import random", "time.sleep(random.uniform(0.1, 1.5))"]
        );
        assert_eq!(Arduino.random_sleep(100, 500), vec!["delay(random(100, 501));"]);
    }

    #[test]
    fn test_sleep_units() {
        assert_eq!(CircuitPython.sleep(1500), "time.sleep(1.5)");
        assert_eq!(Arduino.sleep(1500), "delay(1500);");
    }
}
