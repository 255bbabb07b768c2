use keyscript_core::{compile, dsl, encoder, DeviceRegistry, EncoderConfig, KeyscriptError};

const PAYLOAD: &str = "\
REM open a terminal
DELAY 1500
MOD r
DELAY 500
STRING cmd
ENTER
";

fn registry() -> DeviceRegistry {
    DeviceRegistry::builtin()
}

#[test]
fn test_python_pipeline() {
    let registry = registry();
    let device = registry.resolve("xiao_rp2040").unwrap();
    let compilation = compile(PAYLOAD, "payload.txt", device, EncoderConfig::new()).unwrap();
    let code = &compilation.code;

    assert!(code.ends_with('\n'));
    assert!(code.contains("time.sleep(1.5)"));
    assert!(code.contains("time.sleep(0.5)"));
    assert!(code.contains("keyboard.press(Keycode.GUI)"));
    assert!(code.contains("keyboard_layout.write(\"cmd\")"));
    assert!(code.contains("keyboard.press(Keycode.ENTER)"));
    assert!(code.contains("# Command 3: MOD r"));
    assert!(code.contains("if __name__ == '__main__':"));
    assert!(compilation.warnings.is_empty());
}

#[test]
fn test_arduino_pipeline() {
    let registry = registry();
    let device = registry.resolve("arduino_leonardo").unwrap();
    let config = EncoderConfig::new().with_safe_mode(false);
    let code = compile(PAYLOAD, "payload.txt", device, config).unwrap().code;

    assert!(code.contains("#include <Keyboard.h>"));
    assert!(code.contains("delay(1500);"));
    assert!(code.contains("Keyboard.press(KEY_LEFT_GUI);"));
    assert!(code.contains("Keyboard.print(\"cmd\");"));
    assert!(code.contains("Keyboard.press(KEY_RETURN);"));
    assert!(code.contains("void loop()"));
    assert!(!code.contains("Command 1:"));
}

#[test]
fn test_combo_release_order_is_reversed() {
    let registry = registry();
    let device = registry.resolve("teensy_4").unwrap();
    let script = dsl::parse("CTRL ALT DEL", "<test>").unwrap();
    let code = encoder::Encoder::with_config(EncoderConfig::new().with_safe_mode(false))
        .encode(&script, device)
        .unwrap();

    let position = |needle: &str| code.find(needle).unwrap();
    let press_ctrl = position("Keyboard.press(KEY_LEFT_CTRL);");
    let press_alt = position("Keyboard.press(KEY_LEFT_ALT);");
    let press_del = position("Keyboard.press(KEY_DELETE);");
    let release_del = position("Keyboard.release(KEY_DELETE);");
    let release_alt = position("Keyboard.release(KEY_LEFT_ALT);");
    let release_ctrl = position("Keyboard.release(KEY_LEFT_CTRL);");

    assert!(press_ctrl < press_alt && press_alt < press_del);
    assert!(press_del < release_del);
    assert!(release_del < release_alt && release_alt < release_ctrl);
}

#[test]
fn test_safe_mode_off_silences_later_echoes() {
    let registry = registry();
    let device = registry.resolve("raspberry_pi_pico").unwrap();
    let script = dsl::parse("ENTER\nSAFE_MODE OFF\nTAB", "<test>").unwrap();
    let code = encoder::encode(&script, device).unwrap();

    assert!(code.contains("# Command 1: ENTER"));
    assert!(code.contains("# Command 2: SAFE_MODE OFF"));
    assert!(!code.contains("# Command 3: TAB"));
    assert!(code.contains("keyboard.press(Keycode.TAB)"));
    // Header was chosen before the toggle, footer after it
    assert!(code.contains("# Script Information:"));
    assert!(!code.contains("# Run the main function"));
}

#[test]
fn test_encoding_is_deterministic_and_isolated() {
    let registry = registry();
    let device = registry.resolve("xiao_rp2040").unwrap();
    let first = dsl::parse("SAFE_MODE OFF\nSTRING a", "<test>").unwrap();
    let second = dsl::parse("STRING b", "<test>").unwrap();
    let encoder = encoder::Encoder::new();

    let before = encoder.encode(&second, device).unwrap();
    encoder.encode(&first, device).unwrap();
    let after = encoder.encode(&second, device).unwrap();

    assert_eq!(before, after);
    assert!(after.contains("# Command 1: STRING b"));
}

#[test]
fn test_parse_error_reports_line() {
    let registry = registry();
    let device = registry.resolve("xiao_rp2040").unwrap();
    let err = compile("ENTER\n\nFOO BAR", "payload.txt", device, EncoderConfig::new()).unwrap_err();

    assert!(matches!(err, KeyscriptError::ScriptError { line: 3, .. }));
    assert_eq!(
        err.to_string(),
        "Error in payload.txt, line 3: Unknown command: FOO BAR"
    );
}

#[test]
fn test_bad_delay_fails_encoding() {
    let registry = registry();
    let device = registry.resolve("arduino_leonardo").unwrap();
    let err = compile("DELAY soon", "<test>", device, EncoderConfig::new()).unwrap_err();

    assert!(matches!(err, KeyscriptError::EncodeError { .. }));
    assert!(err.to_string().contains("DELAY soon"));
}

#[test]
fn test_long_delay_is_only_a_warning() {
    let registry = registry();
    let device = registry.resolve("evilcrow_cable").unwrap();
    let compilation = compile("DELAY 90000", "<test>", device, EncoderConfig::new()).unwrap();

    assert!(compilation.code.contains("delay(90000);"));
    assert_eq!(
        compilation.warnings,
        vec!["Line 1: Very long delay (90000ms) - this might be an error".to_string()]
    );
}

#[test]
fn test_unknown_device() {
    let err = registry().resolve("nonexistent").unwrap_err();
    assert!(matches!(err, KeyscriptError::UnknownDevice { .. }));
}

#[cfg(feature = "cli")]
#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("payload.txt");
    std::fs::write(&input, PAYLOAD).unwrap();

    let script = dsl::parse_file(&input).unwrap();
    assert_eq!(script.len(), 6);
    assert_eq!(script.metadata().source, input.display().to_string());

    let registry = registry();
    let device = registry.resolve("arduino_leonardo").unwrap();
    let code = encoder::encode(&script, device).unwrap();

    let output = dir.path().join("compiled").join(device.output_file_name("payload"));
    encoder::write_program(&output, &code).unwrap();

    assert!(output.ends_with("compiled/payload.ino"));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), code);
}

#[cfg(feature = "cli")]
#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = dsl::parse_file(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, KeyscriptError::FileReadError { .. }));
}
