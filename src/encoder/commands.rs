//! Per-command encoding.
//!
//! Each step takes the current [`GenerationState`] and returns the lines for
//! one command together with the next state. Lines are returned without the
//! body indentation.

use super::dialect::{escape_literal, Dialect};
use super::keys::{resolve_token, vocabulary_symbol};
use super::state::GenerationState;
use super::EncoderConfig;
use crate::device::DeviceDescriptor;
use crate::dsl::{Command, CommandKind};
use crate::error::{KeyscriptError, Result};

/// What a single encode run renders for.
pub(super) struct Target<'a> {
    pub device: &'a DeviceDescriptor,
    pub dialect: &'static dyn Dialect,
    pub config: &'a EncoderConfig,
}

/// Lines for one command plus the state after it.
pub(super) type Step<'s> = (Vec<String>, GenerationState<'s>);

/// Encode one command.
pub(super) fn encode_command<'s>(
    target: &Target<'_>,
    cmd: &'s Command,
    state: GenerationState<'s>,
) -> Result<Step<'s>> {
    let d = target.dialect;
    let verbose = state.safe_mode;

    let lines = match &cmd.kind {
        CommandKind::Delay => {
            let ms = parse_ms(cmd, cmd.first_param(), "Delay")?;
            vec![annotated(d, verbose, d.sleep(ms), &format!("Delay for {}ms", ms))]
        }
        CommandKind::String => encode_string(d, cmd, verbose)?,
        CommandKind::ModifierCombo => encode_combo(target, cmd, verbose)?,
        CommandKind::Pause => encode_pause(d, target.config.pause_ms, verbose),
        CommandKind::Comment | CommandKind::Rem => {
            vec![d.comment(cmd.first_param().unwrap_or(""))]
        }
        CommandKind::SafeMode => {
            let enabled = parse_on_off(cmd)?;
            return Ok((safe_mode_lines(d, enabled), state.with_safe_mode(enabled)));
        }
        CommandKind::AttackMode => return encode_attack_mode(d, cmd, state),
        CommandKind::Repeat => encode_repeat(target, cmd, state)?,
        CommandKind::DefaultDelay => {
            let ms = parse_ms(cmd, cmd.first_param(), "Default delay")?;
            let lines = vec![d.comment(&format!(
                "DEFAULT_DELAY: Set default delay to {}ms between commands",
                ms
            ))];
            return Ok((lines, state.with_default_delay(ms)));
        }
        CommandKind::RandomDelay => encode_random_delay(d, cmd)?,
        CommandKind::Log => {
            let message = required_param(cmd, "message")?;
            vec![
                d.comment(&format!("LOG: {}", message)),
                d.print(&escape_literal(&format!("Log: {}", message))),
            ]
        }
        CommandKind::Validate => {
            let condition = required_param(cmd, "condition")?;
            vec![
                d.comment(&format!("VALIDATE: Check environment condition '{}'", condition)),
                d.comment("Placeholder: the condition is not evaluated"),
                d.print(&escape_literal(&format!("Validating: {}", condition))),
            ]
        }
        CommandKind::If => {
            let condition = required_param(cmd, "condition")?;
            let mut lines = vec![d.comment(&format!(
                "IF: Conditional execution based on '{}' (placeholder, always true)",
                condition
            ))];
            lines.extend(d.placeholder_if(condition));
            lines
        }
        CommandKind::Else => vec![d.comment("ELSE: Alternative execution path (placeholder)")],
        CommandKind::EndIf => vec![d.comment("ENDIF: End conditional block")],
        CommandKind::While => {
            let condition = required_param(cmd, "condition")?;
            let mut lines = vec![d.comment(&format!(
                "WHILE: Loop execution based on '{}' (placeholder, runs once)",
                condition
            ))];
            lines.extend(d.placeholder_while(condition));
            lines
        }
        CommandKind::EndWhile => vec![d.comment("ENDWHILE: End loop block")],
        kind if kind.is_key() => {
            let symbol = vocabulary_symbol(kind, target.device, cmd)?;
            vec![
                annotated(d, verbose, d.press(symbol), &format!("Press {}", kind)),
                annotated(d, verbose, d.release(symbol), &format!("Release {}", kind)),
            ]
        }
        other => {
            log::warn!("line {}: no encoding for command '{}'", cmd.line, other);
            let mut lines = Vec::new();
            if verbose {
                lines.push(d.comment(&format!("WARNING: Unknown command '{}'", other)));
            }
            lines.push(d.no_op());
            lines
        }
    };

    Ok((lines, state))
}

fn annotated(d: &dyn Dialect, verbose: bool, statement: String, note: &str) -> String {
    if verbose {
        d.annotate(&statement, note)
    } else {
        statement
    }
}

fn required_param<'c>(cmd: &'c Command, what: &str) -> Result<&'c str> {
    cmd.first_param().ok_or_else(|| {
        KeyscriptError::encode(format!(
            "{} command missing {}: {}",
            cmd.kind, what, cmd.raw_text
        ))
    })
}

/// Parse a non-negative millisecond value.
fn parse_ms(cmd: &Command, value: Option<&str>, label: &str) -> Result<u64> {
    let raw = value.unwrap_or("None");
    let parsed = raw.trim().parse::<i64>().map_err(|_| {
        KeyscriptError::encode(format!(
            "Invalid {} value '{}' in command: {}",
            label.to_lowercase(),
            raw,
            cmd.raw_text
        ))
    })?;
    u64::try_from(parsed).map_err(|_| {
        KeyscriptError::encode(format!(
            "{} value must be non-negative in command: {}",
            label, cmd.raw_text
        ))
    })
}

fn parse_on_off(cmd: &Command) -> Result<bool> {
    let value = required_param(cmd, "ON/OFF value")?;
    match value.to_ascii_uppercase().as_str() {
        "ON" => Ok(true),
        "OFF" => Ok(false),
        _ => Err(KeyscriptError::encode(format!(
            "SAFE_MODE must be ON or OFF in command: {}",
            cmd.raw_text
        ))),
    }
}

fn encode_string(d: &dyn Dialect, cmd: &Command, verbose: bool) -> Result<Vec<String>> {
    let text = required_param(cmd, "text")?;
    let statement = d.type_text(&escape_literal(text));
    Ok(vec![annotated(d, verbose, statement, &format!("Type: {}", text))])
}

/// Press every token in order, then release in exactly reversed order.
fn encode_combo(target: &Target<'_>, cmd: &Command, verbose: bool) -> Result<Vec<String>> {
    let d = target.dialect;
    if cmd.parameters.is_empty() {
        return Err(KeyscriptError::encode(format!(
            "MODIFIER_COMBO command missing parameters: {}",
            cmd.raw_text
        )));
    }

    let keys = cmd
        .parameters
        .iter()
        .map(|token| resolve_token(token, target.device, d, cmd).map(|symbol| (token, symbol)))
        .collect::<Result<Vec<_>>>()?;

    let mut lines = Vec::with_capacity(keys.len() * 2);
    for (token, symbol) in &keys {
        lines.push(annotated(d, verbose, d.press(symbol), &format!("Press {}", token)));
    }
    for (token, symbol) in keys.iter().rev() {
        lines.push(annotated(d, verbose, d.release(symbol), &format!("Release {}", token)));
    }
    Ok(lines)
}

/// The targets cannot wait for a keypress, so a fixed wait stands in.
fn encode_pause(d: &dyn Dialect, pause_ms: u64, verbose: bool) -> Vec<String> {
    if verbose {
        vec![
            d.comment("PAUSE: Waiting for user action"),
            d.comment("The device cannot detect a keypress, so a fixed wait is used"),
            d.annotate(&d.sleep(pause_ms), &format!("Pause for {}ms", pause_ms)),
        ]
    } else {
        vec![d.sleep(pause_ms)]
    }
}

fn safe_mode_lines(d: &dyn Dialect, enabled: bool) -> Vec<String> {
    let word = if enabled { "Enabled" } else { "Disabled" };
    vec![
        d.comment(&format!("SAFE_MODE: {} safe mode restrictions", word)),
        d.safe_mode_marker(enabled),
    ]
}

fn encode_attack_mode<'s>(
    d: &dyn Dialect,
    cmd: &Command,
    state: GenerationState<'s>,
) -> Result<Step<'s>> {
    let mode = required_param(cmd, "configuration")?.to_ascii_uppercase();

    let lines = if mode.contains("HID") {
        vec![
            d.comment(&format!("ATTACKMODE: Configured for HID emulation ({})", mode)),
            d.comment("Note: This device is configured as a HID keyboard"),
            d.comment(&format!("Configuration: {}", mode)),
        ]
    } else if mode.contains("STORAGE") {
        vec![
            d.comment(&format!("ATTACKMODE: Configured for storage emulation ({})", mode)),
            d.comment("Note: This device is configured as a storage device"),
            d.comment(&format!("Configuration: {}", mode)),
        ]
    } else if mode == "ON" || mode == "OFF" {
        // Legacy alias for SAFE_MODE
        let enabled = mode == "ON";
        let word = if enabled { "Enabled" } else { "Disabled" };
        let lines = vec![
            d.comment(&format!("ATTACKMODE: {} attack mode", word)),
            d.safe_mode_marker(enabled),
        ];
        return Ok((lines, state.with_safe_mode(enabled)));
    } else {
        vec![
            d.comment(&format!("ATTACKMODE: Configured with '{}'", mode)),
            d.comment(&format!("Configuration: {}", mode)),
        ]
    };

    Ok((lines, state))
}

/// Wrap the previous command's statements in a fixed-count loop.
fn encode_repeat(
    target: &Target<'_>,
    cmd: &Command,
    state: GenerationState<'_>,
) -> Result<Vec<String>> {
    let d = target.dialect;
    let raw_count = required_param(cmd, "count")?;
    let count = raw_count.trim().parse::<i64>().map_err(|_| {
        KeyscriptError::encode(format!(
            "Invalid repeat count '{}' in command: {}",
            raw_count, cmd.raw_text
        ))
    })?;
    if count < 1 {
        return Err(KeyscriptError::encode(format!(
            "Repeat count must be at least 1 in command: {}",
            cmd.raw_text
        )));
    }

    let last = state.last_command.ok_or_else(|| {
        KeyscriptError::encode(format!(
            "No previous command to repeat in command: {}",
            cmd.raw_text
        ))
    })?;
    if last.kind == CommandKind::Repeat {
        return Err(KeyscriptError::encode(format!(
            "Cannot repeat a REPEAT command in command: {}",
            cmd.raw_text
        )));
    }

    // The repeated body does not get to change the state of the run
    let (body, _) = encode_command(target, last, state)?;
    let marker = d.comment("");
    let marker = marker.trim_end();
    let mut statements: Vec<String> = body
        .into_iter()
        .filter(|line| !line.trim_start().starts_with(marker))
        .collect();
    if statements.is_empty() {
        statements.push(d.no_op());
    }

    let mut lines = vec![
        d.comment(&format!("REPEAT: Repeating last command {} times", count)),
        d.repeat_open(count as u64),
    ];
    lines.extend(statements.into_iter().map(|s| format!("{}{}", d.indent(), s)));
    lines.extend(d.repeat_close());
    Ok(lines)
}

fn encode_random_delay(d: &dyn Dialect, cmd: &Command) -> Result<Vec<String>> {
    if cmd.parameters.len() < 2 {
        return Err(KeyscriptError::encode(format!(
            "RANDOM_DELAY command missing min/max values: {}",
            cmd.raw_text
        )));
    }
    let min_ms = parse_ms(cmd, Some(&cmd.parameters[0]), "Random delay")?;
    let max_ms = parse_ms(cmd, Some(&cmd.parameters[1]), "Random delay")?;
    if max_ms < min_ms {
        return Err(KeyscriptError::encode(format!(
            "Invalid random delay range in command: {}",
            cmd.raw_text
        )));
    }

    let mut lines = vec![d.comment(&format!(
        "RANDOM_DELAY: Random delay between {}ms and {}ms",
        min_ms, max_ms
    ))];
    lines.extend(d.random_sleep(min_ms, max_ms));
    Ok(lines)
}
