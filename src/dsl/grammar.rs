//! Ordered rule list for the script language.
//!
//! Rules are tried in sequence against a trimmed line and the first rule that
//! accepts the whole line wins. The order matters: the modifier-combo rule
//! must come before the single-key rule so that `MOD r` is not taken for a
//! bare `MOD` followed by garbage.

use super::ast::CommandKind;

/// Result of a rule accepting a line.
pub type RuleMatch = (CommandKind, Vec<String>);

/// A grammar rule: a predicate that also builds the parameters.
pub struct Rule {
    /// Short name used in debug logs
    pub name: &'static str,
    /// Returns the command kind and parameters if the line matches
    pub apply: fn(&str) -> Option<RuleMatch>,
}

/// The grammar, in precedence order.
pub static GRAMMAR: &[Rule] = &[
    Rule {
        name: "modifier-combo",
        apply: modifier_combo,
    },
    Rule {
        name: "delay",
        apply: delay,
    },
    Rule {
        name: "string",
        apply: string,
    },
    Rule {
        name: "key",
        apply: key,
    },
    Rule {
        name: "safe-mode",
        apply: safe_mode,
    },
    Rule {
        name: "attackmode",
        apply: attack_mode,
    },
    Rule {
        name: "comment",
        apply: comment,
    },
    Rule {
        name: "rem",
        apply: rem,
    },
];

/// Find the first rule accepting `line`.
pub fn match_line(line: &str) -> Option<(&'static Rule, RuleMatch)> {
    GRAMMAR
        .iter()
        .find_map(|rule| (rule.apply)(line).map(|m| (rule, m)))
}

/// Strip a case-insensitive keyword from the start of `line`.
///
/// Returns the remainder with leading whitespace removed. The keyword must be
/// followed by whitespace or the end of the line.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &line[keyword.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(ch) if ch.is_whitespace() => Some(rest.trim_start()),
        Some(_) => None,
    }
}

/// Like [`strip_keyword`] but requires a non-empty argument.
fn keyword_with_argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    strip_keyword(line, keyword).filter(|rest| !rest.is_empty())
}

fn is_combo_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| ch.is_ascii_alphanumeric())
}

/// `<MOD|CTRL|SHIFT|ALT> <token>+`; the parameters are all tokens of the line.
fn modifier_combo(line: &str) -> Option<RuleMatch> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    CommandKind::modifier_from_keyword(tokens[0])?;
    if !tokens[1..].iter().all(|t| is_combo_token(t)) {
        return None;
    }
    Some((
        CommandKind::ModifierCombo,
        tokens.into_iter().map(str::to_string).collect(),
    ))
}

/// `DELAY <value>`; the value is kept verbatim and checked at encode time.
fn delay(line: &str) -> Option<RuleMatch> {
    let value = keyword_with_argument(line, "DELAY")?;
    Some((CommandKind::Delay, vec![value.to_string()]))
}

/// `STRING [text]`; a bare `STRING` types nothing.
fn string(line: &str) -> Option<RuleMatch> {
    let text = strip_keyword(line, "STRING")?;
    Some((CommandKind::String, vec![text.to_string()]))
}

/// Single-token keys, bare modifiers and `PAUSE`.
fn key(line: &str) -> Option<RuleMatch> {
    let kind = CommandKind::key_from_keyword(line)?;
    Some((kind, Vec::new()))
}

/// `SAFE_MODE ON|OFF`
fn safe_mode(line: &str) -> Option<RuleMatch> {
    let value = keyword_with_argument(line, "SAFE_MODE")?;
    if value.eq_ignore_ascii_case("ON") || value.eq_ignore_ascii_case("OFF") {
        Some((CommandKind::SafeMode, vec![value.to_string()]))
    } else {
        None
    }
}

/// `ATTACKMODE HID|STORAGE|HID STORAGE|ON|OFF`
fn attack_mode(line: &str) -> Option<RuleMatch> {
    let mode = keyword_with_argument(line, "ATTACKMODE")?;
    let words: Vec<String> = mode
        .split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect();
    let accepted = match words.as_slice() {
        [single] => matches!(single.as_str(), "HID" | "STORAGE" | "ON" | "OFF"),
        [first, second] => first == "HID" && second == "STORAGE",
        _ => false,
    };
    if accepted {
        Some((CommandKind::AttackMode, vec![mode.to_string()]))
    } else {
        None
    }
}

/// `#text`; everything after the marker, leading space included.
fn comment(line: &str) -> Option<RuleMatch> {
    let text = line.strip_prefix('#')?;
    Some((CommandKind::Comment, vec![text.to_string()]))
}

/// `REM [text]`
fn rem(line: &str) -> Option<RuleMatch> {
    let text = strip_keyword(line, "REM")?;
    Some((CommandKind::Rem, vec![text.to_string()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(line: &str) -> Option<CommandKind> {
        match_line(line).map(|(_, (kind, _))| kind)
    }

    #[test]
    fn test_combo_before_bare_modifier() {
        let (rule, (kind, params)) = match_line("MOD r").unwrap();
        assert_eq!(rule.name, "modifier-combo");
        assert_eq!(kind, CommandKind::ModifierCombo);
        assert_eq!(params, vec!["MOD", "r"]);

        assert_eq!(kind_of("MOD"), Some(CommandKind::Mod));
        assert_eq!(kind_of("ctrl"), Some(CommandKind::Ctrl));
    }

    #[test]
    fn test_combo_tokens() {
        let (_, (_, params)) = match_line("CTRL  ALT   DEL").unwrap();
        assert_eq!(params, vec!["CTRL", "ALT", "DEL"]);
        // First token must be a modifier
        assert_eq!(kind_of("R CTRL"), None);
        // Punctuation is not a combo key
        assert_eq!(kind_of("CTRL ;"), None);
    }

    #[test]
    fn test_delay_keeps_raw_value() {
        let (_, (kind, params)) = match_line("delay   abc").unwrap();
        assert_eq!(kind, CommandKind::Delay);
        assert_eq!(params, vec!["abc"]);
        assert_eq!(kind_of("DELAY"), None);
        assert_eq!(kind_of("DELAYED 5"), None);
    }

    #[test]
    fn test_string_preserves_internal_whitespace() {
        let (_, (_, params)) = match_line("STRING   a  \"b\"  # c").unwrap();
        assert_eq!(params, vec!["a  \"b\"  # c"]);

        let (_, (kind, params)) = match_line("STRING").unwrap();
        assert_eq!(kind, CommandKind::String);
        assert_eq!(params, vec![""]);
    }

    #[test]
    fn test_safe_mode() {
        let (_, (kind, params)) = match_line("SAFE_MODE off").unwrap();
        assert_eq!(kind, CommandKind::SafeMode);
        assert_eq!(params, vec!["off"]);
        assert_eq!(kind_of("SAFE_MODE MAYBE"), None);
    }

    #[test]
    fn test_attack_mode_two_words() {
        let (_, (kind, params)) = match_line("ATTACKMODE HID STORAGE").unwrap();
        assert_eq!(kind, CommandKind::AttackMode);
        assert_eq!(params, vec!["HID STORAGE"]);
        assert_eq!(kind_of("ATTACKMODE SERIAL"), None);
    }

    #[test]
    fn test_comments() {
        let (_, (kind, params)) = match_line("# hello").unwrap();
        assert_eq!(kind, CommandKind::Comment);
        assert_eq!(params, vec![" hello"]);

        let (_, (kind, params)) = match_line("REM").unwrap();
        assert_eq!(kind, CommandKind::Rem);
        assert_eq!(params, vec![""]);

        let (_, (_, params)) = match_line("rem note to self").unwrap();
        assert_eq!(params, vec!["note to self"]);
        assert_eq!(kind_of("REMARK"), None);
    }

    #[test]
    fn test_unknown_line() {
        assert!(match_line("FOO BAR").is_none());
        assert!(match_line("F13").is_none());
    }
}
