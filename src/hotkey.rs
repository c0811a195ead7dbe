use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::Modifiers;

/// Physical key identifier as reported by `KeyboardEvent.code`, e.g. `KeyQ` or `Digit1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(String);

impl KeyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The letter of a `Key?` code, always uppercase.
    pub fn letter(&self) -> Option<char> {
        let rest = self.0.strip_prefix("Key")?;
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
            _ => None,
        }
    }

    pub fn is_letter(&self) -> bool {
        self.letter().is_some()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    pub key: KeyCode,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Hotkey {
    /// A bare key with every modifier required to be released.
    pub fn plain(key: impl Into<KeyCode>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    /// Exact match: the code and each of ctrl/shift/alt must agree. Meta is not part of
    /// the descriptor and is ignored.
    pub fn matches(&self, code: &KeyCode, modifiers: Modifiers) -> bool {
        self.key == *code
            && modifiers.ctrl == self.ctrl
            && modifiers.shift == self.shift
            && modifiers.alt == self.alt
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        f.write_str(self.key.as_str())
    }
}

/// Parse a hotkey string like "Ctrl+Shift+Q" or "Alt+KeyQ" into a [`Hotkey`].
pub fn parse_hotkey(s: &str) -> Option<Hotkey> {
    let mut ctrl = false;
    let mut shift = false;
    let mut alt = false;
    let mut key: Option<KeyCode> = None;

    for part in s.split('+') {
        let trimmed = part.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "CTRL" | "CONTROL" => ctrl = true,
            "SHIFT" => shift = true,
            "ALT" => alt = true,
            "" => {}
            _ => {
                if key.is_some() {
                    return None;
                }
                key = Some(parse_key(trimmed)?);
            }
        }
    }

    key.map(|key| Hotkey {
        key,
        ctrl,
        shift,
        alt,
    })
}

/// Resolve a single key name to its physical code. Accepts short names ("Q", "5",
/// "Space", "F2") as well as codes that are already physical ("KeyQ", "Digit5").
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let upper = name.trim().to_ascii_uppercase();
    let code = match upper.as_str() {
        "SPACE" => "Space".to_string(),
        "TAB" => "Tab".to_string(),
        "ENTER" | "RETURN" => "Enter".to_string(),
        "ESC" | "ESCAPE" => "Escape".to_string(),
        "DELETE" => "Delete".to_string(),
        "BACKSPACE" => "Backspace".to_string(),
        "CAPSLOCK" => "CapsLock".to_string(),
        "HOME" => "Home".to_string(),
        "END" => "End".to_string(),
        "PAGEUP" => "PageUp".to_string(),
        "PAGEDOWN" => "PageDown".to_string(),
        "LEFT" | "LEFTARROW" | "ARROWLEFT" => "ArrowLeft".to_string(),
        "RIGHT" | "RIGHTARROW" | "ARROWRIGHT" => "ArrowRight".to_string(),
        "UP" | "UPARROW" | "ARROWUP" => "ArrowUp".to_string(),
        "DOWN" | "DOWNARROW" | "ARROWDOWN" => "ArrowDown".to_string(),
        _ if upper.len() > 1 && upper.starts_with('F') => match upper[1..].parse::<u8>() {
            Ok(n @ 1..=12) => format!("F{n}"),
            _ => return None,
        },
        _ if upper.len() == 4 && upper.starts_with("KEY") => {
            let c = upper.chars().nth(3)?;
            if !c.is_ascii_alphabetic() {
                return None;
            }
            format!("Key{c}")
        }
        _ if upper.len() == 6 && upper.starts_with("DIGIT") => {
            let c = upper.chars().nth(5)?;
            if !c.is_ascii_digit() {
                return None;
            }
            format!("Digit{c}")
        }
        _ if upper.len() == 1 => {
            let c = upper.chars().next()?;
            if c.is_ascii_alphabetic() {
                format!("Key{c}")
            } else if c.is_ascii_digit() {
                format!("Digit{c}")
            } else {
                return None;
            }
        }
        _ => return None,
    };
    Some(KeyCode(code))
}
