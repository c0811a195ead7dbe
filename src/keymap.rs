use std::collections::HashMap;

use crate::event::{KeyEventKind, KeyInput, Modifiers};
use crate::hotkey::{parse_key, KeyCode};

/// Fixed mapping of physical source codes to the codes they are replayed as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRemap {
    entries: HashMap<KeyCode, KeyCode>,
}

impl KeyRemap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, from: impl Into<KeyCode>, to: impl Into<KeyCode>) -> Self {
        self.entries.insert(from.into(), to.into());
        self
    }

    /// Build a table from configured key names. Entries whose names do not resolve to
    /// a physical key are skipped.
    pub fn from_names<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut entries = HashMap::new();
        for (from, to) in pairs {
            match (parse_key(from), parse_key(to)) {
                (Some(from), Some(to)) => {
                    entries.insert(from, to);
                }
                _ => tracing::warn!("ignoring invalid key remap '{}' -> '{}'", from, to),
            }
        }
        Self { entries }
    }

    pub fn get(&self, code: &KeyCode) -> Option<&KeyCode> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replacement keyboard event to dispatch in place of a suppressed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticKey {
    pub kind: KeyEventKind,
    pub key: String,
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub repeat: bool,
    /// Value for the legacy `keyCode` and `which` properties.
    pub legacy_key_code: u32,
}

/// The `key` value a code produces: its letter in the case selected by shift, or the
/// code itself for anything that is not a letter key.
pub fn key_for_code(code: &KeyCode, shift: bool) -> String {
    match code.letter() {
        Some(c) if shift => c.to_string(),
        Some(c) => c.to_ascii_lowercase().to_string(),
        None => code.as_str().to_string(),
    }
}

/// Uppercase character code for letter keys, zero for everything else.
pub fn legacy_key_code(code: &KeyCode) -> u32 {
    code.letter().map_or(0, u32::from)
}

impl KeyRemap {
    /// Plan the synthetic events replacing `input`, or `None` when the code is not
    /// remapped. A `keydown` onto a letter key is followed by a `keypress` so that
    /// character handlers still fire.
    pub fn plan<T>(&self, input: &KeyInput<T>) -> Option<Vec<SyntheticKey>> {
        let mapped = self.get(&input.code)?;
        let kinds: &[KeyEventKind] = if input.kind == KeyEventKind::KeyDown && mapped.is_letter() {
            &[KeyEventKind::KeyDown, KeyEventKind::KeyPress]
        } else {
            std::slice::from_ref(&input.kind)
        };

        let key = key_for_code(mapped, input.modifiers.shift);
        let legacy = legacy_key_code(mapped);
        Some(
            kinds
                .iter()
                .map(|&kind| SyntheticKey {
                    kind,
                    key: key.clone(),
                    code: mapped.clone(),
                    modifiers: input.modifiers,
                    repeat: input.repeat,
                    legacy_key_code: legacy,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_follows_shift_for_letters() {
        let code = KeyCode::from("KeyI");
        assert_eq!(key_for_code(&code, false), "i");
        assert_eq!(key_for_code(&code, true), "I");
    }

    #[test]
    fn non_letter_key_is_code_string() {
        let code = KeyCode::from("Digit4");
        assert_eq!(key_for_code(&code, true), "Digit4");
        assert_eq!(legacy_key_code(&code), 0);
    }

    #[test]
    fn legacy_code_is_uppercase_char() {
        assert_eq!(legacy_key_code(&KeyCode::from("KeyI")), 73);
    }

    #[test]
    fn from_names_skips_unknown() {
        let remap = KeyRemap::from_names([("R", "I"), ("Nope", "I")]);
        assert_eq!(remap.len(), 1);
        assert_eq!(remap.get(&"KeyR".into()), Some(&KeyCode::from("KeyI")));
    }
}
