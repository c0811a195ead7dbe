use std::fmt;
use std::str::FromStr;

use crate::hotkey::KeyCode;

/// Keyboard event types the interceptor listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    KeyDown,
    KeyPress,
    KeyUp,
}

impl KeyEventKind {
    pub const ALL: [KeyEventKind; 3] = [Self::KeyDown, Self::KeyPress, Self::KeyUp];

    /// DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
            Self::KeyPress => "keypress",
            Self::KeyUp => "keyup",
        }
    }
}

impl fmt::Display for KeyEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyEventKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keydown" => Ok(Self::KeyDown),
            "keypress" => Ok(Self::KeyPress),
            "keyup" => Ok(Self::KeyUp),
            other => anyhow::bail!("not a keyboard event type: '{other}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }
}

/// Snapshot of a browser keyboard event, taken before any handler decides on it.
///
/// `T` is the event target handle of the page implementation.
#[derive(Debug, Clone)]
pub struct KeyInput<T> {
    pub kind: KeyEventKind,
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub repeat: bool,
    pub trusted: bool,
    pub composing: bool,
    /// Whether the target is a text field the user is typing into.
    pub typing_target: bool,
    pub target: Option<T>,
}

impl<T> KeyInput<T> {
    /// A trusted, non-repeating event with no target.
    pub fn trusted(kind: KeyEventKind, code: impl Into<KeyCode>, modifiers: Modifiers) -> Self {
        Self {
            kind,
            code: code.into(),
            modifiers,
            repeat: false,
            trusted: true,
            composing: false,
            typing_target: false,
            target: None,
        }
    }

    pub fn with_target(mut self, target: T) -> Self {
        self.target = Some(target);
        self
    }
}

/// `INPUT`, `TEXTAREA` and content-editable elements receive keys as text.
pub fn is_typing_target(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || tag_name.eq_ignore_ascii_case("input")
        || tag_name.eq_ignore_ascii_case("textarea")
}
