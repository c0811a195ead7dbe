use crate::hotkey::{parse_hotkey, Hotkey};
use crate::keymap::KeyRemap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PAINT_HOTKEY: &str = "Q";
pub const DEFAULT_CLOSE_HOTKEY: &str = "W";
pub const DEFAULT_PAINT_LABEL: &str = "Paint";
pub const DEFAULT_CLOSE_ICON_PATH: &str = "m256-200-56-56 224-224-224-224 56-56 224 224 224-224 56 56-224 224 224 224-56 56-224-224-224 224Z";
pub const DEFAULT_MATCH_URL: &str = "https://wplace.live/";

/// `localStorage` key holding an optional JSON override of [`Settings`].
pub const STORAGE_KEY: &str = "wplace_hotkeys.settings";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Clicks the paint button. Defaults to `Q`.
    #[serde(default = "default_paint_hotkey")]
    pub paint_hotkey: String,
    /// Clicks the close button of the paint panel. Defaults to `W`.
    #[serde(default = "default_close_hotkey")]
    pub close_hotkey: String,
    /// Physical keys replayed as other keys. Defaults to `KeyR` -> `KeyI` (colour picker).
    #[serde(default = "default_key_remap")]
    pub key_remap: BTreeMap<String, String>,
    #[serde(default = "default_paint_label")]
    pub paint_label: String,
    /// `d` attribute of the close icon's SVG path.
    #[serde(default = "default_close_icon_path")]
    pub close_icon_path: String,
    /// Page the hotkeys are installed on.
    #[serde(default = "default_match_url")]
    pub match_url: String,
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_paint_hotkey() -> String {
    DEFAULT_PAINT_HOTKEY.into()
}

fn default_close_hotkey() -> String {
    DEFAULT_CLOSE_HOTKEY.into()
}

fn default_key_remap() -> BTreeMap<String, String> {
    BTreeMap::from([("KeyR".to_string(), "KeyI".to_string())])
}

fn default_paint_label() -> String {
    DEFAULT_PAINT_LABEL.into()
}

fn default_close_icon_path() -> String {
    DEFAULT_CLOSE_ICON_PATH.into()
}

fn default_match_url() -> String {
    DEFAULT_MATCH_URL.into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paint_hotkey: default_paint_hotkey(),
            close_hotkey: default_close_hotkey(),
            key_remap: default_key_remap(),
            paint_label: default_paint_label(),
            close_icon_path: default_close_icon_path(),
            match_url: default_match_url(),
            debug_logging: false,
        }
    }
}

impl Settings {
    /// Parse a JSON override. Missing or blank input yields the defaults and missing
    /// fields keep their default values.
    pub fn load(json: Option<&str>) -> anyhow::Result<Self> {
        let content = json.unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(content)?)
    }

    /// Like [`Settings::load`] but falls back to the defaults on malformed input.
    pub fn load_or_default(json: Option<&str>) -> Self {
        Self::load(json).unwrap_or_else(|e| {
            tracing::warn!("invalid settings override: {e}; using defaults");
            Self::default()
        })
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn paint_hotkey(&self) -> Hotkey {
        match parse_hotkey(&self.paint_hotkey) {
            Some(k) => k,
            None => {
                tracing::warn!(
                    "provided paint_hotkey string '{}' is invalid; using default {}",
                    self.paint_hotkey,
                    DEFAULT_PAINT_HOTKEY
                );
                default_hotkey(DEFAULT_PAINT_HOTKEY)
            }
        }
    }

    pub fn close_hotkey(&self) -> Hotkey {
        match parse_hotkey(&self.close_hotkey) {
            Some(k) => k,
            None => {
                tracing::warn!(
                    "provided close_hotkey string '{}' is invalid; using default {}",
                    self.close_hotkey,
                    DEFAULT_CLOSE_HOTKEY
                );
                default_hotkey(DEFAULT_CLOSE_HOTKEY)
            }
        }
    }

    pub fn key_remap(&self) -> KeyRemap {
        KeyRemap::from_names(
            self.key_remap
                .iter()
                .map(|(from, to)| (from.as_str(), to.as_str())),
        )
    }

    /// Whether `href` is the configured page. Scheme, host, port, path and query must
    /// agree; the fragment is ignored.
    pub fn matches_url(&self, href: &str) -> bool {
        let (Ok(want), Ok(have)) = (url::Url::parse(&self.match_url), url::Url::parse(href))
        else {
            return false;
        };
        want.scheme() == have.scheme()
            && want.host_str() == have.host_str()
            && want.port_or_known_default() == have.port_or_known_default()
            && want.path() == have.path()
            && want.query() == have.query()
    }
}

fn default_hotkey(name: &str) -> Hotkey {
    parse_hotkey(name).unwrap_or_else(|| Hotkey::plain(name))
}
