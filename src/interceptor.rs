use crate::click::click_at_center;
use crate::event::{KeyEventKind, KeyInput};
use crate::hotkey::Hotkey;
use crate::keymap::KeyRemap;
use crate::locator::{find_close_button, find_paint_button};
use crate::page::Page;
use crate::settings::Settings;

/// What the caller must do with the original event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Let the event continue untouched.
    Ignored,
    /// Cancel the default action and stop all further propagation.
    Suppressed,
}

impl Outcome {
    pub fn is_suppressed(self) -> bool {
        self == Outcome::Suppressed
    }
}

/// Which button a hotkey clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    Paint,
    Close,
}

/// Read-only configuration shared by the capture-phase listeners.
#[derive(Debug, Clone)]
pub struct Interceptor {
    pub remap: KeyRemap,
    pub paint_hotkey: Hotkey,
    pub close_hotkey: Hotkey,
    pub paint_label: String,
    pub close_icon_path: String,
}

impl Default for Interceptor {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Interceptor {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            remap: settings.key_remap(),
            paint_hotkey: settings.paint_hotkey(),
            close_hotkey: settings.close_hotkey(),
            paint_label: settings.paint_label.clone(),
            close_icon_path: settings.close_icon_path.clone(),
        }
    }

    /// Replay a remapped key as its destination. Listens on keydown, keypress and keyup.
    pub fn handle_remap<P: Page>(&self, page: &P, input: &KeyInput<P::Target>) -> Outcome {
        if !input.trusted || input.composing || input.typing_target {
            return Outcome::Ignored;
        }
        let Some(events) = self.remap.plan(input) else {
            return Outcome::Ignored;
        };

        let targets = key_targets(page, input.target.as_ref());
        for event in &events {
            tracing::trace!(kind = %event.kind, from = %input.code, to = %event.code, "remapped key");
            page.dispatch_key(&targets, event);
        }
        Outcome::Suppressed
    }

    /// Click the paint or close button when `input` is exactly that hotkey.
    pub fn handle_hotkey<P: Page>(
        &self,
        action: HotkeyAction,
        page: &P,
        input: &KeyInput<P::Target>,
    ) -> Outcome {
        if input.kind != KeyEventKind::KeyDown || !input.trusted || input.typing_target {
            return Outcome::Ignored;
        }
        let hotkey = match action {
            HotkeyAction::Paint => &self.paint_hotkey,
            HotkeyAction::Close => &self.close_hotkey,
        };
        if !hotkey.matches(&input.code, input.modifiers) {
            return Outcome::Ignored;
        }

        let button = match action {
            HotkeyAction::Paint => find_paint_button(page, &self.paint_label),
            HotkeyAction::Close => find_close_button(page, &self.close_icon_path),
        };
        match button {
            Some(button) => click_at_center(&button),
            None => tracing::debug!(?action, "hotkey pressed but no button found"),
        }
        Outcome::Suppressed
    }

    pub fn handle_paint<P: Page>(&self, page: &P, input: &KeyInput<P::Target>) -> Outcome {
        self.handle_hotkey(HotkeyAction::Paint, page, input)
    }

    pub fn handle_close<P: Page>(&self, page: &P, input: &KeyInput<P::Target>) -> Outcome {
        self.handle_hotkey(HotkeyAction::Close, page, input)
    }

    /// Run the listeners in registration order, stopping at the first that suppresses
    /// the event, as immediate-propagation stopping would.
    pub fn handle<P: Page>(&self, page: &P, input: &KeyInput<P::Target>) -> Outcome {
        let outcome = self.handle_remap(page, input);
        if outcome.is_suppressed() || input.kind != KeyEventKind::KeyDown {
            return outcome;
        }
        let outcome = self.handle_paint(page, input);
        if outcome.is_suppressed() {
            return outcome;
        }
        self.handle_close(page, input)
    }
}

/// Original target, focused element, document and window, without repeats.
pub fn key_targets<P: Page>(page: &P, original: Option<&P::Target>) -> Vec<P::Target> {
    let candidates = [
        original.cloned(),
        page.active_element(),
        Some(page.document_target()),
        Some(page.window_target()),
    ];
    let mut targets: Vec<P::Target> = Vec::with_capacity(candidates.len());
    for target in candidates.into_iter().flatten() {
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    targets
}
