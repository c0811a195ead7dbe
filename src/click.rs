use crate::page::{Element, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    PointerDown,
    MouseDown,
    MouseUp,
    PointerUp,
}

impl PointerKind {
    pub fn event_type(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::PointerUp => "pointerup",
        }
    }

    /// Pointer events carry `pointerId`, `isPrimary` and `pointerType`; mouse events don't.
    pub fn is_pointer_event(self) -> bool {
        matches!(self, Self::PointerDown | Self::PointerUp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInit {
    pub kind: PointerKind,
    pub client_x: f64,
    pub client_y: f64,
    /// Bitmask of held buttons; 1 is the primary button.
    pub buttons: u16,
    pub bubbles: bool,
    pub cancelable: bool,
}

pub const PRIMARY_POINTER_ID: i32 = 1;
pub const POINTER_TYPE: &str = "mouse";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickStep {
    Dispatch(PointerInit),
    Click,
}

/// The events a real mouse click at the centre of `rect` produces, in order.
pub fn click_sequence(rect: Rect) -> [ClickStep; 5] {
    let (client_x, client_y) = rect.center();
    let init = |kind, buttons| {
        ClickStep::Dispatch(PointerInit {
            kind,
            client_x,
            client_y,
            buttons,
            bubbles: true,
            cancelable: true,
        })
    };
    [
        init(PointerKind::PointerDown, 1),
        init(PointerKind::MouseDown, 1),
        init(PointerKind::MouseUp, 0),
        ClickStep::Click,
        init(PointerKind::PointerUp, 0),
    ]
}

pub fn click_at_center<E: Element>(el: &E) {
    let rect = el.bounding_rect();
    tracing::debug!(x = rect.center().0, y = rect.center().1, "synthetic click");
    for step in click_sequence(rect) {
        match step {
            ClickStep::Dispatch(init) => el.dispatch_pointer(&init),
            ClickStep::Click => el.click(),
        }
    }
}
