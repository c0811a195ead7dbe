//! The slice of the DOM the interceptor needs. The browser build implements these
//! traits over `web-sys`; tests implement them over an in-memory tree.

use crate::click::PointerInit;
use crate::keymap::SyntheticKey;

/// Rendered bounding box in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build from two corners, `(x1, y1)` top-left and `(x2, y2)` bottom-right.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Computed style values relevant to visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub visibility: String,
    pub display: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            visibility: "visible".into(),
            display: "block".into(),
        }
    }
}

pub trait Element: Clone + PartialEq {
    fn bounding_rect(&self) -> Rect;
    fn computed_style(&self) -> ComputedStyle;
    fn text_content(&self) -> Option<String>;
    /// Nearest inclusive ancestor matching `selectors`.
    fn closest(&self, selectors: &str) -> Option<Self>;
    fn is_disabled(&self) -> bool;
    fn dispatch_pointer(&self, init: &PointerInit);
    /// Native `click()`.
    fn click(&self);
}

pub trait Page {
    type Element: Element;
    /// Anything keyboard events can be dispatched to: elements, the document, the window.
    type Target: Clone + PartialEq;

    fn query_selector(&self, selectors: &str) -> Option<Self::Element>;
    /// Matches in document order.
    fn query_selector_all(&self, selectors: &str) -> Vec<Self::Element>;

    fn active_element(&self) -> Option<Self::Target>;
    fn document_target(&self) -> Self::Target;
    fn window_target(&self) -> Self::Target;

    /// Dispatch one event built from `event` to each target in turn.
    fn dispatch_key(&self, targets: &[Self::Target], event: &SyntheticKey);
}
