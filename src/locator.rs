use once_cell::sync::Lazy;
use regex::Regex;

use crate::page::{Element, Page};

/// Elements that behave as buttons.
pub const CLICKABLE_SELECTOR: &str = "button,[role=\"button\"]";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse whitespace runs to one space and trim.
pub fn normalize_text(text: Option<&str>) -> String {
    WHITESPACE
        .replace_all(text.unwrap_or_default(), " ")
        .trim()
        .to_string()
}

/// Rendered with a non-zero box and not hidden through `visibility` or `display`.
pub fn is_visible<E: Element>(el: &E) -> bool {
    let style = el.computed_style();
    el.bounding_rect().has_area() && style.visibility != "hidden" && style.display != "none"
}

/// First visible button, in document order, whose text contains `label`.
pub fn find_paint_button<P: Page>(page: &P, label: &str) -> Option<P::Element> {
    page.query_selector_all(CLICKABLE_SELECTOR)
        .into_iter()
        .find(|el| is_visible(el) && normalize_text(el.text_content().as_deref()).contains(label))
}

/// The visible, enabled button wrapping the SVG path whose `d` equals `path_d`.
pub fn find_close_button<P: Page>(page: &P, path_d: &str) -> Option<P::Element> {
    let path = page.query_selector(&icon_path_selector(path_d))?;
    let button = path.closest(CLICKABLE_SELECTOR)?;
    if !is_visible(&button) || button.is_disabled() {
        tracing::trace!("close button present but hidden or disabled");
        return None;
    }
    Some(button)
}

/// `svg path[d="..."]` with the value quoted as a CSS string.
pub fn icon_path_selector(path_d: &str) -> String {
    let mut escaped = String::with_capacity(path_d.len());
    for c in path_d.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("svg path[d=\"{escaped}\"]")
}
