//! Browser bindings: `web-sys` implementations of [`Page`] and [`Element`] plus the
//! capture-phase listeners installed at module start.

use std::rc::Rc;

use anyhow::{anyhow, Context};
use once_cell::unsync::OnceCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, EventTarget, HtmlElement, KeyboardEvent,
    KeyboardEventInit, MouseEvent, MouseEventInit, PointerEvent, PointerEventInit, Window,
};

use crate::click::{PointerInit, POINTER_TYPE, PRIMARY_POINTER_ID};
use crate::event::{is_typing_target, KeyEventKind, KeyInput, Modifiers};
use crate::hotkey::KeyCode;
use crate::interceptor::{Interceptor, Outcome};
use crate::keymap::SyntheticKey;
use crate::logging;
use crate::page::{ComputedStyle, Element, Page, Rect};
use crate::settings::{Settings, STORAGE_KEY};

thread_local! {
    static INSTALLED: OnceCell<Rc<Interceptor>> = const { OnceCell::new() };
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    fn window(&self) -> Option<Window> {
        self.0.owner_document()?.default_view()
    }
}

impl Element for WebElement {
    fn bounding_rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn computed_style(&self) -> ComputedStyle {
        let Some(style) = self
            .window()
            .and_then(|w| w.get_computed_style(&self.0).ok().flatten())
        else {
            return ComputedStyle::default();
        };
        ComputedStyle {
            visibility: style.get_property_value("visibility").unwrap_or_default(),
            display: style.get_property_value("display").unwrap_or_default(),
        }
    }

    fn text_content(&self) -> Option<String> {
        self.0.text_content()
    }

    fn closest(&self, selectors: &str) -> Option<Self> {
        self.0.closest(selectors).ok().flatten().map(WebElement)
    }

    fn is_disabled(&self) -> bool {
        js_sys::Reflect::get(&self.0, &JsValue::from_str("disabled"))
            .map(|v| v.is_truthy())
            .unwrap_or(false)
    }

    fn dispatch_pointer(&self, init: &PointerInit) {
        let view = self.window();
        let event: Result<web_sys::Event, JsValue> = if init.kind.is_pointer_event() {
            let dict = PointerEventInit::new();
            dict.set_bubbles(init.bubbles);
            dict.set_cancelable(init.cancelable);
            dict.set_view(view.as_ref());
            set_client_point(&dict, init);
            dict.set_buttons(init.buttons);
            dict.set_pointer_id(PRIMARY_POINTER_ID);
            dict.set_is_primary(true);
            dict.set_pointer_type(POINTER_TYPE);
            PointerEvent::new_with_event_init_dict(init.kind.event_type(), &dict).map(Into::into)
        } else {
            let dict = MouseEventInit::new();
            dict.set_bubbles(init.bubbles);
            dict.set_cancelable(init.cancelable);
            dict.set_view(view.as_ref());
            set_client_point(&dict, init);
            dict.set_buttons(init.buttons);
            MouseEvent::new_with_mouse_event_init_dict(init.kind.event_type(), &dict).map(Into::into)
        };

        match event {
            Ok(event) => {
                if let Err(e) = self.0.dispatch_event(&event) {
                    tracing::debug!("{} dispatch failed: {:?}", init.kind.event_type(), e);
                }
            }
            Err(e) => tracing::debug!("could not build {}: {:?}", init.kind.event_type(), e),
        }
    }

    fn click(&self) {
        match self.0.dyn_ref::<HtmlElement>() {
            Some(el) => el.click(),
            None => tracing::debug!("click target is not an HTML element"),
        }
    }
}

impl From<web_sys::Element> for WebElement {
    fn from(el: web_sys::Element) -> Self {
        Self(el)
    }
}

/// `clientX`/`clientY` are doubles in the DOM but `i32` in the generated setters, so
/// they are written directly to keep a fractional centre.
fn set_client_point(dict: &JsValue, init: &PointerInit) {
    for (name, value) in [("clientX", init.client_x), ("clientY", init.client_y)] {
        if let Err(e) = js_sys::Reflect::set(dict, &name.into(), &value.into()) {
            tracing::debug!("setting {} failed: {:?}", name, e);
        }
    }
}

pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new(window: Window) -> anyhow::Result<Self> {
        let document = window.document().context("window has no document")?;
        Ok(Self { window, document })
    }
}

impl Page for WebPage {
    type Element = WebElement;
    type Target = EventTarget;

    fn query_selector(&self, selectors: &str) -> Option<WebElement> {
        self.document
            .query_selector(selectors)
            .ok()
            .flatten()
            .map(WebElement)
    }

    fn query_selector_all(&self, selectors: &str) -> Vec<WebElement> {
        let Ok(list) = self.document.query_selector_all(selectors) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect()
    }

    fn active_element(&self) -> Option<EventTarget> {
        self.document.active_element().map(|el| el.unchecked_into())
    }

    fn document_target(&self) -> EventTarget {
        self.document.clone().unchecked_into()
    }

    fn window_target(&self) -> EventTarget {
        self.window.clone().unchecked_into()
    }

    fn dispatch_key(&self, targets: &[EventTarget], event: &SyntheticKey) {
        let dict = KeyboardEventInit::new();
        dict.set_key(&event.key);
        dict.set_code(event.code.as_str());
        dict.set_location(0);
        dict.set_ctrl_key(event.modifiers.ctrl);
        dict.set_alt_key(event.modifiers.alt);
        dict.set_shift_key(event.modifiers.shift);
        dict.set_meta_key(event.modifiers.meta);
        dict.set_repeat(event.repeat);
        dict.set_bubbles(true);
        dict.set_cancelable(true);
        dict.set_composed(true);

        let ev = match KeyboardEvent::new_with_keyboard_event_init_dict(event.kind.as_str(), &dict) {
            Ok(ev) => ev,
            Err(e) => {
                tracing::debug!("could not build {}: {:?}", event.kind, e);
                return;
            }
        };

        let legacy = JsValue::from(event.legacy_key_code);
        override_property(&ev, "keyCode", &legacy);
        override_property(&ev, "which", &legacy);
        override_property(&ev, "isTrusted", &JsValue::FALSE);

        for target in targets {
            if let Err(e) = target.dispatch_event(&ev) {
                tracing::debug!("{} dispatch failed: {:?}", event.kind, e);
            }
        }
    }
}

/// Shadow a read-only event property with an own value. Browsers refuse this for
/// unforgeable properties such as `isTrusted`; that is logged and otherwise ignored.
fn override_property(event: &KeyboardEvent, name: &str, value: &JsValue) {
    let descriptor = js_sys::Object::new();
    let defined = js_sys::Reflect::set(&descriptor, &"value".into(), value)
        .and_then(|_| js_sys::Reflect::set(&descriptor, &"configurable".into(), &JsValue::TRUE))
        .and_then(|_| js_sys::Reflect::define_property(event, &name.into(), &descriptor));
    match defined {
        Ok(true) => {}
        Ok(false) => tracing::debug!("property '{}' could not be overridden", name),
        Err(e) => tracing::debug!("overriding '{}' failed: {:?}", name, e),
    }
}

/// Snapshot a browser keyboard event for the handlers.
pub fn key_input(event: &KeyboardEvent, kind: KeyEventKind) -> KeyInput<EventTarget> {
    let target = event.target();
    let typing_target = target
        .as_ref()
        .and_then(|t| t.dyn_ref::<web_sys::Element>())
        .is_some_and(|el| {
            let editable = el
                .dyn_ref::<HtmlElement>()
                .is_some_and(HtmlElement::is_content_editable);
            is_typing_target(&el.tag_name(), editable)
        });
    KeyInput {
        kind,
        code: KeyCode::new(event.code()),
        modifiers: Modifiers {
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            shift: event.shift_key(),
            meta: event.meta_key(),
        },
        repeat: event.repeat(),
        trusted: event.is_trusted(),
        composing: event.is_composing(),
        typing_target,
        target,
    }
}

fn js_error(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn listen<F>(window: &Window, kind: KeyEventKind, handler: F) -> anyhow::Result<()>
where
    F: Fn(&WebPage, &KeyInput<EventTarget>) -> Outcome + 'static,
{
    let page = WebPage::new(window.clone())?;
    // Re-entered by the synthetic events the handler dispatches, so it must be `Fn`.
    let closure = Closure::<dyn Fn(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let input = key_input(&event, kind);
        if handler(&page, &input).is_suppressed() {
            event.prevent_default();
            event.stop_propagation();
            event.stop_immediate_propagation();
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_capture(true);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind.as_str(),
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_error)
        .with_context(|| format!("adding {kind} listener"))?;
    closure.forget();
    Ok(())
}

/// Register the remapper on every key event type, then the paint and close hotkeys.
/// Only the first call installs anything.
pub fn install_on(window: &Window, settings: &Settings) -> anyhow::Result<()> {
    if INSTALLED.with(|cell| cell.get().is_some()) {
        tracing::debug!("hotkeys already installed");
        return Ok(());
    }
    let interceptor = Rc::new(Interceptor::from_settings(settings));

    for kind in KeyEventKind::ALL {
        let it = interceptor.clone();
        listen(window, kind, move |page, input| it.handle_remap(page, input))?;
    }
    let it = interceptor.clone();
    listen(window, KeyEventKind::KeyDown, move |page, input| it.handle_paint(page, input))?;
    let it = interceptor.clone();
    listen(window, KeyEventKind::KeyDown, move |page, input| it.handle_close(page, input))?;

    INSTALLED.with(|cell| {
        let _ = cell.set(interceptor);
    });
    tracing::debug!(
        paint = %settings.paint_hotkey,
        close = %settings.close_hotkey,
        "hotkeys installed"
    );
    Ok(())
}

fn stored_settings(window: &Window) -> Option<String> {
    window
        .local_storage()
        .ok()
        .flatten()?
        .get_item(STORAGE_KEY)
        .ok()
        .flatten()
}

fn load_settings(window: &Window) -> Settings {
    let loaded = Settings::load(stored_settings(window).as_deref());
    logging::init(loaded.as_ref().is_ok_and(|s| s.debug_logging));
    loaded.unwrap_or_else(|e| {
        tracing::warn!("invalid settings in localStorage['{}']: {e}; using defaults", STORAGE_KEY);
        Settings::default()
    })
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let settings = load_settings(&window);

    let href = window.location().href().unwrap_or_default();
    if !settings.matches_url(&href) {
        tracing::debug!("{} is not {}; hotkeys not installed", href, settings.match_url);
        return;
    }
    if let Err(e) = install_on(&window, &settings) {
        tracing::warn!("failed to install hotkeys: {e:#}");
    }
}

/// Install the hotkeys on the current page regardless of its URL.
#[wasm_bindgen]
pub fn install() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let settings = load_settings(&window);
    install_on(&window, &settings).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}
