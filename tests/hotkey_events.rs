
use fake_page::{FakePage, Recorded, Target};
use wplace_hotkeys::click::PointerKind;
use wplace_hotkeys::event::{KeyEventKind, KeyInput, Modifiers};
use wplace_hotkeys::page::Rect;
use wplace_hotkeys::settings::DEFAULT_CLOSE_ICON_PATH;
use wplace_hotkeys::{Interceptor, Outcome, Settings};

fn keydown(code: &str) -> KeyInput<Target> {
    KeyInput::trusted(KeyEventKind::KeyDown, code, Modifiers::NONE)
}

fn page_with_buttons() -> (FakePage, usize, usize) {
    let page = FakePage::new();
    let paint = page
        .element("button")
        .text("Paint")
        .rect(Rect::from_corners(100.0, 50.0, 140.0, 70.0))
        .build();
    let close = page.element("button").rect(Rect::new(0.0, 0.0, 24.0, 24.0)).build();
    let svg = page.element("svg").child_of(close).build();
    page.element("path")
        .attr("d", DEFAULT_CLOSE_ICON_PATH)
        .child_of(svg)
        .build();
    (page, paint, close)
}

#[test]
fn paint_hotkey_clicks_paint_button() {
    let (page, paint, _) = page_with_buttons();
    let it = Interceptor::default();

    assert_eq!(it.handle_paint(&page, &keydown("KeyQ")), Outcome::Suppressed);
    assert_eq!(page.clicks(), [paint]);
    assert!(page.pointer_events().iter().all(|(node, _)| *node == paint));
}

#[test]
fn close_hotkey_clicks_close_button() {
    let (page, _, close) = page_with_buttons();
    let it = Interceptor::default();

    assert_eq!(it.handle_close(&page, &keydown("KeyW")), Outcome::Suppressed);
    assert_eq!(page.clicks(), [close]);
}

#[test]
fn full_click_sequence_in_order() {
    let (page, paint, _) = page_with_buttons();
    Interceptor::default().handle_paint(&page, &keydown("KeyQ"));

    let steps: Vec<&str> = page
        .recorded()
        .into_iter()
        .map(|r| match r {
            Recorded::Pointer { init, .. } => init.kind.event_type(),
            Recorded::Click(id) => {
                assert_eq!(id, paint);
                "click"
            }
            Recorded::Key { .. } => "key",
        })
        .collect();
    assert_eq!(steps, ["pointerdown", "mousedown", "mouseup", "click", "pointerup"]);

    let buttons: Vec<_> = page
        .pointer_events()
        .into_iter()
        .map(|(_, init)| (init.kind, init.buttons))
        .collect();
    assert_eq!(
        buttons,
        [
            (PointerKind::PointerDown, 1),
            (PointerKind::MouseDown, 1),
            (PointerKind::MouseUp, 0),
            (PointerKind::PointerUp, 0),
        ]
    );
}

#[test]
fn click_uses_element_center() {
    let (page, _, _) = page_with_buttons();
    Interceptor::default().handle_paint(&page, &keydown("KeyQ"));

    let events = page.pointer_events();
    assert_eq!(events.len(), 4);
    for (_, init) in events {
        assert_eq!((init.client_x, init.client_y), (120.0, 60.0));
        assert!(init.bubbles && init.cancelable);
    }
}

#[test]
fn missing_close_button_still_suppresses() {
    let page = FakePage::new();
    page.element("button").text("Paint").build();

    let outcome = Interceptor::default().handle_close(&page, &keydown("KeyW"));
    assert_eq!(outcome, Outcome::Suppressed);
    assert!(page.recorded().is_empty());
}

#[test]
fn missing_paint_button_still_suppresses() {
    let page = FakePage::new();
    page.element("button").text("Paint").hidden().build();

    let outcome = Interceptor::default().handle_paint(&page, &keydown("KeyQ"));
    assert!(outcome.is_suppressed());
    assert!(page.clicks().is_empty());
}

#[test]
fn hotkeys_require_exact_modifiers() {
    let (page, _, _) = page_with_buttons();
    let it = Interceptor::default();

    for mods in [
        Modifiers::shift(),
        Modifiers { ctrl: true, ..Modifiers::NONE },
        Modifiers { alt: true, ..Modifiers::NONE },
    ] {
        let paint = KeyInput::trusted(KeyEventKind::KeyDown, "KeyQ", mods);
        let close = KeyInput::trusted(KeyEventKind::KeyDown, "KeyW", mods);
        assert_eq!(it.handle_paint(&page, &paint), Outcome::Ignored);
        assert_eq!(it.handle_close(&page, &close), Outcome::Ignored);
    }
    assert!(page.recorded().is_empty());
}

#[test]
fn typing_and_untrusted_events_never_act() {
    let (page, _, _) = page_with_buttons();
    let it = Interceptor::default();

    let mut typing = keydown("KeyQ");
    typing.typing_target = true;
    let mut untrusted = keydown("KeyW");
    untrusted.trusted = false;

    assert_eq!(it.handle(&page, &typing), Outcome::Ignored);
    assert_eq!(it.handle(&page, &untrusted), Outcome::Ignored);
    assert!(page.recorded().is_empty());
}

#[test]
fn hotkeys_only_fire_on_keydown() {
    let (page, _, _) = page_with_buttons();
    let up = KeyInput::trusted(KeyEventKind::KeyUp, "KeyQ", Modifiers::NONE);
    assert_eq!(Interceptor::default().handle(&page, &up), Outcome::Ignored);
    assert!(page.clicks().is_empty());
}

#[test]
fn each_hotkey_only_clicks_its_own_button() {
    let (page, paint, close) = page_with_buttons();
    let it = Interceptor::default();

    it.handle(&page, &keydown("KeyQ"));
    assert_eq!(page.clicks(), [paint]);
    page.clear();

    it.handle(&page, &keydown("KeyW"));
    assert_eq!(page.clicks(), [close]);
}

#[test]
fn configured_hotkeys_replace_defaults() {
    let (page, paint, _) = page_with_buttons();
    let settings = Settings {
        paint_hotkey: "Shift+P".into(),
        ..Settings::default()
    };
    let it = Interceptor::from_settings(&settings);

    assert_eq!(it.handle_paint(&page, &keydown("KeyQ")), Outcome::Ignored);
    let shifted = KeyInput::trusted(KeyEventKind::KeyDown, "KeyP", Modifiers::shift());
    assert!(it.handle_paint(&page, &shifted).is_suppressed());
    assert_eq!(page.clicks(), [paint]);
}
