pub mod click;
pub mod event;
pub mod hotkey;
pub mod interceptor;
pub mod keymap;
pub mod locator;
pub mod logging;
pub mod page;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use interceptor::{Interceptor, Outcome};
pub use settings::Settings;
