use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use scroll_crossfade_core::Settings;

mod dom;
mod lifecycle;
mod logger;

pub use dom::{CONTAINER_SELECTOR, PRELOADER_HIDDEN_CLASS};

/// Selector `init_all` uses when none is given.
pub const WRAPPER_SELECTOR: &str = ".scg-scroll-crossfade-gallery-wrapper";

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn setup() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Warn);
}

/// Initialize one gallery under `root` (the widget wrapper or the gallery
/// container itself). `settings` is an optional object such as
/// `{ endPoint: 0.3, scrollSmoothing: "light" }`; when undefined/null the
/// container's `data-*` attributes are used.
///
/// Returns `false` when `root` holds no gallery or the gallery has no frames.
#[wasm_bindgen(js_name = init_gallery)]
pub fn init_gallery(root: Element, settings: JsValue) -> Result<bool, JsValue> {
    setup();
    let settings: Option<Settings> = if jsvalue_is_undefined_or_null(&settings) {
        None
    } else {
        Some(
            swb::from_value(settings)
                .map_err(|e| JsValue::from_str(&format!("settings error: {e}")))?,
        )
    };
    lifecycle::mount(&root, settings)
}

/// Initialize every gallery wrapper matching `selector` (default
/// `.scg-scroll-crossfade-gallery-wrapper`). Each gallery runs independently.
/// Returns how many were mounted.
#[wasm_bindgen(js_name = init_all)]
pub fn init_all(selector: Option<String>) -> Result<u32, JsValue> {
    setup();
    let document = dom::window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let selector = selector.as_deref().unwrap_or(WRAPPER_SELECTOR);
    let roots = document.query_selector_all(selector)?;

    let mut mounted = 0;
    for i in 0..roots.length() {
        let Some(root) = roots.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if lifecycle::mount(&root, None)? {
            mounted += 1;
        }
    }
    Ok(mounted)
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
