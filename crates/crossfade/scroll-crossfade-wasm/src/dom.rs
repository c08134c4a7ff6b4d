//! DOM access for one gallery: element lookup, geometry reads and style writes.

use scroll_crossfade_core::config::MOBILE_BREAKPOINT_PX;
use scroll_crossfade_core::layout::container_height;
use scroll_crossfade_core::{FrameSink, Geometry, StyleDecl};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlImageElement, Window};

pub const CONTAINER_SELECTOR: &str = ".scg-scroll-crossfade-gallery";
pub const FRAME_SELECTOR: &str = ".scg-frame";
pub const PRELOADER_SELECTOR: &str = ".scg-preloader";
pub const PRELOADER_HIDDEN_CLASS: &str = "scg-preloader-hidden";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// The gallery container: `root` itself or its first matching descendant.
pub fn find_container(root: &Element) -> Result<Option<HtmlElement>, JsValue> {
    let found = if root.matches(CONTAINER_SELECTOR)? {
        Some(root.clone())
    } else {
        root.query_selector(CONTAINER_SELECTOR)?
    };
    Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

pub fn find_frames(container: &HtmlElement) -> Result<Vec<HtmlElement>, JsValue> {
    let list = container.query_selector_all(FRAME_SELECTOR)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn frame_image(frame: &HtmlElement) -> Result<Option<HtmlImageElement>, JsValue> {
    Ok(frame
        .query_selector("img")?
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok()))
}

pub fn find_preloader(container: &HtmlElement) -> Result<Option<Element>, JsValue> {
    match container.parent_element() {
        Some(wrapper) => wrapper.query_selector(PRELOADER_SELECTOR),
        None => Ok(None),
    }
}

pub fn is_narrow_viewport(window: &Window) -> bool {
    let query = format!("(max-width: {MOBILE_BREAKPOINT_PX}px)");
    matches!(window.match_media(&query), Ok(Some(mql)) if mql.matches())
}

fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .filter(|h| *h > 0.0)
        .or_else(|| {
            window
                .document()
                .and_then(|d| d.document_element())
                .map(|e| e.client_height() as f64)
        })
        .unwrap_or(0.0)
}

pub fn sample_geometry(
    window: &Window,
    container: &HtmlElement,
    base_image: Option<&HtmlImageElement>,
) -> Geometry {
    let rect = container.get_bounding_client_rect();
    Geometry {
        viewport_height: viewport_height(window),
        element_top: rect.top(),
        image_height: base_image.map_or(0.0, |img| img.offset_height() as f64),
        container_height: rect.height(),
    }
}

pub fn apply_styles(el: &HtmlElement, decls: &[StyleDecl]) -> Result<(), JsValue> {
    let style = el.style();
    for decl in decls {
        let current = style.get_property_value(decl.property)?;
        match decl.resolve(&current) {
            Some("") => {
                style.remove_property(decl.property)?;
            }
            Some(value) => style.set_property(decl.property, value)?,
            None => {}
        }
    }
    Ok(())
}

/// Pin the container height to the base image once it has rendered.
pub fn sync_height(container: &HtmlElement, base_image: Option<&HtmlImageElement>) -> Result<(), JsValue> {
    let Some(img) = base_image else {
        return Ok(());
    };
    match container_height(img.offset_height() as f64) {
        Some(decl) => apply_styles(container, std::slice::from_ref(&decl)),
        None => Ok(()),
    }
}

/// Writes opacities into the frames' inline styles.
pub struct FrameStyles<'a>(pub &'a [HtmlElement]);

impl FrameSink for FrameStyles<'_> {
    fn set_opacity(&mut self, index: usize, opacity: f64) {
        if let Some(frame) = self.0.get(index) {
            if let Err(e) = frame.style().set_property("opacity", &opacity.to_string()) {
                log::warn!("scroll-crossfade: opacity write failed: {e:?}");
            }
        }
    }
}
