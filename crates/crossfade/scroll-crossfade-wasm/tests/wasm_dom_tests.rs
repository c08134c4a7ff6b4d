#![cfg(target_arch = "wasm32")]
use scroll_crossfade_wasm::{abi_version, init_all, init_gallery, PRELOADER_HIDDEN_CLASS};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

// Images without `src` report `complete`, so the preloader settles at once.
fn gallery_markup(frames: usize, preloader: bool, attrs: &str) -> String {
    let mut html = String::from(r#"<div class="scg-scroll-crossfade-gallery-wrapper">"#);
    if preloader {
        html.push_str(r#"<div class="scg-preloader"><div class="scg-preloader-spinner"></div></div>"#);
    }
    html.push_str(&format!(r#"<div class="scg-scroll-crossfade-gallery" {attrs}>"#));
    for i in 0..frames {
        html.push_str(&format!(
            r#"<div class="scg-frame" data-frame-index="{i}"><img alt="" /></div>"#
        ));
    }
    html.push_str("</div></div>");
    html
}

fn mount_fixture(html: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document.create_element("div").unwrap();
    host.set_inner_html(html);
    document.body().unwrap().append_child(&host).unwrap();
    host.first_element_child().unwrap()
}

fn frames(root: &Element) -> Vec<HtmlElement> {
    let list = root.query_selector_all(".scg-frame").unwrap();
    (0..list.length())
        .map(|i| list.get(i).unwrap().dyn_into::<HtmlElement>().unwrap())
        .collect()
}

fn style(el: &HtmlElement, prop: &str) -> String {
    el.style().get_property_value(prop).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn mounts_and_applies_layout() {
    // Far below the fold: progress 0 regardless of viewport size.
    let root = mount_fixture(&gallery_markup(
        3,
        false,
        r#"data-start-mode="top_hits_bottom" data-end-point="0.3" data-scroll-smoothing="none""#,
    ));
    root.dyn_ref::<HtmlElement>()
        .unwrap()
        .style()
        .set_property("margin-top", "100000px")
        .unwrap();

    assert!(init_gallery(root.clone(), JsValue::UNDEFINED).unwrap());

    let fs = frames(&root);
    assert_eq!(style(&fs[0], "position"), "relative");
    assert_eq!(style(&fs[0], "z-index"), "1");
    assert_eq!(style(&fs[1], "position"), "absolute");
    assert_eq!(style(&fs[2], "z-index"), "2");
    assert_eq!(style(&fs[0], "opacity"), "1");
    assert_eq!(style(&fs[1], "opacity"), "0");
    assert_eq!(style(&fs[2], "opacity"), "0");
}

#[wasm_bindgen_test]
fn settings_object_overrides_attributes() {
    let root = mount_fixture(&gallery_markup(2, false, ""));
    let settings = js_sys::JSON::parse(r#"{ "endPoint": 0.5, "scrollSmoothing": "light" }"#).unwrap();
    assert!(init_gallery(root, settings).unwrap());
}

#[wasm_bindgen_test]
fn preloader_hides_when_images_are_complete() {
    let root = mount_fixture(&gallery_markup(2, true, ""));
    assert!(init_gallery(root.clone(), JsValue::NULL).unwrap());
    let preloader = root.query_selector(".scg-preloader").unwrap().unwrap();
    assert!(preloader.class_list().contains(PRELOADER_HIDDEN_CLASS));
}

#[wasm_bindgen_test]
fn empty_gallery_is_skipped() {
    let root = mount_fixture(&gallery_markup(0, false, ""));
    assert!(!init_gallery(root, JsValue::UNDEFINED).unwrap());
}

#[wasm_bindgen_test]
fn init_all_counts_mounted_galleries() {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document.create_element("section").unwrap();
    host.set_id("init-all-host");
    host.set_inner_html(&format!(
        "{}{}{}",
        gallery_markup(2, false, ""),
        gallery_markup(1, false, ""),
        gallery_markup(0, false, "")
    ));
    document.body().unwrap().append_child(&host).unwrap();

    let mounted = init_all(Some(
        "#init-all-host .scg-scroll-crossfade-gallery-wrapper".to_string(),
    ))
    .unwrap();
    assert_eq!(mounted, 2);
}
