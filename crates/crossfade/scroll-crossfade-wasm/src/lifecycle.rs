//! Mounting a gallery: layout, listeners and the animation-frame loop.
//!
//! Each mounted gallery owns its state through `Rc<RefCell<_>>` handles
//! captured by its listeners. Listeners stay registered for the life of the
//! page, so the closures are leaked with `Closure::forget`.

use std::cell::RefCell;
use std::rc::Rc;

use scroll_crossfade_core::{Environment, FrameRequest, Gallery, PreloadTracker, Settings};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Element, HtmlElement, HtmlImageElement, Window};

use crate::dom::{self, FrameStyles};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct Mounted {
    gallery: Gallery,
    window: Window,
    container: HtmlElement,
    frames: Vec<HtmlElement>,
    base_image: Option<HtmlImageElement>,
}

impl Mounted {
    fn resample(&mut self) -> FrameRequest {
        let geometry =
            dom::sample_geometry(&self.window, &self.container, self.base_image.as_ref());
        self.gallery.on_geometry(&geometry, &mut FrameStyles(&self.frames))
    }

    fn tick(&mut self, timestamp: f64) -> FrameRequest {
        self.gallery.tick(timestamp, &mut FrameStyles(&self.frames))
    }
}

/// One gallery plus the animation-frame callback that drives it.
#[derive(Clone)]
struct Instance {
    state: Rc<RefCell<Mounted>>,
    frame_cb: FrameCallback,
}

impl Instance {
    fn request_frame(&self) {
        let cb = self.frame_cb.borrow();
        let Some(cb) = cb.as_ref() else {
            return;
        };
        let window = self.state.borrow().window.clone();
        if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::warn!("scroll-crossfade: requestAnimationFrame failed: {e:?}");
        }
    }

    fn handle(&self, request: FrameRequest) {
        if request == FrameRequest::NextFrame {
            self.request_frame();
        }
    }

    fn resample(&self) {
        let request = self.state.borrow_mut().resample();
        self.handle(request);
    }

    fn install_frame_callback(&self) {
        let this = self.clone();
        let cb = Closure::wrap(Box::new(move |timestamp: f64| {
            let request = this.state.borrow_mut().tick(timestamp);
            this.handle(request);
        }) as Box<dyn FnMut(f64)>);
        *self.frame_cb.borrow_mut() = Some(cb);
    }

    fn listen_window(&self) -> Result<(), JsValue> {
        let window = self.state.borrow().window.clone();

        let this = self.clone();
        let on_scroll = Closure::wrap(Box::new(move || this.resample()) as Box<dyn FnMut()>);
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &opts,
        )?;
        on_scroll.forget();

        let this = self.clone();
        let on_resize = Closure::wrap(Box::new(move || this.resample()) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
        Ok(())
    }

    /// Height sync and a fresh sample once the base image has a natural size.
    fn watch_base_image(&self) -> Result<(), JsValue> {
        let base_image = self.state.borrow().base_image.clone();
        let Some(img) = base_image else {
            return Ok(());
        };
        if img.complete() {
            let state = self.state.borrow();
            return dom::sync_height(&state.container, state.base_image.as_ref());
        }

        let this = self.clone();
        let on_load = Closure::wrap(Box::new(move || {
            {
                let state = this.state.borrow();
                if let Err(e) = dom::sync_height(&state.container, state.base_image.as_ref()) {
                    log::warn!("scroll-crossfade: height sync failed: {e:?}");
                }
            }
            this.resample();
        }) as Box<dyn FnMut()>);
        img.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        on_load.forget();
        Ok(())
    }
}

fn hide_preloader(preloader: &Element) {
    if let Err(e) = preloader.class_list().add_1(dom::PRELOADER_HIDDEN_CLASS) {
        log::warn!("scroll-crossfade: could not hide preloader: {e:?}");
    }
}

fn watch_preloader(container: &HtmlElement, frames: &[HtmlElement]) -> Result<(), JsValue> {
    let Some(preloader) = dom::find_preloader(container)? else {
        return Ok(());
    };

    let mut pending = Vec::new();
    for frame in frames {
        if let Some(img) = dom::frame_image(frame)? {
            if !img.complete() {
                pending.push(img);
            }
        }
    }

    let tracker = Rc::new(RefCell::new(PreloadTracker::new(pending.len())));
    if tracker.borrow_mut().take_hide_signal() {
        hide_preloader(&preloader);
        return Ok(());
    }

    for img in pending {
        let tracker = tracker.clone();
        let preloader = preloader.clone();
        // Errors settle too: one broken image must not keep the overlay up.
        let on_settle = Closure::wrap(Box::new(move || {
            if tracker.borrow_mut().settle() {
                hide_preloader(&preloader);
            }
        }) as Box<dyn FnMut()>);
        img.add_event_listener_with_callback("load", on_settle.as_ref().unchecked_ref())?;
        img.add_event_listener_with_callback("error", on_settle.as_ref().unchecked_ref())?;
        on_settle.forget();
    }
    Ok(())
}

/// Mount one gallery under `root`. Returns `false` when there is nothing to
/// animate (no container or no frames).
pub fn mount(root: &Element, settings: Option<Settings>) -> Result<bool, JsValue> {
    let Some(container) = dom::find_container(root)? else {
        log::debug!("scroll-crossfade: no gallery container under root");
        return Ok(false);
    };
    let frames = dom::find_frames(&container)?;
    let window = dom::window()?;

    let settings =
        settings.unwrap_or_else(|| Settings::from_attributes(|name| container.get_attribute(name)));
    let env = Environment {
        narrow_viewport: dom::is_narrow_viewport(&window),
    };
    let Some(gallery) = Gallery::new(frames.len(), &settings, env) else {
        return Ok(false);
    };

    let plan = gallery.layout();
    dom::apply_styles(&container, &plan.container)?;
    for (frame, decls) in frames.iter().zip(&plan.frames) {
        dom::apply_styles(frame, decls)?;
        if let Some(img) = dom::frame_image(frame)? {
            dom::apply_styles(&img, &plan.images)?;
        }
    }
    gallery.initial_render(&mut FrameStyles(&frames));

    watch_preloader(&container, &frames)?;

    let base_image = match frames.first() {
        Some(frame) => dom::frame_image(frame)?,
        None => None,
    };

    let instance = Instance {
        state: Rc::new(RefCell::new(Mounted {
            gallery,
            window,
            container,
            frames,
            base_image,
        })),
        frame_cb: Rc::new(RefCell::new(None)),
    };
    instance.install_frame_callback();
    instance.watch_base_image()?;
    instance.listen_window()?;

    // Above-the-fold state before any scroll event.
    instance.resample();
    Ok(true)
}
