//! Geometry sampling: scroll/viewport/element geometry to a raw progress fraction.

use serde::{Deserialize, Serialize};

use crate::config::{Config, StartMode};

/// One snapshot of the geometry the sampler needs, in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// `window.innerHeight` (or the document element's client height).
    pub viewport_height: f64,
    /// Container bounding rect top, relative to the viewport.
    pub element_top: f64,
    /// Rendered height of the base image; `0` when unknown.
    #[serde(default)]
    pub image_height: f64,
    /// Container bounding rect height; used when `image_height` is unknown.
    #[serde(default)]
    pub container_height: f64,
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

impl Geometry {
    /// Copy with every non-finite field replaced by `0`.
    pub fn sanitized(&self) -> Self {
        Self {
            viewport_height: finite_or_zero(self.viewport_height),
            element_top: finite_or_zero(self.element_top),
            image_height: finite_or_zero(self.image_height),
            container_height: finite_or_zero(self.container_height),
        }
    }

    /// Height used for the "fully visible" test.
    pub fn effective_image_height(&self) -> f64 {
        if self.image_height > 0.0 {
            self.image_height
        } else {
            self.container_height
        }
    }
}

/// Viewport offsets (from the viewport top) where the fade starts and ends.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FadeWindow {
    pub start: f64,
    pub end: f64,
}

impl FadeWindow {
    pub fn new(geometry: &Geometry, start_mode: StartMode, end_point_ratio: f64) -> Self {
        let g = geometry.sanitized();
        let vh = g.viewport_height;
        let image_height = g.effective_image_height();

        let start = match start_mode {
            // An image taller than the viewport can never be fully visible.
            StartMode::FullyVisibleBottom if image_height <= vh => vh - image_height,
            _ => vh,
        };
        Self {
            start,
            end: vh * end_point_ratio,
        }
    }

    /// Raw, unclamped fraction `(start - top) / (start - end)`.
    pub fn fraction(&self, element_top: f64) -> f64 {
        let top = finite_or_zero(element_top);
        if self.start == self.end {
            return if top <= self.start { 1.0 } else { 0.0 };
        }
        (self.start - top) / (self.start - self.end)
    }
}

/// Raw progress for the given geometry under `config`. Not clamped.
pub fn raw_progress(geometry: &Geometry, config: &Config) -> f64 {
    let window = FadeWindow::new(geometry, config.start_mode, config.end_point_ratio);
    window.fraction(geometry.element_top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(vh: f64, top: f64, img: f64) -> Geometry {
        Geometry {
            viewport_height: vh,
            element_top: top,
            image_height: img,
            container_height: img,
        }
    }

    #[test]
    fn fully_visible_start_uses_image_height() {
        let w = FadeWindow::new(&geom(800.0, 0.0, 300.0), StartMode::FullyVisibleBottom, 0.3);
        assert_eq!(w.start, 500.0);
        assert!((w.end - 240.0).abs() < 1e-9);
    }

    #[test]
    fn tall_image_falls_back_to_top_hits_bottom() {
        let w = FadeWindow::new(&geom(800.0, 0.0, 1200.0), StartMode::FullyVisibleBottom, 0.3);
        assert_eq!(w.start, 800.0);
    }

    #[test]
    fn container_height_stands_in_for_unknown_image() {
        let g = Geometry {
            viewport_height: 800.0,
            element_top: 0.0,
            image_height: 0.0,
            container_height: 200.0,
        };
        let w = FadeWindow::new(&g, StartMode::FullyVisibleBottom, 0.3);
        assert_eq!(w.start, 600.0);
    }

    #[test]
    fn degenerate_window_is_a_step() {
        let w = FadeWindow {
            start: 240.0,
            end: 240.0,
        };
        assert_eq!(w.fraction(240.0), 1.0);
        assert_eq!(w.fraction(100.0), 1.0);
        assert_eq!(w.fraction(240.5), 0.0);
    }

    #[test]
    fn non_finite_inputs_do_not_produce_nan() {
        let g = geom(f64::NAN, f64::INFINITY, f64::NAN);
        let w = FadeWindow::new(&g, StartMode::TopHitsBottom, 0.3);
        assert!(!w.fraction(g.element_top).is_nan());
    }
}
