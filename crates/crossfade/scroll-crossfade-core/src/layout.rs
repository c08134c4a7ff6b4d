//! Inline layout enforced on the gallery DOM before the first render.
//!
//! The plan is plain data; adapters apply each [`StyleDecl`] to the matching
//! element. Declarations marked `only_if_unset` leave an existing inline value
//! alone so page authors can still override them.

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameRole {
    /// Frame 0: stays in flow, sizes the container, always opaque.
    Base,
    /// Frames 1..N-1: stacked on top of the base, opacity-driven.
    Overlay,
}

impl FrameRole {
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            FrameRole::Base
        } else {
            FrameRole::Overlay
        }
    }

    pub fn z_index(&self) -> &'static str {
        match self {
            FrameRole::Base => "1",
            FrameRole::Overlay => "2",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleDecl {
    pub property: &'static str,
    /// Empty string removes the property.
    pub value: String,
    pub only_if_unset: bool,
}

impl StyleDecl {
    pub fn set(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
            only_if_unset: false,
        }
    }

    pub fn fallback(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
            only_if_unset: true,
        }
    }

    /// Value to write given the element's current inline value, if any write is needed.
    pub fn resolve(&self, current: &str) -> Option<&str> {
        if self.only_if_unset && !current.is_empty() {
            None
        } else {
            Some(&self.value)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    pub container: Vec<StyleDecl>,
    /// One declaration list per frame, indexed like the frames.
    pub frames: Vec<Vec<StyleDecl>>,
    /// Applied to the image inside every frame.
    pub images: Vec<StyleDecl>,
}

impl LayoutPlan {
    /// `force_transition` overwrites any authored frame transition (mobile mode).
    pub fn new(frame_count: usize, transition: &str, force_transition: bool) -> Self {
        let container = vec![
            StyleDecl::fallback("position", "relative"),
            StyleDecl::fallback("overflow", "hidden"),
            StyleDecl::fallback("display", "block"),
            StyleDecl::fallback("width", "100%"),
        ];

        let frames = (0..frame_count)
            .map(|i| {
                let role = FrameRole::for_index(i);
                let mut decls = vec![StyleDecl::set("margin", "0"), StyleDecl::set("padding", "0")];
                let edge = match role {
                    FrameRole::Base => "",
                    FrameRole::Overlay => "0",
                };
                decls.push(StyleDecl::set(
                    "position",
                    match role {
                        FrameRole::Base => "relative",
                        FrameRole::Overlay => "absolute",
                    },
                ));
                for side in ["top", "left", "right", "bottom"] {
                    decls.push(StyleDecl::set(side, edge));
                }
                decls.push(StyleDecl::set("z-index", role.z_index()));
                decls.push(if force_transition {
                    StyleDecl::set("transition", transition)
                } else {
                    StyleDecl::fallback("transition", transition)
                });
                decls
            })
            .collect();

        let images = vec![
            StyleDecl::fallback("display", "block"),
            StyleDecl::fallback("width", "100%"),
            StyleDecl::fallback("height", "auto"),
        ];

        Self {
            container,
            frames,
            images,
        }
    }
}

/// Container height matching the base image, when it has rendered.
pub fn container_height(image_height: f64) -> Option<StyleDecl> {
    (image_height.is_finite() && image_height > 0.0)
        .then(|| StyleDecl::set("height", format!("{image_height}px")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(decls: &'a [StyleDecl], prop: &str) -> &'a str {
        decls
            .iter()
            .find(|d| d.property == prop)
            .map(|d| d.value.as_str())
            .unwrap_or_else(|| panic!("missing {prop}"))
    }

    #[test]
    fn base_stays_in_flow_and_overlays_stack() {
        let plan = LayoutPlan::new(3, "opacity 0.15s linear", false);
        assert_eq!(plan.frames.len(), 3);
        assert_eq!(value(&plan.frames[0], "position"), "relative");
        assert_eq!(value(&plan.frames[0], "top"), "");
        assert_eq!(value(&plan.frames[0], "z-index"), "1");
        for f in &plan.frames[1..] {
            assert_eq!(value(f, "position"), "absolute");
            assert_eq!(value(f, "bottom"), "0");
            assert_eq!(value(f, "z-index"), "2");
        }
    }

    #[test]
    fn authored_values_survive_fallbacks() {
        let d = StyleDecl::fallback("transition", "opacity 0.15s linear");
        assert_eq!(d.resolve("opacity 1s ease"), None);
        assert_eq!(d.resolve(""), Some("opacity 0.15s linear"));
        let forced = StyleDecl::set("transition", "opacity 0.1s linear");
        assert_eq!(forced.resolve("opacity 1s ease"), Some("opacity 0.1s linear"));
    }

    #[test]
    fn height_sync_skips_unrendered_images() {
        assert_eq!(container_height(0.0), None);
        assert_eq!(
            container_height(420.0).map(|d| d.value),
            Some("420px".to_string())
        );
    }
}
