//! Scroll Crossfade Core (DOM-agnostic)
//!
//! Progress engine and motion scheduler for a scroll-linked image crossfade.
//! Geometry read from the host is mapped to a progress value in [0, 1]; the
//! scheduler advances a displayed progress toward it and the renderer turns
//! that progress into per-frame opacities. Hosts (the wasm adapter, tests)
//! supply geometry and a [`FrameSink`] that receives opacity writes.

pub mod config;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod layout;
pub mod preload;
pub mod progress;
pub mod render;
pub mod scheduler;

// Re-exports for consumers (adapters)
pub use config::{Config, Environment, ScrollSmoothing, Settings, StartMode};
pub use error::SettingsError;
pub use gallery::Gallery;
pub use geometry::Geometry;
pub use layout::{FrameRole, LayoutPlan, StyleDecl};
pub use preload::PreloadTracker;
pub use progress::scroll_progress;
pub use render::{frame_opacities, render, FrameSink};
pub use scheduler::{FrameRequest, MotionPolicy, MotionScheduler};
