//! Gallery: one independent crossfade instance.
//!
//! Owns the resolved config and the motion scheduler, and exposes the
//! lifecycle hooks an adapter calls: initial layout/render, geometry updates
//! (scroll, resize, base image load) and animation ticks.

use crate::config::{Config, Environment, Settings};
use crate::geometry::Geometry;
use crate::layout::LayoutPlan;
use crate::progress::scroll_progress;
use crate::render::{render, FrameSink};
use crate::scheduler::{FrameRequest, MotionPolicy, MotionScheduler};

#[derive(Debug)]
pub struct Gallery {
    config: Config,
    frame_count: usize,
    /// `None` for a single frame: nothing ever fades.
    scheduler: Option<MotionScheduler>,
}

impl Gallery {
    /// Resolve `settings` and build a gallery. `None` when there are no frames.
    pub fn new(frame_count: usize, settings: &Settings, env: Environment) -> Option<Self> {
        Self::with_config(frame_count, Config::resolve(settings, env))
    }

    pub fn with_config(frame_count: usize, config: Config) -> Option<Self> {
        if frame_count == 0 {
            log::debug!("scroll-crossfade: no frames, skipping");
            return None;
        }
        let scheduler = (frame_count > 1)
            .then(|| MotionScheduler::new(MotionPolicy::from_config(&config), frame_count));
        Some(Self {
            config,
            frame_count,
            scheduler,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn policy(&self) -> MotionPolicy {
        self.scheduler
            .as_ref()
            .map_or(MotionPolicy::Direct, MotionScheduler::policy)
    }

    pub fn current_progress(&self) -> f64 {
        self.scheduler.as_ref().map_or(0.0, MotionScheduler::current)
    }

    pub fn target_progress(&self) -> f64 {
        self.scheduler.as_ref().map_or(0.0, MotionScheduler::target)
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler
            .as_ref()
            .is_some_and(MotionScheduler::is_animating)
    }

    /// Inline layout for container, frames and images.
    pub fn layout(&self) -> LayoutPlan {
        LayoutPlan::new(
            self.frame_count,
            self.config.frame_transition(),
            self.config.degraded,
        )
    }

    /// Opacities before any geometry is known: base visible, the rest hidden.
    pub fn initial_render<S: FrameSink + ?Sized>(&self, sink: &mut S) {
        render(0.0, self.frame_count, sink);
    }

    /// Scroll-derived progress for `geometry` under this gallery's config.
    pub fn sample(&self, geometry: &Geometry) -> f64 {
        scroll_progress(geometry, &self.config)
    }

    /// Feed fresh geometry (scroll, resize, init, base image load).
    pub fn on_geometry<S: FrameSink + ?Sized>(
        &mut self,
        geometry: &Geometry,
        sink: &mut S,
    ) -> FrameRequest {
        let progress = self.sample(geometry);
        match self.scheduler.as_mut() {
            Some(scheduler) => scheduler.set_target(progress, sink),
            None => {
                render(progress, self.frame_count, sink);
                FrameRequest::Idle
            }
        }
    }

    /// Animation frame callback; `timestamp` in milliseconds.
    pub fn tick<S: FrameSink + ?Sized>(&mut self, timestamp: f64, sink: &mut S) -> FrameRequest {
        match self.scheduler.as_mut() {
            Some(scheduler) => scheduler.tick(timestamp, sink),
            None => FrameRequest::Idle,
        }
    }
}
