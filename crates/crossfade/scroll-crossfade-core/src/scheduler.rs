//! Motion scheduler: advances the displayed progress toward the scroll target.
//!
//! The scheduler is a two-state machine (`Idle`, `Animating`). It never owns a
//! timer. Both entry points return a [`FrameRequest`] telling the host whether
//! to request one more animation frame; the host calls [`MotionScheduler::tick`]
//! from that callback. Because a request is only issued on the Idle→Animating
//! transition and by a tick that keeps going, at most one callback is pending.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ScrollSmoothing};
use crate::progress::clamp_progress;
use crate::render::{render, FrameSink};

/// Distance below which current progress snaps onto the target.
pub const CONVERGENCE_EPSILON: f64 = 1e-4;
/// Progress units per millisecond (full range in ~0.8s).
pub const STRONG_SMOOTHING_RATE: f64 = 1.0 / 800.0;
/// Progress units per millisecond (full range in ~0.35s).
pub const LIGHT_SMOOTHING_RATE: f64 = 1.0 / 350.0;

/// How displayed progress follows the target.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionPolicy {
    /// Render each target immediately.
    Direct,
    /// Fixed speed: a full 0→1 run takes `duration_seconds`.
    CatchUp { duration_seconds: f64 },
    /// Speed-limited follow at a preset rate.
    Smoothing { smoothing: ScrollSmoothing },
}

impl MotionPolicy {
    /// Catch-up wins over smoothing when both are configured.
    pub fn from_config(cfg: &Config) -> Self {
        if cfg.ensure_all_frames {
            MotionPolicy::CatchUp {
                duration_seconds: cfg.animation_duration_seconds,
            }
        } else if cfg.scroll_smoothing.is_active() {
            MotionPolicy::Smoothing {
                smoothing: cfg.scroll_smoothing,
            }
        } else {
            MotionPolicy::Direct
        }
    }

    pub fn is_animated(&self) -> bool {
        self.rate_per_ms().is_some()
    }

    /// Maximum progress change per millisecond, `None` for direct follow.
    pub fn rate_per_ms(&self) -> Option<f64> {
        match *self {
            MotionPolicy::Direct => None,
            MotionPolicy::CatchUp { duration_seconds } if duration_seconds > 0.0 => {
                Some(1.0 / (duration_seconds * 1000.0))
            }
            MotionPolicy::CatchUp { .. } => None,
            MotionPolicy::Smoothing { smoothing } => match smoothing {
                ScrollSmoothing::Strong => Some(STRONG_SMOOTHING_RATE),
                ScrollSmoothing::Light => Some(LIGHT_SMOOTHING_RATE),
                ScrollSmoothing::None => None,
            },
        }
    }
}

/// What the host should do after calling into the scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum FrameRequest {
    /// Nothing pending; do not request a frame.
    Idle,
    /// Request one animation frame and call `tick` from it.
    NextFrame,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum MotionState {
    Idle,
    /// `last_tick` is `None` until the first tick anchors the clock.
    Animating { last_tick: Option<f64> },
}

#[derive(Debug)]
pub struct MotionScheduler {
    policy: MotionPolicy,
    frame_count: usize,
    target: f64,
    current: f64,
    state: MotionState,
}

impl MotionScheduler {
    pub fn new(policy: MotionPolicy, frame_count: usize) -> Self {
        Self {
            policy,
            frame_count,
            target: 0.0,
            current: 0.0,
            state: MotionState::Idle,
        }
    }

    pub fn policy(&self) -> MotionPolicy {
        self.policy
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, MotionState::Animating { .. })
    }

    /// Timestamp (ms) of the last tick while animating.
    pub fn last_tick(&self) -> Option<f64> {
        match self.state {
            MotionState::Animating { last_tick } => last_tick,
            MotionState::Idle => None,
        }
    }

    /// Set a new target progress.
    pub fn set_target<S: FrameSink + ?Sized>(&mut self, progress: f64, sink: &mut S) -> FrameRequest {
        let progress = clamp_progress(progress);
        self.target = progress;

        if !self.policy.is_animated() {
            self.current = progress;
            render(self.current, self.frame_count, sink);
            return FrameRequest::Idle;
        }

        match self.state {
            MotionState::Idle => {
                log::debug!(
                    "scroll-crossfade: animating {:.4} -> {:.4}",
                    self.current,
                    self.target
                );
                self.state = MotionState::Animating { last_tick: None };
                FrameRequest::NextFrame
            }
            // The pending tick reads the new target.
            MotionState::Animating { .. } => FrameRequest::Idle,
        }
    }

    /// Advance one animation frame. `timestamp` is in milliseconds and must
    /// not decrease between calls.
    pub fn tick<S: FrameSink + ?Sized>(&mut self, timestamp: f64, sink: &mut S) -> FrameRequest {
        let Some(rate) = self.policy.rate_per_ms() else {
            log::debug!("scroll-crossfade: tick under direct policy, stopping");
            self.state = MotionState::Idle;
            return FrameRequest::Idle;
        };

        let last_tick = match self.state {
            MotionState::Idle => return FrameRequest::Idle,
            MotionState::Animating { last_tick: None } => {
                self.state = MotionState::Animating {
                    last_tick: Some(timestamp),
                };
                return FrameRequest::NextFrame;
            }
            MotionState::Animating {
                last_tick: Some(last),
            } => last,
        };

        let dt = (timestamp - last_tick).max(0.0);
        self.state = MotionState::Animating {
            last_tick: Some(timestamp),
        };
        let max_step = rate * dt;

        let diff = self.target - self.current;
        if diff.abs() <= CONVERGENCE_EPSILON {
            self.current = self.target;
            render(self.current, self.frame_count, sink);
            self.state = MotionState::Idle;
            log::debug!("scroll-crossfade: converged at {:.4}", self.current);
            return FrameRequest::Idle;
        }

        let step = if diff > 0.0 {
            diff.min(max_step)
        } else {
            diff.max(-max_step)
        };
        self.current = clamp_progress(self.current + step);
        render(self.current, self.frame_count, sink);
        FrameRequest::NextFrame
    }
}
