//! Gallery settings and their resolution into an immutable [`Config`].
//!
//! Hosts hand over settings as loosely typed values (strings read from
//! `data-*` attributes, or a JSON object). Resolution never fails: anything
//! unparseable falls back to its default and a warning is logged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

pub const DEFAULT_END_POINT: f64 = 0.3;
pub const DEFAULT_ANIMATION_SECONDS: f64 = 1.5;
/// Widest viewport (CSS px) still treated as narrow/mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 767.0;

pub const FRAME_TRANSITION: &str = "opacity 0.15s linear";
pub const FRAME_TRANSITION_MOBILE: &str = "opacity 0.1s linear";

pub const ATTR_END_POINT: &str = "data-end-point";
pub const ATTR_START_MODE: &str = "data-start-mode";
pub const ATTR_ENSURE_ALL_FRAMES: &str = "data-ensure-all-frames";
pub const ATTR_ANIMATION_SPEED: &str = "data-animation-speed";
pub const ATTR_SCROLL_SMOOTHING: &str = "data-scroll-smoothing";
pub const ATTR_MOBILE_PERFORMANCE: &str = "data-mobile-performance";

/// When the fade begins relative to the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartMode {
    /// Image fully visible with its bottom edge on the viewport bottom.
    #[default]
    FullyVisibleBottom,
    /// Image top reaches the viewport bottom.
    TopHitsBottom,
}

impl StartMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartMode::FullyVisibleBottom => "fully_visible_bottom",
            StartMode::TopHitsBottom => "top_hits_bottom",
        }
    }
}

impl FromStr for StartMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fully_visible_bottom" => Ok(StartMode::FullyVisibleBottom),
            "top_hits_bottom" => Ok(StartMode::TopHitsBottom),
            other => Err(SettingsError::UnknownStartMode(other.to_string())),
        }
    }
}

impl fmt::Display for StartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollSmoothing {
    /// Direct follow.
    #[default]
    None,
    Light,
    Strong,
}

impl ScrollSmoothing {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollSmoothing::None => "none",
            ScrollSmoothing::Light => "light",
            ScrollSmoothing::Strong => "strong",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, ScrollSmoothing::None)
    }
}

impl FromStr for ScrollSmoothing {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(ScrollSmoothing::None),
            "light" => Ok(ScrollSmoothing::Light),
            "strong" => Ok(ScrollSmoothing::Strong),
            other => Err(SettingsError::UnknownScrollSmoothing(other.to_string())),
        }
    }
}

impl fmt::Display for ScrollSmoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loosely typed setting as supplied by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    fn number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            RawValue::Bool(_) => None,
        }
    }

    fn text(&self) -> String {
        match self {
            RawValue::Bool(b) => b.to_string(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }

    /// Switch semantics of the host: only an explicit "yes" (or `true`) enables.
    fn flag(&self) -> bool {
        match self {
            RawValue::Bool(b) => *b,
            RawValue::Number(_) => false,
            RawValue::Text(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("true")
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

/// Raw per-instance settings. Every field is optional; missing fields resolve
/// to defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(alias = "end_point")]
    pub end_point: Option<RawValue>,
    #[serde(alias = "start_mode")]
    pub start_mode: Option<RawValue>,
    #[serde(alias = "ensure_all_frames")]
    pub ensure_all_frames: Option<RawValue>,
    #[serde(alias = "animation_speed", alias = "animationSpeedSeconds")]
    pub animation_speed: Option<RawValue>,
    #[serde(alias = "scroll_smoothing")]
    pub scroll_smoothing: Option<RawValue>,
    #[serde(alias = "mobile_performance")]
    pub mobile_performance: Option<RawValue>,
}

impl Settings {
    /// Build settings from an attribute lookup (e.g. `Element::get_attribute`).
    pub fn from_attributes<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut text = |name: &str| get(name).map(RawValue::Text);
        Self {
            end_point: text(ATTR_END_POINT),
            start_mode: text(ATTR_START_MODE),
            ensure_all_frames: text(ATTR_ENSURE_ALL_FRAMES),
            animation_speed: text(ATTR_ANIMATION_SPEED),
            scroll_smoothing: text(ATTR_SCROLL_SMOOTHING),
            mobile_performance: text(ATTR_MOBILE_PERFORMANCE),
        }
    }
}

/// Parse an end point. Values in [0, 1] are viewport ratios; values in
/// (1, 100] are percentages.
pub fn parse_end_point(raw: &RawValue) -> Result<f64, SettingsError> {
    let value = raw
        .number()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SettingsError::EndPointNotNumeric(raw.text()))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(SettingsError::EndPointOutOfRange(value));
    }
    Ok(if value > 1.0 { value / 100.0 } else { value })
}

/// Parse the full-gallery animation duration in seconds.
pub fn parse_animation_speed(raw: &RawValue) -> Result<f64, SettingsError> {
    let value = raw
        .number()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SettingsError::AnimationSpeedNotNumeric(raw.text()))?;
    if value <= 0.0 {
        return Err(SettingsError::AnimationSpeedNotPositive(value));
    }
    Ok(value)
}

/// Host facts needed at resolution time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub narrow_viewport: bool,
}

impl Environment {
    pub fn from_viewport_width(width: f64) -> Self {
        Self {
            narrow_viewport: width <= MOBILE_BREAKPOINT_PX,
        }
    }
}

/// Resolved, immutable configuration for one gallery instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub end_point_ratio: f64,
    pub start_mode: StartMode,
    pub ensure_all_frames: bool,
    pub animation_duration_seconds: f64,
    pub scroll_smoothing: ScrollSmoothing,
    pub mobile_performance: bool,
    /// Mobile performance mode was applied (narrow viewport).
    pub degraded: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            end_point_ratio: DEFAULT_END_POINT,
            start_mode: StartMode::default(),
            ensure_all_frames: false,
            animation_duration_seconds: DEFAULT_ANIMATION_SECONDS,
            scroll_smoothing: ScrollSmoothing::default(),
            mobile_performance: false,
            degraded: false,
        }
    }
}

fn or_default<T>(setting: &str, raw: &RawValue, parsed: Result<T, SettingsError>, default: T) -> T {
    match parsed {
        Ok(v) => v,
        Err(e) => {
            log::warn!("scroll-crossfade: {setting} {raw:?} rejected ({e}); using default");
            default
        }
    }
}

impl Config {
    /// Resolve raw settings, applying fallbacks and mobile degradation.
    pub fn resolve(settings: &Settings, env: Environment) -> Self {
        let mut cfg = Config::default();

        if let Some(raw) = &settings.end_point {
            cfg.end_point_ratio =
                or_default("endPoint", raw, parse_end_point(raw), DEFAULT_END_POINT);
        }
        if let Some(raw) = &settings.start_mode {
            cfg.start_mode = or_default(
                "startMode",
                raw,
                raw.text().parse(),
                StartMode::default(),
            );
        }
        if let Some(raw) = &settings.ensure_all_frames {
            cfg.ensure_all_frames = raw.flag();
        }
        if let Some(raw) = &settings.animation_speed {
            cfg.animation_duration_seconds = or_default(
                "animationSpeed",
                raw,
                parse_animation_speed(raw),
                DEFAULT_ANIMATION_SECONDS,
            );
        }
        if let Some(raw) = &settings.scroll_smoothing {
            cfg.scroll_smoothing = or_default(
                "scrollSmoothing",
                raw,
                raw.text().parse(),
                ScrollSmoothing::default(),
            );
        }
        if let Some(raw) = &settings.mobile_performance {
            cfg.mobile_performance = raw.flag();
        }

        if cfg.mobile_performance && env.narrow_viewport {
            log::debug!("scroll-crossfade: narrow viewport, disabling animated catch-up");
            cfg.ensure_all_frames = false;
            cfg.degraded = true;
        }
        cfg
    }

    /// Parse settings from JSON and resolve them.
    pub fn from_json(json: &str, env: Environment) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(Self::resolve(&settings, env))
    }

    /// CSS transition applied to every frame.
    pub fn frame_transition(&self) -> &'static str {
        if self.degraded {
            FRAME_TRANSITION_MOBILE
        } else {
            FRAME_TRANSITION
        }
    }
}
