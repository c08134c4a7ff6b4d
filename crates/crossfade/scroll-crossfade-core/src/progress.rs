//! Progress mapping: clamp the sampler's raw fraction into [0, 1].

use crate::config::Config;
use crate::geometry::{raw_progress, Geometry};

/// Clamp into [0, 1]. NaN maps to 0.
pub fn clamp_progress(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}

/// Scroll-derived progress for `geometry`, ready to become the scheduler target.
pub fn scroll_progress(geometry: &Geometry, config: &Config) -> f64 {
    clamp_progress(raw_progress(geometry, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_both_ends() {
        assert_eq!(clamp_progress(-3.0), 0.0);
        assert_eq!(clamp_progress(7.5), 1.0);
        assert_eq!(clamp_progress(0.25), 0.25);
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(f64::INFINITY), 1.0);
    }
}
