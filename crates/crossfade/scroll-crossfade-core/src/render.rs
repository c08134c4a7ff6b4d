//! Frame renderer: progress to per-frame opacity.
//!
//! Frames fade in one after another on top of the base frame. The mapping is
//! a pure function of progress and frame count; nothing is remembered between
//! calls, so lowering progress fades later frames back out.

use crate::progress::clamp_progress;

/// Receiver for opacity writes. Adapters map this onto their presentation
/// layer (inline styles in the browser, a `Vec` in tests).
pub trait FrameSink {
    fn set_opacity(&mut self, index: usize, opacity: f64);
}

impl FrameSink for Vec<f64> {
    fn set_opacity(&mut self, index: usize, opacity: f64) {
        if index >= self.len() {
            self.resize(index + 1, 0.0);
        }
        self[index] = opacity;
    }
}

/// Opacity of frame `index` out of `count` frames at `progress`.
pub fn frame_opacity(progress: f64, count: usize, index: usize) -> f64 {
    if index == 0 || count <= 1 {
        return 1.0;
    }
    let effective = clamp_progress(progress) * (count - 1) as f64;
    let segment = effective.floor();
    let local_t = effective - segment;
    let segment = segment as usize;

    if index <= segment {
        1.0
    } else if index == segment + 1 {
        local_t
    } else {
        0.0
    }
}

/// Opacities for all `count` frames.
pub fn frame_opacities(progress: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| frame_opacity(progress, count, i))
        .collect()
}

/// Compute and apply opacities for `count` frames.
pub fn render<S: FrameSink + ?Sized>(progress: f64, count: usize, sink: &mut S) {
    for i in 0..count {
        sink.set_opacity(i, frame_opacity(progress, count, i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_frames_at_half() {
        assert_eq!(frame_opacities(0.5, 4), vec![1.0, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn single_frame_is_always_opaque() {
        for p in [0.0, 0.3, 1.0, -1.0] {
            assert_eq!(frame_opacities(p, 1), vec![1.0]);
        }
    }

    #[test]
    fn vec_sink_grows() {
        let mut out: Vec<f64> = Vec::new();
        render(1.0, 3, &mut out);
        assert_eq!(out, vec![1.0, 1.0, 1.0]);
    }
}
