use scroll_crossfade_core::{frame_opacities, render, FrameSink};

const COUNTS: [usize; 5] = [2, 3, 4, 7, 12];

fn progress_grid() -> impl Iterator<Item = f64> {
    (0..=200).map(|i| i as f64 / 200.0)
}

#[test]
fn base_frame_is_always_opaque() {
    for n in COUNTS {
        for p in progress_grid() {
            assert_eq!(frame_opacities(p, n)[0], 1.0, "n={n} p={p}");
        }
    }
}

#[test]
fn full_progress_shows_every_frame() {
    for n in COUNTS {
        assert!(frame_opacities(1.0, n).iter().all(|&o| o == 1.0), "n={n}");
    }
}

#[test]
fn zero_progress_shows_only_base() {
    for n in COUNTS {
        let o = frame_opacities(0.0, n);
        assert_eq!(o[0], 1.0);
        assert!(o[1..].iter().all(|&v| v == 0.0), "n={n}");
    }
}

#[test]
fn opacities_are_monotonic_in_progress() {
    for n in COUNTS {
        let mut prev = frame_opacities(0.0, n);
        for p in progress_grid().skip(1) {
            let next = frame_opacities(p, n);
            for (i, (a, b)) in prev.iter().zip(&next).enumerate() {
                assert!(b >= a, "n={n} p={p} frame {i}: {a} -> {b}");
            }
            prev = next;
        }
    }
}

#[test]
fn values_stay_in_unit_range() {
    for n in COUNTS {
        for p in progress_grid() {
            assert!(frame_opacities(p, n)
                .iter()
                .all(|o| (0.0..=1.0).contains(o)));
        }
    }
}

#[test]
fn reversing_progress_unfades_later_frames() {
    let forward = frame_opacities(0.9, 4);
    let back = frame_opacities(0.2, 4);
    assert_eq!(forward[1], 1.0);
    assert!(back[1] < 1.0);
    assert_eq!(back[2], 0.0);
    assert_eq!(back, frame_opacities(0.2, 4));
}

#[test]
fn four_frame_scenario() {
    assert_eq!(frame_opacities(0.5, 4), vec![1.0, 1.0, 0.5, 0.0]);
}

struct Recorder {
    writes: Vec<(usize, f64)>,
}

impl FrameSink for Recorder {
    fn set_opacity(&mut self, index: usize, opacity: f64) {
        self.writes.push((index, opacity));
    }
}

#[test]
fn render_writes_every_frame_in_order() {
    let mut rec = Recorder { writes: Vec::new() };
    render(0.5, 3, &mut rec);
    assert_eq!(rec.writes, vec![(0, 1.0), (1, 1.0), (2, 0.0)]);
}
