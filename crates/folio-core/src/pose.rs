//! Per-segment bend and fold targets for a page.
//!
//! A page is a chain of `bone_count` rigid segments. Every frame each segment
//! gets a bend target (rotation about the spine axis) and a fold target
//! (a small crease tilt) computed from the page's open/closed state and from
//! how far the current turn has progressed.

use std::f32::consts::PI;

use crate::config::BookConfig;

/// Target rotation for one segment, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentTarget {
    pub bend: f32,
    pub fold: f32,
}

/// Half-sine ease over the turn window: 0 at the start, 1 halfway, 0 at the end
/// and beyond. Negative elapsed time counts as the start.
pub fn turn_progress(elapsed_ms: f64, duration_ms: f64) -> f32 {
    let x = elapsed_ms.clamp(0.0, duration_ms) / duration_ms;
    (x * std::f64::consts::PI).sin() as f32
}

/// Rotation the whole page swings toward: -90° when open, +90° when closed,
/// fanned by a per-page stagger while the book lies open.
pub fn base_rotation(open: bool, book_closed: bool, index: usize, config: &BookConfig) -> f32 {
    let mut r = if open { -PI / 2.0 } else { PI / 2.0 };
    if !book_closed {
        r += (index as f32 * config.stagger_deg).to_radians();
    }
    r
}

/// Targets for segment `i` of a chain with `bone_count` links.
pub fn segment_target(
    i: usize,
    bone_count: usize,
    base: f32,
    progress: f32,
    book_closed: bool,
    config: &BookConfig,
) -> SegmentTarget {
    if book_closed {
        return if i == 0 {
            SegmentTarget {
                bend: base,
                fold: 0.0,
            }
        } else {
            SegmentTarget::default()
        };
    }

    let fi = i as f32;
    let along = fi * PI / bone_count as f32;
    let split = config.curve_split_segment;

    let inside = if i < split { (fi * 0.2 + 0.25).sin() } else { 0.0 };
    let outside = if i >= split { (fi * 0.3 + 0.09).cos() } else { 0.0 };
    let turning = along.sin() * progress;

    let bend = config.inside_curve_strength * inside * base
        - config.outside_curve_strength * outside * base
        + config.turning_curve_strength * turning * base;

    let fold_intensity = if i > split {
        (along - 0.5).sin() * progress
    } else {
        0.0
    };
    let tilt = (base.signum() * config.fold_tilt_deg).to_radians();

    SegmentTarget {
        bend,
        fold: tilt * fold_intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_shape() {
        assert!(turn_progress(0.0, 400.0).abs() < 1e-6);
        assert!((turn_progress(200.0, 400.0) - 1.0).abs() < 1e-6);
        assert!(turn_progress(400.0, 400.0).abs() < 1e-6);
        assert!(turn_progress(10_000.0, 400.0).abs() < 1e-6);
        assert!(turn_progress(-50.0, 400.0).abs() < 1e-6);
    }

    #[test]
    fn base_rotation_stagger_only_when_open_book() {
        let c = BookConfig::default();
        assert_eq!(base_rotation(true, true, 3, &c), -PI / 2.0);
        assert_eq!(base_rotation(false, true, 3, &c), PI / 2.0);
        let staggered = base_rotation(false, false, 3, &c);
        assert!((staggered - (PI / 2.0 + 2.4f32.to_radians())).abs() < 1e-6);
    }

    #[test]
    fn closed_book_collapses() {
        let c = BookConfig::default();
        let base = PI / 2.0;
        let t0 = segment_target(0, 31, base, 1.0, true, &c);
        assert_eq!(t0, SegmentTarget { bend: base, fold: 0.0 });
        for i in 1..31 {
            assert_eq!(segment_target(i, 31, base, 1.0, true, &c), SegmentTarget::default());
        }
    }

    #[test]
    fn fold_only_beyond_split_and_while_turning() {
        let c = BookConfig::default();
        let base = -PI / 2.0;
        for i in 0..=8 {
            assert_eq!(segment_target(i, 31, base, 1.0, false, &c).fold, 0.0);
        }
        assert_eq!(segment_target(20, 31, base, 0.0, false, &c).fold, 0.0);
        let f = segment_target(20, 31, base, 1.0, false, &c).fold;
        assert!(f < 0.0, "fold follows the sign of the base rotation");
    }

    #[test]
    fn bend_mixes_curves() {
        let c = BookConfig::default();
        let base = PI / 2.0;
        let i = 3;
        let expected = 0.18 * (3.0f32 * 0.2 + 0.25).sin() * base
            + 0.09 * (3.0 * PI / 31.0).sin() * 0.5 * base;
        let got = segment_target(i, 31, base, 0.5, false, &c).bend;
        assert!((got - expected).abs() < 1e-6);

        let j = 12;
        let expected = -0.05 * (12.0f32 * 0.3 + 0.09).cos() * base;
        let got = segment_target(j, 31, base, 0.0, false, &c).bend;
        assert!((got - expected).abs() < 1e-6);
    }
}
