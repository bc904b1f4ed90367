//! Book tuning parameters.
//!
//! Defaults come from `constants.rs`; a host may override individual fields
//! before constructing a [`crate::Book`].

use std::time::Duration;

use crate::constants::*;

#[derive(Clone, Debug, PartialEq)]
pub struct BookConfig {
    /// Number of bend segments per page; each page carries `segments + 1` bones.
    pub segments: usize,
    pub bend_smooth_time: f32,
    pub fold_smooth_time: f32,
    pub inside_curve_strength: f32,
    pub outside_curve_strength: f32,
    pub turning_curve_strength: f32,
    pub curve_split_segment: usize,
    pub fold_tilt_deg: f32,
    pub stagger_deg: f32,
    pub turn_duration_ms: f64,
    pub fast_tick: Duration,
    pub slow_tick: Duration,
    pub fast_tick_min_distance: usize,
    pub highlight_intensity: f32,
    pub highlight_blend: f32,
    /// Glow every picture face starts with before the first frame.
    pub highlight_start: f32,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            segments: PAGE_SEGMENTS,
            bend_smooth_time: BEND_SMOOTH_TIME,
            fold_smooth_time: FOLD_SMOOTH_TIME,
            inside_curve_strength: INSIDE_CURVE_STRENGTH,
            outside_curve_strength: OUTSIDE_CURVE_STRENGTH,
            turning_curve_strength: TURNING_CURVE_STRENGTH,
            curve_split_segment: CURVE_SPLIT_SEGMENT,
            fold_tilt_deg: FOLD_TILT_DEG,
            stagger_deg: PAGE_STAGGER_DEG,
            turn_duration_ms: TURN_DURATION_MS,
            fast_tick: Duration::from_millis(FAST_TICK_MS),
            slow_tick: Duration::from_millis(SLOW_TICK_MS),
            fast_tick_min_distance: FAST_TICK_MIN_DISTANCE,
            highlight_intensity: HIGHLIGHT_INTENSITY,
            highlight_blend: HIGHLIGHT_BLEND,
            highlight_start: PAGE_BASE_EMISSIVE_INTENSITY,
        }
    }
}

impl BookConfig {
    /// Bones per page chain.
    pub fn bone_count(&self) -> usize {
        self.segments + 1
    }

    /// Delay before the next scheduler step when `distance` pages remain.
    pub fn tick_delay(&self, distance: usize) -> Duration {
        if distance > self.fast_tick_min_distance {
            self.fast_tick
        } else {
            self.slow_tick
        }
    }
}
