//! Critically damped smoothing toward a moving target.
//!
//! Each [`Damped`] value keeps its own velocity so consecutive frames blend
//! continuously. The step is frame-rate independent: `delta` is the elapsed
//! frame time in seconds.

use std::f32::consts::{PI, TAU};

use crate::constants::DAMP_EPSILON;

/// A scalar that trails its target with a spring-like ease.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Damped {
    pub value: f32,
    velocity: f32,
}

impl Damped {
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Advance toward `target`. Returns `false` once the value has settled.
    pub fn step(&mut self, target: f32, smooth_time: f32, delta: f32) -> bool {
        if (self.value - target).abs() <= DAMP_EPSILON {
            self.value = target;
            self.velocity = 0.0;
            return false;
        }
        if delta <= 0.0 {
            return true;
        }
        let smooth_time = smooth_time.max(0.0001);
        let omega = 2.0 / smooth_time;
        let x = omega * delta;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let change = self.value - target;
        let temp = (self.velocity + omega * change) * delta;
        self.velocity = (self.velocity - omega * temp) * decay;
        let mut output = target + (change + temp) * decay;

        // Never overshoot the target.
        if (target - self.value > 0.0) == (output > target) {
            output = target;
            self.velocity = 0.0;
        }
        self.value = output;
        true
    }

    /// Like [`Damped::step`] but travels the shortest way around the circle.
    pub fn step_angle(&mut self, target: f32, smooth_time: f32, delta: f32) -> bool {
        let target = self.value + delta_angle(self.value, target);
        self.step(target, smooth_time, delta)
    }
}

/// Signed shortest angular distance from `current` to `target`, in (-π, π].
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut d = repeat(target - current, TAU);
    if d > PI {
        d -= TAU;
    }
    d
}

fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approaches_target_without_overshoot() {
        let mut d = Damped::new(0.0);
        let mut prev = 0.0;
        for _ in 0..240 {
            d.step(1.0, 0.5, 1.0 / 60.0);
            assert!(d.value >= prev, "value went backwards");
            assert!(d.value <= 1.0, "overshoot: {}", d.value);
            prev = d.value;
        }
        assert!((d.value - 1.0).abs() < 1e-3);
    }

    #[test]
    fn zero_delta_keeps_value() {
        let mut d = Damped::new(0.25);
        d.step(1.0, 0.5, 0.0);
        assert_eq!(d.value, 0.25);
    }

    #[test]
    fn snaps_inside_epsilon() {
        let mut d = Damped::new(0.9995);
        assert!(!d.step(1.0, 0.5, 0.016));
        assert_eq!(d.value, 1.0);
        assert_eq!(d.velocity(), 0.0);
    }

    #[test]
    fn delta_angle_wraps() {
        assert!((delta_angle(0.0, 3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((delta_angle(0.1, 0.3) - 0.2).abs() < 1e-5);
        assert!((delta_angle(PI - 0.1, -PI + 0.1) - 0.2).abs() < 1e-4);
    }

    #[test]
    fn angle_step_takes_short_way() {
        let mut d = Damped::new(PI - 0.05);
        d.step_angle(-PI + 0.05, 0.3, 1.0 / 60.0);
        assert!(d.value > PI - 0.05, "should move forward across ±π");
    }
}
