/// Hover glow on a page's picture surfaces.
///
/// The intensity chases its target by a fixed fraction per frame; it is not
/// scaled by frame time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    highlighted: bool,
    intensity: f32,
    on_intensity: f32,
    blend: f32,
}

impl Highlight {
    pub fn new(on_intensity: f32, blend: f32) -> Self {
        Self {
            highlighted: false,
            intensity: 0.0,
            on_intensity,
            blend,
        }
    }

    /// Start from `intensity` instead of dark; the glow then settles toward
    /// its target like any other frame.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn step(&mut self) -> f32 {
        let target = if self.highlighted {
            self.on_intensity
        } else {
            0.0
        };
        self.intensity += (target - self.intensity) * self.blend;
        self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_geometric_series() {
        let mut h = Highlight::new(0.12, 0.1);
        h.set_highlighted(true);
        for k in 1..=50 {
            let v = h.step();
            let expected = 0.12 * (1.0 - 0.9f32.powi(k));
            assert!((v - expected).abs() < 1e-5, "k={k}: {v} vs {expected}");
        }
    }

    #[test]
    fn starting_glow_fades_when_not_hovered() {
        let mut h = Highlight::new(0.12, 0.1).with_intensity(0.1);
        assert_eq!(h.intensity(), 0.1);
        assert!((h.step() - 0.09).abs() < 1e-6);
        for _ in 0..300 {
            h.step();
        }
        assert!(h.intensity() < 1e-6);
    }

    #[test]
    fn fades_back_to_zero() {
        let mut h = Highlight::new(0.12, 0.1);
        h.set_highlighted(true);
        for _ in 0..100 {
            h.step();
        }
        h.set_highlighted(false);
        for _ in 0..300 {
            h.step();
        }
        assert!(h.intensity() < 1e-6);
    }
}
