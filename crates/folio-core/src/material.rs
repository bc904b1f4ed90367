//! Surface look of the six faces of a page.

use thiserror::Error;

use crate::constants::*;
use crate::manifest::Side;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MaterialError {
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("emissive intensity must be non-negative, got {0}")]
    NegativeEmissive(f32),
}

/// Which face of the page box a material applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Free edge (+x).
    Edge,
    /// Bound edge (-x).
    Spine,
    Top,
    Bottom,
    Front,
    Back,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 6] = [
        SurfaceKind::Edge,
        SurfaceKind::Spine,
        SurfaceKind::Top,
        SurfaceKind::Bottom,
        SurfaceKind::Front,
        SurfaceKind::Back,
    ];

    /// Face that shows the picture for `side`.
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Front => SurfaceKind::Front,
            Side::Back => SurfaceKind::Back,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMaterial {
    pub base_color: [f32; 3],
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    /// Sample the page picture for color (and emissive).
    pub textured: bool,
    pub transparent: bool,
}

fn unit(field: &'static str, value: f32) -> Result<f32, MaterialError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(MaterialError::OutOfUnitRange { field, value })
    }
}

impl SurfaceMaterial {
    pub fn new(
        base_color: [f32; 3],
        opacity: f32,
        roughness: f32,
        metalness: f32,
        emissive: [f32; 3],
        emissive_intensity: f32,
    ) -> Result<Self, MaterialError> {
        if emissive_intensity < 0.0 || emissive_intensity.is_nan() {
            return Err(MaterialError::NegativeEmissive(emissive_intensity));
        }
        Ok(Self {
            base_color,
            opacity: unit("opacity", opacity)?,
            roughness: unit("roughness", roughness)?,
            metalness: unit("metalness", metalness)?,
            emissive,
            emissive_intensity,
            textured: false,
            transparent: opacity < 1.0,
        })
    }

    pub fn solid(base_color: [f32; 3]) -> Result<Self, MaterialError> {
        Self::new(base_color, 1.0, 1.0, 0.0, [0.0; 3], 0.0)
    }

    /// Picture face: white multiplier, glossy, faint self illumination.
    pub fn picture() -> Result<Self, MaterialError> {
        let mut m = Self::new(
            [1.0, 1.0, 1.0],
            1.0,
            PAGE_ROUGHNESS,
            0.0,
            PAGE_BASE_EMISSIVE,
            PAGE_BASE_EMISSIVE_INTENSITY,
        )?;
        m.textured = true;
        m.transparent = true;
        Ok(m)
    }

    pub fn for_surface(kind: SurfaceKind) -> Result<Self, MaterialError> {
        match kind {
            SurfaceKind::Spine => Self::solid(SPINE_COLOR),
            SurfaceKind::Front | SurfaceKind::Back => Self::picture(),
            SurfaceKind::Edge | SurfaceKind::Top | SurfaceKind::Bottom => Self::solid(EDGE_COLOR),
        }
    }

    /// Emissive intensity to draw this frame. Picture faces take the page's
    /// blended glow as is; `emissive_intensity` is only where that glow starts.
    pub fn frame_emissive_intensity(&self, highlight: f32) -> f32 {
        if self.textured {
            highlight
        } else {
            self.emissive_intensity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            SurfaceMaterial::new([1.0; 3], 1.5, 0.5, 0.0, [0.0; 3], 0.0),
            Err(MaterialError::OutOfUnitRange {
                field: "opacity",
                value: 1.5
            })
        );
        assert!(matches!(
            SurfaceMaterial::new([1.0; 3], 1.0, 0.5, 0.0, [0.0; 3], -0.1),
            Err(MaterialError::NegativeEmissive(_))
        ));
    }

    #[test]
    fn page_faces() {
        let front = SurfaceMaterial::for_surface(SurfaceKind::Front).unwrap();
        assert!(front.textured && front.transparent);
        assert_eq!(front.emissive_intensity, 0.1);
        assert!((front.frame_emissive_intensity(0.12) - 0.12).abs() < 1e-6);
        assert_eq!(front.frame_emissive_intensity(0.0), 0.0);
        let spine = SurfaceMaterial::for_surface(SurfaceKind::Spine).unwrap();
        assert!(!spine.textured && !spine.transparent);
        assert_eq!(spine.frame_emissive_intensity(0.12), 0.0);
    }

    #[test]
    fn sides_map_to_picture_faces() {
        assert_eq!(SurfaceKind::for_side(Side::Front), SurfaceKind::Front);
        assert_eq!(SurfaceKind::for_side(Side::Back), SurfaceKind::Back);
        for side in [Side::Front, Side::Back] {
            let m = SurfaceMaterial::for_surface(SurfaceKind::for_side(side)).unwrap();
            assert!(m.textured);
        }
    }
}
