//! Page box mesh with two-bone skin weights.
//!
//! The box spans `x ∈ [0, width]` from the spine, is centered on `y` and `z`,
//! and is split into `segments` columns along `x` so it can bend. Every vertex
//! is weighted between the bone at its column start and the next one.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::constants::{PAGE_DEPTH, PAGE_HEIGHT, PAGE_HEIGHT_SEGMENTS, PAGE_WIDTH};
use crate::material::SurfaceKind;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PageVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SkinWeights {
    pub joints: [u16; 2],
    pub weights: [f32; 2],
}

/// Index range drawn with one surface material.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SurfaceRange {
    pub kind: SurfaceKind,
    pub start: u32,
    pub count: u32,
}

#[derive(Clone, Debug)]
pub struct PageMesh {
    pub vertices: Vec<PageVertex>,
    pub skin: Vec<SkinWeights>,
    pub indices: Vec<u32>,
    pub groups: SmallVec<[SurfaceRange; 6]>,
    pub segments: usize,
    pub segment_width: f32,
}

struct Face {
    kind: SurfaceKind,
    origin: Vec3,
    u: Vec3,
    v: Vec3,
    u_segs: usize,
    v_segs: usize,
    mirror_v: bool,
}

impl PageMesh {
    pub fn build(segments: usize) -> Self {
        let (w, h, d) = (PAGE_WIDTH, PAGE_HEIGHT, PAGE_DEPTH);
        let (hh, hd) = (h / 2.0, d / 2.0);
        let hs = PAGE_HEIGHT_SEGMENTS;
        let faces = [
            Face {
                kind: SurfaceKind::Edge,
                origin: Vec3::new(w, -hh, hd),
                u: Vec3::new(0.0, 0.0, -d),
                v: Vec3::new(0.0, h, 0.0),
                u_segs: 1,
                v_segs: hs,
                mirror_v: true,
            },
            Face {
                kind: SurfaceKind::Spine,
                origin: Vec3::new(0.0, -hh, -hd),
                u: Vec3::new(0.0, 0.0, d),
                v: Vec3::new(0.0, h, 0.0),
                u_segs: 1,
                v_segs: hs,
                mirror_v: true,
            },
            Face {
                kind: SurfaceKind::Top,
                origin: Vec3::new(0.0, hh, hd),
                u: Vec3::new(w, 0.0, 0.0),
                v: Vec3::new(0.0, 0.0, -d),
                u_segs: segments,
                v_segs: 1,
                mirror_v: false,
            },
            Face {
                kind: SurfaceKind::Bottom,
                origin: Vec3::new(0.0, -hh, -hd),
                u: Vec3::new(w, 0.0, 0.0),
                v: Vec3::new(0.0, 0.0, d),
                u_segs: segments,
                v_segs: 1,
                mirror_v: false,
            },
            Face {
                kind: SurfaceKind::Front,
                origin: Vec3::new(0.0, -hh, hd),
                u: Vec3::new(w, 0.0, 0.0),
                v: Vec3::new(0.0, h, 0.0),
                u_segs: segments,
                v_segs: hs,
                mirror_v: true,
            },
            Face {
                kind: SurfaceKind::Back,
                origin: Vec3::new(w, -hh, -hd),
                u: Vec3::new(-w, 0.0, 0.0),
                v: Vec3::new(0.0, h, 0.0),
                u_segs: segments,
                v_segs: hs,
                mirror_v: true,
            },
        ];

        let mut mesh = Self {
            vertices: Vec::new(),
            skin: Vec::new(),
            indices: Vec::new(),
            groups: SmallVec::new(),
            segments,
            segment_width: w / segments as f32,
        };
        for face in &faces {
            mesh.push_face(face);
        }
        mesh
    }

    fn push_face(&mut self, face: &Face) {
        let base = self.vertices.len() as u32;
        let start = self.indices.len() as u32;
        let normal = face.u.cross(face.v).normalize();
        let cols = face.u_segs + 1;

        for b in 0..=face.v_segs {
            for a in 0..=face.u_segs {
                let uv = Vec2::new(
                    a as f32 / face.u_segs as f32,
                    b as f32 / face.v_segs as f32,
                );
                let p = face.origin + face.u * uv.x + face.v * uv.y;
                let tex_v = if face.mirror_v { 1.0 - uv.y } else { uv.y };
                self.vertices.push(PageVertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                    uv: [uv.x, tex_v],
                });
                self.skin.push(self.skin_for(p.x));
            }
        }

        for b in 0..face.v_segs {
            for a in 0..face.u_segs {
                let i00 = base + (b * cols + a) as u32;
                let i10 = i00 + 1;
                let i01 = i00 + cols as u32;
                let i11 = i01 + 1;
                self.indices
                    .extend_from_slice(&[i00, i10, i11, i00, i11, i01]);
            }
        }

        self.groups.push(SurfaceRange {
            kind: face.kind,
            start,
            count: self.indices.len() as u32 - start,
        });
    }

    fn skin_for(&self, x: f32) -> SkinWeights {
        let last = self.segments as u16;
        let s = (x / self.segment_width).max(0.0);
        let joint = (s.floor() as u16).min(last);
        let weight = if joint == last { 0.0 } else { s - s.floor() };
        SkinWeights {
            joints: [joint, (joint + 1).min(last)],
            weights: [1.0 - weight, weight],
        }
    }
}
