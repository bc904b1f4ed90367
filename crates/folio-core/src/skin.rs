//! Bone chain transforms and CPU skinning of a page mesh.

use glam::{Mat4, Vec3};

use crate::constants::{BOOK_ROOT_ROTATION_Y, PAGE_DEPTH};
use crate::book::Book;
use crate::geometry::{PageMesh, PageVertex};
use crate::page::{Page, Segment};
use crate::pick::{pick_page, PageHit};
use crate::scheduler::Ticker;

fn segment_rotation(segment: &Segment) -> Mat4 {
    Mat4::from_rotation_x(segment.fold.value) * Mat4::from_rotation_y(segment.bend.value)
}

/// Transform shared by every page: the book is turned so the cover faces the viewer.
pub fn book_root() -> Mat4 {
    Mat4::from_rotation_y(BOOK_ROOT_ROTATION_Y)
}

/// World matrix of every bone of `page`. The first segment's rotation turns
/// the whole page around the spine; later segments hang off their parent at
/// `segment_width` along `x`.
pub fn bone_matrices(page: &Page, segment_width: f32) -> Vec<Mat4> {
    let segments = page.segments();
    let mut out = Vec::with_capacity(segments.len());
    let Some((first, rest)) = segments.split_first() else {
        return out;
    };
    let stack_offset = Mat4::from_translation(Vec3::new(0.0, 0.0, -(page.index() as f32) * PAGE_DEPTH));
    let mut world = book_root() * segment_rotation(first) * stack_offset;
    out.push(world);
    let link = Mat4::from_translation(Vec3::new(segment_width, 0.0, 0.0));
    for segment in rest {
        world = world * link * segment_rotation(segment);
        out.push(world);
    }
    out
}

/// Skin `mesh` with `bones` into `out` (world-space positions and normals).
pub fn skin_into(mesh: &PageMesh, bones: &[Mat4], out: &mut Vec<PageVertex>) {
    let skin_mats = bones
        .iter()
        .enumerate()
        .map(|(i, world)| {
            *world * Mat4::from_translation(Vec3::new(-(i as f32) * mesh.segment_width, 0.0, 0.0))
        })
        .collect::<Vec<_>>();

    out.clear();
    out.reserve(mesh.vertices.len());
    for (v, s) in mesh.vertices.iter().zip(&mesh.skin) {
        let p = Vec3::from_array(v.position);
        let n = Vec3::from_array(v.normal);
        let mut pos = Vec3::ZERO;
        let mut nrm = Vec3::ZERO;
        for (joint, weight) in s.joints.iter().zip(s.weights) {
            if weight == 0.0 {
                continue;
            }
            let Some(m) = skin_mats.get(*joint as usize) else {
                continue;
            };
            pos += m.transform_point3(p) * weight;
            nrm += m.transform_vector3(n) * weight;
        }
        out.push(PageVertex {
            position: pos.to_array(),
            normal: nrm.normalize_or_zero().to_array(),
            uv: v.uv,
        });
    }
}

/// Shared page mesh plus the current skinned vertices of every page.
#[derive(Clone, Debug)]
pub struct SkinnedBook {
    mesh: PageMesh,
    pages: Vec<Vec<PageVertex>>,
}

impl SkinnedBook {
    pub fn new(mesh: PageMesh, page_count: usize) -> Self {
        Self {
            mesh,
            pages: vec![Vec::new(); page_count],
        }
    }

    pub fn mesh(&self) -> &PageMesh {
        &self.mesh
    }

    pub fn page_vertices(&self, index: usize) -> &[PageVertex] {
        self.pages.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Re-skin every page from the book's current segment rotations.
    /// A disposed book detaches every page: no vertices, nothing to pick.
    pub fn refresh<T: Ticker>(&mut self, book: &Book<T>) {
        if book.is_disposed() {
            self.pages.iter_mut().for_each(Vec::clear);
            return;
        }
        self.pages.resize_with(book.page_count(), Vec::new);
        for (page, out) in book.pages().iter().zip(self.pages.iter_mut()) {
            let bones = bone_matrices(page, self.mesh.segment_width);
            skin_into(&self.mesh, &bones, out);
        }
    }

    pub fn pick(&self, origin: Vec3, dir: Vec3) -> Option<PageHit> {
        pick_page(
            origin,
            dir,
            &self.mesh.indices,
            self.pages.iter().enumerate().map(|(i, v)| (i, v.as_slice())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BookConfig;

    #[test]
    fn rest_pose_is_book_root_only() {
        let config = BookConfig::default();
        let page = Page::new(0, "a".into(), "b".into(), 0, 1, &config);
        let mesh = PageMesh::build(config.segments);
        let bones = bone_matrices(&page, mesh.segment_width);
        assert_eq!(bones.len(), 31);
        let mut out = Vec::new();
        skin_into(&mesh, &bones, &mut out);
        assert_eq!(out.len(), mesh.vertices.len());
        for (skinned, rest) in out.iter().zip(&mesh.vertices) {
            let expected = book_root().transform_point3(Vec3::from_array(rest.position));
            let got = Vec3::from_array(skinned.position);
            assert!((got - expected).length() < 1e-4, "{got} vs {expected}");
        }
    }

    #[test]
    fn bent_chain_keeps_segment_lengths() {
        let config = BookConfig::default();
        let mut page = Page::new(2, "a".into(), "b".into(), 1, 4, &config);
        for f in 0..30 {
            page.update(1.0 / 60.0, f as f64 * 16.0, &config);
        }
        let mesh = PageMesh::build(config.segments);
        let bones = bone_matrices(&page, mesh.segment_width);
        for pair in bones.windows(2) {
            let a = pair[0].transform_point3(Vec3::ZERO);
            let b = pair[1].transform_point3(Vec3::ZERO);
            assert!(((b - a).length() - mesh.segment_width).abs() < 1e-5);
        }
    }
}
