//! Ray picking against skinned page meshes.

use glam::Vec3;

use crate::geometry::PageVertex;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageHit {
    pub page: usize,
    pub distance: f32,
}

/// Two-sided ray/triangle intersection; returns the distance along `dir`.
#[inline]
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-9 {
        return None;
    }
    let inv = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv;
    (t >= 0.0).then_some(t)
}

/// Nearest page hit by the ray. `pages` yields `(page index, skinned vertices)`
/// sharing the same index buffer.
pub fn pick_page<'a>(
    origin: Vec3,
    dir: Vec3,
    indices: &[u32],
    pages: impl IntoIterator<Item = (usize, &'a [PageVertex])>,
) -> Option<PageHit> {
    let mut best: Option<PageHit> = None;
    for (page, vertices) in pages {
        let pos = |i: u32| vertices.get(i as usize).map(|v| Vec3::from_array(v.position));
        for tri in indices.chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) = (pos(tri[0]), pos(tri[1]), pos(tri[2])) else {
                continue;
            };
            if let Some(t) = ray_triangle(origin, dir, a, b, c) {
                match best {
                    Some(h) if t >= h.distance => {}
                    _ => best = Some(PageHit { page, distance: t }),
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_triangle_in_front() {
        let t = ray_triangle(
            Vec3::new(0.2, 0.2, 5.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        );
        assert!((t.unwrap() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn misses_outside_and_behind() {
        assert!(ray_triangle(Vec3::new(2.0, 2.0, 5.0), Vec3::NEG_Z, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
        assert!(ray_triangle(Vec3::new(0.2, 0.2, 5.0), Vec3::Z, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }
}
