// Host-side tests for skinning whole books and picking pages with rays.

use folio_core::geometry::PageMesh;
use folio_core::skin::SkinnedBook;
use folio_core::*;
use glam::Vec3;
use std::time::Duration;

struct NoopTicker;

impl Ticker for NoopTicker {
    type Handle = ();

    fn schedule(&mut self, _delay: Duration) {}

    fn cancel(&mut self, _handle: ()) {}
}

fn settled_book(pages: usize) -> (Book<NoopTicker>, SkinnedBook) {
    let manifest = ContentManifest::new(
        (0..pages)
            .map(|i| PageContent {
                front: ContentId::new(format!("f{i}")),
                back: ContentId::new(format!("b{i}")),
            })
            .collect(),
    );
    let mut book = Book::new(&manifest, BookConfig::default(), NoopTicker).unwrap();
    let mut now = 0.0;
    for _ in 0..600 {
        book.update(1.0 / 60.0, now);
        now += 1000.0 / 60.0;
    }
    let mut skinned = SkinnedBook::new(PageMesh::build(book.config().segments), pages);
    skinned.refresh(&book);
    (book, skinned)
}

#[test]
fn closed_book_faces_the_camera() {
    let (_, skinned) = settled_book(3);
    let cover = skinned.page_vertices(0);
    assert!(!cover.is_empty());
    for v in cover {
        assert!(v.position[0] > -0.01 && v.position[0] < PAGE_WIDTH + 0.01);
        assert!(v.position[2].abs() < 0.01);
    }
}

#[test]
fn ray_picks_the_cover_first() {
    let (_, skinned) = settled_book(3);
    let hit = skinned
        .pick(Vec3::new(0.6, 0.1, 4.0), Vec3::NEG_Z)
        .expect("ray through the cover");
    assert_eq!(hit.page, 0);
    assert!((hit.distance - (4.0 - PAGE_DEPTH / 2.0)).abs() < 1e-2);
}

#[test]
fn ray_beside_the_book_misses() {
    let (_, skinned) = settled_book(3);
    assert!(skinned.pick(Vec3::new(5.0, 0.0, 4.0), Vec3::NEG_Z).is_none());
    assert!(skinned.pick(Vec3::new(0.6, 0.0, 4.0), Vec3::Z).is_none());
}

#[test]
fn camera_center_ray_hits_cover_edge_region() {
    let (_, skinned) = settled_book(2);
    let cam = Camera::book_view(1.0);
    let (o, d) = cam.ray(0.1, 0.0);
    assert_eq!(skinned.pick(o, d).map(|h| h.page), Some(0));
}

#[test]
fn disposed_book_detaches_every_page() {
    let (mut book, mut skinned) = settled_book(3);
    book.dispose();
    skinned.refresh(&book);
    for i in 0..3 {
        assert!(skinned.page_vertices(i).is_empty());
    }
    assert!(skinned.pick(Vec3::new(0.6, 0.1, 4.0), Vec3::NEG_Z).is_none());
}
