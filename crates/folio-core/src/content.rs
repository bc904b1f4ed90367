//! Resolution of page surfaces: a decoded picture or a placeholder.

use thiserror::Error;

use crate::manifest::{ContentId, Side};
use crate::placeholder::{placeholder, PlaceholderSurface};

pub const IMAGE_ROOT: &str = "/images/bmw";

#[derive(Debug, Error, Clone, PartialEq)]
#[error("failed to load {path}: {reason}")]
pub struct LoadError {
    pub path: String,
    pub reason: String,
}

/// A page face ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub enum Surface<I> {
    Image(I),
    Placeholder(PlaceholderSurface),
}

pub fn image_path(id: &ContentId) -> String {
    format!("{}/{}.jpg", IMAGE_ROOT, id)
}

/// Turn a load result into something drawable. Failures never propagate.
pub fn resolve<I>(
    loaded: Result<I, LoadError>,
    id: &ContentId,
    page_index: usize,
    side: Side,
) -> Surface<I> {
    match loaded {
        Ok(image) => Surface::Image(image),
        Err(e) => {
            log::warn!("[content] page {} {}: {}", page_index, side.label(), e);
            Surface::Placeholder(placeholder(id, page_index, side))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_pattern() {
        assert_eq!(image_path(&ContentId::new("bmw-01")), "/images/bmw/bmw-01.jpg");
    }

    #[test]
    fn failure_becomes_placeholder() {
        let id = ContentId::new("missing");
        let s: Surface<()> = resolve(
            Err(LoadError {
                path: image_path(&id),
                reason: "404".into(),
            }),
            &id,
            2,
            Side::Back,
        );
        match s {
            Surface::Placeholder(p) => assert_eq!(p.labels[0].text, "Page 2 Back"),
            Surface::Image(_) => panic!("expected placeholder"),
        }
        assert_eq!(resolve(Ok(7u8), &id, 2, Side::Back), Surface::Image(7u8));
    }
}
