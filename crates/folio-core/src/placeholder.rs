//! Stand-in surface for a picture that failed to load.
//!
//! Built as a pure description so any host can paint it: a white sheet with a
//! few light speckles (not on the cover) and three centered labels.

use std::hash::{Hash, Hasher};

use fnv::FnvHasher;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::constants::{PLACEHOLDER_SIZE, PLACEHOLDER_SPECKLES};
use crate::manifest::{ContentId, Side};

pub const BACKGROUND: [u8; 3] = [0xFF, 0xFF, 0xFF];
pub const SPECKLE: [u8; 3] = [0xF8, 0xF8, 0xF8];

#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderLabel {
    pub text: String,
    /// CSS font shorthand.
    pub font: &'static str,
    /// CSS color.
    pub color: &'static str,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderSurface {
    pub width: u32,
    pub height: u32,
    pub speckles: Vec<(u32, u32)>,
    pub labels: Vec<PlaceholderLabel>,
}

pub fn placeholder(id: &ContentId, page_index: usize, side: Side) -> PlaceholderSurface {
    let size = PLACEHOLDER_SIZE;
    let speckles = if page_index == 0 {
        Vec::new()
    } else {
        let mut h = FnvHasher::default();
        (id, page_index, side).hash(&mut h);
        let mut rng = StdRng::seed_from_u64(h.finish());
        (0..PLACEHOLDER_SPECKLES)
            .map(|_| (rng.gen_range(0..size), rng.gen_range(0..size)))
            .collect()
    };
    let cx = size as f32 / 2.0;
    let labels = vec![
        PlaceholderLabel {
            text: format!("Page {} {}", page_index, side.label()),
            font: "bold 24px Arial",
            color: "#333",
            x: cx,
            y: 200.0,
        },
        PlaceholderLabel {
            text: id.to_string(),
            font: "18px Arial",
            color: "#333",
            x: cx,
            y: 240.0,
        },
        PlaceholderLabel {
            text: "(Image not found)".to_string(),
            font: "14px Arial",
            color: "#666",
            x: cx,
            y: 280.0,
        },
    ];
    PlaceholderSurface {
        width: size,
        height: size,
        speckles,
        labels,
    }
}

impl PlaceholderSurface {
    /// RGBA8 pixels of the sheet and speckles, without labels.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut px = Vec::with_capacity((self.width * self.height * 4) as usize);
        for _ in 0..self.width * self.height {
            px.extend_from_slice(&[BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 0xFF]);
        }
        for &(x, y) in &self.speckles {
            let at = ((y * self.width + x) * 4) as usize;
            if let Some(p) = px.get_mut(at..at + 3) {
                p.copy_from_slice(&SPECKLE);
            }
        }
        px
    }
}
