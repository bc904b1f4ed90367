//! One page of the book: turn state, highlight and the damped segment chain.

use crate::config::BookConfig;
use crate::damp::Damped;
use crate::highlight::Highlight;
use crate::manifest::ContentId;
use crate::pose::{base_rotation, segment_target, turn_progress};

/// One rigid link of a page's bone chain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    /// Rotation about the spine (Y) axis.
    pub bend: Damped,
    /// Crease tilt about the X axis.
    pub fold: Damped,
}

#[derive(Clone, Debug)]
pub struct Page {
    index: usize,
    front: ContentId,
    back: ContentId,
    settled_position: usize,
    is_open: bool,
    is_book_closed: bool,
    // `None` until the first frame, which always stamps a turn
    last_open: Option<bool>,
    last_turned_at: Option<f64>,
    highlight: Highlight,
    segments: Vec<Segment>,
}

impl Page {
    pub fn new(
        index: usize,
        front: ContentId,
        back: ContentId,
        settled: usize,
        page_count: usize,
        config: &BookConfig,
    ) -> Self {
        let is_open = settled > index;
        Self {
            index,
            front,
            back,
            settled_position: settled,
            is_open,
            is_book_closed: settled == 0 || settled == page_count,
            last_open: None,
            last_turned_at: None,
            highlight: Highlight::new(config.highlight_intensity, config.highlight_blend)
                .with_intensity(config.highlight_start),
            segments: vec![Segment::default(); config.bone_count()],
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn front(&self) -> &ContentId {
        &self.front
    }

    pub fn back(&self) -> &ContentId {
        &self.back
    }

    pub fn settled_position(&self) -> usize {
        self.settled_position
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_book_closed(&self) -> bool {
        self.is_book_closed
    }

    pub fn last_turned_at(&self) -> Option<f64> {
        self.last_turned_at
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_highlighted()
    }

    pub fn highlight_intensity(&self) -> f32 {
        self.highlight.intensity()
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlight.set_highlighted(highlighted);
    }

    /// Apply the scheduler's settled cursor. The only writer of the open flags.
    pub(crate) fn sync(&mut self, settled: usize, page_count: usize) {
        self.settled_position = settled;
        self.is_open = settled > self.index;
        self.is_book_closed = settled == 0 || settled == page_count;
    }

    /// Per-frame update. `delta` is the frame time in seconds, `now_ms` the
    /// wall clock used to time turn animations.
    pub fn update(&mut self, delta: f32, now_ms: f64, config: &BookConfig) {
        self.highlight.step();

        if self.last_open != Some(self.is_open) {
            self.last_turned_at = Some(now_ms);
            self.last_open = Some(self.is_open);
        }

        let progress = match self.last_turned_at {
            Some(at) => turn_progress(now_ms - at, config.turn_duration_ms),
            None => 0.0,
        };
        let base = base_rotation(self.is_open, self.is_book_closed, self.index, config);
        let bone_count = self.segments.len();

        for (i, segment) in self.segments.iter_mut().enumerate() {
            let target = segment_target(i, bone_count, base, progress, self.is_book_closed, config);
            segment
                .bend
                .step_angle(target.bend, config.bend_smooth_time, delta);
            segment
                .fold
                .step_angle(target.fold, config.fold_smooth_time, delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(index: usize) -> Page {
        Page::new(index, "f".into(), "b".into(), 0, 4, &BookConfig::default())
    }

    #[test]
    fn segments_fixed_length() {
        let mut p = page(1);
        assert_eq!(p.segments().len(), 31);
        p.sync(2, 4);
        p.update(0.016, 0.0, &BookConfig::default());
        assert_eq!(p.segments().len(), 31);
    }

    #[test]
    fn turn_stamp_only_on_flip() {
        let c = BookConfig::default();
        let mut p = page(1);
        assert_eq!(p.last_turned_at(), None);
        p.update(0.016, 100.0, &c);
        assert_eq!(p.last_turned_at(), Some(100.0), "first frame plays the curl");
        p.update(0.016, 150.0, &c);
        assert_eq!(p.last_turned_at(), Some(100.0));
        p.sync(2, 4);
        p.update(0.016, 200.0, &c);
        assert_eq!(p.last_turned_at(), Some(200.0));
        p.sync(3, 4);
        p.update(0.016, 300.0, &c);
        assert_eq!(p.last_turned_at(), Some(200.0), "still open, no new stamp");
        p.sync(1, 4);
        p.update(0.016, 400.0, &c);
        assert_eq!(p.last_turned_at(), Some(400.0));
    }

    #[test]
    fn closed_book_cover_swings_to_base() {
        let c = BookConfig::default();
        let mut p = page(0);
        for f in 0..600 {
            p.update(1.0 / 60.0, f as f64 * 16.0, &c);
        }
        let segs = p.segments();
        assert!((segs[0].bend.value - std::f32::consts::FRAC_PI_2).abs() < 1e-2);
        for s in &segs[1..] {
            assert!(s.bend.value.abs() < 1e-2);
            assert!(s.fold.value.abs() < 1e-2);
        }
    }
}
