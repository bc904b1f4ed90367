// Host-side integration tests for the page-turn scheduler and the book aggregate.

use folio_core::*;
use std::time::Duration;

/// Timer stand-in: records every schedule; tests fire the pending tick by hand.
#[derive(Default)]
struct ManualTicker {
    next_id: u32,
    scheduled: Vec<(u32, Duration)>,
    pending: Vec<u32>,
}

impl Ticker for ManualTicker {
    type Handle = u32;

    fn schedule(&mut self, delay: Duration) -> u32 {
        self.next_id += 1;
        self.scheduled.push((self.next_id, delay));
        self.pending.push(self.next_id);
        self.next_id
    }

    fn cancel(&mut self, handle: u32) {
        self.pending.retain(|id| *id != handle);
    }
}

fn manifest(pages: usize) -> ContentManifest {
    ContentManifest::new(
        (0..pages)
            .map(|i| PageContent {
                front: ContentId::new(format!("f{i}")),
                back: ContentId::new(format!("b{i}")),
            })
            .collect(),
    )
}

fn book(pages: usize) -> Book<ManualTicker> {
    Book::new(&manifest(pages), BookConfig::default(), ManualTicker::default()).unwrap()
}

/// Fire the single pending tick.
fn fire(book: &mut Book<ManualTicker>) -> StepOutcome {
    assert_eq!(book.ticker().pending.len(), 1, "exactly one tick may be pending");
    book.ticker_mut().pending.clear();
    book.on_tick()
}

/// Fire ticks until the chain stops; returns the number of moves.
fn run_to_settle(book: &mut Book<ManualTicker>) -> usize {
    let mut moves = 0;
    for _ in 0..1000 {
        if book.ticker().pending.is_empty() {
            return moves;
        }
        match fire(book) {
            StepOutcome::Settled => return moves,
            StepOutcome::Stepped { .. } => moves += 1,
        }
    }
    panic!("scheduler did not settle");
}

fn assert_flags_consistent(book: &Book<ManualTicker>) {
    let settled = book.settled();
    let closed = settled == 0 || settled == book.page_count();
    for p in book.pages() {
        assert_eq!(p.is_open(), settled > p.index(), "page {}", p.index());
        assert_eq!(p.is_book_closed(), closed, "page {}", p.index());
        assert_eq!(p.settled_position(), settled);
    }
}

fn ms(d: &[(u32, Duration)]) -> Vec<u128> {
    d.iter().map(|(_, d)| d.as_millis()).collect()
}

#[test]
fn new_book_starts_closed() {
    let b = book(5);
    assert_eq!(b.settled(), 0);
    assert!(!b.has_pending_tick());
    for p in b.pages() {
        assert!(!p.is_open());
        assert!(p.is_book_closed());
        assert_eq!(p.segments().len(), 31);
    }
}

#[test]
fn empty_manifest_is_rejected() {
    let r = Book::new(&ContentManifest::default(), BookConfig::default(), ManualTicker::default());
    assert!(matches!(r, Err(BookError::EmptyManifest)));
}

#[test]
fn click_closed_first_page_opens_it() {
    let mut b = book(5);
    let out = b.on_page_click(0).unwrap();
    assert_eq!(
        out,
        StepOutcome::Stepped {
            settled: 1,
            delay: Duration::from_millis(150)
        }
    );
    assert_eq!(run_to_settle(&mut b), 0);
    assert_eq!(b.settled(), 1);
    assert!(b.page(0).unwrap().is_open());
    for i in 1..5 {
        assert!(!b.page(i).unwrap().is_open());
    }
    assert!(!b.page(0).unwrap().is_book_closed());
    assert_flags_consistent(&b);
}

#[test]
fn click_open_last_page_from_fully_open() {
    let mut b = book(5);
    b.open_all();
    run_to_settle(&mut b);
    assert_eq!(b.settled(), 5);
    assert!(b.page(4).unwrap().is_open());

    b.on_page_click(4);
    run_to_settle(&mut b);
    assert_eq!(b.settled(), 4);
    assert!(!b.page(4).unwrap().is_open());
    assert!(b.page(3).unwrap().is_open());
    assert!(!b.page(4).unwrap().is_book_closed());
    assert_flags_consistent(&b);
}

#[test]
fn open_all_tick_delays() {
    let mut b = book(5);
    b.request_page(5);
    let moves = 1 + run_to_settle(&mut b);
    assert_eq!(moves, 5);
    assert_eq!(ms(&b.ticker().scheduled), vec![50, 50, 50, 150, 150]);
    assert!(!b.has_pending_tick());
    assert_flags_consistent(&b);
}

#[test]
fn step_count_equals_distance() {
    for (from, to) in [(0usize, 7usize), (7, 2), (3, 3), (8, 0)] {
        let mut b = book(8);
        b.request_page(from);
        run_to_settle(&mut b);
        assert_eq!(b.settled(), from);
        let before = b.ticker().scheduled.len();
        let first = b.request_page(to);
        let moves = run_to_settle(&mut b) + usize::from(first != StepOutcome::Settled);
        assert_eq!(moves, from.abs_diff(to), "{from} -> {to}");
        assert_eq!(b.ticker().scheduled.len() - before, from.abs_diff(to));
        assert_flags_consistent(&b);
    }
}

#[test]
fn delays_follow_remaining_distance() {
    let mut b = book(10);
    b.request_page(10);
    run_to_settle(&mut b);
    let delays = ms(&b.ticker().scheduled);
    // Distances before each move: 10, 9, ..., 1
    let expected = (1..=10u128)
        .rev()
        .map(|d| if d > 2 { 50 } else { 150 })
        .collect::<Vec<_>>();
    assert_eq!(delays, expected);
}

#[test]
fn requesting_settled_value_is_noop() {
    let mut b = book(5);
    assert_eq!(b.request_page(0), StepOutcome::Settled);
    assert!(b.ticker().scheduled.is_empty());
    assert!(!b.has_pending_tick());
}

#[test]
fn rapid_requests_keep_single_timer_chain() {
    let mut b = book(6);
    b.request_page(6);
    fire(&mut b);
    b.request_page(1);
    assert_eq!(b.ticker().pending.len(), 1, "only the newest tick may be pending");
    b.request_page(4);
    assert_eq!(b.ticker().pending.len(), 1);
    run_to_settle(&mut b);
    assert_eq!(b.settled(), 4);
    assert_flags_consistent(&b);
}

#[test]
fn out_of_range_target_is_clamped() {
    let mut b = book(3);
    b.request_page(99);
    assert_eq!(b.target(), 3);
    run_to_settle(&mut b);
    assert_eq!(b.settled(), 3);
    assert_flags_consistent(&b);
}

#[test]
fn click_unknown_page_is_ignored() {
    let mut b = book(3);
    assert_eq!(b.on_page_click(3), None);
    assert_eq!(b.target(), 0);
}

#[test]
fn dispose_cancels_pending_tick() {
    let mut b = book(5);
    b.request_page(5);
    assert!(b.has_pending_tick());
    b.dispose();
    assert!(b.is_disposed());
    assert!(!b.has_pending_tick());
    assert!(b.ticker().pending.is_empty());
    let settled = b.settled();
    assert_eq!(b.on_tick(), StepOutcome::Settled);
    assert_eq!(b.request_page(0), StepOutcome::Settled);
    assert_eq!(b.settled(), settled);
}

#[test]
fn keyboard_style_navigation() {
    let mut b = book(4);
    b.next_page();
    b.next_page();
    assert_eq!(b.target(), 2);
    run_to_settle(&mut b);
    b.previous_page();
    run_to_settle(&mut b);
    assert_eq!(b.settled(), 1);
    b.close();
    run_to_settle(&mut b);
    assert_eq!(b.settled(), 0);
    b.previous_page();
    assert_eq!(b.target(), 0);
    b.open_all();
    run_to_settle(&mut b);
    b.next_page();
    assert_eq!(b.target(), 4);
}

#[test]
fn hover_drives_highlight() {
    let mut b = book(3);
    b.on_page_hover(1, true);
    for _ in 0..10 {
        b.update(1.0 / 60.0, 0.0);
    }
    // Every page starts glowing at 0.1
    let hovered = 0.12 - 0.02 * 0.9f32.powi(10);
    assert!((b.page(1).unwrap().highlight_intensity() - hovered).abs() < 1e-5);
    let idle = 0.1 * 0.9f32.powi(10);
    assert!((b.page(0).unwrap().highlight_intensity() - idle).abs() < 1e-5);
    b.on_page_hover(1, false);
    assert!(!b.page(1).unwrap().is_highlighted());
    b.on_page_hover(42, true);
}

#[test]
fn unhovered_page_glow_fades_out() {
    use folio_core::material::SurfaceKind;
    let mut b = book(3);
    let front = *b.material(SurfaceKind::Front);
    let first = front.frame_emissive_intensity(b.page(2).unwrap().highlight_intensity());
    assert!((first - PAGE_BASE_EMISSIVE_INTENSITY).abs() < 1e-6);
    for _ in 0..300 {
        b.update(1.0 / 60.0, 0.0);
    }
    for page in b.pages() {
        let drawn = front.frame_emissive_intensity(page.highlight_intensity());
        assert!(drawn < 1e-6, "page {} still glows at {drawn}", page.index());
    }
}

#[test]
fn turned_page_swings_and_settles() {
    let mut b = book(3);
    b.on_page_click(0);
    let mut now = 1_000.0;
    for _ in 0..600 {
        b.update(1.0 / 60.0, now);
        now += 1000.0 / 60.0;
    }
    let page = b.page(0).unwrap();
    assert_eq!(page.last_turned_at(), Some(1_000.0));
    // Open, book not closed: -90° plus a zero stagger for page 0; the spine
    // segment carries the inside curve only once the turn has finished.
    let base = -std::f32::consts::FRAC_PI_2;
    let seg0 = page.segments()[0].bend.value;
    let expected = 0.18 * 0.25f32.sin() * base;
    assert!((seg0 - expected).abs() < 1e-2, "{seg0} vs {expected}");
}
