//! Page-turn scheduler.
//!
//! The settled cursor chases the requested target one page per tick. Large
//! jumps tick quickly, the last couple of pages tick slowly. The host supplies
//! the timer through [`Ticker`]; the scheduler owns at most one pending handle.

use std::time::Duration;

use crate::config::BookConfig;
use crate::page::Page;

/// A one-shot, cancellable timer source.
pub trait Ticker {
    type Handle;

    /// Arrange for the owner's tick entry point to run once after `delay`.
    fn schedule(&mut self, delay: Duration) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Settled equals target; nothing armed.
    Settled,
    /// Moved one page and armed the next tick.
    Stepped { settled: usize, delay: Duration },
}

pub struct TurnScheduler<T: Ticker> {
    ticker: T,
    pending: Option<T::Handle>,
    settled: usize,
    target: usize,
}

impl<T: Ticker> TurnScheduler<T> {
    pub fn new(ticker: T, settled: usize) -> Self {
        Self {
            ticker,
            pending: None,
            settled,
            target: settled,
        }
    }

    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    /// Replace the target and restart stepping. Does not validate `target`;
    /// an unreachable target keeps the chain ticking forever.
    pub fn request(&mut self, target: usize, pages: &mut [Page], config: &BookConfig) -> StepOutcome {
        debug_assert!(target <= pages.len(), "target {target} beyond {} pages", pages.len());
        self.cancel();
        self.target = target;
        self.step(pages, config)
    }

    /// Entry point for a fired tick.
    pub fn tick(&mut self, pages: &mut [Page], config: &BookConfig) -> StepOutcome {
        self.pending = None;
        self.step(pages, config)
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.ticker.cancel(handle);
        }
    }

    fn step(&mut self, pages: &mut [Page], config: &BookConfig) -> StepOutcome {
        if self.settled == self.target {
            return StepOutcome::Settled;
        }

        // Arm first so progress continues even if this tick's work is cut short.
        let delay = config.tick_delay(self.settled.abs_diff(self.target));
        if let Some(stale) = self.pending.take() {
            self.ticker.cancel(stale);
        }
        self.pending = Some(self.ticker.schedule(delay));

        if self.target > self.settled {
            self.settled += 1;
        } else {
            self.settled -= 1;
        }

        let page_count = pages.len();
        for page in pages.iter_mut() {
            page.sync(self.settled, page_count);
        }
        log::debug!(
            "[book] settled={} target={} next_tick={}ms",
            self.settled,
            self.target,
            delay.as_millis()
        );
        StepOutcome::Stepped {
            settled: self.settled,
            delay,
        }
    }
}
