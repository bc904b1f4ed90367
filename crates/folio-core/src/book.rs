//! The book aggregate: owns the pages and the turn scheduler, and turns UI
//! events into scheduler requests.

use thiserror::Error;

use crate::config::BookConfig;
use crate::manifest::ContentManifest;
use crate::material::{MaterialError, SurfaceKind, SurfaceMaterial};
use crate::page::Page;
use crate::scheduler::{StepOutcome, Ticker, TurnScheduler};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookError {
    #[error("content manifest has no pages")]
    EmptyManifest,
    #[error("book needs at least one segment per page")]
    NoSegments,
    #[error("invalid {kind:?} material: {source}")]
    Material {
        kind: SurfaceKind,
        #[source]
        source: MaterialError,
    },
}

pub struct Book<T: Ticker> {
    pages: Vec<Page>,
    materials: Vec<SurfaceMaterial>,
    scheduler: TurnScheduler<T>,
    config: BookConfig,
    disposed: bool,
}

impl<T: Ticker> Book<T> {
    pub fn new(manifest: &ContentManifest, config: BookConfig, ticker: T) -> Result<Self, BookError> {
        if manifest.is_empty() {
            return Err(BookError::EmptyManifest);
        }
        if config.segments == 0 {
            return Err(BookError::NoSegments);
        }
        let materials = SurfaceKind::ALL
            .into_iter()
            .map(|kind| {
                SurfaceMaterial::for_surface(kind)
                    .map_err(|source| BookError::Material { kind, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let page_count = manifest.len();
        let pages = manifest
            .pages()
            .iter()
            .enumerate()
            .map(|(i, c)| Page::new(i, c.front.clone(), c.back.clone(), 0, page_count, &config))
            .collect::<Vec<_>>();
        log::info!(
            "[book] built {} pages with {} bones each",
            page_count,
            config.bone_count()
        );
        Ok(Self {
            pages,
            materials,
            scheduler: TurnScheduler::new(ticker, 0),
            config,
            disposed: false,
        })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn material(&self, kind: SurfaceKind) -> &SurfaceMaterial {
        &self.materials[kind as usize]
    }

    pub fn settled(&self) -> usize {
        self.scheduler.settled()
    }

    pub fn target(&self) -> usize {
        self.scheduler.target()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn has_pending_tick(&self) -> bool {
        self.scheduler.has_pending()
    }

    pub fn ticker(&self) -> &T {
        self.scheduler.ticker()
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        self.scheduler.ticker_mut()
    }

    /// Ask the settled cursor to move to `target`, clamped to `[0, page_count]`.
    pub fn request_page(&mut self, target: usize) -> StepOutcome {
        if self.disposed {
            return StepOutcome::Settled;
        }
        let clamped = target.min(self.pages.len());
        if clamped != target {
            log::warn!(
                "[book] page target {} out of range, clamped to {}",
                target,
                clamped
            );
        }
        self.scheduler.request(clamped, &mut self.pages, &self.config)
    }

    /// Host callback for a fired scheduler tick.
    pub fn on_tick(&mut self) -> StepOutcome {
        if self.disposed {
            return StepOutcome::Settled;
        }
        self.scheduler.tick(&mut self.pages, &self.config)
    }

    /// Open page `index` if closed, close it (and everything after) if open.
    pub fn on_page_click(&mut self, index: usize) -> Option<StepOutcome> {
        let Some(page) = self.pages.get(index) else {
            log::debug!("[book] click on unknown page {}", index);
            return None;
        };
        let target = if page.is_open() { index } else { index + 1 };
        log::info!("[click] page {} -> target {}", index, target);
        Some(self.request_page(target))
    }

    pub fn on_page_hover(&mut self, index: usize, hovered: bool) {
        match self.pages.get_mut(index) {
            Some(page) => page.set_highlighted(hovered),
            None => log::debug!("[book] hover on unknown page {}", index),
        }
    }

    pub fn next_page(&mut self) -> StepOutcome {
        self.request_page((self.target() + 1).min(self.pages.len()))
    }

    pub fn previous_page(&mut self) -> StepOutcome {
        self.request_page(self.target().saturating_sub(1))
    }

    pub fn close(&mut self) -> StepOutcome {
        self.request_page(0)
    }

    pub fn open_all(&mut self) -> StepOutcome {
        self.request_page(self.pages.len())
    }

    /// Per-frame update of every page, in index order.
    pub fn update(&mut self, delta: f32, now_ms: f64) {
        for page in &mut self.pages {
            page.update(delta, now_ms, &self.config);
        }
    }

    /// Stop the pending tick. Later ticks and requests are ignored.
    pub fn dispose(&mut self) {
        self.scheduler.cancel();
        self.disposed = true;
        log::info!("[book] disposed");
    }
}
