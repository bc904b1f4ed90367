use folio_core::{Book, Ticker};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedBook = Rc<RefCell<Book<TimeoutTicker>>>;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `setTimeout`-backed ticker. One JS callback is reused for every tick; it
/// is installed once the book exists, see [`TimeoutTicker::bind`].
#[derive(Default)]
pub struct TimeoutTicker {
    callback: TickSlot,
}

impl TimeoutTicker {
    /// Point the tick callback at `book`. Holds only a weak handle so a
    /// dropped book ends the chain.
    pub fn bind(book: &SharedBook) {
        let weak: Weak<RefCell<Book<TimeoutTicker>>> = Rc::downgrade(book);
        let slot = book.borrow().ticker().callback.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(book) = weak.upgrade() else {
                return;
            };
            // A tick landing while the book is borrowed elsewhere is dropped;
            // the pending target is kept so the next request resumes it.
            let Ok(mut book) = book.try_borrow_mut() else {
                log::warn!("[ticker] book busy, tick dropped");
                return;
            };
            book.on_tick();
        }) as Box<dyn FnMut()>));
    }
}

impl Ticker for TimeoutTicker {
    type Handle = i32;

    fn schedule(&mut self, delay: Duration) -> i32 {
        let slot = self.callback.borrow();
        let (Some(window), Some(cb)) = (web::window(), slot.as_ref()) else {
            log::error!("[ticker] cannot schedule: no window or callback");
            return 0;
        };
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                crate::input::timeout_ms(delay),
            )
            .unwrap_or_else(|e| {
                log::error!("[ticker] setTimeout failed: {:?}", e);
                0
            })
    }

    fn cancel(&mut self, handle: i32) {
        if let Some(window) = web::window() {
            window.clear_timeout_with_handle(handle);
        }
    }
}
