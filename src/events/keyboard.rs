use crate::dom;
use crate::input::{nav_for_key, NavCommand};
use crate::ticker::SharedBook;
use web_sys as web;

/// Arrow keys page through the book; Home closes it and End opens every page.
pub fn wire_global_keydown(book: SharedBook) {
    let Some(window) = web::window() else {
        return;
    };
    dom::add_listener(&window, "keydown", move |ev: web::KeyboardEvent| {
        if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
            return;
        }
        let Some(cmd) = nav_for_key(&ev.key()) else {
            return;
        };
        ev.prevent_default();
        let Ok(mut book) = book.try_borrow_mut() else {
            return;
        };
        let outcome = match cmd {
            NavCommand::Next => book.next_page(),
            NavCommand::Previous => book.previous_page(),
            NavCommand::Close => book.close(),
            NavCommand::OpenAll => book.open_all(),
        };
        log::debug!("[keyboard] {:?} -> {:?}", cmd, outcome);
    });
}
