use crate::dom;
use crate::input;
use crate::render::GpuState;
use crate::ticker::SharedBook;
use folio_core::skin::SkinnedBook;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub book: SharedBook,
    pub skinned: Rc<RefCell<SkinnedBook>>,
    pub gpu: Rc<RefCell<GpuState<'static>>>,
    pub hover_index: Rc<RefCell<Option<usize>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
    wire_click(&w);
}

/// Page under the canvas pixel `(x, y)`, nearest to the camera that draws the book.
fn page_at(w: &InputWiring, x: f32, y: f32) -> Option<usize> {
    let ndc = input::px_to_ndc(glam::Vec2::new(x, y), w.canvas.width(), w.canvas.height());
    let camera = w.gpu.try_borrow().ok()?.camera().clone();
    let (ro, rd) = camera.ray(ndc.x, ndc.y);
    w.skinned.borrow().pick(ro, rd).map(|hit| hit.page)
}

fn set_hover(w: &InputWiring, next: Option<usize>) {
    let prev = w.hover_index.replace(next);
    let (left, entered) = input::hover_change(prev, next);
    if left.is_none() && entered.is_none() {
        return;
    }
    let Ok(mut book) = w.book.try_borrow_mut() else {
        return;
    };
    if let Some(i) = left {
        book.on_page_hover(i, false);
    }
    if let Some(i) = entered {
        book.on_page_hover(i, true);
    }
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_listener(&target, "pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        set_hover(&w, page_at(&w, pos.x, pos.y));
    });
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_listener(&target, "pointerleave", move |_: web::PointerEvent| {
        set_hover(&w, None);
    });
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_listener(&target, "click", move |ev: web::MouseEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let Some(page) = page_at(&w, pos.x, pos.y) else {
            return;
        };
        if let Ok(mut book) = w.book.try_borrow_mut() {
            if let Some(outcome) = book.on_page_click(page) {
                log::debug!("[pointer] page {} clicked: {:?}", page, outcome);
            }
        }
    });
}
