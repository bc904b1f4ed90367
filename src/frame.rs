use crate::constants::MAX_FRAME_DT;
use crate::render;
use crate::ticker::SharedBook;
use folio_core::geometry::PageMesh;
use folio_core::skin::SkinnedBook;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub book: SharedBook,
    pub skinned: Rc<RefCell<SkinnedBook>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Rc<RefCell<render::GpuState<'a>>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    /// Advance and draw one frame. Returns `false` once the book is disposed.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;

        let Ok(mut book) = self.book.try_borrow_mut() else {
            return true;
        };
        if book.is_disposed() {
            self.skinned.borrow_mut().refresh(&*book);
            self.gpu.borrow_mut().clear_pages();
            return false;
        }
        book.update(dt_sec, js_sys::Date::now());
        self.skinned.borrow_mut().refresh(&*book);

        let mut gpu = self.gpu.borrow_mut();
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        if let Err(e) = gpu.render(&*book, &*self.skinned.borrow()) {
            log::error!("render error: {:?}", e);
        }
        true
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    mesh: &PageMesh,
    page_count: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, mesh, page_count).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow_mut().frame() {
            log::info!("[frame] book disposed, render loop stopped");
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
