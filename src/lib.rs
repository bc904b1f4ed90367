#![cfg(target_arch = "wasm32")]
use folio_core::geometry::PageMesh;
use folio_core::skin::SkinnedBook;
use folio_core::{Book, BookConfig, ContentManifest, Side};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod content;
mod dom;
mod events;
mod frame;
mod gallery;
mod input;
mod render;
mod ticker;

use ticker::{SharedBook, TimeoutTicker};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    if let Some(window) = web::window() {
        dom::add_listener(&window, "resize", move |_: web::Event| {
            dom::sync_canvas_backing_size(&canvas_resize);
        });
    }
}

fn wire_dispose_on_pagehide(book: &SharedBook) {
    let book = book.clone();
    if let Some(window) = web::window() {
        dom::add_listener(&window, "pagehide", move |_: web::Event| {
            if let Ok(mut b) = book.try_borrow_mut() {
                b.dispose();
            }
        });
    }
}

/// Fetch every page face concurrently; each one is uploaded as it arrives.
fn load_pictures(book: &SharedBook, gpu: &Rc<RefCell<render::GpuState<'static>>>) {
    let faces: Vec<_> = book
        .borrow()
        .pages()
        .iter()
        .flat_map(|p| {
            [
                (p.index(), Side::Front, p.front().clone()),
                (p.index(), Side::Back, p.back().clone()),
            ]
        })
        .collect();
    for (index, side, id) in faces {
        let gpu = gpu.clone();
        spawn_local(async move {
            let picture = content::load_face(&id, index, side).await;
            gpu.borrow_mut().set_picture(index, side, &picture);
        });
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let cells = gallery::load_grid(&document);
    if cells > 0 {
        log::info!("[gallery] {} grid cells", cells);
    }

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let manifest = ContentManifest::portfolio();
    let config = BookConfig::default();
    let segments = config.segments;
    let book: SharedBook = Rc::new(RefCell::new(Book::new(
        &manifest,
        config,
        TimeoutTicker::default(),
    )?));
    TimeoutTicker::bind(&book);
    let page_count = book.borrow().page_count();
    log::info!("[book] {} pages", page_count);

    let skinned = Rc::new(RefCell::new(SkinnedBook::new(PageMesh::build(segments), page_count)));
    skinned.borrow_mut().refresh(&*book.borrow());

    let mesh = skinned.borrow().mesh().clone();
    let gpu = frame::init_gpu(&canvas, &mesh, page_count)
        .await
        .ok_or_else(|| anyhow::anyhow!("WebGPU unavailable"))?;
    let gpu = Rc::new(RefCell::new(gpu));
    load_pictures(&book, &gpu);

    events::wire_global_keydown(book.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        book: book.clone(),
        skinned: skinned.clone(),
        gpu: gpu.clone(),
        hover_index: Rc::new(RefCell::new(None)),
    });
    wire_dispose_on_pagehide(&book);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        book,
        skinned,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
