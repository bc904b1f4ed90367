use crate::constants::{GRID_CELL_SELECTOR, GRID_IMAGE_ROOT};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn grid_image_path(number: usize) -> String {
    format!("{}/{}.png", GRID_IMAGE_ROOT, number)
}

/// Fill every grid cell with its numbered picture. The number label stays
/// when the picture is missing.
pub fn load_grid(document: &web::Document) -> usize {
    let cells = dom::query_all(document, GRID_CELL_SELECTOR);
    for (i, cell) in cells.iter().enumerate() {
        let number = i + 1;
        let img: web::HtmlImageElement = match document
            .create_element("img")
            .map_err(|e| anyhow::anyhow!("{:?}", e))
            .and_then(|el| el.dyn_into().map_err(|e| anyhow::anyhow!("{:?}", e)))
        {
            Ok(img) => img,
            Err(e) => {
                log::warn!("[gallery] cell {}: {:?}", number, e);
                continue;
            }
        };
        img.set_alt(&format!("Spaceship {}", number));

        let cell_ok = cell.clone();
        let img_ok = img.clone();
        dom::add_listener(&img, "load", move |_: web::Event| {
            if let Ok(Some(span)) = cell_ok.query_selector("span") {
                span.remove();
            }
            _ = cell_ok.append_child(&img_ok);
        });
        dom::add_listener(&img, "error", move |_: web::Event| {
            log::info!("[gallery] Image {}.png not found, keeping number", number);
        });
        img.set_src(&grid_image_path(number));
    }
    cells.len()
}
