use anyhow::anyhow;
use folio_core::content::{image_path, resolve, LoadError, Surface};
use folio_core::placeholder::{PlaceholderSurface, BACKGROUND, SPECKLE};
use folio_core::{ContentId, Side};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Decoded page face, ready to upload as a texture.
pub enum PagePicture {
    Bitmap(web::ImageBitmap),
    Canvas(web::HtmlCanvasElement),
    Pixels { width: u32, height: u32, rgba: Vec<u8> },
}

impl PagePicture {
    pub fn size(&self) -> (u32, u32) {
        match self {
            PagePicture::Bitmap(b) => (b.width(), b.height()),
            PagePicture::Canvas(c) => (c.width(), c.height()),
            PagePicture::Pixels { width, height, .. } => (*width, *height),
        }
    }
}

fn load_error(path: &str, reason: impl std::fmt::Debug) -> LoadError {
    LoadError {
        path: path.to_string(),
        reason: format!("{:?}", reason),
    }
}

async fn fetch_bitmap(id: &ContentId) -> Result<web::ImageBitmap, LoadError> {
    let path = image_path(id);
    let window = web::window().ok_or_else(|| load_error(&path, "no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(&path))
        .await
        .map_err(|e| load_error(&path, e))?
        .dyn_into()
        .map_err(|e| load_error(&path, e))?;
    if !resp.ok() {
        return Err(load_error(&path, format!("HTTP {}", resp.status())));
    }
    let blob: web::Blob = JsFuture::from(resp.blob().map_err(|e| load_error(&path, e))?)
        .await
        .map_err(|e| load_error(&path, e))?
        .dyn_into()
        .map_err(|e| load_error(&path, e))?;
    let decode = window
        .create_image_bitmap_with_blob(&blob)
        .map_err(|e| load_error(&path, e))?;
    JsFuture::from(decode)
        .await
        .map_err(|e| load_error(&path, e))?
        .dyn_into()
        .map_err(|e| load_error(&path, e))
}

fn css_rgb(c: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}

fn paint_placeholder(surface: &PlaceholderSurface) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = crate::dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas.set_width(surface.width);
    canvas.set_height(surface.height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;

    ctx.set_fill_style_str(&css_rgb(BACKGROUND));
    ctx.fill_rect(0.0, 0.0, surface.width as f64, surface.height as f64);
    ctx.set_fill_style_str(&css_rgb(SPECKLE));
    for &(x, y) in &surface.speckles {
        ctx.fill_rect(x as f64, y as f64, 1.0, 1.0);
    }
    ctx.set_text_align("center");
    for label in &surface.labels {
        ctx.set_font(label.font);
        ctx.set_fill_style_str(label.color);
        ctx.fill_text(&label.text, label.x as f64, label.y as f64)
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(canvas)
}

/// Load one page face. Never fails: a missing picture becomes a placeholder.
pub async fn load_face(id: &ContentId, page_index: usize, side: Side) -> PagePicture {
    match resolve(fetch_bitmap(id).await, id, page_index, side) {
        Surface::Image(bitmap) => PagePicture::Bitmap(bitmap),
        Surface::Placeholder(p) => match paint_placeholder(&p) {
            Ok(canvas) => PagePicture::Canvas(canvas),
            Err(e) => {
                log::warn!("[content] placeholder canvas unavailable: {:?}", e);
                PagePicture::Pixels {
                    width: p.width,
                    height: p.height,
                    rgba: p.to_rgba(),
                }
            }
        },
    }
}
