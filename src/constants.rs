// Web frontend constants: DOM hooks, asset paths and scene look.

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const GRID_CELL_SELECTOR: &str = ".grid-cell";
pub const GRID_IMAGE_ROOT: &str = "images"; // spaceship grid, 1-based `{n}.png`

// Clear color behind the book
pub const CLEAR_RGB: [f64; 3] = [0.96, 0.96, 0.95];

// Lighting (scene lighting is minimal: one key light plus ambient)
pub const LIGHT_DIR: [f32; 3] = [0.4, 1.0, 0.8]; // toward the light, world space
pub const AMBIENT: f32 = 0.55;

// Textures
pub const WHITE_TEXEL: [u8; 4] = [255, 255, 255, 255];

// Frame time clamp (seconds) so a backgrounded tab does not snap the pages
pub const MAX_FRAME_DT: f32 = 0.1;
