pub mod book;
pub mod config;
pub mod constants;
pub mod content;
pub mod damp;
pub mod geometry;
pub mod highlight;
pub mod manifest;
pub mod material;
pub mod page;
pub mod pick;
pub mod placeholder;
pub mod pose;
pub mod scheduler;
pub mod skin;
pub mod state;

pub static BOOK_WGSL: &str = include_str!("../shaders/book.wgsl");

pub use book::*;
pub use config::*;
pub use constants::*;
pub use manifest::*;
pub use page::*;
pub use scheduler::*;
pub use state::*;
