//! Theme module - palettes and the shared theme store

mod color;
mod store;

pub use color::ThemeColor;
pub use store::{ThemePort, ThemeStore};
