//! Helper functions shared by the content loader and the page renderer

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
