//! Content module - handles posts, front-matter and markdown processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod toc;

pub use frontmatter::{parse_datetime, FrontMatter};
pub use markdown::{prune_excerpt, MarkdownRenderer, RenderedMarkdown};
pub use post::{HeroImage, NavPost, NavigationContext, Post, PostColors};
pub use toc::{TableOfContents, TocEntry};

#[cfg(test)]
pub(crate) use post::fixtures;
