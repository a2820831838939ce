//! Generator module - writes every post page into the public directory

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::content::{NavigationContext, Post};
use crate::newsletter::NewsletterPort;
use crate::render::{PostPorts, PostView};
use crate::theme::{ThemeColor, ThemeStore};
use crate::Blog;

/// Pages are pre-rendered with a closed dialog, so nothing is ever submitted at build time
struct BuildTimeNewsletter;

impl NewsletterPort for BuildTimeNewsletter {
    fn submit_newsletter_email(&self, _address: &str) {
        tracing::warn!("Newsletter submission during site generation ignored");
    }
}

/// Static site generator
pub struct Generator {
    blog: Blog,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Self {
        Self { blog: blog.clone() }
    }

    /// Generate the site for `posts`, which must be sorted newest first
    pub fn generate(&self, posts: &[Post]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.blog.public_dir)?;

        self.copy_source_assets()?;

        let mut written = Vec::with_capacity(posts.len());
        for (i, post) in posts.iter().enumerate() {
            let nav = NavigationContext::for_index(posts, i);
            written.push(self.generate_post_page(post, &nav)?);
        }

        Ok(written)
    }

    /// Render one post into `public/<path>/index.html`
    pub fn generate_post_page(&self, post: &Post, nav: &NavigationContext) -> Result<PathBuf> {
        let html = render_post_html(&self.blog, post, nav);

        let clean_path = post
            .path
            .trim_start_matches(self.blog.config.root.trim_end_matches('/'))
            .trim_start_matches('/');
        let output_dir = self.blog.public_dir.join(clean_path);
        fs::create_dir_all(&output_dir)
            .map_err(|e| anyhow!("Failed to create dir {:?}: {}", output_dir, e))?;

        let output_path = output_dir.join("index.html");
        fs::write(&output_path, html)
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated post: {:?}", output_path);

        if let Some(asset_dir) = &post.asset_dir {
            copy_dir(asset_dir, &output_dir)?;
        }

        Ok(output_path)
    }

    /// Copy static files from source/, skipping `_`-prefixed entries and markdown
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.blog.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e
                        .file_name()
                        .to_str()
                        .map(|n| n.starts_with('_') || n.starts_with('.'))
                        .unwrap_or(false)
            })
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_markdown(path) {
                continue;
            }
            let relative = path.strip_prefix(source_dir)?;
            let target = self.blog.public_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)?;
            tracing::debug!("Copied asset: {:?}", relative);
        }

        Ok(())
    }
}

/// Mount a page against a fresh theme store and render it
pub fn render_post_html(blog: &Blog, post: &Post, nav: &NavigationContext) -> String {
    let ports = PostPorts {
        theme: Arc::new(ThemeStore::new(ThemeColor::site_default(
            &blog.config.theme,
        ))),
        newsletter: Arc::new(BuildTimeNewsletter),
    };

    let mut view = PostView::new(&blog.config, post, nav, ports);
    view.mount();
    view.render().html
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let target = to.join(path.strip_prefix(from)?);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &target)?;
    }
    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("markdown")
    )
}
