//! Render a single post file

use anyhow::{anyhow, Result};
use std::path::Path;

use crate::content::loader::ContentLoader;
use crate::generator::render_post_html;
use crate::Blog;

/// Render the post at `path` to a complete HTML page.
///
/// Navigation comes from the post's position among the site's posts when
/// it is one of them.
pub fn render_file(blog: &Blog, path: &Path) -> Result<String> {
    let loader = ContentLoader::new(blog);
    let post = loader
        .load_post_file(path)?
        .ok_or_else(|| anyhow!("{:?} is not published", path))?;

    let posts = loader.load_posts()?;
    let nav = posts
        .iter()
        .position(|p| p.source == post.source)
        .map(|i| ContentLoader::navigation(&posts, i))
        .unwrap_or_default();

    Ok(render_post_html(blog, &post, &nav))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;

    #[test]
    fn test_render_file_outside_posts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());
        let file = dir.path().join("loose.md");
        fs::write(
            &file,
            "---\ntitle: Loose\ndate: 2024-05-01\nimage: a.png\ntags: [one]\n---\n\n## Part\n\nText\n",
        )
        .unwrap();

        let html = render_file(&blog, &file).unwrap();
        assert!(html.contains("<h1>Loose</h1>"));
        assert!(html.contains(r##"href="#part""##));
        assert!(html.contains(r#"data-key="one""#));
    }

    #[test]
    fn test_render_unpublished_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());
        let file = dir.path().join("draft.md");
        fs::write(
            &file,
            "---\ntitle: D\ndate: 2024-05-01\nimage: a.png\npublished: false\n---\n",
        )
        .unwrap();

        assert!(render_file(&blog, &file).is_err());
    }
}
