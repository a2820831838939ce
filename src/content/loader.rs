//! Content loader - turns files under source/_posts into content records

use anyhow::Result;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{
    parse_datetime, prune_excerpt, FrontMatter, HeroImage, MarkdownRenderer, NavigationContext,
    Post, PostColors,
};
use crate::error::ContentError;
use crate::helpers::{absolute_url, encode_path, format_date, is_external, url_for};
use crate::Blog;

/// Loads posts from the source directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &blog.config.highlight.theme,
            blog.config.highlight.line_number,
            blog.config.toc_max_depth,
        );
        Self { blog, renderer }
    }

    /// Load all posts from source/_posts, newest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.blog.posts_dir();
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !(path.is_file() && is_markdown_file(path)) {
                continue;
            }

            match self.load_post_file(path) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!("Skipping unpublished post {:?}", path),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        // Two posts on the same path would overwrite each other's page
        let mut seen: HashMap<String, String> = HashMap::new();
        posts.retain(|post| match seen.get(&post.path) {
            Some(first) => {
                tracing::warn!(
                    "Skipping {:?}: path {} is already used by {:?}",
                    post.source,
                    post.path,
                    first
                );
                false
            }
            None => {
                seen.insert(post.path.clone(), post.source.clone());
                true
            }
        });

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Ok(posts)
    }

    /// Load a single post, returning `None` when it is an unpublished draft
    pub fn load_post_file(&self, path: &Path) -> Result<Option<Post>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) =
            FrontMatter::parse(&content).map_err(|e| ContentError::FrontMatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if !fm.published && !self.blog.config.render_drafts {
            return Ok(None);
        }

        Ok(Some(self.build_post(path, fm, body)?))
    }

    /// Validate front-matter and assemble the content record
    fn build_post(&self, path: &Path, fm: FrontMatter, body: &str) -> Result<Post> {
        let config = &self.blog.config;
        let tz = config.tz();

        let title = fm.title.ok_or_else(|| missing(path, "title"))?;
        let raw_date = fm.date.ok_or_else(|| missing(path, "date"))?;
        let published_at = parse_datetime(&raw_date, tz).ok_or_else(|| ContentError::InvalidDate {
            path: path.to_path_buf(),
            field: "date",
            value: raw_date.clone(),
        })?;
        let updated_at = match fm.last_updated {
            Some(raw) => Some(parse_datetime(&raw, tz).ok_or_else(|| {
                ContentError::InvalidDate {
                    path: path.to_path_buf(),
                    field: "lastUpdated",
                    value: raw.clone(),
                }
            })?),
            None => None,
        };
        let image = fm.image.ok_or_else(|| missing(path, "image"))?;

        // The file stem is the slug, matching how permalinks are built
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let source = path
            .strip_prefix(&self.blog.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let post_path = self.generate_permalink(&published_at, &slug);
        let permalink = absolute_url(config, &post_path);

        let rendered = self.renderer.render(body)?;
        let excerpt_source = fm.excerpt.as_deref().unwrap_or(&rendered.text);
        let excerpt = prune_excerpt(excerpt_source, config.excerpt_length);

        let date = format_date(&published_at, &config.date_format);
        let last_updated = updated_at
            .map(|d| format_date(&d, &config.date_format))
            .unwrap_or_else(|| date.clone());

        let asset_dir = path.with_extension("");
        let asset_dir = asset_dir.is_dir().then_some(asset_dir);

        Ok(Post {
            id: fm.id.unwrap_or_else(|| slug.clone()),
            image: HeroImage {
                src: self.resolve_image(&image, &post_path),
                alt: title.clone(),
            },
            title,
            excerpt,
            tags: fm.tags,
            author: fm.author.unwrap_or_else(|| config.author.clone()),
            date,
            last_updated,
            body: rendered.html,
            table_of_contents: rendered.toc,
            colors: PostColors {
                dark: fm
                    .color_dark
                    .unwrap_or_else(|| config.theme.default_dark.clone()),
                light: fm
                    .color_light
                    .unwrap_or_else(|| config.theme.default_light.clone()),
                main: fm
                    .color_main
                    .unwrap_or_else(|| config.theme.default_main.clone()),
            },
            slug,
            path: post_path,
            permalink,
            source,
            published_at,
            asset_dir,
            extra: fm.extra,
        })
    }

    /// Navigation context for `posts[index]` (posts sorted newest first)
    pub fn navigation(posts: &[Post], index: usize) -> NavigationContext {
        NavigationContext::for_index(posts, index)
    }

    /// Resolve a hero image reference to a URL
    ///
    /// Relative references live next to the post, in its asset folder.
    fn resolve_image(&self, image: &str, post_path: &str) -> String {
        if is_external(image) {
            image.to_string()
        } else if image.starts_with('/') {
            encode_path(&url_for(&self.blog.config, image))
        } else {
            encode_path(&format!(
                "{}{}",
                post_path,
                image.trim_start_matches("./")
            ))
        }
    }

    /// Generate permalink based on config pattern
    fn generate_permalink(&self, date: &NaiveDateTime, slug: &str) -> String {
        let pattern = &self.blog.config.permalink;

        let result = pattern
            .replace(":year", &date.format("%Y").to_string())
            .replace(":month", &date.format("%m").to_string())
            .replace(":day", &date.format("%d").to_string())
            .replace(":i_month", &date.format("%-m").to_string())
            .replace(":i_day", &date.format("%-d").to_string())
            .replace(":title", slug)
            .replace(":name", slug);

        url_for(&self.blog.config, &result)
    }
}

fn missing(path: &Path, field: &'static str) -> ContentError {
    ContentError::MissingField {
        path: path.to_path_buf(),
        field,
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn blog_with_posts(posts: &[(&str, &str)]) -> (tempfile::TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());
        fs::create_dir_all(blog.posts_dir()).unwrap();
        for (name, content) in posts {
            fs::write(blog.posts_dir().join(name), content).unwrap();
        }
        (dir, blog)
    }

    const HELLO: &str = r##"---
id: 12
title: Hello World
date: 2024-01-15 10:30:00
lastUpdated: 2024-03-02
author: Lukas Marx
colorDark: "#1b5e20"
colorLight: "#a5d6a7"
colorMain: "#4caf50"
image: ./hero.png
tags: [go, rust, ts]
---

## Intro

Some words about the post.
"##;

    #[test]
    fn test_load_full_record() {
        let (_dir, blog) = blog_with_posts(&[("hello-world.md", HELLO)]);
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);

        let post = &posts[0];
        assert_eq!(post.id, "12");
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.date, "January 15, 2024");
        assert_eq!(post.last_updated, "March 02, 2024");
        assert_eq!(post.tags, vec!["go", "rust", "ts"]);
        assert_eq!(post.path, "/2024/01/15/hello-world/");
        assert_eq!(post.image.src, "/2024/01/15/hello-world/hero.png");
        assert_eq!(post.colors.main, "#4caf50");
        assert_eq!(post.excerpt, "Intro Some words about the post.");
        assert_eq!(post.table_of_contents.items[0].anchor, "intro");
        assert!(post.asset_dir.is_none());
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let (_dir, blog) = blog_with_posts(&[(
            "plain.md",
            "---\ntitle: Plain\ndate: 2024-02-01\nimage: /images/p.png\n---\nBody\n",
        )]);
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        let post = &posts[0];

        assert_eq!(post.id, "plain");
        assert_eq!(post.author, blog.config.author);
        assert_eq!(post.last_updated, post.date);
        assert_eq!(post.colors.dark, blog.config.theme.default_dark);
        assert_eq!(post.image.src, "/images/p.png");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let (_dir, blog) = blog_with_posts(&[
            ("no-image.md", "---\ntitle: X\ndate: 2024-01-01\n---\nBody\n"),
            (
                "bad-date.md",
                "---\ntitle: Y\ndate: someday\nimage: a.png\n---\nBody\n",
            ),
            ("ok.md", "---\ntitle: Z\ndate: 2024-01-01\nimage: a.png\n---\nBody\n"),
        ]);
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Z");
    }

    #[test]
    fn test_missing_field_error() {
        let (_dir, blog) = blog_with_posts(&[("no-date.md", "---\ntitle: X\nimage: a.png\n---\n")]);
        let err = ContentLoader::new(&blog)
            .load_post_file(&blog.posts_dir().join("no-date.md"))
            .unwrap_err();
        match err.downcast_ref::<ContentError>() {
            Some(ContentError::MissingField { field, .. }) => assert_eq!(*field, "date"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_drafts_skipped_unless_enabled() {
        let draft = "---\ntitle: Draft\ndate: 2024-01-01\nimage: a.png\npublished: false\n---\n";
        let (_dir, mut blog) = blog_with_posts(&[("draft.md", draft)]);
        assert!(ContentLoader::new(&blog).load_posts().unwrap().is_empty());

        blog.config.render_drafts = true;
        assert_eq!(ContentLoader::new(&blog).load_posts().unwrap().len(), 1);
    }

    #[test]
    fn test_sorted_newest_first_with_navigation() {
        let (_dir, blog) = blog_with_posts(&[
            ("old.md", "---\ntitle: Old\ndate: 2023-01-01\nimage: a.png\n---\n"),
            ("new.md", "---\ntitle: New\ndate: 2024-01-01\nimage: a.png\n---\n"),
        ]);
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts[0].title, "New");

        let nav = ContentLoader::navigation(&posts, 0);
        assert_eq!(nav.previous.unwrap().title, "Old");
        assert!(nav.next.is_none());
    }

    #[test]
    fn test_asset_folder_detected() {
        let (_dir, blog) = blog_with_posts(&[("hello-world.md", HELLO)]);
        fs::create_dir_all(blog.posts_dir().join("hello-world")).unwrap();
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(
            posts[0].asset_dir.as_deref(),
            Some(blog.posts_dir().join("hello-world").as_path())
        );
    }

    #[test]
    fn test_duplicate_paths_keep_first_post() {
        let (_dir, blog) = blog_with_posts(&[]);
        let post = "---\ntitle: Intro\ndate: 2024-02-01\nimage: a.png\n---\n\nBody\n";
        for sub in ["a", "b"] {
            let dir = blog.posts_dir().join(sub);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("intro.md"), post).unwrap();
        }

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].source, std::path::Path::new("_posts/a/intro.md").to_string_lossy());
    }
}
