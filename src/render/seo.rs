//! Search and social metadata for a post page

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{absolute_url, html_escape, meta_generator, meta_name, open_graph, twitter_card};

/// Metadata block emitted in the page head
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    /// Absolute URL of the preview image
    pub image: String,
    pub url: String,
}

impl SeoMeta {
    /// Built from the title, excerpt and hero image only
    pub fn for_post(config: &SiteConfig, post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.excerpt.clone(),
            image: absolute_url(config, &post.image.src),
            url: post.permalink.clone(),
        }
    }

    /// Render the `<head>` tags
    pub fn to_html(&self, site_title: &str) -> String {
        let page_title = if site_title.is_empty() {
            self.title.clone()
        } else {
            format!("{} | {}", self.title, site_title)
        };

        [
            format!("<title>{}</title>", html_escape(&page_title)),
            meta_name("description", &self.description),
            open_graph(
                &self.title,
                &self.description,
                &self.url,
                Some(&self.image),
                site_title,
            ),
            twitter_card(&self.title, &self.description, Some(&self.image)),
            format!(r#"<link rel="canonical" href="{}">"#, html_escape(&self.url)),
            meta_generator(),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures;

    #[test]
    fn test_meta_from_title_excerpt_image() {
        let config = SiteConfig::default();
        let post = fixtures::post("Hello World");
        let meta = SeoMeta::for_post(&config, &post);

        assert_eq!(meta.title, "Hello World");
        assert_eq!(meta.description, "About Hello World");
        assert_eq!(meta.image, "http://example.com/hello-world/hero.png");
    }

    #[test]
    fn test_to_html() {
        let config = SiteConfig::default();
        let post = fixtures::post("Tom & Jerry");
        let html = SeoMeta::for_post(&config, &post).to_html("My Blog");

        assert!(html.contains("<title>Tom &amp; Jerry | My Blog</title>"));
        assert!(html.contains(r#"<meta name="description" content="About Tom &amp; Jerry">"#));
        assert!(html.contains(r#"property="og:image""#));
        assert!(html.contains("twitter:card"));
    }
}
