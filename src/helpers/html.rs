//! HTML helper functions

/// Generate an image tag
///
/// # Examples
/// ```ignore
/// image_tag("/images/photo.jpg", "My Photo", Some("hero")) // -> <img src=... alt="My Photo" class="hero">
/// ```
pub fn image_tag(src: &str, alt: &str, class: Option<&str>) -> String {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, html_escape(c)))
        .unwrap_or_default();

    format!(
        r#"<img src="{}" alt="{}"{}>"#,
        html_escape(src),
        html_escape(alt),
        class_attr
    )
}

/// Generate a `<meta name=...>` tag
pub fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        name,
        html_escape(content)
    )
}

/// Generate Open Graph meta tags for an article
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="article">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, html_escape(url)),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            html_escape(img)
        ));
    }

    tags.join("\n")
}

/// Generate Twitter card meta tags
pub fn twitter_card(title: &str, description: &str, image: Option<&str>) -> String {
    let card = if image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };
    let mut tags = vec![
        meta_name("twitter:card", card),
        meta_name("twitter:title", title),
        meta_name("twitter:description", description),
    ];
    if let Some(img) = image {
        tags.push(meta_name("twitter:image", img));
    }
    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="blogpost-rs {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_image_tag() {
        assert_eq!(
            image_tag("/a.png", "A \"quoted\" alt", Some("hero")),
            r#"<img src="/a.png" alt="A &quot;quoted&quot; alt" class="hero">"#
        );
        assert_eq!(image_tag("/a.png", "", None), r#"<img src="/a.png" alt="">"#);
    }

    #[test]
    fn test_open_graph_skips_empty_description() {
        let tags = open_graph("T", "", "http://x/", None, "Site");
        assert!(tags.contains(r#"og:title" content="T""#));
        assert!(!tags.contains("og:description"));
        assert!(!tags.contains("og:image"));
    }

    #[test]
    fn test_twitter_card_kind() {
        assert!(twitter_card("T", "D", Some("http://x/i.png")).contains("summary_large_image"));
        assert!(twitter_card("T", "D", None).contains(r#"content="summary""#));
    }
}
