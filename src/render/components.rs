//! Sub-renderers for the pieces of a post page

use crate::config::SiteConfig;
use crate::content::{HeroImage, NavigationContext, TableOfContents, TocEntry};
use crate::helpers::{html_escape, image_tag, is_external, url_for};
use crate::newsletter::DialogState;

/// Element id of the newsletter dialog
pub const DIALOG_ID: &str = "newsletter-dialog";

/// Full-width hero image
pub fn hero_image(image: &HeroImage) -> String {
    format!(
        r#"<figure class="post-hero">{}</figure>"#,
        image_tag(&image.src, &image.alt, Some("post-hero-image"))
    )
}

/// Avatar, author name and the date label
pub fn author_block(config: &SiteConfig, author: &str, date_label: &str) -> String {
    format!(
        r#"{}<div class="post-meta"><strong>{}</strong><br><small>{}</small></div>"#,
        image_tag(
            &url_for(config, &config.author_avatar),
            author,
            Some("author-avatar")
        ),
        html_escape(author),
        html_escape(date_label)
    )
}

/// One chip per tag, in the given order, keyed by the tag itself
pub fn tag_chips(tags: &[String]) -> String {
    let chips: String = tags
        .iter()
        .map(|tag| {
            let tag = html_escape(tag);
            format!(r#"<span class="chip" data-key="{}">{}</span>"#, tag, tag)
        })
        .collect();
    format!(r#"<div class="post-tags">{}</div>"#, chips)
}

/// Nested table of contents; empty when the post has no headings
pub fn table_of_contents(toc: &TableOfContents) -> String {
    if toc.is_empty() {
        return String::new();
    }
    format!(
        r#"<nav class="toc"><ol class="toc-list">{}</ol></nav>"#,
        toc_items(&toc.items)
    )
}

fn toc_items(entries: &[TocEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let children = if entry.children.is_empty() {
                String::new()
            } else {
                format!("<ol>{}</ol>", toc_items(&entry.children))
            };
            format!(
                r##"<li class="toc-item toc-level-{}"><a class="toc-link" href="#{}">{}</a>{}</li>"##,
                entry.level,
                html_escape(&entry.anchor),
                html_escape(&entry.title),
                children
            )
        })
        .collect()
}

/// Comment thread container for a post
pub fn comments(config: &SiteConfig, post_id: &str) -> String {
    if !config.comments.enable {
        return String::new();
    }
    let script = config
        .comments
        .script
        .as_deref()
        .map(|src| format!(r#"<script src="{}" async></script>"#, html_escape(src)))
        .unwrap_or_default();
    format!(
        r#"<section id="comments" class="comments" data-post-id="{}">{}</section>"#,
        html_escape(post_id),
        script
    )
}

/// Links to the neighbouring posts
pub fn post_navigation(nav: &NavigationContext) -> String {
    if nav.previous.is_none() && nav.next.is_none() {
        return String::new();
    }

    let mut html = String::from(r#"<nav class="post-nav">"#);
    if let Some(prev) = &nav.previous {
        html.push_str(&format!(
            r#"<a class="post-nav-prev" href="{}" rel="prev">← {}</a>"#,
            html_escape(&prev.path),
            html_escape(&prev.title)
        ));
    }
    if let Some(next) = &nav.next {
        html.push_str(&format!(
            r#"<a class="post-nav-next" href="{}" rel="next">{} →</a>"#,
            html_escape(&next.path),
            html_escape(&next.title)
        ));
    }
    html.push_str("</nav>");
    html
}

/// Button that opens the newsletter dialog
pub fn newsletter_button(config: &SiteConfig) -> String {
    format!(
        r#"<button type="button" class="button newsletter-cta" data-action="open-newsletter" aria-controls="{}">{}</button>"#,
        DIALOG_ID,
        html_escape(&config.newsletter.button_label)
    )
}

/// The newsletter dialog element in a given state
pub fn newsletter_dialog(config: &SiteConfig, state: DialogState) -> String {
    let hidden = if state == DialogState::Closed {
        " hidden"
    } else {
        ""
    };
    format!(
        r#"<div id="{}" class="newsletter-dialog" role="dialog" aria-modal="true" data-state="{}"{}>{}</div><template id="newsletter-confirmed">{}</template>"#,
        DIALOG_ID,
        state_name(state),
        hidden,
        newsletter_dialog_body(config, state),
        newsletter_dialog_body(config, DialogState::Confirmed)
    )
}

/// Where the newsletter form posts: the configured endpoint under the site root
pub fn newsletter_action(config: &SiteConfig) -> String {
    let action = url_for(config, &config.newsletter.endpoint);
    if is_external(&action) || action.starts_with('/') {
        action
    } else {
        format!("/{}", action)
    }
}

/// Contents of the dialog: the form while open, the confirmation after a submit
pub fn newsletter_dialog_body(config: &SiteConfig, state: DialogState) -> String {
    let close = r#"<button type="button" class="button" data-action="close-newsletter">Close</button>"#;
    match state {
        DialogState::Closed | DialogState::Open => format!(
            r#"<h2 class="newsletter-title">{}</h2><form class="newsletter-form" method="post" action="{}"><input type="text" inputmode="email" name="email" placeholder="you@example.com" autocomplete="email"><button type="submit" class="button">Subscribe</button></form>{}"#,
            html_escape(&config.newsletter.button_label),
            html_escape(&newsletter_action(config)),
            close
        ),
        DialogState::Confirmed => format!(
            r#"<p class="newsletter-confirmation">Thanks! Please check your inbox.</p>{}"#,
            close
        ),
    }
}

fn state_name(state: DialogState) -> &'static str {
    match state {
        DialogState::Closed => "closed",
        DialogState::Open => "open",
        DialogState::Confirmed => "confirmed",
    }
}
