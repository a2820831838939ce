//! Post page rendering
//!
//! [`PostView`] is the page for one post. Mounting it publishes the post's
//! palette through its [`ThemePort`]; the newsletter dialog it owns forwards
//! addresses to its [`NewsletterPort`]. Rendering itself has no side effects.

pub mod components;
mod layout;
mod seo;

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::{NavigationContext, Post};
use crate::newsletter::{DialogState, NewsletterDialog, NewsletterPort, SubmitOutcome};
use crate::theme::{ThemeColor, ThemePort};

pub use layout::{document, PageSlots};
pub use seo::SeoMeta;

/// External capabilities a post page depends on
#[derive(Clone)]
pub struct PostPorts {
    pub theme: Arc<dyn ThemePort>,
    pub newsletter: Arc<dyn NewsletterPort>,
}

/// A rendered post page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub meta: SeoMeta,
    pub html: String,
}

/// The date shown under the author: the last edit if there was one, else the publication date
pub fn date_label(post: &Post) -> &str {
    if post.last_updated != post.date {
        &post.last_updated
    } else {
        &post.date
    }
}

/// The page for one post
pub struct PostView<'a> {
    config: &'a SiteConfig,
    post: &'a Post,
    nav: &'a NavigationContext,
    ports: PostPorts,
    mounted: bool,
    dialog: NewsletterDialog,
}

impl<'a> PostView<'a> {
    pub fn new(
        config: &'a SiteConfig,
        post: &'a Post,
        nav: &'a NavigationContext,
        ports: PostPorts,
    ) -> Self {
        Self {
            config,
            post,
            nav,
            ports,
            mounted: false,
            dialog: NewsletterDialog::new(),
        }
    }

    /// Palette derived from the post's colors and the site's contrast color
    pub fn theme_color(&self) -> ThemeColor {
        ThemeColor::from_post(&self.post.colors, &self.config.theme.contrast)
    }

    /// Activate the page, publishing its palette once per mount
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.dialog = NewsletterDialog::new();
        tracing::debug!("Mounting post {:?}", self.post.slug);
        self.ports.theme.push_theme_color(self.theme_color());
    }

    /// Deactivate the page, discarding the dialog state
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.dialog = NewsletterDialog::new();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn dialog_state(&self) -> DialogState {
        self.dialog.state()
    }

    /// The newsletter call-to-action was activated
    pub fn open_newsletter(&mut self) {
        if !self.mounted {
            tracing::debug!("Ignoring newsletter activation on an unmounted page");
            return;
        }
        self.dialog.activate();
    }

    /// Submit an address from the newsletter dialog
    pub fn submit_newsletter(&mut self, address: &str) -> SubmitOutcome {
        if !self.mounted {
            return SubmitOutcome::Ignored;
        }
        self.dialog.submit(address, self.ports.newsletter.as_ref())
    }

    pub fn close_newsletter(&mut self) {
        self.dialog.close();
    }

    pub fn seo_meta(&self) -> SeoMeta {
        SeoMeta::for_post(self.config, self.post)
    }

    /// Render the complete page in its current state
    pub fn render(&self) -> RenderedPage {
        let config = self.config;
        let post = self.post;

        let mut content = String::new();
        content.push_str(&components::hero_image(&post.image));
        content.push_str(&format!(
            r#"<div class="post-subtitle">{}{}</div>"#,
            components::author_block(config, &post.author, date_label(post)),
            components::tag_chips(&post.tags)
        ));
        content.push_str(&format!(
            "<h1>{}</h1>\n",
            crate::helpers::html_escape(&post.title)
        ));
        content.push_str(&post.body);
        content.push_str("\n<br>\n");
        content.push_str(&components::comments(config, &post.id));
        if config.post_navigation {
            content.push_str(&components::post_navigation(self.nav));
        }

        let sidebar = format!(
            "{}{}",
            components::table_of_contents(&post.table_of_contents),
            components::newsletter_button(config)
        );
        let dialog = components::newsletter_dialog(config, self.dialog.state());

        let meta = self.seo_meta();
        let theme = self.ports.theme.current_theme();
        let html = document(
            config,
            &PageSlots {
                theme: &theme,
                meta: &meta,
                content: &content,
                sidebar: &sidebar,
                dialog: &dialog,
            },
        );

        RenderedPage { meta, html }
    }
}
