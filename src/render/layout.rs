//! Page chrome: document head, header, footer and the three-column grid

use crate::config::SiteConfig;
use crate::helpers::{html_escape, url_for};
use crate::theme::ThemeColor;

use super::components::DIALOG_ID;
use super::SeoMeta;

/// Drives the dialog in the browser the same way `NewsletterDialog` does:
/// open from closed, confirm after submit (forwarding only non-empty
/// addresses), close from anywhere.
const NEWSLETTER_SCRIPT: &str = r#"<script>
(function() {
    var dialog = document.getElementById('__DIALOG__');
    var confirmed = document.getElementById('newsletter-confirmed');
    if (!dialog) return;
    var formHtml = dialog.innerHTML;
    function setState(state) {
        dialog.setAttribute('data-state', state);
        dialog.hidden = state === 'closed';
    }
    document.addEventListener('click', function(e) {
        var target = e.target.closest('[data-action]');
        if (!target) return;
        if (target.dataset.action === 'open-newsletter' && dialog.hidden) {
            dialog.innerHTML = formHtml;
            setState('open');
        } else if (target.dataset.action === 'close-newsletter') {
            setState('closed');
        }
    });
    dialog.addEventListener('submit', function(e) {
        e.preventDefault();
        var form = e.target;
        var email = form.elements.email.value;
        if (email) {
            fetch(form.action, { method: 'POST', body: new URLSearchParams({ email: email }) })
                .catch(function() {});
        }
        dialog.innerHTML = confirmed.innerHTML;
        setState('confirmed');
    });
})();
</script>"#;

/// Pieces placed into the page grid
pub struct PageSlots<'a> {
    pub theme: &'a ThemeColor,
    pub meta: &'a SeoMeta,
    pub content: &'a str,
    pub sidebar: &'a str,
    pub dialog: &'a str,
}

/// Wrap rendered pieces into a complete HTML document
pub fn document(config: &SiteConfig, slots: &PageSlots<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{meta}
<style id="theme-colors">{theme}</style>
</head>
<body>
{header}
<main class="post-grid">
<div class="sidebar-left"></div>
<article class="post-content">
{content}
</article>
<aside class="sidebar-right"><div class="sidebar">{sidebar}</div></aside>
</main>
{dialog}
{footer}
{script}
</body>
</html>
"#,
        lang = html_escape(&config.language),
        meta = slots.meta.to_html(&config.title),
        theme = slots.theme.css_variables(),
        header = header(config),
        content = slots.content,
        sidebar = slots.sidebar,
        dialog = slots.dialog,
        footer = footer(config),
        script = NEWSLETTER_SCRIPT.replace("__DIALOG__", DIALOG_ID),
    )
}

fn header(config: &SiteConfig) -> String {
    format!(
        r#"<header class="site-header"><a class="site-title" href="{}">{}</a></header>"#,
        url_for(config, "/"),
        html_escape(&config.title)
    )
}

fn footer(config: &SiteConfig) -> String {
    format!(
        r#"<footer class="site-footer"><small>&copy; {} &middot; {}</small></footer>"#,
        html_escape(&config.author),
        html_escape(&config.title)
    )
}
