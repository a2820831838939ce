//! Markdown rendering with syntax highlighting and heading anchors

use anyhow::Result;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::collections::HashSet;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::TableOfContents;
use crate::helpers::html_escape;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Output of a markdown render
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    pub html: String,
    pub toc: TableOfContents,
    /// Plain text of the prose, used for excerpts
    pub text: String,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
    toc_max_depth: u8,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true, 3)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool, toc_max_depth: usize) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
            toc_max_depth: toc_max_depth.min(6) as u8,
        }
    }

    /// Render markdown to HTML, collecting the heading outline on the way
    pub fn render(&self, markdown: &str) -> Result<RenderedMarkdown> {
        // Front-matter is split off before we get here, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut text = String::new();
        let mut headings: Vec<(u8, String, String)> = Vec::new();
        let mut used_ids: HashSet<String> = HashSet::new();

        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        // Pending heading: start tag pieces plus buffered inner events
        let mut heading: Option<PendingHeading> = None;

        for event in parser {
            if in_code_block {
                match event {
                    Event::Text(t) => code_block_content.push_str(&t),
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted =
                            self.highlight_code(&code_block_content, code_block_lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        in_code_block = false;
                        code_block_lang = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_content.clear();
                    code_block_lang = match kind {
                        // Only the first word of the info string names the language
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        _ => None,
                    };
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    heading = Some(PendingHeading {
                        level: level as u8,
                        explicit_id: id.map(|i| i.to_string()),
                        classes: classes.into_iter().map(|c| c.to_string()).collect(),
                        attrs: attrs
                            .into_iter()
                            .map(|(k, v)| (k.to_string(), v.map(|v| v.to_string())))
                            .collect(),
                        title: String::new(),
                        inner: Vec::new(),
                    });
                }
                Event::End(TagEnd::Heading(level)) => {
                    if let Some(pending) = heading.take() {
                        let base = pending
                            .explicit_id
                            .clone()
                            .unwrap_or_else(|| slug::slugify(&pending.title));
                        let anchor = unique_id(&mut used_ids, base);

                        if pending.level <= self.toc_max_depth {
                            headings.push((pending.level, pending.title.clone(), anchor.clone()));
                        }
                        push_text(&mut text, &pending.title);

                        events.push(Event::Start(Tag::Heading {
                            level,
                            id: Some(CowStr::from(anchor)),
                            classes: pending.classes.into_iter().map(CowStr::from).collect(),
                            attrs: pending
                                .attrs
                                .into_iter()
                                .map(|(k, v)| (CowStr::from(k), v.map(CowStr::from)))
                                .collect(),
                        }));
                        events.extend(pending.inner);
                        events.push(Event::End(TagEnd::Heading(level)));
                    }
                }
                other => {
                    if let Some(pending) = heading.as_mut() {
                        if let Event::Text(t) | Event::Code(t) = &other {
                            pending.title.push_str(t);
                        }
                        pending.inner.push(other);
                        continue;
                    }
                    match &other {
                        Event::Text(t) | Event::Code(t) => push_text(&mut text, t),
                        Event::SoftBreak | Event::HardBreak => text.push(' '),
                        Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Item) => {
                            text.push(' ')
                        }
                        _ => {}
                    }
                    events.push(other);
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(RenderedMarkdown {
            html: html_output,
            toc: TableOfContents::from_headings(headings),
            text: WHITESPACE.replace_all(text.trim(), " ").into_owned(),
        })
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let lang_class = html_escape(lang);

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => {
                self.add_line_numbers(&highlighted, &lang_class)
            }
            Some(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang_class, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang_class,
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code; `lang` must already be escaped
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

struct PendingHeading<'a> {
    level: u8,
    explicit_id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    title: String,
    inner: Vec<Event<'a>>,
}

fn push_text(text: &mut String, fragment: &str) {
    if !text.is_empty() && !text.ends_with(' ') {
        text.push(' ');
    }
    text.push_str(fragment);
}

/// Give repeated headings distinct ids: `intro`, `intro-1`, `intro-2`
///
/// Every id handed out is recorded, so a suffixed id never collides with a
/// heading whose own slug already ends in `-N`.
fn unique_id(used: &mut HashSet<String>, base: String) -> String {
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };
    let mut candidate = base.clone();
    let mut n = 0;
    while used.contains(&candidate) {
        n += 1;
        candidate = format!("{}-{}", base, n);
    }
    used.insert(candidate.clone());
    candidate
}

/// Shorten plain text to at most `length` characters at a word boundary
///
/// Truncated text ends with `…`.
pub fn prune_excerpt(text: &str, length: usize) -> String {
    let text = WHITESPACE.replace_all(text.trim(), " ");

    if text.chars().count() <= length {
        return text.into_owned();
    }

    let cut: String = text.chars().take(length).collect();
    let cut = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end_matches(|c: char| c.is_whitespace() || c == ',' || c == '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(out.html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(out.html.contains("<p>This is a test.</p>"));
        assert_eq!(out.text, "Hello World This is a test.");
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(out.html.contains("highlight rust"));
        assert!(out.text.is_empty());
    }

    #[test]
    fn test_code_block_without_line_numbers() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", false, 3);
        let out = renderer.render("```\nplain\n```").unwrap();
        assert!(out.html.contains(r#"<pre><code class="language-text">"#));
    }

    #[test]
    fn test_toc_from_headings() {
        let renderer = MarkdownRenderer::new();
        let md = "## Setup\n\ntext\n\n### Install `cargo`\n\n#### Too deep\n\n## Setup\n";
        let out = renderer.render(md).unwrap();

        assert_eq!(out.toc.items.len(), 2);
        assert_eq!(out.toc.items[0].children[0].title, "Install cargo");
        assert!(out.toc.items[0].children[0].children.is_empty());
        assert_eq!(out.toc.items[1].anchor, "setup-1");
        assert!(out.html.contains(r#"<h4 id="too-deep">"#));
    }

    #[test]
    fn test_suffixed_ids_skip_taken_slugs() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("## Intro\n\n## Intro\n\n## Intro 1\n").unwrap();
        let anchors: Vec<_> = out.toc.items.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["intro", "intro-1", "intro-1-1"]);

        let out = renderer.render("## Intro 1\n\n## Intro\n\n## Intro\n").unwrap();
        let anchors: Vec<_> = out.toc.items.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["intro-1", "intro", "intro-2"]);
    }

    #[test]
    fn test_code_block_info_string_attributes() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", false, 3);
        let out = renderer.render("```rust title=\"x\"\nfn main() {}\n```").unwrap();
        assert!(out.html.contains(r#"<pre><code class="language-rust">"#));
        assert!(!out.html.contains("title="));

        let out = renderer.render("```a\"b\nx\n```").unwrap();
        assert!(out.html.contains(r#"class="language-a&quot;b""#));
    }

    #[test]
    fn test_explicit_heading_id() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("## Custom {#my-id}\n").unwrap();
        assert_eq!(out.toc.items[0].anchor, "my-id");
        assert!(out.html.contains(r#"id="my-id""#));
    }

    #[test]
    fn test_prune_excerpt() {
        assert_eq!(prune_excerpt("short text", 160), "short text");
        assert_eq!(prune_excerpt("one two three four", 10), "one two…");
        assert_eq!(prune_excerpt("  spaced\n\nout  ", 160), "spaced out");
    }
}
