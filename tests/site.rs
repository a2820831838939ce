use std::fs;

use blogpost_rs::commands::{init, render};
use blogpost_rs::Blog;

const POST: &str = r##"---
title: Typed Ports
date: 2024-03-05 09:30:00
lastUpdated: 2024-04-01
image: cover.png
colorDark: "#311b92"
colorLight: "#b39ddb"
colorMain: "#673ab7"
tags: [rust, design]
---

Intro paragraph.

## Ports

Text.

### Theme

More text.
"##;

#[test]
fn generate_writes_themed_post_page() {
    let dir = tempfile::tempdir().unwrap();
    init::init_site(dir.path()).unwrap();
    fs::write(dir.path().join("source/_posts/typed-ports.md"), POST).unwrap();

    let blog = Blog::new(dir.path()).unwrap();
    blog.generate().unwrap();

    let page = dir.path().join("public/2024/03/05/typed-ports/index.html");
    let html = fs::read_to_string(&page).unwrap();

    assert!(html.contains("--color-primary-main:#673ab7"));
    assert!(html.contains("--color-primary-contrast:#fff"));
    assert!(html.contains("<small>April 01, 2024</small>"));
    assert!(html.contains(r#"data-key="rust""#));
    assert!(html.contains(r#"data-key="design""#));
    assert!(html.contains(r##"href="#ports""##));
    assert!(html.contains(r##"href="#theme""##));
    assert!(html.contains(r#"src="/2024/03/05/typed-ports/cover.png""#));
    assert!(html.contains(r#"data-post-id="typed-ports""#));
    assert!(html.contains(r#"data-state="closed""#));

    blog.clean().unwrap();
    assert!(!page.exists());
}

#[test]
fn render_matches_generated_page() {
    let dir = tempfile::tempdir().unwrap();
    init::init_site(dir.path()).unwrap();
    let file = dir.path().join("source/_posts/typed-ports.md");
    fs::write(&file, POST).unwrap();

    let blog = Blog::new(dir.path()).unwrap();
    let rendered = render::render_file(&blog, &file).unwrap();

    blog.generate().unwrap();
    let generated =
        fs::read_to_string(dir.path().join("public/2024/03/05/typed-ports/index.html")).unwrap();

    assert_eq!(rendered, generated);
}

#[test]
fn invalid_post_is_skipped_during_generate() {
    let dir = tempfile::tempdir().unwrap();
    init::init_site(dir.path()).unwrap();
    fs::write(
        dir.path().join("source/_posts/broken.md"),
        "---\ntitle: No Date\nimage: a.png\n---\n\nBody\n",
    )
    .unwrap();

    let blog = Blog::new(dir.path()).unwrap();
    blog.generate().unwrap();

    assert!(!dir.path().join("public").join("broken").exists());
    let written: Vec<_> = walk_index_files(&dir.path().join("public"));
    assert_eq!(written.len(), 1);
}

fn walk_index_files(root: &std::path::Path) -> Vec<std::path::PathBuf> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() == "index.html")
        .map(|e| e.into_path())
        .collect()
}
