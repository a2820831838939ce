//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r##"# Site
title: My Blog
description: ''
author: John Doe
author_avatar: /icons/authors/avatar.png
language: en
timezone: ''

# URL
url: http://example.com
root: /
permalink: :year/:month/:day/:title/

# Directory
source_dir: source
public_dir: public

# Writing
new_post_name: :title.md
render_drafts: false
highlight:
  theme: base16-ocean.dark
  line_number: true

# Post page
date_format: MMMM DD, YYYY
excerpt_length: 160
toc_max_depth: 3
post_navigation: false
theme:
  contrast: "#fff"
  default_dark: "#1a237e"
  default_light: "#7986cb"
  default_main: "#3f51b5"
comments:
  enable: true
newsletter:
  button_label: Subscribe to the newsletter
  endpoint: /api/newsletter
  subscribers_file: newsletter.jsonl
"##;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("source/_posts/hello-world"))?;
    fs::create_dir_all(target_dir.join("source/icons/authors"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    fs::write(target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;

    let post_scaffold = r#"---
title: {{ title }}
date: {{ date }}
image: hero.png
colorDark:
colorLight:
colorMain:
tags:
---
"#;
    fs::write(target_dir.join("scaffolds/post.md"), post_scaffold)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r##"---
title: Hello World
date: {}
image: hero.png
colorDark: "#1b5e20"
colorLight: "#a5d6a7"
colorMain: "#4caf50"
tags: [welcome]
---

Welcome to your new blog! This is your very first post.

## Write a post

```bash
$ blogpost-rs new "My New Post"
```

## Generate the site

```bash
$ blogpost-rs generate
```

## Run the server

```bash
$ blogpost-rs server
```
"##,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("source/_posts/hello-world.md"), sample_post)?;

    tracing::debug!("Initialized site in {:?}", target_dir);
    Ok(())
}
