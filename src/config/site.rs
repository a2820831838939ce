//! Site configuration (_config.yml)

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// Avatar shown next to the author name on post pages
    pub author_avatar: String,
    pub language: String,
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,
    pub permalink: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    pub new_post_name: String,
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Post page
    pub date_format: String,
    pub excerpt_length: usize,
    pub toc_max_depth: usize,
    /// Render previous/next links at the bottom of a post
    pub post_navigation: bool,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub comments: CommentsConfig,
    #[serde(default)]
    pub newsletter: NewsletterConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            author_avatar: "/icons/authors/avatar.png".to_string(),
            language: "en".to_string(),
            timezone: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            permalink: ":year/:month/:day/:title/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            new_post_name: ":title.md".to_string(),
            render_drafts: false,
            highlight: HighlightConfig::default(),

            date_format: "MMMM DD, YYYY".to_string(),
            excerpt_length: 160,
            toc_max_depth: 3,
            post_navigation: false,
            theme: ThemeConfig::default(),
            comments: CommentsConfig::default(),
            newsletter: NewsletterConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML or TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: SiteConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse {:?}: {}", path, e))?,
            _ => serde_yaml::from_str(&content)?,
        };

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Find and load the config file in a site directory, falling back to defaults
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        for name in ["_config.yml", "_config.yaml", "_config.toml"] {
            let candidate = base_dir.as_ref().join(name);
            if candidate.exists() {
                return Self::load(candidate);
            }
        }
        Ok(Self::default())
    }

    /// Parsed site timezone, if one is configured
    pub fn tz(&self) -> Option<chrono_tz::Tz> {
        if self.timezone.is_empty() {
            return None;
        }
        match self.timezone.parse::<chrono_tz::Tz>() {
            Ok(tz) => Some(tz),
            Err(e) => {
                tracing::warn!("Ignoring unknown timezone {:?}: {}", self.timezone, e);
                None
            }
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// Theme palette defaults
///
/// `contrast` is the fixed contrast color pushed with every post palette.
/// The `default_*` colors fill in for posts that leave their colors out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub contrast: String,
    pub default_dark: String,
    pub default_light: String,
    pub default_main: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            contrast: "#fff".to_string(),
            default_dark: "#1a237e".to_string(),
            default_light: "#7986cb".to_string(),
            default_main: "#3f51b5".to_string(),
        }
    }
}

/// Comment widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enable: bool,
    /// Script loaded by the comments container, if any
    pub script: Option<String>,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            script: None,
        }
    }
}

/// Newsletter call-to-action configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    pub button_label: String,
    pub endpoint: String,
    pub subscribers_file: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            button_label: "Subscribe to the newsletter".to_string(),
            endpoint: "/api/newsletter".to_string(),
            subscribers_file: "newsletter.jsonl".to_string(),
        }
    }
}
