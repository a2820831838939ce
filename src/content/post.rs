//! Content record and navigation models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::TableOfContents;

/// A blog post, fully prepared for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier, used to key comment threads
    pub id: String,

    /// Post title
    pub title: String,

    /// Plain-text excerpt, already pruned
    pub excerpt: String,

    /// Post tags, in front-matter order
    pub tags: Vec<String>,

    pub author: String,

    /// Publication date, formatted for display
    pub date: String,

    /// Last edit date, formatted for display; equals `date` when never edited
    pub last_updated: String,

    pub image: HeroImage,

    /// Rendered HTML body
    pub body: String,

    pub table_of_contents: TableOfContents,

    pub colors: PostColors,

    /// Slug (URL-friendly name)
    pub slug: String,

    /// URL path, starting with the site root
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Source file path (relative to the source dir)
    pub source: String,

    /// Publication timestamp, used for ordering
    pub published_at: NaiveDateTime,

    /// Folder of files published next to the post, if present
    pub asset_dir: Option<PathBuf>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Hero image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImage {
    /// Resolved URL of the image
    pub src: String,
    pub alt: String,
}

/// Palette a post declares in its front-matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostColors {
    pub dark: String,
    pub light: String,
    pub main: String,
}

/// Link to a neighbouring post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

/// Neighbours of a post in publication order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    /// The older post
    pub previous: Option<NavPost>,
    /// The newer post
    pub next: Option<NavPost>,
}

impl NavigationContext {
    /// Navigation for `posts[index]`, where `posts` is sorted newest first
    pub fn for_index(posts: &[Post], index: usize) -> Self {
        let previous = posts.get(index + 1).map(NavPost::from);
        let next = index
            .checked_sub(1)
            .and_then(|i| posts.get(i))
            .map(NavPost::from);
        Self { previous, next }
    }
}

impl From<&Post> for NavPost {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            path: post.path.clone(),
        }
    }
}
