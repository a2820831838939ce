//! List site content

use anyhow::Result;
use indexmap::IndexMap;

use crate::content::loader::ContentLoader;
use crate::content::Post;
use crate::newsletter::SubscriberList;
use crate::Blog;

/// Tag counts in order of first appearance (newest post first)
pub fn tag_counts(posts: &[Post]) -> IndexMap<String, usize> {
    let mut tags: IndexMap<String, usize> = IndexMap::new();
    for post in posts {
        for tag in &post.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    tags
}

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = ContentLoader::new(blog).load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date, post.title, post.source);
            }
        }
        "tag" | "tags" => {
            let posts = ContentLoader::new(blog).load_posts()?;
            let mut tags: Vec<_> = tag_counts(&posts).into_iter().collect();
            // Stable sort keeps first-appearance order among equal counts
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "subscriber" | "subscribers" => {
            let subscribers = SubscriberList::read(blog.subscribers_path())?;
            println!("Subscribers ({}):", subscribers.len());
            for s in subscribers {
                println!("  {} ({})", s.email, s.subscribed_at);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, subscriber",
                content_type
            );
        }
    }

    Ok(())
}
