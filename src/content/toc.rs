//! Table of contents built from a post's headings

use serde::{Deserialize, Serialize};

/// One heading in the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    /// Heading id, without the leading `#`
    pub anchor: String,
    pub children: Vec<TocEntry>,
}

/// Nested outline of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContents {
    pub items: Vec<TocEntry>,
}

impl TableOfContents {
    /// Build an outline from `(level, title, anchor)` triples in document order.
    ///
    /// A heading nests under the closest preceding heading of a smaller level.
    pub fn from_headings<I>(headings: I) -> Self
    where
        I: IntoIterator<Item = (u8, String, String)>,
    {
        let mut toc = Self::default();
        for (level, title, anchor) in headings {
            insert(
                &mut toc.items,
                TocEntry {
                    level,
                    title,
                    anchor,
                    children: Vec::new(),
                },
            );
        }
        toc
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of entries at every depth
    pub fn len(&self) -> usize {
        fn count(entries: &[TocEntry]) -> usize {
            entries.iter().map(|e| 1 + count(&e.children)).sum()
        }
        count(&self.items)
    }
}

fn insert(siblings: &mut Vec<TocEntry>, entry: TocEntry) {
    match siblings.last_mut() {
        Some(last) if last.level < entry.level => insert(&mut last.children, entry),
        _ => siblings.push(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(level: u8, title: &str) -> (u8, String, String) {
        (level, title.to_string(), slug::slugify(title))
    }

    #[test]
    fn test_nesting() {
        let toc = TableOfContents::from_headings(vec![
            h(2, "Setup"),
            h(3, "Install"),
            h(3, "Configure"),
            h(2, "Usage"),
        ]);

        assert_eq!(toc.items.len(), 2);
        assert_eq!(toc.items[0].title, "Setup");
        assert_eq!(toc.items[0].children.len(), 2);
        assert_eq!(toc.items[0].children[1].anchor, "configure");
        assert!(toc.items[1].children.is_empty());
        assert_eq!(toc.len(), 4);
    }

    #[test]
    fn test_skipped_level_still_nests() {
        let toc = TableOfContents::from_headings(vec![h(1, "Top"), h(3, "Deep"), h(2, "Mid")]);
        assert_eq!(toc.items.len(), 1);
        assert_eq!(toc.items[0].children.len(), 2);
    }

    #[test]
    fn test_leading_deeper_heading_is_top_level() {
        let toc = TableOfContents::from_headings(vec![h(3, "Aside"), h(2, "Main")]);
        assert_eq!(toc.items.len(), 2);
        assert!(!toc.is_empty());
    }
}
