use serde::Serialize;

use crate::record::{ContentLibrary, Post};

/// Date format used on listing pages: `05 March, 2019`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %B, %Y";

/// One entry on the blog listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPreview {
    pub slug: String,
    pub title: String,
    pub display_date: String,
    pub excerpt: String,
}

/// Blog posts, newest first.
#[derive(Debug, Clone)]
pub struct BlogIndex {
    posts: Vec<Post>,
}

impl BlogIndex {
    /// Collect the blog-section posts and sort them by date, newest first.
    /// Posts sharing a date keep their input order.
    pub fn build(library: &ContentLibrary) -> Self {
        let mut posts: Vec<Post> = library
            .posts
            .iter()
            .filter(|p| p.is_blog_post())
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { posts }
    }

    pub fn total_count(&self) -> usize {
        self.posts.len()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn position(&self, slug: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.slug == slug)
    }

    pub fn previews(&self) -> Vec<PostPreview> {
        self.posts
            .iter()
            .map(|p| PostPreview {
                slug: p.slug.clone(),
                title: p.title.clone(),
                display_date: p.date.format(DISPLAY_DATE_FORMAT).to_string(),
                excerpt: p.excerpt.clone(),
            })
            .collect()
    }
}
