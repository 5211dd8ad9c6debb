use serde::Serialize;

use crate::error::{ContentError, ContentResult};
use crate::index::BlogIndex;
use crate::record::Post;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub slug: String,
    pub title: String,
}

impl From<&Post> for NavLink {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
        }
    }
}

/// Links shown under a post. The sequence wraps: the newest post's "newer"
/// link is the oldest post and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostNavigation {
    /// The listing page the post was opened from.
    pub back: String,
    pub newer: NavLink,
    pub older: NavLink,
}

impl PostNavigation {
    pub fn for_slug(index: &BlogIndex, slug: &str, back: impl Into<String>) -> ContentResult<Self> {
        let posts = index.posts();
        let i = index
            .position(slug)
            .ok_or_else(|| ContentError::unknown_slug(slug))?;
        let last = posts.len() - 1;

        let newer = if i == 0 { &posts[last] } else { &posts[i - 1] };
        let older = if i == last { &posts[0] } else { &posts[i + 1] };

        Ok(Self {
            back: back.into(),
            newer: newer.into(),
            older: older.into(),
        })
    }
}
