use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};

/// Site-wide metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    /// Absolute base URL, e.g. `https://example.com`.
    pub site_url: String,
}

/// A post record as supplied by the content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(default)]
    pub id: String,
    pub title: String,
    /// Route of the post, e.g. `/blog/hello-world/`.
    pub slug: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date: String,
    #[serde(default)]
    pub excerpt: String,
    /// Rendered post body.
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Resolved path of the featured image, if any.
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Path of the source file; blog posts live under `/blog/`.
    #[serde(default)]
    pub source_path: String,
}

/// A post with its date parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub excerpt: String,
    pub html: String,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub source_path: String,
}

impl Post {
    pub fn from_record(record: PostRecord) -> ContentResult<Self> {
        let date = parse_date(&record.date).ok_or_else(|| ContentError::InvalidDate {
            slug: record.slug.clone(),
            value: record.date.clone(),
        })?;
        Ok(Self {
            id: record.id,
            title: record.title,
            slug: record.slug,
            date,
            excerpt: record.excerpt,
            html: record.html,
            tags: record.tags,
            featured_image: record.featured_image,
            source_path: record.source_path,
        })
    }

    /// Whether the post comes from the blog section of the content tree.
    pub fn is_blog_post(&self) -> bool {
        self.source_path.contains("/blog/")
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

#[derive(Deserialize)]
struct RawLibrary {
    site: SiteMetadata,
    #[serde(default)]
    posts: Vec<PostRecord>,
}

/// All content records known to the site.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLibrary {
    pub site: SiteMetadata,
    pub posts: Vec<Post>,
}

impl ContentLibrary {
    /// Parse `{ "site": {..}, "posts": [..] }`.
    pub fn from_json(json: &str) -> ContentResult<Self> {
        let raw: RawLibrary = serde_json::from_str(json)?;
        let posts = raw
            .posts
            .into_iter()
            .map(Post::from_record)
            .collect::<ContentResult<Vec<_>>>()?;
        log::debug!("content: loaded {} records for {}", posts.len(), raw.site.title);
        Ok(Self { site: raw.site, posts })
    }

    pub fn find(&self, slug: &str) -> ContentResult<&Post> {
        self.posts
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| ContentError::unknown_slug(slug))
    }
}
