use serde::Serialize;

use crate::record::SiteMetadata;

/// A `<meta>` tag: `attribute` is `name` or `property`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub attribute: &'static str,
    pub key: &'static str,
    pub content: String,
}

impl MetaTag {
    fn name(key: &'static str, content: impl Into<String>) -> Self {
        Self { attribute: "name", key, content: content.into() }
    }

    fn property(key: &'static str, content: impl Into<String>) -> Self {
        Self { attribute: "property", key, content: content.into() }
    }
}

/// Head metadata for a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub author: String,
    pub canonical_url: String,
    pub article: bool,
    pub image: Option<String>,
}

impl SeoMeta {
    /// `title` of `None` uses the bare site title; otherwise `"<title> | <site>"`.
    pub fn new(site: &SiteMetadata, title: Option<&str>, path: &str) -> Self {
        let title = match title {
            Some(t) if !t.is_empty() => format!("{t} | {}", site.title),
            _ => site.title.clone(),
        };
        Self {
            title,
            description: site.description.clone(),
            author: site.author.clone(),
            canonical_url: absolute_url(&site.site_url, path),
            article: false,
            image: None,
        }
    }

    pub fn article(mut self, article: bool) -> Self {
        self.article = article;
        self
    }

    /// Image path (site-relative or absolute). Stored as an absolute URL.
    pub fn image(mut self, site: &SiteMetadata, image: Option<&str>) -> Self {
        self.image = image.map(|path| absolute_url(&site.site_url, path));
        self
    }

    pub fn og_type(&self) -> &'static str {
        if self.article { "article" } else { "website" }
    }

    pub fn meta_tags(&self) -> Vec<MetaTag> {
        let mut tags = vec![
            MetaTag::name("description", &self.description),
            MetaTag::property("og:title", &self.title),
            MetaTag::property("og:description", &self.description),
            MetaTag::property("og:url", &self.canonical_url),
            MetaTag::property("og:type", self.og_type()),
            MetaTag::name("twitter:card", "summary_large_image"),
            MetaTag::name("twitter:title", &self.title),
        ];
        if !self.author.is_empty() {
            tags.push(MetaTag::name("author", &self.author));
        }
        if let Some(image) = &self.image {
            tags.push(MetaTag::property("og:image", image));
            tags.push(MetaTag::name("twitter:image", image));
        }
        tags
    }
}

fn absolute_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
