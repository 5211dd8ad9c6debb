use serde::Serialize;

use crate::record::Post;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLink {
    pub name: String,
    /// `/tags/<kebab-case-name>/`
    pub path: String,
}

impl TagLink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: format!("/tags/{}/", kebab_case(name)),
        }
    }
}

/// Lowercase, with every run of non-alphanumeric characters collapsed to a
/// single dash and no leading or trailing dashes.
pub fn kebab_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Everything the post template renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPage {
    pub title: String,
    pub html: String,
    pub tags: Vec<TagLink>,
    pub featured_image: Option<String>,
}

impl PostPage {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            html: post.html.clone(),
            tags: post.tags.iter().map(|t| TagLink::new(t)).collect(),
            featured_image: post.featured_image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_collapses_separators() {
        assert_eq!(kebab_case("Creative Coding"), "creative-coding");
        assert_eq!(kebab_case("three.js"), "three-js");
        assert_eq!(kebab_case("  C++ / Rust  "), "c-rust");
        assert_eq!(kebab_case("WebGL"), "webgl");
    }

    #[test]
    fn tag_paths() {
        let tag = TagLink::new("Game Dev");
        assert_eq!(tag.name, "Game Dev");
        assert_eq!(tag.path, "/tags/game-dev/");
    }

    #[test]
    fn page_from_post() {
        let post = Post {
            id: "1".into(),
            title: "Gears".into(),
            slug: "/blog/gears/".into(),
            date: chrono::NaiveDate::from_ymd_opt(2019, 3, 5).unwrap(),
            excerpt: String::new(),
            html: "<p>hi</p>".into(),
            tags: vec!["WebGL".into(), "three.js".into()],
            featured_image: Some("/static/gears.png".into()),
            source_path: "/content/blog/gears.md".into(),
        };
        let page = PostPage::from_post(&post);
        assert_eq!(page.title, "Gears");
        assert_eq!(page.html, "<p>hi</p>");
        assert_eq!(page.tags[1].path, "/tags/three-js/");
        assert_eq!(page.featured_image.as_deref(), Some("/static/gears.png"));
    }
}
