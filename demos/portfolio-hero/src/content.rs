//! JSON view models for the landing page and post template.

use cogs_content::{
    BlogIndex, ContentLibrary, ContentResult, MetaTag, PostNavigation, PostPage, PostPreview,
    SeoMeta,
};
use serde::Serialize;

/// Where the "go back" link on a post leads.
const INDEX_PATH: &str = "/";

#[derive(Serialize)]
struct Head {
    title: String,
    canonical_url: String,
    meta: Vec<MetaTag>,
}

impl From<SeoMeta> for Head {
    fn from(seo: SeoMeta) -> Self {
        Self {
            meta: seo.meta_tags(),
            title: seo.title,
            canonical_url: seo.canonical_url,
        }
    }
}

#[derive(Serialize)]
struct IndexView {
    head: Head,
    title: String,
    description: String,
    total_count: usize,
    posts: Vec<PostPreview>,
}

#[derive(Serialize)]
struct PostView {
    head: Head,
    page: PostPage,
    navigation: PostNavigation,
}

pub fn blog_index(content_json: &str) -> ContentResult<String> {
    let library = ContentLibrary::from_json(content_json)?;
    let index = BlogIndex::build(&library);
    let view = IndexView {
        head: SeoMeta::new(&library.site, None, INDEX_PATH).into(),
        title: library.site.title.clone(),
        description: library.site.description.clone(),
        total_count: index.total_count(),
        posts: index.previews(),
    };
    Ok(serde_json::to_string(&view)?)
}

pub fn post_page(content_json: &str, slug: &str) -> ContentResult<String> {
    let library = ContentLibrary::from_json(content_json)?;
    let index = BlogIndex::build(&library);
    let post = library.find(slug)?;
    let navigation = PostNavigation::for_slug(&index, slug, INDEX_PATH)?;
    let seo = SeoMeta::new(&library.site, Some(&post.title), &post.slug)
        .article(true)
        .image(&library.site, post.featured_image.as_deref());
    let view = PostView {
        head: seo.into(),
        page: PostPage::from_post(post),
        navigation,
    };
    Ok(serde_json::to_string(&view)?)
}
