//! Content layer for the site: turns already-resolved content records
//! (JSON from the site generator) into the view models the pages render.

pub mod error;
pub mod index;
pub mod navigation;
pub mod page;
pub mod record;
pub mod seo;

pub use error::{ContentError, ContentResult};
pub use index::{BlogIndex, PostPreview};
pub use navigation::{NavLink, PostNavigation};
pub use page::{PostPage, TagLink};
pub use record::{ContentLibrary, Post, PostRecord, SiteMetadata};
pub use seo::{MetaTag, SeoMeta};
