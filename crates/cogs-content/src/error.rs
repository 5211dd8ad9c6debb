pub type ContentResult<T> = Result<T, ContentError>;

#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid date {value:?} on post {slug:?}")]
    InvalidDate { slug: String, value: String },

    #[error("unknown post slug: {0}")]
    UnknownSlug(String),
}

impl ContentError {
    pub fn unknown_slug(slug: impl Into<String>) -> Self {
        Self::UnknownSlug(slug.into())
    }
}
