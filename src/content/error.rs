//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the content store.
///
/// Any of these fails the whole load: a post with a broken header is never
/// skipped silently.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path:?} is missing required field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{path:?} has an unparseable date {value:?}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("{path:?} declares slug {slug:?} but its file name gives {stem:?}")]
    SlugMismatch {
        path: PathBuf,
        slug: String,
        stem: String,
    },

    #[error("slug {slug:?} is used by both {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("invalid content pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to enumerate content: {0}")]
    Glob(#[from] glob::GlobError),
}
