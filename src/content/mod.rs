//! Content module - handles posts, front-matter and markdown rendering

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::ContentError;
pub use frontmatter::{parse_date_string, strip_front_matter, FrontMatter};
pub use loader::PostStore;
pub use markdown::MarkdownRenderer;
pub use post::{encode_slug, Post};
