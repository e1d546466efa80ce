//! Legacy date-based permalinks
//!
//! Old URLs look like `/2024/03/15/my-post` or `/2024/03/15/my-post.html`.
//! They redirect to `/blog/my-post` only when a published post with that slug
//! exists and was published on exactly that day; anything else goes to the
//! blog index.

use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::content::Post;

/// Where every unresolvable path ends up
pub const BLOG_INDEX: &str = "/blog";

lazy_static! {
    static ref DATE_PATH_RE: Regex =
        Regex::new(r"^/?([0-9]{4})/([0-9]{2})/([0-9]{2})/(.+?)(?:\.html)?$").unwrap();
}

/// A parsed `/{year}/{month}/{day}/{slug}` path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePath {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub slug: String,
}

impl DatePath {
    /// Parse a raw request path, `None` unless it has the exact date shape.
    ///
    /// The slug is percent-decoded; one that is not valid UTF-8 once decoded
    /// does not parse.
    pub fn parse(path: &str) -> Option<Self> {
        let caps = DATE_PATH_RE.captures(path)?;
        let slug = percent_decode_str(&caps[4]).decode_utf8().ok()?;
        Some(Self {
            year: caps[1].parse().ok()?,
            month: caps[2].parse().ok()?,
            day: caps[3].parse().ok()?,
            slug: slug.into_owned(),
        })
    }

    /// Whether `post` is the one this path refers to
    pub fn matches(&self, post: &Post) -> bool {
        post.published && post.slug == self.slug && post.is_dated(self.year, self.month, self.day)
    }
}

/// Resolve a legacy path to its redirect target.
///
/// `lookup` finds a post by slug. Only its errors propagate; a miss, an
/// unpublished post, or a date that disagrees with the path all resolve to
/// [`BLOG_INDEX`].
pub fn resolve<F, E>(path: &str, lookup: F) -> Result<String, E>
where
    F: FnOnce(&str) -> Result<Option<Post>, E>,
{
    let Some(date_path) = DatePath::parse(path) else {
        return Ok(BLOG_INDEX.to_string());
    };

    let target = match lookup(&date_path.slug)? {
        Some(post) if date_path.matches(&post) => post.path(),
        Some(post) => {
            tracing::debug!(
                "Permalink {} does not match post dated {}",
                path,
                post.date
            );
            BLOG_INDEX.to_string()
        }
        None => BLOG_INDEX.to_string(),
    };

    Ok(target)
}
