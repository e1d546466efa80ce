//! Post model

use chrono::{Datelike, NaiveDate};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{ContentError, FrontMatter};

/// Characters escaped when a slug becomes a single URL path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a slug for use in a URL path
pub fn encode_slug(slug: &str) -> String {
    utf8_percent_encode(slug, SEGMENT).to_string()
}

/// A blog post parsed from the content store
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date, a calendar date with no timezone attached
    pub date: NaiveDate,

    pub author: Option<String>,

    pub description: Option<String>,

    /// Whether the post appears in listings and feeds
    pub published: bool,

    /// Slug (URL-friendly name), always the source file stem
    pub slug: String,

    pub layout: Option<String>,

    /// Markdown before the front-matter's `excerpt_separator`, if declared
    pub excerpt: Option<String>,

    /// Full source file path
    #[serde(skip)]
    pub source: PathBuf,

    /// Source text, front-matter included
    #[serde(skip)]
    pub raw: String,

    /// Markdown body with the front-matter removed
    #[serde(skip)]
    pub body: String,
}

impl Post {
    /// Parse a post from its source text.
    ///
    /// `title` and `date` are required. The slug comes from the file name; a
    /// front-matter `slug` must agree with it.
    pub fn parse(path: &Path, raw: String) -> Result<Self, ContentError> {
        let (fm, body) = FrontMatter::parse(&raw).map_err(|source| ContentError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;
        let body = body.to_string();
        let excerpt = fm
            .excerpt_separator
            .as_deref()
            .and_then(|separator| body.find(separator))
            .map(|pos| body[..pos].trim().to_string());

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let slug = match fm.slug {
            Some(slug) if slug != stem => {
                return Err(ContentError::SlugMismatch {
                    path: path.to_path_buf(),
                    slug,
                    stem,
                })
            }
            _ => stem,
        };

        let title = fm.title.ok_or_else(|| ContentError::MissingField {
            path: path.to_path_buf(),
            field: "title",
        })?;

        let date_value = fm.date.ok_or_else(|| ContentError::MissingField {
            path: path.to_path_buf(),
            field: "date",
        })?;
        let date = super::frontmatter::parse_date_string(&date_value).ok_or_else(|| {
            ContentError::InvalidDate {
                path: path.to_path_buf(),
                value: date_value.clone(),
            }
        })?;

        Ok(Self {
            title,
            date,
            author: fm.author,
            description: fm.description,
            published: fm.published,
            slug,
            layout: fm.layout,
            excerpt,
            source: path.to_path_buf(),
            raw,
            body,
        })
    }

    /// Canonical site path, `/blog/{slug}`, percent-encoded
    pub fn path(&self) -> String {
        format!("/blog/{}", encode_slug(&self.slug))
    }

    /// Whether the post was published on the given calendar day
    pub fn is_dated(&self, year: i32, month: u32, day: u32) -> bool {
        self.date.year() == year && self.date.month() == month && self.date.day() == day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str, raw: &str) -> Result<Post, ContentError> {
        Post::parse(Path::new(name), raw.to_string())
    }

    #[test]
    fn test_parse_post() {
        let post = parse(
            "content/blog/my-post.md",
            "---\ntitle: My Post\ndate: 2024-03-15\nauthor: Martin\n---\nHello",
        )
        .unwrap();
        assert_eq!(post.slug, "my-post");
        assert_eq!(post.title, "My Post");
        assert!(post.published);
        assert_eq!(post.path(), "/blog/my-post");
        assert!(post.is_dated(2024, 3, 15));
        assert!(!post.is_dated(2024, 3, 16));
        assert_eq!(post.body, "Hello");
    }

    #[test]
    fn test_matching_slug_field() {
        let post = parse(
            "my-post.svx",
            "---\ntitle: T\ndate: 2024-03-15\nslug: my-post\n---\n",
        )
        .unwrap();
        assert_eq!(post.slug, "my-post");
    }

    #[test]
    fn test_slug_mismatch() {
        let err = parse("a.md", "---\ntitle: T\ndate: 2024-03-15\nslug: b\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::SlugMismatch { .. }));
    }

    #[test]
    fn test_missing_title() {
        let err = parse("a.md", "---\ndate: 2024-03-15\n---\n").unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField { field: "title", .. }
        ));
    }

    #[test]
    fn test_missing_and_invalid_date() {
        let err = parse("a.md", "---\ntitle: T\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "date", .. }));

        let err = parse("a.md", "---\ntitle: T\ndate: someday\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { .. }));
    }

    #[test]
    fn test_excerpt() {
        let post = parse(
            "a.md",
            "---\ntitle: T\ndate: 2024-03-15\nexcerpt_separator: <!--more-->\n---\nIntro.\n<!--more-->\nRest.",
        )
        .unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("Intro."));

        let post = parse("b.md", "---\ntitle: T\ndate: 2024-03-15\n---\nIntro.").unwrap();
        assert_eq!(post.excerpt, None);
    }

    #[test]
    fn test_path_is_percent_encoded() {
        let post = parse("café au lait.md", "---\ntitle: T\ndate: 2024-03-15\n---\n").unwrap();
        assert_eq!(post.slug, "café au lait");
        assert_eq!(post.path(), "/blog/caf%C3%A9%20au%20lait");
        assert_eq!(encode_slug("my-post"), "my-post");
    }
}
