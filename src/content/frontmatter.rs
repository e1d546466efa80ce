//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// A `---` delimited YAML block at the very start of a document.
    static ref FRONT_MATTER_RE: Regex =
        Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?\r?\n)??---[ \t]*(?:\r?\n|\z)").unwrap();
}

/// Front-matter data from a post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Posts are published unless explicitly marked otherwise
    #[serde(default = "default_published")]
    pub published: bool,
    pub slug: Option<String>,
    pub layout: Option<String>,
    pub excerpt_separator: Option<String>,
}

fn default_published() -> bool {
    true
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            author: None,
            description: None,
            published: true,
            slug: None,
            layout: None,
            excerpt_separator: None,
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A document without a leading `---` block yields the default
    /// front-matter and the whole text as body. A block that is present but
    /// not valid YAML is an error.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}');

        let Some(caps) = FRONT_MATTER_RE.captures(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let whole = caps.get(0).map_or(0, |m| m.end());
        let body = &content[whole..];
        let yaml = caps.get(1).map_or("", |m| m.as_str());

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml)?;
        Ok((fm, body))
    }
}

/// Remove a leading front-matter block, returning the markdown body.
///
/// Text without a leading block is returned unchanged.
pub fn strip_front_matter(raw: &str) -> &str {
    let raw = raw.trim_start_matches('\u{feff}');
    match FRONT_MATTER_RE.find(raw) {
        Some(m) => &raw[m.end()..],
        None => raw,
    }
}

/// Parse a date string into a calendar date.
///
/// Date-times are truncated to their written date; the offset is ignored so
/// that `2024-03-15T23:30:00-08:00` stays on the 15th.
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-03-15
author: Martin
description: A first post
slug: hello-world
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.author.as_deref(), Some("Martin"));
        assert_eq!(fm.slug.as_deref(), Some("hello-world"));
        assert!(fm.published);
        assert_eq!(fm.date.as_deref(), Some("2024-03-15"));
        assert!(remaining.starts_with("\nThis is the content."));
    }

    #[test]
    fn test_published_false() {
        let content = "---\ntitle: Draft\ndate: 2024-01-01\npublished: false\n---\nbody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(!fm.published);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_legacy_fields_are_accepted() {
        let content = "---\ntitle: Old\nlayout: post\nexcerpt_separator: <!--more-->\ncomments: true\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.layout.as_deref(), Some("post"));
        assert_eq!(fm.excerpt_separator.as_deref(), Some("<!--more-->"));
        assert_eq!(fm.title.as_deref(), Some("Old"));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\n---\n\nwith a rule";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, body) = FrontMatter::parse("---\n---\nbody").unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_strip_front_matter() {
        let raw = "---\r\ntitle: x\r\n---\r\n# Body\n---\nrule";
        assert_eq!(strip_front_matter(raw), "# Body\n---\nrule");
        assert_eq!(strip_front_matter("no header"), "no header");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_date_string("2024-03-15"), expected);
        assert_eq!(parse_date_string("2024/03/15"), expected);
        assert_eq!(parse_date_string("2024-03-15 10:30:00"), expected);
        assert_eq!(parse_date_string("2024-03-15T23:30:00-08:00"), expected);
        assert_eq!(parse_date_string("2024-03-15T01:00:00+09:00"), expected);
        assert_eq!(parse_date_string("March 15"), None);
    }
}
