//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::encode_slug;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// Contact address used in feed `<author>` elements
    pub email: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    /// Extensions probed when looking a post up by slug, in order
    pub content_extensions: Vec<String>,

    #[serde(default)]
    pub home: HomeConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: "Blog posts".to_string(),
            author: "John Doe".to_string(),
            email: "me@example.com".to_string(),

            url: "http://example.com".to_string(),

            content_dir: "content/blog".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            content_extensions: vec!["md".to_string(), "svx".to_string()],

            home: HomeConfig::default(),
            feed: FeedConfig::default(),
            highlight: HighlightConfig::default(),

            projects: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL of a post page
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.base_url(), encode_slug(slug))
    }
}

/// Home page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub recent_posts: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { recent_posts: 2 }
    }
}

/// RSS feed settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Embed each post's rendered body as `content:encoded`
    pub full_content: bool,
    /// Maximum number of items, all posts when unset
    pub limit: Option<usize>,
}

/// Code highlighting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Kind of link a project points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Github,
    Website,
    Other,
}

/// An entry on the projects page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    /// For GitHub projects, the `org/repo` path
    #[serde(default)]
    pub github_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/blog");
        assert_eq!(config.content_extensions, vec!["md", "svx"]);
        assert_eq!(config.home.recent_posts, 2);
        assert!(!config.feed.full_content);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Martin Emde
url: https://martinemde.com/
email: me@martinemde.com
feed:
  full_content: true
projects:
  - name: tinybucket
    description: A Ruby client library for the Bitbucket Cloud REST API
    url: https://github.com/martinemde/tinybucket
    type: github
    github_path: martinemde/tinybucket
  - name: gem.coop
    description: Ruby community cooperative
    url: https://gem.coop
    type: website
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Martin Emde");
        assert_eq!(config.base_url(), "https://martinemde.com");
        assert_eq!(config.post_url("hi"), "https://martinemde.com/blog/hi");
        assert_eq!(
            config.post_url("café"),
            "https://martinemde.com/blog/caf%C3%A9"
        );
        assert!(config.feed.full_content);
        assert_eq!(config.projects.len(), 2);
        assert_eq!(config.projects[0].kind, ProjectType::Github);
        assert_eq!(
            config.projects[0].github_path.as_deref(),
            Some("martinemde/tinybucket")
        );
        assert_eq!(config.projects[1].github_path, None);
        // untouched fields keep their defaults
        assert_eq!(config.home.recent_posts, 2);
    }
}
