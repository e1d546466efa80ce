//! quillpost: a small personal blog server
//!
//! Posts are markdown files with a YAML front-matter header. They are read
//! fresh from the content directory on every request and served as pages,
//! raw text, an RSS feed and an `llms.txt` index. Legacy
//! `/YYYY/MM/DD/slug` permalinks redirect to `/blog/slug`.

pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{MarkdownRenderer, Post, PostStore};
use feed::RssFeed;

/// Name of the site configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The blog application
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding post documents
    pub content_dir: PathBuf,
    /// Static export directory
    pub public_dir: PathBuf,
    /// Assets served under `/static`
    pub static_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            static_dir,
        }
    }

    /// The post store for this site's content directory
    pub fn posts(&self) -> PostStore {
        PostStore::for_site(self)
    }

    /// A markdown renderer using the configured highlighting
    pub fn markdown_renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::with_options(&self.config.highlight)
    }

    /// Render the RSS feed, embedding post bodies when `feed.full_content` is set
    pub fn rss(&self, posts: &[Post], renderer: &MarkdownRenderer) -> String {
        let feed = RssFeed::new(&self.config);
        if self.config.feed.full_content {
            feed.with_content(renderer).render(posts)
        } else {
            feed.render(posts)
        }
    }

    /// Export the site to the public directory
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Remove the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("content/blog"));
        assert_eq!(site.public_dir, dir.path().join("public"));
    }

    #[test]
    fn test_site_reads_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "title: Test\ncontent_dir: posts\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "Test");
        assert_eq!(site.content_dir, dir.path().join("posts"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "title: [broken\n").unwrap();
        assert!(Site::new(dir.path()).is_err());
    }
}
