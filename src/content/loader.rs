//! Content loader - loads posts from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ContentError, Post};
use crate::Site;

/// Reads posts from the content directory.
///
/// Nothing is cached: every call rescans the directory, so edits show up on
/// the next request.
#[derive(Debug, Clone)]
pub struct PostStore {
    content_dir: PathBuf,
    extensions: Vec<String>,
}

impl PostStore {
    /// Create a store over `content_dir`, probing `extensions` in order
    pub fn new<P: AsRef<Path>>(content_dir: P, extensions: &[String]) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            extensions: extensions.to_vec(),
        }
    }

    /// Create the store configured for a site
    pub fn for_site(site: &Site) -> Self {
        Self::new(&site.content_dir, &site.config.content_extensions)
    }

    /// Load all published posts, newest first.
    ///
    /// Posts sharing a date keep file-name order. Any unreadable or malformed
    /// document fails the whole load, as does a slug used by two documents.
    pub fn load_all_posts(&self) -> Result<Vec<Post>, ContentError> {
        let mut posts = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for path in self.document_paths()? {
            let post = load_post(&path)?;

            if let Some(first) = seen.get(&post.slug) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug,
                    first: first.clone(),
                    second: path,
                });
            }
            seen.insert(post.slug.clone(), path);

            if post.published {
                posts.push(post);
            } else {
                tracing::debug!("Skipping unpublished post {}", post.slug);
            }
        }

        // Stable: same-day posts stay in enumeration order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!(
            "Loaded {} published posts from {:?}",
            posts.len(),
            self.content_dir
        );
        Ok(posts)
    }

    /// The `limit` most recent published posts
    pub fn load_recent_posts(&self, limit: usize) -> Result<Vec<Post>, ContentError> {
        let mut posts = self.load_all_posts()?;
        posts.truncate(limit);
        Ok(posts)
    }

    /// Load a single post by slug, published or not.
    ///
    /// Returns `Ok(None)` when no `{slug}.{ext}` document exists.
    pub fn load_post_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        match self.find_source(slug) {
            Some(path) => load_post(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Source text of a post, front-matter included
    pub fn load_raw_post_by_slug(&self, slug: &str) -> Result<Option<String>, ContentError> {
        match self.find_source(slug) {
            Some(path) => read_source(&path).map(Some),
            None => Ok(None),
        }
    }

    /// First existing `{slug}.{ext}` in extension order
    fn find_source(&self, slug: &str) -> Option<PathBuf> {
        if !is_valid_slug(slug) {
            return None;
        }

        self.extensions
            .iter()
            .map(|ext| self.content_dir.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
    }

    /// Every content document, sorted by file name. Dotfiles are skipped.
    fn document_paths(&self) -> Result<Vec<PathBuf>, ContentError> {
        if !self.content_dir.is_dir() {
            tracing::warn!("Content directory {:?} does not exist", self.content_dir);
            return Ok(Vec::new());
        }

        let dir = glob::Pattern::escape(&self.content_dir.to_string_lossy());
        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..glob::MatchOptions::new()
        };
        let mut paths = Vec::new();

        for ext in &self.extensions {
            let pattern = format!("{}/*.{}", dir, glob::Pattern::escape(ext));
            for entry in glob::glob_with(&pattern, options)? {
                let path = entry?;
                if path.is_file() {
                    paths.push(path);
                }
            }
        }

        paths.sort();
        Ok(paths)
    }
}

fn read_source(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_post(path: &Path) -> Result<Post, ContentError> {
    let raw = read_source(path)?;
    Post::parse(path, raw)
}

/// Slugs name a file directly inside the content directory
pub(crate) fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}
