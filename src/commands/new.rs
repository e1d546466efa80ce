//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::is_valid_slug;
use crate::Site;

/// Create an unpublished post named after the slugified title.
///
/// Returns the path of the new file. Refuses to overwrite an existing post
/// under any of the configured extensions.
pub fn create_post(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(slug) => slug.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }
    if !is_valid_slug(&slug) {
        anyhow::bail!("Invalid slug {:?}", slug);
    }

    if site.posts().load_raw_post_by_slug(&slug)?.is_some() {
        anyhow::bail!("A post with slug {:?} already exists", slug);
    }

    let ext = site
        .config
        .content_extensions
        .first()
        .map(String::as_str)
        .unwrap_or("md");

    fs::create_dir_all(&site.content_dir)?;
    let file_path = site.content_dir.join(format!("{}.{}", slug, ext));

    let today = chrono::Local::now().date_naive();
    let content = format!(
        "---\ntitle: {}\ndate: {}\nslug: {}\npublished: false\n---\n\n",
        serde_yaml::to_string(title)?.trim_end(),
        today.format("%Y-%m-%d"),
        serde_yaml::to_string(&slug)?.trim_end()
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}
