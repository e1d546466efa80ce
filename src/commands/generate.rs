//! Export the site as static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::new_debouncer;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::feed;
use crate::templates::TemplateRenderer;
use crate::{Site, CONFIG_FILE};

/// Write every route's output into the public directory.
///
/// Only published posts are exported; the layout mirrors the server's URLs
/// (`blog/{slug}/index.html`, `blog/{slug}.txt`, `rss.xml`, ...).
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let posts = site.posts().load_all_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let markdown = site.markdown_renderer();
    let pages = TemplateRenderer::new()?;
    let config = &site.config;
    let public = &site.public_dir;

    fs::create_dir_all(public.join("blog"))?;

    let recent = &posts[..posts.len().min(config.home.recent_posts)];
    write(public, "index.html", &pages.render_home(config, recent)?)?;
    write(public, "blog/index.html", &pages.render_blog(config, &posts)?)?;
    write(public, "projects/index.html", &pages.render_projects(config)?)?;

    for post in &posts {
        let content = markdown.render(&post.body);
        let html = pages.render_post(config, post, &content)?;
        write(public, &format!("blog/{}/index.html", post.slug), &html)?;
        write(public, &format!("blog/{}.txt", post.slug), &post.raw)?;
    }

    write(public, "rss.xml", &site.rss(&posts, &markdown))?;
    write(public, "llms.txt", &feed::generate_llms_txt(&posts, config))?;

    tracing::info!(
        "Generated {} posts into {:?} in {:.2}s",
        posts.len(),
        public,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn write(public: &Path, relative: &str, contents: &str) -> Result<()> {
    let path = public.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

/// Regenerate whenever content or configuration changes
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.content_dir);
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let site = site.clone();
    tokio::task::spawn_blocking(move || loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // A changed config may move the content directory
                let current = match Site::new(&site.base_dir) {
                    Ok(current) => current,
                    Err(e) => {
                        tracing::error!("Failed to reload configuration: {}", e);
                        continue;
                    }
                };
                if let Err(e) = run(&current) {
                    tracing::error!("Generation failed: {}", e);
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(_) => break,
        }
    })
    .await?;

    // keep the watcher alive until the loop ends
    drop(debouncer);
    Ok(())
}
