//! List site content

use anyhow::Result;

use crate::Site;

/// Print published posts, newest first
pub fn run(site: &Site, json: bool) -> Result<()> {
    let posts = site.posts().load_all_posts()?;

    if json {
        let entries: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                serde_json::json!({
                    "title": p.title,
                    "date": p.date.format("%Y-%m-%d").to_string(),
                    "slug": p.slug,
                    "url": site.config.post_url(&p.slug),
                    "author": p.author,
                    "description": p.description,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            post.date.format("%Y-%m-%d"),
            post.title,
            post.slug
        );
    }

    Ok(())
}
