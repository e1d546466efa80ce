//! Embedded page templates using the Tera template engine
//!
//! The markup is deliberately bare; pages exist so every route has
//! something to show.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{Project, SiteConfig};
use crate::content::Post;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("projects.html", include_str!("site/projects.html")),
            (
                "partials/post_list.html",
                include_str!("site/partials/post_list.html"),
            ),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Home page with the most recent posts
    pub fn render_home(&self, config: &SiteConfig, recent_posts: &[Post]) -> tera::Result<String> {
        let mut context = self.base_context(config);
        context.insert("posts", recent_posts);
        self.tera.render("home.html", &context)
    }

    /// Full blog listing
    pub fn render_blog(&self, config: &SiteConfig, posts: &[Post]) -> tera::Result<String> {
        let mut context = self.base_context(config);
        context.insert("posts", posts);
        self.tera.render("blog.html", &context)
    }

    /// A single post; `content` is the already rendered body HTML
    pub fn render_post(
        &self,
        config: &SiteConfig,
        post: &Post,
        content: &str,
    ) -> tera::Result<String> {
        let mut context = self.base_context(config);
        context.insert("post", post);
        context.insert("content", content);
        self.tera.render("post.html", &context)
    }

    /// Projects page
    pub fn render_projects(&self, config: &SiteConfig) -> tera::Result<String> {
        let projects: Vec<ProjectData> = config.projects.iter().map(ProjectData::from).collect();
        let mut context = self.base_context(config);
        context.insert("projects", &projects);
        self.tera.render("projects.html", &context)
    }

    fn base_context(&self, config: &SiteConfig) -> Context {
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: &config.title,
                description: &config.description,
                author: &config.author,
                url: config.base_url(),
            },
        );
        context
    }
}

/// Tera filter: format a `YYYY-MM-DD` date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    // "LL" gives "March 15, 2024"
    if format == "LL" {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(tera::Value::String(date.format("%B %-d, %Y").to_string()));
        }
    }

    Ok(tera::Value::String(s))
}

#[derive(Debug, Serialize)]
struct SiteData<'a> {
    title: &'a str,
    description: &'a str,
    author: &'a str,
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct ProjectData<'a> {
    name: &'a str,
    description: &'a str,
    url: &'a str,
    kind: &'static str,
    github_path: Option<&'a str>,
}

impl<'a> From<&'a Project> for ProjectData<'a> {
    fn from(project: &'a Project) -> Self {
        use crate::config::ProjectType;

        Self {
            name: &project.name,
            description: &project.description,
            url: &project.url,
            kind: match project.kind {
                ProjectType::Github => "github",
                ProjectType::Website => "website",
                ProjectType::Other => "other",
            },
            github_path: project.github_path.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectType;
    use std::path::Path;

    fn post(slug: &str, title: &str, date: &str) -> Post {
        let raw = format!(
            "---\ntitle: \"{}\"\ndate: {}\ndescription: About {}\n---\nBody",
            title, date, slug
        );
        Post::parse(Path::new(&format!("{}.md", slug)), raw).unwrap()
    }

    #[test]
    fn test_render_blog_lists_posts() {
        let renderer = TemplateRenderer::new().unwrap();
        let posts = vec![post("b", "Second", "2024-03-15"), post("a", "First", "2023-01-02")];
        let html = renderer.render_blog(&SiteConfig::default(), &posts).unwrap();

        assert!(html.contains(r#"href="/blog/b""#));
        assert!(html.contains("March 15, 2024"));
        assert!(html.find("Second").unwrap() < html.find("First").unwrap());
    }

    #[test]
    fn test_post_list_falls_back_to_excerpt() {
        let renderer = TemplateRenderer::new().unwrap();
        let raw = "---\ntitle: Teaser\ndate: 2024-03-15\nexcerpt_separator: <!--more-->\n---\nThe short part.\n<!--more-->\nThe long part.";
        let teaser = Post::parse(Path::new("teaser.md"), raw.to_string()).unwrap();
        let posts = vec![teaser, post("a", "First", "2023-01-02")];
        let html = renderer.render_blog(&SiteConfig::default(), &posts).unwrap();

        assert!(html.contains(r#"<p class="excerpt">The short part.</p>"#));
        assert!(!html.contains("The long part."));
        assert!(html.contains("<p>About a</p>"));
    }

    #[test]
    fn test_render_post_escapes_title_not_content() {
        let renderer = TemplateRenderer::new().unwrap();
        let post = post("x", "Cats & Dogs", "2024-03-15");
        let html = renderer
            .render_post(&SiteConfig::default(), &post, "<p>Hello</p>")
            .unwrap();

        assert!(html.contains("Cats &amp; Dogs"));
        assert!(html.contains("<p>Hello</p>"));
        assert!(html.contains(r#"href="/blog/x.txt""#));
    }

    #[test]
    fn test_render_projects() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut config = SiteConfig::default();
        config.projects.push(Project {
            name: "tinybucket".to_string(),
            description: "Bitbucket client".to_string(),
            url: "https://github.com/martinemde/tinybucket".to_string(),
            kind: ProjectType::Github,
            github_path: Some("martinemde/tinybucket".to_string()),
        });

        let html = renderer.render_projects(&config).unwrap();
        assert!(html.contains(">tinybucket</a>"));
        assert!(html.contains(r#"class="project-github""#));
        assert!(html.contains("Bitbucket client"));
    }
}
