//! Feed generators: RSS 2.0 and llms.txt
//!
//! Both are pure functions of the post list and the site configuration.

use crate::config::SiteConfig;
use crate::content::{strip_front_matter, MarkdownRenderer, Post};

/// Builds an RSS 2.0 document
pub struct RssFeed<'a> {
    config: &'a SiteConfig,
    renderer: Option<&'a MarkdownRenderer>,
}

impl<'a> RssFeed<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            renderer: None,
        }
    }

    /// Embed each post's rendered body as `content:encoded`
    pub fn with_content(mut self, renderer: &'a MarkdownRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Render the feed for posts already sorted newest first
    pub fn render(&self, posts: &[Post]) -> String {
        let base_url = self.config.base_url();
        let limit = self.config.feed.limit.unwrap_or(posts.len());

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        if self.renderer.is_some() {
            xml.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:content="http://purl.org/rss/1.0/modules/content/">"#);
        } else {
            xml.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
        }
        xml.push('\n');
        xml.push_str("  <channel>\n");
        xml.push_str(&format!(
            "    <title>{}</title>\n",
            escape_xml(&self.config.title)
        ));
        xml.push_str(&format!(
            "    <description>{}</description>\n",
            escape_xml(&self.config.description)
        ));
        xml.push_str(&format!("    <link>{}</link>\n", escape_xml(base_url)));
        xml.push_str(&format!(
            "    <atom:link href=\"{}/rss.xml\" rel=\"self\" type=\"application/rss+xml\" />\n",
            escape_xml(base_url)
        ));

        for post in posts.iter().take(limit) {
            self.push_item(&mut xml, post);
        }

        xml.push_str("  </channel>\n");
        xml.push_str("</rss>\n");
        xml
    }

    fn push_item(&self, xml: &mut String, post: &Post) {
        let link = escape_xml(&self.config.post_url(&post.slug));

        xml.push_str("    <item>\n");
        xml.push_str(&format!("      <title>{}</title>\n", escape_xml(&post.title)));
        xml.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(post.description.as_deref().unwrap_or_default())
        ));
        xml.push_str(&format!("      <link>{}</link>\n", link));
        xml.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            link
        ));
        xml.push_str(&format!("      <pubDate>{}</pubDate>\n", rfc822_date(post)));
        if let Some(author) = &post.author {
            xml.push_str(&format!(
                "      <author>{} ({})</author>\n",
                escape_xml(&self.config.email),
                escape_xml(author)
            ));
        }
        if let Some(renderer) = self.renderer {
            let html = renderer.render(strip_front_matter(&post.raw));
            let html = convert_relative_urls_to_absolute(&html, self.config.base_url());
            let html = strip_invalid_xml_chars(&html);
            xml.push_str(&format!(
                "      <content:encoded>{}</content:encoded>\n",
                cdata(&html)
            ));
        }
        xml.push_str("    </item>\n");
    }
}

/// Generate the plain RSS feed (no embedded post bodies)
pub fn generate_rss(posts: &[Post], config: &SiteConfig) -> String {
    RssFeed::new(config).render(posts)
}

/// Generate llms.txt: a heading plus one markdown link per post
pub fn generate_llms_txt(posts: &[Post], config: &SiteConfig) -> String {
    let mut content = format!("# {}\n\n", config.title);
    for post in posts {
        content.push_str(&format!(
            "- [{}]({})\n",
            post.title,
            config.post_url(&post.slug)
        ));
    }
    content
}

/// Midnight GMT of the post's calendar date, RFC 822 style
fn rfc822_date(post: &Post) -> String {
    post.date.format("%a, %d %b %Y 00:00:00 GMT").to_string()
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Wrap text in CDATA, splitting any `]]>` it contains
fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}

/// Convert relative URLs in HTML content to absolute URLs
/// Handles href="/...", src="/...", and similar patterns
fn convert_relative_urls_to_absolute(content: &str, base_url: &str) -> String {
    content
        .replace("href=\"/", &format!("href=\"{}/", base_url))
        .replace("src=\"/", &format!("src=\"{}/", base_url))
        .replace("href='/", &format!("href='{}/", base_url))
        .replace("src='/", &format!("src='{}/", base_url))
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
