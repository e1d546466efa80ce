//! HTTP server
//!
//! Every request rescans the content directory; the only shared state is the
//! immutable site configuration and the renderers built at startup.

mod error;
pub mod permalink;

pub use error::AppError;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{MarkdownRenderer, PostStore};
use crate::feed;
use crate::templates::TemplateRenderer;
use crate::Site;

pub const RSS_CONTENT_TYPE: &str = "application/xml";
pub const RSS_CACHE_CONTROL: &str = "max-age=0, s-maxage=3600";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Server state
pub struct AppState {
    site: Site,
    markdown: MarkdownRenderer,
    pages: TemplateRenderer,
}

impl AppState {
    pub fn new(site: Site) -> Result<Self> {
        let markdown = site.markdown_renderer();
        let pages = TemplateRenderer::new()?;
        Ok(Self {
            site,
            markdown,
            pages,
        })
    }

    fn store(&self) -> PostStore {
        self.site.posts()
    }
}

type SharedState = Arc<AppState>;

/// Build the application router
pub fn router(state: SharedState) -> Router {
    let static_dir = ServeDir::new(&state.site.static_dir);

    Router::new()
        .route("/", get(home_handler))
        .route("/blog", get(blog_handler))
        .route("/blog/:file", get(post_handler))
        .route("/rss.xml", get(rss_handler))
        .route("/llms.txt", get(llms_handler))
        .route("/projects", get(projects_handler))
        .nest_service("/static", static_dir)
        .fallback(permalink_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(site.clone())?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Serving {:?} at http://{}:{}", site.content_dir, ip, port);
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run content loading and rendering off the async workers
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

async fn home_handler(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    blocking(move || {
        let posts = state
            .store()
            .load_recent_posts(state.site.config.home.recent_posts)?;
        Ok(Html(state.pages.render_home(&state.site.config, &posts)?))
    })
    .await
}

async fn blog_handler(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    blocking(move || {
        let posts = state.store().load_all_posts()?;
        Ok(Html(state.pages.render_blog(&state.site.config, &posts)?))
    })
    .await
}

/// `/blog/{slug}` renders a post, `/blog/{slug}.txt` returns its source
async fn post_handler(
    State(state): State<SharedState>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    blocking(move || match file.strip_suffix(".txt") {
        Some(slug) => {
            let raw = state
                .store()
                .load_raw_post_by_slug(slug)?
                .ok_or_else(|| AppError::PostNotFound(slug.to_string()))?;
            Ok(([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], raw).into_response())
        }
        None => {
            let post = state
                .store()
                .load_post_by_slug(&file)?
                .ok_or_else(|| AppError::PostNotFound(file.clone()))?;
            let content = state.markdown.render(&post.body);
            let html = state
                .pages
                .render_post(&state.site.config, &post, &content)?;
            Ok(Html(html).into_response())
        }
    })
    .await
}

async fn rss_handler(State(state): State<SharedState>) -> Result<Response, AppError> {
    let xml = blocking(move || {
        let posts = state.store().load_all_posts()?;
        Ok(state.site.rss(&posts, &state.markdown))
    })
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, RSS_CONTENT_TYPE),
            (header::CACHE_CONTROL, RSS_CACHE_CONTROL),
        ],
        xml,
    )
        .into_response())
}

async fn llms_handler(State(state): State<SharedState>) -> Result<Response, AppError> {
    let text = blocking(move || {
        let posts = state.store().load_all_posts()?;
        Ok(feed::generate_llms_txt(&posts, &state.site.config))
    })
    .await?;

    Ok(([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], text).into_response())
}

async fn projects_handler(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.render_projects(&state.site.config)?))
}

/// Any unrouted path: resolve legacy permalinks, otherwise back to the index
async fn permalink_handler(
    State(state): State<SharedState>,
    uri: Uri,
) -> Result<Response, AppError> {
    let path = uri.path().to_string();
    let target = blocking(move || {
        permalink::resolve(&path, |slug| state.store().load_post_by_slug(slug))
            .map_err(AppError::from)
    })
    .await?;

    tracing::debug!("Redirecting {} to {}", uri.path(), target);
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response())
}
