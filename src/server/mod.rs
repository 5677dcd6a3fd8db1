//! Live server rendering pages per request

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::pages::SitePages;
use crate::posts::PostResolver;
use crate::Blog;

/// Server state shared by all requests
pub struct ServerState {
    resolver: PostResolver,
    pages: SitePages,
}

impl ServerState {
    pub fn new(blog: &Blog) -> Result<Self> {
        let resolver = blog.resolver()?;
        let pages = SitePages::new(&blog.config, &resolver)?;
        Ok(Self { resolver, pages })
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>, static_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/blogs/:category", get(category_handler))
        .route("/blogs/:category/", get(category_handler))
        .route("/blogs/:category/:slug", get(post_handler))
        .route("/blogs/:category/:slug/", get(post_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState::new(blog)?);
    let app = router(state, &blog.static_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    render_blocking(state, String::new(), |s| s.pages.index(&s.resolver)).await
}

async fn category_handler(
    State(state): State<Arc<ServerState>>,
    Path(category): Path<String>,
) -> Response {
    let path = crate::helpers::category_path(&category);
    if state.resolver.catalog().category(&category).is_none() {
        return not_found(&state, &path, &format!("There is no category {:?}.", category));
    }
    render_blocking(state, path, move |s| s.pages.category(&s.resolver, &category)).await
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path((category, slug)): Path<(String, String)>,
) -> Response {
    let path = crate::helpers::post_path(&category, &slug);
    if state.resolver.catalog().find(&category, &slug).is_none() {
        return not_found(
            &state,
            &path,
            &format!("There is no post {:?} in {:?}.", slug, category),
        );
    }
    render_blocking(state, path, move |s| {
        s.pages.post(&s.resolver, &category, &slug)
    })
    .await
}

async fn fallback_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    not_found(&state, uri.path(), "The page you are looking for does not exist.")
}

/// Render a page on the blocking pool, since the resolver reads post files
/// with `std::fs`
async fn render_blocking<F>(state: Arc<ServerState>, path: String, render: F) -> Response
where
    F: FnOnce(&ServerState) -> crate::error::Result<String> + Send + 'static,
{
    let worker = Arc::clone(&state);
    match tokio::task::spawn_blocking(move || render(&worker)).await {
        Ok(result) => respond(&state, &path, result),
        Err(e) => {
            tracing::error!("Render task for {:?} failed: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Turn a page result into a response. Content faults only fail this
/// request, as a 404.
fn respond(state: &ServerState, path: &str, result: crate::error::Result<String>) -> Response {
    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) if e.is_content_fault() => {
            tracing::warn!("Content fault for {:?}: {}", path, e);
            not_found(state, path, "This page could not be loaded.")
        }
        Err(e) => {
            tracing::error!("Failed to render {:?}: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn not_found(state: &ServerState, path: &str, message: &str) -> Response {
    match state.pages.not_found(path, message) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render not-found page: {}", e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}
