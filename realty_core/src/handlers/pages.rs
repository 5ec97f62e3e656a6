//! Static page metadata and the sitemap

use crate::{
    error::Result,
    models::request::ApiResponse,
    seo::{self, metadata, StaticPage},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::info;

pub async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "/health",
            "pages": "/api/pages/{page}",
            "forms": "/api/forms/{contact|estimate|mortgage}",
            "form_sessions": "/api/forms/{kind}/sessions",
            "session": "/api/sessions/{id}",
            "blog": "/api/blog",
            "post": "/api/blog/posts/{slug}",
            "category": "/api/blog/category/{category}",
            "sitemap": "/sitemap.xml"
        }
    })))
}

pub async fn handle_page_metadata(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<impl IntoResponse> {
    let page: StaticPage = page.parse()?;
    Ok(Json(ApiResponse::success(serde_json::json!({
        "page": page,
        "path": page.path(),
        "metadata": metadata::static_page(&state.config.site, page),
    }))))
}

pub async fn handle_sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let posts = state.blog.list_published().await;
    let entries = seo::build_entries(&state.config.site.base_url, &posts, chrono::Utc::now());
    info!("GET /sitemap.xml - {} entries", entries.len());

    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        seo::render_xml(&entries),
    )
}
