//! Route table for the site backend

use super::{blog, forms, health, pages};
use crate::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::handle_root))
        .route("/health", get(health::handle_health))
        .route("/sitemap.xml", get(pages::handle_sitemap))
        .route("/api/pages/:page", get(pages::handle_page_metadata))
        .route("/api/forms/:kind", post(forms::handle_submit_form))
        .route("/api/forms/:kind/sessions", post(forms::handle_open_session))
        .route(
            "/api/sessions/:id",
            get(forms::handle_get_session).delete(forms::handle_close_session),
        )
        .route("/api/sessions/:id/input", patch(forms::handle_update_input))
        .route("/api/sessions/:id/submit", post(forms::handle_submit_session))
        .route("/api/blog", get(blog::handle_blog_index))
        .route("/api/blog/posts/:slug", get(blog::handle_blog_post))
        .route("/api/blog/category/:category", get(blog::handle_blog_category))
}
