//! Blog handlers backed by the content API

use crate::{
    content::{BlogIndex, CategoryListing},
    error::{AppError, Result},
    models::{request::ApiResponse, Post, PostCard, DEFAULT_THUMBNAIL},
    seo::{metadata, PageMetadata, StaticPage},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::info;

const NO_POSTS_MESSAGE: &str = "There are no posts available at this time.";

#[derive(Debug, Serialize)]
pub struct BlogIndexPage {
    pub metadata: PageMetadata,
    #[serde(flatten)]
    pub index: BlogIndex,
}

#[derive(Debug, Serialize)]
pub struct PostPage {
    pub metadata: PageMetadata,
    pub post: Post,
    pub date: String,
    pub thumbnail: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub metadata: PageMetadata,
    pub category: String,
    pub heading: String,
    pub posts: Vec<PostCard>,
}

pub async fn handle_blog_index(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/blog");
    let index = state.blog.index().await;

    Json(ApiResponse::success(BlogIndexPage {
        metadata: metadata::static_page(&state.config.site, StaticPage::Blog),
        index,
    }))
}

pub async fn handle_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    info!("GET /api/blog/posts/{}", slug);

    match state.blog.get_by_slug(&slug).await {
        Ok(post) => {
            let page = PostPage {
                metadata: metadata::post(&post),
                date: post.display_date(),
                thumbnail: post
                    .thumbnail
                    .clone()
                    .unwrap_or_else(|| DEFAULT_THUMBNAIL.to_string()),
                post,
            };
            Json(ApiResponse::success(page)).into_response()
        }
        Err(AppError::NotFound(message)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": message,
                "status": StatusCode::NOT_FOUND.as_u16(),
                "metadata": metadata::post_not_found(),
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_blog_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Response> {
    info!("GET /api/blog/category/{}", category);

    match state.blog.list_by_category(&category).await? {
        CategoryListing::NoPosts => {
            Ok(Json(ApiResponse::<CategoryPage>::message(NO_POSTS_MESSAGE)).into_response())
        }
        CategoryListing::Posts {
            category,
            display,
            posts,
        } => Ok(Json(ApiResponse::success(CategoryPage {
            metadata: metadata::category(&category),
            heading: format!("{} Posts", display),
            posts: posts.iter().map(PostCard::from).collect(),
            category,
        }))
        .into_response()),
    }
}
