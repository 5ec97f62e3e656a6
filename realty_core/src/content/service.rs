use super::{
    category::{category_path, display_category, normalize_category},
    client::ContentSource,
};
use crate::{
    error::{AppError, Result},
    models::{Post, PostCard, PostSummary},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};

const POSTS_PER_CATEGORY: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct CategorySection {
    pub name: String,
    pub href: String,
    pub posts: Vec<PostCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogIndex {
    pub featured: Option<PostCard>,
    pub categories: Vec<CategorySection>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryListing {
    /// The content API returned nothing at all.
    NoPosts,
    Posts {
        category: String,
        display: String,
        posts: Vec<PostSummary>,
    },
}

/// Page-facing view of the content API. Fetch failures never escape as errors:
/// lists degrade to empty and lookups to not-found.
#[derive(Clone)]
pub struct BlogService {
    source: Arc<dyn ContentSource>,
}

impl BlogService {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    pub async fn list_published(&self) -> Vec<PostSummary> {
        match self.source.list_published().await {
            Ok(posts) => posts,
            Err(e) => {
                error!(error = %e, "Error fetching posts");
                Vec::new()
            }
        }
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Post> {
        match self.source.get_by_slug(slug).await {
            Ok(Some(post)) => Ok(post),
            Ok(None) => Err(AppError::NotFound(format!("Post '{}' not found", slug))),
            Err(e) => {
                error!(slug, error = %e, "Error fetching post");
                Err(AppError::NotFound(format!("Post '{}' not found", slug)))
            }
        }
    }

    pub async fn list_by_category(&self, raw_category: &str) -> Result<CategoryListing> {
        let posts = self.list_published().await;
        if posts.is_empty() {
            return Ok(CategoryListing::NoPosts);
        }

        let category = normalize_category(raw_category);
        let matching = filter_by_category(posts, &category);
        if matching.is_empty() {
            warn!(category = %category, "no posts tagged with category");
            return Err(AppError::NotFound(format!("No posts in category '{}'", category)));
        }

        Ok(CategoryListing::Posts {
            display: display_category(&category),
            category,
            posts: matching,
        })
    }

    pub async fn index(&self) -> BlogIndex {
        build_index(&self.list_published().await)
    }
}

pub fn filter_by_category(posts: Vec<PostSummary>, category: &str) -> Vec<PostSummary> {
    posts.into_iter().filter(|post| post.has_tag(category)).collect()
}

/// Tags across `posts` in first-seen order, without duplicates.
pub fn distinct_tags<'a>(posts: impl IntoIterator<Item = &'a PostSummary>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for post in posts {
        for tag in &post.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

/// The first featured post is promoted; every other non-featured post is
/// grouped under each of its tags, two per tag.
pub fn build_index(posts: &[PostSummary]) -> BlogIndex {
    let featured = posts.iter().find(|p| p.is_featured()).map(PostCard::from);
    let others: Vec<&PostSummary> = posts.iter().filter(|p| !p.is_featured()).collect();

    let categories = distinct_tags(others.iter().copied())
        .into_iter()
        .map(|tag| CategorySection {
            href: category_path(&tag),
            posts: others
                .iter()
                .filter(|p| p.tags.contains(&tag))
                .take(POSTS_PER_CATEGORY)
                .map(|p| PostCard::from(*p))
                .collect(),
            name: tag,
        })
        .collect();

    BlogIndex { featured, categories }
}
