//! Outbound client for the blog content API

use crate::{
    config::ContentConfig,
    error::{AppError, Result},
    models::{Post, PostRow, PostSummary},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn list_published(&self) -> Result<Vec<PostSummary>>;

    /// `Ok(None)` when the API has no post under `slug`.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>>;
}

#[derive(Clone)]
pub struct HttpContentClient {
    http: Client,
    base_url: Url,
}

impl HttpContentClient {
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::Other(anyhow::anyhow!(
                "invalid content base URL '{}': {}",
                config.base_url,
                e
            ))
        })?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Other(anyhow::anyhow!(
                    "content base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ContentSource for HttpContentClient {
    async fn list_published(&self) -> Result<Vec<PostSummary>> {
        let url = self.endpoint(&["api", "posts", "published"])?;
        debug!(url = %url, "fetching published posts");

        let rows: Option<Vec<PostRow>> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(rows
            .unwrap_or_default()
            .into_iter()
            .map(PostSummary::from)
            .collect())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let url = self.endpoint(&["api", "posts", slug])?;
        debug!(url = %url, "fetching post");

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let row: Option<PostRow> = response.error_for_status()?.json().await?;
        Ok(row.map(Post::from))
    }
}
