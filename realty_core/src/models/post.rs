//! Blog posts as served by the content API and as used by the pages
//!
//! The content API encodes nullable columns as `{ "String": .., "Valid": .. }`
//! wrappers with PascalCase keys. [`PostRow`] mirrors that shape and is only
//! used at the fetch boundary; everything else works with [`Post`] and
//! [`PostSummary`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_THUMBNAIL: &str = "/default-thumbnail.jpg";
pub const FEATURED_TAG: &str = "featured";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NullString {
    #[serde(rename = "String", default)]
    pub string: String,
    #[serde(rename = "Valid", default)]
    pub valid: bool,
}

impl NullString {
    fn into_option(self) -> Option<String> {
        self.valid.then_some(self.string)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NullTime {
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "Valid", default)]
    pub valid: bool,
}

impl NullTime {
    fn into_option(self) -> Option<DateTime<Utc>> {
        if !self.valid {
            return None;
        }
        match DateTime::parse_from_rfc3339(&self.time) {
            Ok(time) => Some(time.with_timezone(&Utc)),
            Err(e) => {
                tracing::warn!(time = %self.time, error = %e, "discarding unparseable post timestamp");
                None
            }
        }
    }
}

/// Wire shape of one post row.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Slug")]
    pub slug: String,
    #[serde(rename = "Content", default)]
    pub content: Option<String>,
    #[serde(rename = "Excerpt", default)]
    pub excerpt: Option<NullString>,
    #[serde(rename = "Status", default)]
    pub status: Option<NullString>,
    #[serde(rename = "Author", default)]
    pub author: Option<NullString>,
    #[serde(rename = "Thumbnail", default)]
    pub thumbnail: Option<NullString>,
    #[serde(rename = "PublishedAt", default)]
    pub published_at: Option<NullTime>,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<NullTime>,
    #[serde(rename = "UpdatedAt", default)]
    pub updated_at: Option<NullTime>,
    #[serde(rename = "Tags", default)]
    pub tags: Option<Vec<String>>,
}

fn flatten_string(value: Option<NullString>) -> Option<String> {
    value.and_then(NullString::into_option)
}

fn flatten_time(value: Option<NullTime>) -> Option<DateTime<Utc>> {
    value.and_then(NullTime::into_option)
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            excerpt: flatten_string(row.excerpt),
            content: row.content.unwrap_or_default(),
            thumbnail: flatten_string(row.thumbnail),
            author: flatten_string(row.author),
            status: flatten_string(row.status),
            published_at: flatten_time(row.published_at),
            created_at: flatten_time(row.created_at),
            updated_at: flatten_time(row.updated_at),
            tags: row.tags.unwrap_or_default(),
        }
    }
}

impl From<PostRow> for PostSummary {
    fn from(row: PostRow) -> Self {
        Post::from(row).summary()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub thumbnail: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl Post {
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            slug: self.slug.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            thumbnail: self.thumbnail.clone(),
            author: self.author.clone(),
            published_at: self.published_at,
            tags: self.tags.clone(),
        }
    }

    pub fn display_date(&self) -> String {
        display_date(self.published_at)
    }
}

/// List view of a post; the body is left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl PostSummary {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.to_lowercase() == tag.to_lowercase())
    }

    pub fn is_featured(&self) -> bool {
        self.tags.iter().any(|t| t == FEATURED_TAG)
    }

    pub fn thumbnail_or_default(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(DEFAULT_THUMBNAIL)
    }

    pub fn display_date(&self) -> String {
        display_date(self.published_at)
    }
}

/// Card rendering of a post summary.
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub thumbnail: String,
    pub date: String,
    pub tags: Vec<String>,
}

impl From<&PostSummary> for PostCard {
    fn from(post: &PostSummary) -> Self {
        Self {
            slug: post.slug.clone(),
            href: format!("/blog/{}", post.slug),
            title: post.title.clone(),
            excerpt: post.excerpt.clone().unwrap_or_default(),
            thumbnail: post.thumbnail_or_default().to_string(),
            date: post.display_date(),
            tags: post.tags.clone(),
        }
    }
}

pub fn display_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => "Unknown date".to_string(),
    }
}
