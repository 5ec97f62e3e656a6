//! Blog content fetched from the remote content API

pub mod category;
pub mod client;
pub mod service;

pub use category::{category_path, category_url, display_category, normalize_category};
pub use client::{ContentSource, HttpContentClient};
pub use service::{build_index, distinct_tags, BlogIndex, BlogService, CategoryListing, CategorySection};
