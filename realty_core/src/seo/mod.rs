//! Sitemap and page metadata

pub mod metadata;
pub mod sitemap;

pub use metadata::{OpenGraph, PageMetadata, StaticPage};
pub use sitemap::{build_entries, render_xml, ChangeFrequency, SitemapEntry};
