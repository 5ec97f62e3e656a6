//! Page metadata (title, description, keywords, Open Graph)

use crate::{
    config::SiteConfig,
    content::display_category,
    error::AppError,
    models::Post,
};
use serde::Serialize;
use std::str::FromStr;

const NO_EXCERPT: &str = "No excerpt available.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticPage {
    Home,
    Buy,
    Sell,
    About,
    Contact,
    Blog,
}

impl StaticPage {
    pub fn path(self) -> &'static str {
        match self {
            StaticPage::Home => "/",
            StaticPage::Buy => "/buy",
            StaticPage::Sell => "/sell",
            StaticPage::About => "/about",
            StaticPage::Contact => "/contact",
            StaticPage::Blog => "/blog",
        }
    }
}

impl FromStr for StaticPage {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "home" => Ok(StaticPage::Home),
            "buy" => Ok(StaticPage::Buy),
            "sell" => Ok(StaticPage::Sell),
            "about" => Ok(StaticPage::About),
            "contact" => Ok(StaticPage::Contact),
            "blog" => Ok(StaticPage::Blog),
            other => Err(AppError::NotFound(format!("Unknown page '{}'", other))),
        }
    }
}

/// Landing pages carry the site-wide metadata; the blog has its own.
pub fn static_page(site: &SiteConfig, page: StaticPage) -> PageMetadata {
    match page {
        StaticPage::Blog => PageMetadata {
            title: "Real Estate Blog | Chicago Suburbs Realty".to_string(),
            description: Some(
                "Expert insights on buying and selling homes in the Chicago area.".to_string(),
            ),
            keywords: Some(
                "Chicago homes, Real Estate Blog, real estate tips, real estate investing, \
                 home buying tips, home selling tips, Arlington Heights Homes, Naperville Homes, \
                 Schaumburg home, Chicago suburbs homes"
                    .to_string(),
            ),
            open_graph: None,
        },
        _ => PageMetadata {
            title: site.name.clone(),
            description: Some(site.description.clone()),
            keywords: None,
            open_graph: None,
        },
    }
}

pub fn post(post: &Post) -> PageMetadata {
    let description = post
        .excerpt
        .clone()
        .unwrap_or_else(|| NO_EXCERPT.to_string());
    let keywords = format!(
        "{}, Chicago suburbs real estate",
        post.title.split(' ').collect::<Vec<_>>().join(", ")
    );

    PageMetadata {
        title: post.title.clone(),
        description: Some(description.clone()),
        keywords: Some(keywords),
        open_graph: Some(OpenGraph {
            title: post.title.clone(),
            description,
            images: post.thumbnail.iter().cloned().collect(),
        }),
    }
}

pub fn post_not_found() -> PageMetadata {
    PageMetadata {
        title: "Post Not Found".to_string(),
        description: None,
        keywords: None,
        open_graph: None,
    }
}

/// `category` is the normalized (lowercase, space separated) form.
pub fn category(category: &str) -> PageMetadata {
    PageMetadata {
        title: format!("{} | Chicago Suburbs Realty Blog", display_category(category)),
        description: Some(format!(
            "Explore all blog posts about {} in the Chicago suburbs real estate market.",
            category
        )),
        keywords: Some(format!(
            "{}, Chicago suburbs, real estate, Arlington Heights, Naperville",
            category
        )),
        open_graph: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(excerpt: Option<&str>, thumbnail: Option<&str>) -> Post {
        Post {
            id: "1".to_string(),
            slug: "first-time-buyer-tips".to_string(),
            title: "First Time Buyer Tips".to_string(),
            excerpt: excerpt.map(str::to_string),
            content: String::new(),
            thumbnail: thumbnail.map(str::to_string),
            author: None,
            status: None,
            published_at: None,
            created_at: None,
            updated_at: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_post_metadata() {
        let meta = post(&sample_post(Some("Start here"), Some("https://cdn.example.com/a.webp")));
        assert_eq!(meta.title, "First Time Buyer Tips");
        assert_eq!(meta.description.as_deref(), Some("Start here"));
        assert_eq!(
            meta.keywords.as_deref(),
            Some("First, Time, Buyer, Tips, Chicago suburbs real estate")
        );
        assert_eq!(meta.open_graph.unwrap().images, vec!["https://cdn.example.com/a.webp"]);
    }

    #[test]
    fn test_post_metadata_fallbacks() {
        let meta = post(&sample_post(None, None));
        assert_eq!(meta.description.as_deref(), Some(NO_EXCERPT));
        assert!(meta.open_graph.unwrap().images.is_empty());
    }

    #[test]
    fn test_category_metadata() {
        let meta = category("arlington heights");
        assert_eq!(meta.title, "Arlington heights | Chicago Suburbs Realty Blog");
        assert!(meta.description.unwrap().contains("about arlington heights in"));
    }

    #[test]
    fn test_static_pages() {
        let site = SiteConfig::default();
        assert_eq!(static_page(&site, StaticPage::Sell).title, site.name);
        assert_eq!(
            static_page(&site, StaticPage::Blog).title,
            "Real Estate Blog | Chicago Suburbs Realty"
        );
        assert_eq!("contact".parse::<StaticPage>().unwrap(), StaticPage::Contact);
        assert!("listings".parse::<StaticPage>().is_err());
    }
}
