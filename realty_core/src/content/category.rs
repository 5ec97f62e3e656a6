//! Blog category naming: route parameter ↔ tag ↔ heading

use url::Url;

/// `"Arlington-Heights"` -> `"arlington heights"`. The route parameter is
/// already percent-decoded by the path extractor.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().replace('-', " ").to_lowercase()
}

/// Upper-cases the first character only: `"arlington heights"` -> `"Arlington heights"`.
pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Site-relative link to a tag's category page, with the tag percent-encoded.
pub fn category_path(tag: &str) -> String {
    category_url("http://site.invalid", tag)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|| format!("/blog/category/{}", tag))
}

/// Absolute link to a tag's category page under `base_url`.
pub fn category_url(base_url: &str, tag: &str) -> Option<Url> {
    let mut url = Url::parse(base_url).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(&["blog", "category", tag]);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hyphens_and_case() {
        assert_eq!(normalize_category("arlington-heights"), "arlington heights");
        assert_eq!(normalize_category("Arlington-Heights"), "arlington heights");
        assert_eq!(normalize_category("naperville"), "naperville");
        assert_eq!(normalize_category("home selling"), "home selling");
    }

    #[test]
    fn test_display_capitalizes_first_letter() {
        assert_eq!(display_category("arlington heights"), "Arlington heights");
        assert_eq!(display_category(""), "");
    }

    #[test]
    fn test_category_links_are_encoded() {
        assert_eq!(category_path("arlington heights"), "/blog/category/arlington%20heights");
        assert_eq!(
            category_url("https://soldbyghost.com", "buy/sell").unwrap().as_str(),
            "https://soldbyghost.com/blog/category/buy%2Fsell"
        );
    }
}
