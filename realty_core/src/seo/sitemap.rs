//! XML sitemap of static routes, posts and tag pages

use crate::{
    content::{category_url, distinct_tags},
    models::PostSummary,
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

const STATIC_ROUTES: [(&str, ChangeFrequency, f32); 5] = [
    ("/", ChangeFrequency::Daily, 1.0),
    ("/sell", ChangeFrequency::Weekly, 0.8),
    ("/buy", ChangeFrequency::Weekly, 0.8),
    ("/blog", ChangeFrequency::Daily, 0.9),
    ("/contact", ChangeFrequency::Monthly, 0.7),
];

/// Static routes first, then one entry per post, then one per distinct tag.
pub fn build_entries(base_url: &str, posts: &[PostSummary], now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    let mut entries: Vec<SitemapEntry> = STATIC_ROUTES
        .iter()
        .map(|(path, change_frequency, priority)| SitemapEntry {
            loc: format!("{}{}", base, path),
            last_modified: now,
            change_frequency: *change_frequency,
            priority: *priority,
        })
        .collect();

    entries.extend(posts.iter().map(|post| SitemapEntry {
        loc: format!("{}/blog/{}", base, post.slug),
        last_modified: post.published_at.unwrap_or(now),
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.6,
    }));

    entries.extend(distinct_tags(posts).into_iter().map(|tag| SitemapEntry {
        loc: category_url(base, &tag)
            .map(|url| url.to_string())
            .unwrap_or_else(|| format!("{}/blog/category/{}", base, tag)),
        last_modified: now,
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.6,
    }));

    entries
}

pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "<url>\n<loc>{}</loc>\n<lastmod>{}</lastmod>\n<changefreq>{}</changefreq>\n<priority>{:.1}</priority>\n</url>\n",
            escape_xml(&entry.loc),
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
            entry.change_frequency.as_str(),
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(slug: &str, tags: &[&str], published: Option<DateTime<Utc>>) -> PostSummary {
        PostSummary {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: slug.to_string(),
            excerpt: None,
            thumbnail: None,
            author: None,
            published_at: published,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_static_routes_only_when_no_posts() {
        let now = Utc::now();
        let entries = build_entries("https://soldbyghost.com/", &[], now);

        let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://soldbyghost.com/",
                "https://soldbyghost.com/sell",
                "https://soldbyghost.com/buy",
                "https://soldbyghost.com/blog",
                "https://soldbyghost.com/contact",
            ]
        );
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[4].change_frequency, ChangeFrequency::Monthly);
    }

    #[test]
    fn test_posts_and_tags_follow_static_routes() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let published = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        let posts = vec![
            post("spring-market", &["arlington heights", "selling"], Some(published)),
            post("draft-notes", &["selling"], None),
        ];
        let entries = build_entries("https://soldbyghost.com", &posts, now);

        assert_eq!(entries.len(), 5 + 2 + 2);
        assert_eq!(entries[5].loc, "https://soldbyghost.com/blog/spring-market");
        assert_eq!(entries[5].last_modified, published);
        assert_eq!(entries[6].last_modified, now);
        assert_eq!(entries[7].loc, "https://soldbyghost.com/blog/category/arlington%20heights");
        assert_eq!(entries[8].loc, "https://soldbyghost.com/blog/category/selling");
    }

    #[test]
    fn test_render_escapes_and_formats() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let entries = vec![SitemapEntry {
            loc: "https://soldbyghost.com/blog/category/buy&sell".to_string(),
            last_modified: now,
            change_frequency: ChangeFrequency::Weekly,
            priority: 0.6,
        }];
        let xml = render_xml(&entries);

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<loc>https://soldbyghost.com/blog/category/buy&amp;sell</loc>"));
        assert!(xml.contains("<lastmod>2024-06-01T00:00:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.6</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
