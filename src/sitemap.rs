//! `sitemap.xml` and `robots.txt`.
//!
//! The sitemap lists the answers listing and every answer page that was
//! actually generated, in registry order. The listing is ranked above the
//! individual answers.

use crate::config::SiteConfig;
use crate::registry::answer_path;

/// A sitemap URL entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub changefreq: &'static str,
    pub priority: f32,
}

/// Sitemap entries: the listing, then each generated slug.
pub fn sitemap_urls<'a, I>(config: &SiteConfig, slugs: I) -> Vec<SitemapUrl>
where
    I: IntoIterator<Item = &'a str>,
{
    let listing = SitemapUrl {
        loc: config.site.url("/answers"),
        changefreq: "weekly",
        priority: 0.9,
    };
    std::iter::once(listing)
        .chain(slugs.into_iter().map(|slug| SitemapUrl {
            loc: config.site.url(&answer_path(slug)),
            changefreq: "monthly",
            priority: 0.8,
        }))
        .collect()
}

pub fn render_sitemap(urls: &[SitemapUrl]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');
    for url in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&url.loc)));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", url.changefreq));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", url.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /admin\n\nSitemap: {}\n",
        config.site.url("/sitemap.xml")
    )
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
