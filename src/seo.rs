//! Search and social metadata for answer pages.
//!
//! Everything here is a direct projection of the record: `meta_title` and
//! `meta_description` become the document title and description, repeated
//! for Open Graph and the Twitter card, plus the canonical URL. Values are
//! plain strings; maud escapes them when the `<head>` is rendered.

use crate::config::SiteConfig;
use crate::registry::answer_path;
use crate::types::AnswerRecord;
use maud::{Markup, html};
use serde::Serialize;

/// Metadata for one page's `<head>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Canonical URL of an answer page: `{origin}/answers/{slug}`.
pub fn canonical_url(config: &SiteConfig, slug: &str) -> String {
    config.site.url(&answer_path(slug))
}

/// Derive the metadata for an answer page.
pub fn answer_meta(config: &SiteConfig, slug: &str, record: &AnswerRecord) -> PageMeta {
    page_meta(
        config,
        "article",
        &record.meta_title,
        &record.meta_description,
        canonical_url(config, slug),
    )
}

/// Metadata for any page, given its title, description and canonical URL.
pub fn page_meta(
    config: &SiteConfig,
    og_type: &'static str,
    title: &str,
    description: &str,
    canonical: String,
) -> PageMeta {
    let image = config.social.og_image.clone();
    let card = if image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };
    PageMeta {
        title: title.to_string(),
        description: description.to_string(),
        open_graph: OpenGraph {
            kind: og_type,
            title: title.to_string(),
            description: description.to_string(),
            url: canonical.clone(),
            site_name: config.site.name.clone(),
            image: image.clone(),
        },
        twitter: TwitterCard {
            card,
            title: title.to_string(),
            description: description.to_string(),
            site: config.social.twitter_site.clone(),
            image,
        },
        canonical,
    }
}

/// Render the metadata as `<head>` elements.
pub fn render_head_tags(meta: &PageMeta) -> Markup {
    let og = &meta.open_graph;
    let tw = &meta.twitter;
    html! {
        title { (meta.title) }
        meta name="description" content=(meta.description);
        link rel="canonical" href=(meta.canonical);
        meta property="og:type" content=(og.kind);
        meta property="og:title" content=(og.title);
        meta property="og:description" content=(og.description);
        meta property="og:url" content=(og.url);
        meta property="og:site_name" content=(og.site_name);
        @if let Some(image) = &og.image {
            meta property="og:image" content=(image);
        }
        meta name="twitter:card" content=(tw.card);
        meta name="twitter:title" content=(tw.title);
        meta name="twitter:description" content=(tw.description);
        @if let Some(site) = &tw.site {
            meta name="twitter:site" content=(site);
        }
        @if let Some(image) = &tw.image {
            meta name="twitter:image" content=(image);
        }
    }
}
