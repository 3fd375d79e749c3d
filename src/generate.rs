//! HTML page generation.
//!
//! Every page is a pure function of the catalog, the registry and the site
//! config: the same inputs always produce byte-identical HTML, which is what
//! lets the site builder's write cache skip unchanged files.
//!
//! ## Generated Pages
//!
//! - **Answer pages** (`/answers/{slug}/index.html`): the record's quick
//!   answer, prose sections, data points, FAQs and related questions, plus
//!   three embedded JSON-LD documents
//! - **Listing page** (`/answers/index.html`): one group per registry
//!   category with a card per answer
//! - **Root** (`/index.html`): redirect to `/answers/`
//! - **Not found** (`/404.html`)
//!
//! ## Conditional Blocks
//!
//! Optional blocks are left out entirely when they would be empty, never
//! rendered as empty placeholders:
//!
//! | Block | Rendered when |
//! |-------|---------------|
//! | Data points | at least one entry |
//! | Table of contents | more than one entry |
//! | FAQs | at least one entry |
//! | Related questions | at least one entry resolves to a published page |
//!
//! ## Prose
//!
//! Section content is plain text. Paragraphs are separated by a blank line
//! (`"\n\n"`); nothing else is interpreted. maud escapes everything.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::registry::{Registry, answer_path};
use crate::schema::{self, StructuredData};
use crate::seo::{self, PageMeta};
use crate::types::{AnswerRecord, Category, RelatedQuestion};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("No answer for slug: {0}")]
    NotFound(String),
    #[error("JSON-LD serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS: &str = include_str!("../static/style.css");

/// Everything produced for one answer page.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub slug: String,
    pub html: String,
    pub meta: PageMeta,
    pub structured_data: StructuredData,
    /// Serialized `QAPage`, `FAQPage` and `BreadcrumbList`, as embedded.
    pub json_ld: [String; 3],
}

/// Generate the answer page for `slug`.
///
/// A slug without a record is [`GenerateError::NotFound`]; the caller decides
/// what that means for the build.
pub fn generate(
    slug: &str,
    catalog: &Catalog,
    registry: &Registry,
    config: &SiteConfig,
) -> Result<GeneratedPage, GenerateError> {
    let record = catalog
        .get(slug)
        .ok_or_else(|| GenerateError::NotFound(slug.to_string()))?;

    let meta = seo::answer_meta(config, slug, record);
    let structured_data = StructuredData::for_answer(config, record);
    let json_ld = structured_data.to_json()?;
    // Navigation follows the registry; the record's own field is only a badge.
    let section = registry.category_of(slug).unwrap_or(record.category);

    let html = render_answer_page(record, section, catalog, registry, config, &meta, &json_ld).into_string();

    Ok(GeneratedPage {
        slug: slug.to_string(),
        html,
        meta,
        structured_data,
        json_ld,
    })
}

/// Split section content into trimmed, non-empty paragraphs.
///
/// Unlike a plain `split("\n\n")`, surrounding whitespace is trimmed and
/// whitespace-only pieces are dropped, so stray blank lines never render as
/// empty `<p>` elements.
pub fn paragraphs(content: &str) -> Vec<&str> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Related entries whose target is a published page, in authored order.
///
/// A target must be both listed in the registry and backed by a record;
/// anything else would link to the 404 page.
pub fn resolved_related<'a>(
    record: &'a AnswerRecord,
    catalog: &Catalog,
    registry: &Registry,
) -> Vec<&'a RelatedQuestion> {
    record
        .related_questions
        .iter()
        .filter(|rel| registry.contains(&rel.slug) && catalog.contains(&rel.slug))
        .collect()
}

/// Anchor id of the n-th section (1-based).
fn section_id(n: usize) -> String {
    format!("section-{n}")
}

fn category_anchor(category: Category) -> String {
    format!("/answers/#{}", category.key())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(head: Markup, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (head)
                style { (PreEscaped(CSS)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the site header with breadcrumb and category navigation
fn site_header(breadcrumb: Markup, nav: Markup) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb aria-label="Breadcrumb" {
                (breadcrumb)
            }
            nav.site-nav {
                (nav)
            }
        }
    }
}

/// Renders the category navigation, marking the current category
pub fn render_nav(current: Option<Category>) -> Markup {
    html! {
        ul {
            @for category in Category::ALL {
                @let is_current = current == Some(category);
                li class=[is_current.then_some("current")] {
                    a href=(category_anchor(category)) { (category.label()) }
                }
            }
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            a href="/answers/" { (config.site.name) }
        }
    }
}

fn json_ld_scripts(documents: &[String]) -> Markup {
    html! {
        @for json in documents {
            script type="application/ld+json" { (PreEscaped(schema::script_safe(json))) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders an answer page
fn render_answer_page(
    record: &AnswerRecord,
    section: Category,
    catalog: &Catalog,
    registry: &Registry,
    config: &SiteConfig,
    meta: &PageMeta,
    json_ld: &[String],
) -> Markup {
    let breadcrumb = html! {
        a href="/" { "Home" }
        " / "
        a href="/answers/" { "Answers" }
        " / "
        span aria-current="page" { (record.question) }
    };
    let related = resolved_related(record, catalog, registry);

    let head = html! {
        (seo::render_head_tags(meta))
        (json_ld_scripts(json_ld))
    };

    let content = html! {
        (site_header(breadcrumb, render_nav(Some(section))))
        main.answer-page {
            article {
                header.answer-header {
                    a.category-badge href=(category_anchor(record.category)) {
                        (record.category.label())
                    }
                    h1 { (record.question) }
                }
                section.quick-answer {
                    h2 { "Quick answer" }
                    p { (record.answer) }
                }
                @if !record.data_points.is_empty() {
                    section.data-points {
                        h2 { "Key numbers" }
                        ul {
                            @for point in &record.data_points {
                                li { (point) }
                            }
                        }
                    }
                }
                @if record.table_of_contents.len() > 1 {
                    nav.toc {
                        h2 { "In this answer" }
                        ol {
                            @for (i, entry) in record.table_of_contents.iter().enumerate() {
                                li { a href={ "#" (section_id(i + 1)) } { (entry) } }
                            }
                        }
                    }
                }
                @for (i, s) in record.sections.iter().enumerate() {
                    section.answer-section id=(section_id(i + 1)) {
                        h2 { (s.heading) }
                        @for paragraph in paragraphs(&s.content) {
                            p { (paragraph) }
                        }
                    }
                }
                @if !record.faqs.is_empty() {
                    section.faqs {
                        h2 { "Frequently asked questions" }
                        @for faq in &record.faqs {
                            details.faq {
                                summary { (faq.question) }
                                p { (faq.answer) }
                            }
                        }
                    }
                }
                @if !related.is_empty() {
                    section.related {
                        h2 { "Related questions" }
                        ul.related-grid {
                            @for rel in &related {
                                li {
                                    a.related-card href=(answer_path(&rel.slug)) { (rel.question) }
                                }
                            }
                        }
                    }
                }
            }
        }
        (site_footer(config))
    };

    base_document(head, Some("answer"), content)
}

/// Renders the answers listing, grouped by registry category.
///
/// Registry slugs without a record are skipped.
pub fn render_index(catalog: &Catalog, registry: &Registry, config: &SiteConfig) -> Markup {
    let meta = seo::page_meta(
        config,
        "website",
        &config.site.name,
        &config.site.description,
        config.site.url("/answers"),
    );
    let breadcrumb = html! {
        a href="/" { "Home" }
        " / "
        span aria-current="page" { "Answers" }
    };

    let content = html! {
        (site_header(breadcrumb, render_nav(None)))
        main.index-page {
            h1 { (config.site.name) }
            p.lede { (config.site.description) }
            @for (category, slugs) in registry.categories() {
                section.category id=(category.key()) {
                    h2 { (category.label()) }
                    div.card-grid {
                        @for slug in slugs {
                            @if let Some(record) = catalog.get(slug) {
                                a.answer-card href=(answer_path(slug)) {
                                    span.card-title { (record.question) }
                                    span.card-summary { (record.meta_description) }
                                }
                            }
                        }
                    }
                }
            }
        }
        (site_footer(config))
    };

    base_document(seo::render_head_tags(&meta), Some("listing"), content)
}

/// Renders the shared not-found page
pub fn render_not_found(config: &SiteConfig) -> Markup {
    let head = html! {
        title { "Not found | " (config.site.name) }
        meta name="robots" content="noindex";
    };
    let content = html! {
        (site_header(html! { a href="/" { "Home" } }, render_nav(None)))
        main.not-found {
            h1 { "Page not found" }
            p {
                "That answer does not exist. "
                a href="/answers/" { "Browse all answers" }
                "."
            }
        }
        (site_footer(config))
    };
    base_document(head, Some("not-found"), content)
}

/// Renders the site root, which redirects to the answers listing
pub fn render_redirect(config: &SiteConfig) -> Markup {
    let canonical = config.site.url("/answers");
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (config.site.name) }
                link rel="canonical" href=(canonical);
                meta http-equiv="refresh" content="0; url=/answers/";
            }
            body {
                a href="/answers/" { (config.site.name) }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
