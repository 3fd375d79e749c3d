//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every answer leads
//! with its positional index and question; slugs and output paths follow as
//! secondary context. The output reads as a content inventory while still
//! letting authors trace an entry back to its shard file or output path.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Shards
//! 001 billing-basics (10 answers)
//!     Source: 010-billing-basics.toml
//!
//! Categories
//! 001 Billing Basics (10/10 answers)
//!
//! Config
//!     origin: https://www.billinganswers.com
//!     duplicate_slugs: error
//!     strict: false
//!
//! No catalog issues
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Billing Basics
//!     001 What is medical billing? → answers/what-is-medical-billing/index.html
//!
//! Site
//!     answers/index.html
//!     index.html
//!
//! Generated 50 answer pages in 5 categories
//! Files: 55 unchanged, 0 written (55 total)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::ValidationReport;
use crate::config::SocialConfig;
use crate::generate::GeneratedPage;
use crate::registry::Registry;
use crate::site::{BuildReport, Content, answer_file};
use crate::social::{PostCategory, SocialFeed, SocialPost};
use serde::Serialize;
use std::collections::HashSet;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Catalog issues, or a single all-clear line.
pub fn format_issues(report: &ValidationReport) -> Vec<String> {
    if report.is_clean() {
        return vec!["No catalog issues".to_string()];
    }
    let mut lines = vec![format!("Issues ({})", report.len())];
    for issue in &report.issues {
        lines.push(format!("{}{}", indent(1), issue));
    }
    lines
}

// ============================================================================
// check
// ============================================================================

/// Format the content inventory: shards, category coverage, config, issues.
pub fn format_check_output(content: &Content) -> Vec<String> {
    let mut lines = vec!["Shards".to_string()];
    for (i, shard) in content.shards.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            shard.name,
            plural(shard.len(), "answer", "answers")
        ));
        lines.push(format!("{}Source: {}", indent(1), shard.source_file));
    }

    lines.push(String::new());
    lines.push("Categories".to_string());
    for (i, (category, slugs)) in content.registry.categories().enumerate() {
        let present = slugs.iter().filter(|s| content.catalog.contains(s)).count();
        lines.push(format!(
            "{} {} ({}/{} answers)",
            format_index(i + 1),
            category.label(),
            present,
            slugs.len()
        ));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    let validation = &content.config.validation;
    lines.push(format!("{}origin: {}", indent(1), content.config.site.origin()));
    lines.push(format!("{}duplicate_slugs: {}", indent(1), validation.duplicate_slugs.label()));
    lines.push(format!("{}strict: {}", indent(1), validation.strict));

    lines.push(String::new());
    lines.extend(format_issues(&content.report));
    lines
}

pub fn print_check_output(content: &Content) {
    for line in format_check_output(content) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format build output: every answer page by category, then site files.
pub fn format_build_output(report: &BuildReport, content: &Content) -> Vec<String> {
    let mut lines = Vec::new();
    let generated: HashSet<&str> = report.generated.iter().map(String::as_str).collect();

    for (i, (category, slugs)) in content.registry.categories().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), category.label()));
        for (j, slug) in slugs.iter().enumerate() {
            if !generated.contains(slug.as_str()) {
                continue;
            }
            let question = content
                .catalog
                .get(slug)
                .map(|r| r.question.as_str())
                .unwrap_or(slug);
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                format_index(j + 1),
                question,
                answer_file(slug)
            ));
        }
    }

    if !report.not_found.is_empty() {
        lines.push(String::new());
        lines.push("Not found (served by 404.html)".to_string());
        for slug in &report.not_found {
            lines.push(format!("{}{}", indent(1), slug));
        }
    }

    lines.push(String::new());
    lines.push("Site".to_string());
    for file in report.files.iter().filter(|f| !f.starts_with("answers/") || *f == "answers/index.html") {
        lines.push(format!("{}{}", indent(1), file));
    }

    if !report.issues.is_clean() {
        lines.push(String::new());
        lines.extend(format_issues(&report.issues));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {} categories",
        plural(report.generated.len(), "answer page", "answer pages"),
        content.registry.categories().count()
    ));
    lines.push(format!("Files: {}", report.cache));
    lines
}

pub fn print_build_output(report: &BuildReport, content: &Content) {
    for line in format_build_output(report, content) {
        println!("{}", line);
    }
}

// ============================================================================
// routes
// ============================================================================

/// Every static route, in registry order.
pub fn format_routes(registry: &Registry) -> Vec<String> {
    registry.static_paths()
}

pub fn print_routes(registry: &Registry) {
    for line in format_routes(registry) {
        println!("{}", line);
    }
}

// ============================================================================
// page
// ============================================================================

/// Format one page's metadata and pretty-printed JSON-LD.
pub fn format_page(page: &GeneratedPage) -> Vec<String> {
    let meta = &page.meta;
    let mut lines = vec![
        page.slug.clone(),
        format!("{}Title: {}", indent(1), meta.title),
        format!("{}Description: {}", indent(1), truncate(&meta.description, 80)),
        format!("{}Canonical: {}", indent(1), meta.canonical),
        format!("{}Twitter card: {}", indent(1), meta.twitter.card),
    ];
    let documents = [
        serde_json::to_string_pretty(&page.structured_data.qa_page),
        serde_json::to_string_pretty(&page.structured_data.faq_page),
        serde_json::to_string_pretty(&page.structured_data.breadcrumbs),
    ];
    for doc in documents.into_iter().flatten() {
        lines.push(String::new());
        lines.extend(doc.lines().map(str::to_string));
    }
    lines
}

pub fn print_page(page: &GeneratedPage) {
    for line in format_page(page) {
        println!("{}", line);
    }
}

#[derive(Serialize)]
struct PageJson<'a> {
    slug: &'a str,
    meta: &'a crate::seo::PageMeta,
    structured_data: Vec<serde_json::Value>,
}

/// Machine-readable form of [`format_page`] for `page --json`.
pub fn page_json(page: &GeneratedPage) -> Result<String, serde_json::Error> {
    let structured_data = vec![
        serde_json::to_value(&page.structured_data.qa_page)?,
        serde_json::to_value(&page.structured_data.faq_page)?,
        serde_json::to_value(&page.structured_data.breadcrumbs)?,
    ];
    serde_json::to_string_pretty(&PageJson {
        slug: &page.slug,
        meta: &page.meta,
        structured_data,
    })
}

// ============================================================================
// social
// ============================================================================

fn count_line(label: &str, count: usize, limit: usize, over: bool) -> String {
    let marker = if over { "  OVER LIMIT" } else { "" };
    format!("{}{}: {}/{}{}", indent(2), label, count, limit, marker)
}

fn post_lines(post: &SocialPost, limits: &SocialConfig) -> Vec<String> {
    let counts = post.char_counts(limits);
    vec![
        format!("{}{} {}", indent(1), post.id, truncate(&post.title, 60)),
        count_line("Twitter", counts.twitter, limits.twitter_limit, counts.twitter_over),
        count_line(
            "LinkedIn",
            counts.linkedin,
            limits.linkedin_limit,
            counts.linkedin_over,
        ),
    ]
}

/// Format the social preview, grouped by category or filtered to one.
pub fn format_social(
    feed: &SocialFeed,
    category: Option<PostCategory>,
    limits: &SocialConfig,
) -> Vec<String> {
    let groups: Vec<(PostCategory, Vec<&SocialPost>)> = match category {
        Some(c) => vec![(c, feed.filter(Some(c)))],
        None => feed.grouped(),
    };

    let mut lines = Vec::new();
    for (category, posts) in &groups {
        let reported = feed.counts.get(*category);
        let header = if reported == posts.len() {
            format!("{} ({})", category.label(), plural(posts.len(), "post", "posts"))
        } else {
            format!(
                "{} ({}, feed reports {})",
                category.label(),
                plural(posts.len(), "post", "posts"),
                reported
            )
        };
        lines.push(header);
        for post in posts {
            lines.extend(post_lines(post, limits));
        }
    }

    let over = feed
        .filter(category)
        .iter()
        .filter(|p| {
            let c = p.char_counts(limits);
            c.twitter_over || c.linkedin_over
        })
        .count();
    lines.push(String::new());
    lines.push(format!(
        "{} shown, {} over limit",
        plural(feed.filter(category).len(), "post", "posts"),
        over
    ));
    lines
}

pub fn print_social(feed: &SocialFeed, category: Option<PostCategory>, limits: &SocialConfig) {
    for line in format_social(feed, category, limits) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
