//! # Billing Answers
//!
//! A static site generator for a fixed bank of medical billing questions.
//! Each answer is a hand-authored record; the generator turns every record
//! into a search-friendly page with Open Graph and Twitter metadata and three
//! Schema.org JSON-LD documents, plus a category listing and a sitemap.
//!
//! # Architecture: Load, Render, Write
//!
//! ```text
//! 1. Load     shards/*.toml  →  Catalog   (merge, validate against the registry)
//! 2. Render   Catalog        →  pages     (pure, parallel, deterministic)
//! 3. Write    pages          →  dist/     (skips unchanged files)
//! ```
//!
//! The registry of published slugs is compiled in. Its order is the single
//! source of truth for the page set and for category grouping: fifty slugs
//! in five contiguous buckets of ten.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Answer record and category types |
//! | [`naming`] | `NNN-name` shard file names and slug syntax |
//! | [`shards`] | Bundled and on-disk shard loading |
//! | [`catalog`] | Shard merge with collision policy, integrity lints |
//! | [`registry`] | Ordered slug list and positional category buckets |
//! | [`seo`] | Title, description, canonical, Open Graph and Twitter tags |
//! | [`schema`] | QAPage, FAQPage and BreadcrumbList JSON-LD |
//! | [`generate`] | Maud templates for answer, listing, redirect and 404 pages |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` |
//! | [`cache`] | Content-hash write cache for incremental builds |
//! | [`site`] | Build orchestration across the rayon pool |
//! | [`social`] | Social post feed previews for the admin dashboard |
//! | [`config`] | `config.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Loud Merges, Lenient Renders
//!
//! Shards are merged with an explicit disjointness check: a slug defined
//! twice fails the build by default instead of silently keeping whichever
//! shard loaded last. Cross-reference problems (a related link to a missing
//! slug, a registry slug without a record) are reported once by
//! [`catalog::Catalog::validate`]. Rendering still tolerates them by
//! skipping the broken card, so a typo never takes the site down unless
//! `[validation] strict = true` asks for that.
//!
//! ## Plain-Text Prose
//!
//! Section content is split into paragraphs on blank lines and nothing
//! else. No Markdown, no inline HTML: maud escapes every string, so record
//! text can never inject markup into a page or into the JSON-LD scripts.
//!
//! ## Typed Structured Data
//!
//! JSON-LD documents are serde structs rather than ad-hoc JSON values. The
//! field order of each struct is the serialization order, which keeps the
//! output byte-stable between builds.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod generate;
pub mod naming;
pub mod output;
pub mod registry;
pub mod schema;
pub mod seo;
pub mod shards;
pub mod site;
pub mod sitemap;
pub mod social;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
