//! Whole-site build: load content, render every page, write the output tree.
//!
//! ## Pipeline
//!
//! ```text
//! 1. Load     config.toml + shards  →  Catalog        (merge, validate)
//! 2. Render   registry slugs        →  pages          (rayon, pure)
//! 3. Write    pages                 →  dist/          (sequential, cached)
//! ```
//!
//! Rendering shares the catalog read-only across the rayon pool. Results are
//! collected in registry order and written one by one, so the output and the
//! build report are identical regardless of thread count.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                     # Redirect to /answers/
//! ├── 404.html
//! ├── sitemap.xml
//! ├── robots.txt
//! ├── .answers-cache.json            # Write cache manifest
//! └── answers/
//!     ├── index.html                 # Listing by category
//!     ├── what-is-medical-billing/
//!     │   └── index.html
//!     └── ...
//! ```

use crate::cache::{self, CacheManifest, CacheStats};
use crate::catalog::{Catalog, CatalogError, ValidationReport};
use crate::config::{self, ConfigError, SiteConfig};
use crate::generate::{self, GenerateError};
use crate::registry::Registry;
use crate::shards::{self, Shard, ShardError};
use crate::sitemap;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Shard(#[from] ShardError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("Strict validation failed: {0}")]
    Validation(ValidationReport),
}

/// Everything a build reads, loaded and checked once.
#[derive(Debug, Clone)]
pub struct Content {
    pub config: SiteConfig,
    pub registry: Registry,
    pub shards: Vec<Shard>,
    pub catalog: Catalog,
    pub report: ValidationReport,
}

impl Content {
    /// Load config from `config_root` and shards from `source` (or the
    /// bundled bank), then merge and validate against the built-in registry.
    pub fn load(source: Option<&Path>, config_root: &Path) -> Result<Self, SiteError> {
        let config = config::load_config(config_root)?;
        let shards = shards::load(source)?;
        Self::from_parts(config, Registry::builtin(), shards)
    }

    pub fn from_parts(
        config: SiteConfig,
        registry: Registry,
        shards: Vec<Shard>,
    ) -> Result<Self, SiteError> {
        let catalog = Catalog::merge(&shards, config.validation.duplicate_slugs)?;
        let report = catalog.validate(&registry);
        Ok(Self {
            config,
            registry,
            shards,
            catalog,
            report,
        })
    }

    /// Fail when strict validation is on and the catalog has issues.
    pub fn enforce(&self) -> Result<(), SiteError> {
        if self.config.validation.strict && !self.report.is_clean() {
            return Err(SiteError::Validation(self.report.clone()));
        }
        Ok(())
    }
}

/// A file to be written, relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    pub rel_path: String,
    pub contents: String,
}

impl OutputFile {
    fn new(rel_path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            contents: contents.into(),
        }
    }
}

/// Summary of a build run.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Slugs whose answer page was written, in registry order.
    pub generated: Vec<String>,
    /// Registry slugs with no record; served by `404.html`.
    pub not_found: Vec<String>,
    /// Every file produced, in write order.
    pub files: Vec<String>,
    pub cache: CacheStats,
    pub issues: ValidationReport,
}

/// Output path of an answer page.
pub fn answer_file(slug: &str) -> String {
    format!("answers/{slug}/index.html")
}

/// Render every page of the site without touching the filesystem.
pub fn render_site(content: &Content) -> Result<(Vec<OutputFile>, BuildReport), SiteError> {
    let Content {
        config,
        registry,
        catalog,
        ..
    } = content;

    let rendered: Vec<(&String, Result<generate::GeneratedPage, GenerateError>)> = registry
        .slugs()
        .par_iter()
        .map(|slug| (slug, generate::generate(slug, catalog, registry, config)))
        .collect();

    let mut report = BuildReport {
        issues: content.report.clone(),
        ..Default::default()
    };
    let mut files = Vec::with_capacity(rendered.len() + 5);
    for (slug, result) in rendered {
        match result {
            Ok(page) => {
                files.push(OutputFile::new(answer_file(slug), page.html));
                report.generated.push(slug.clone());
            }
            Err(GenerateError::NotFound(_)) => report.not_found.push(slug.clone()),
            Err(e) => return Err(e.into()),
        }
    }

    files.push(OutputFile::new(
        "answers/index.html",
        generate::render_index(catalog, registry, config).into_string(),
    ));
    files.push(OutputFile::new(
        "index.html",
        generate::render_redirect(config).into_string(),
    ));
    files.push(OutputFile::new(
        "404.html",
        generate::render_not_found(config).into_string(),
    ));
    let urls = sitemap::sitemap_urls(config, report.generated.iter().map(String::as_str));
    files.push(OutputFile::new("sitemap.xml", sitemap::render_sitemap(&urls)));
    files.push(OutputFile::new("robots.txt", sitemap::render_robots(config)));

    report.files = files.iter().map(|f| f.rel_path.clone()).collect();
    Ok((files, report))
}

/// Build the site into `output_dir`.
///
/// With `use_cache`, files whose content is unchanged since the last build
/// are not rewritten. Either way, pages the previous build wrote but this
/// one no longer produces are deleted.
pub fn build(content: &Content, output_dir: &Path, use_cache: bool) -> Result<BuildReport, SiteError> {
    content.enforce()?;
    let (files, mut report) = render_site(content)?;

    fs::create_dir_all(output_dir)?;
    let mut manifest = CacheManifest::load(output_dir);

    let mut stats = CacheStats::default();
    let write = if use_cache {
        cache::write_if_changed
    } else {
        cache::write_file
    };
    for file in &files {
        write(
            output_dir,
            &file.rel_path,
            file.contents.as_bytes(),
            &mut manifest,
            &mut stats,
        )?;
    }

    let live: BTreeSet<String> = report.files.iter().cloned().collect();
    for stale in manifest.prune(&live) {
        remove_output(output_dir, &stale)?;
        stats.removed();
    }

    manifest.save(output_dir)?;
    report.cache = stats;
    Ok(report)
}

/// Delete a previously written file and its directory if now empty.
fn remove_output(output_dir: &Path, rel_path: &str) -> io::Result<()> {
    let path = output_dir.join(rel_path);
    match fs::remove_file(&path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    if let Some(parent) = path.parent()
        && parent != output_dir
        && fs::read_dir(parent).map(|mut d| d.next().is_none()).unwrap_or(false)
    {
        fs::remove_dir(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DuplicatePolicy;
    use crate::test_helpers::{make_shard, related, sample_record};
    use tempfile::TempDir;

    fn bundled() -> Content {
        Content::from_parts(
            SiteConfig::default(),
            Registry::builtin(),
            shards::builtin().unwrap(),
        )
        .unwrap()
    }

    fn small(records: Vec<(&str, crate::types::AnswerRecord)>) -> Content {
        let registry = Registry::from_slugs(["a", "b", "c", "d", "e"]).unwrap();
        Content::from_parts(
            SiteConfig::default(),
            registry,
            vec![make_shard("010-test.toml", records)],
        )
        .unwrap()
    }

    #[test]
    fn bundled_build_writes_every_page() {
        let tmp = TempDir::new().unwrap();
        let content = bundled();
        let report = build(&content, tmp.path(), true).unwrap();

        assert_eq!(report.generated.len(), 50);
        assert!(report.not_found.is_empty());
        for slug in content.registry.slugs() {
            assert!(tmp.path().join(answer_file(slug)).exists(), "{slug}");
        }
        for file in ["index.html", "404.html", "sitemap.xml", "robots.txt", "answers/index.html"] {
            assert!(tmp.path().join(file).exists(), "{file}");
        }
        let sitemap = fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert_eq!(sitemap.matches("<url>").count(), 51);
    }

    #[test]
    fn render_order_follows_registry() {
        let content = bundled();
        let (files, report) = render_site(&content).unwrap();
        assert_eq!(report.generated, content.registry.slugs());
        assert_eq!(files[0].rel_path, "answers/what-is-medical-billing/index.html");
    }

    #[test]
    fn second_build_is_all_unchanged() {
        let tmp = TempDir::new().unwrap();
        let content = small(vec![("a", sample_record("A?")), ("b", sample_record("B?"))]);
        let first = build(&content, tmp.path(), true).unwrap();
        assert_eq!(first.cache.unchanged, 0);

        let second = build(&content, tmp.path(), true).unwrap();
        assert_eq!(second.cache.written, 0);
        assert_eq!(second.cache.unchanged as usize, second.files.len());
    }

    #[test]
    fn no_cache_rewrites_everything() {
        let tmp = TempDir::new().unwrap();
        let content = small(vec![("a", sample_record("A?"))]);
        build(&content, tmp.path(), true).unwrap();
        let again = build(&content, tmp.path(), false).unwrap();
        assert_eq!(again.cache.unchanged, 0);
        assert_eq!(again.cache.written as usize, again.files.len());
    }

    #[test]
    fn no_cache_build_still_prunes_removed_slugs() {
        let tmp = TempDir::new().unwrap();
        let both = small(vec![("a", sample_record("A?")), ("b", sample_record("B?"))]);
        build(&both, tmp.path(), true).unwrap();

        let only_a = small(vec![("a", sample_record("A?"))]);
        let forced = build(&only_a, tmp.path(), false).unwrap();
        assert_eq!(forced.cache.removed, 1);
        assert!(!tmp.path().join(answer_file("b")).exists());

        let cached = build(&only_a, tmp.path(), true).unwrap();
        assert_eq!(cached.cache.removed, 0);
        assert_eq!(cached.cache.written, 0);
        assert!(!CacheManifest::load(tmp.path()).entries.contains_key(&answer_file("b")));
    }

    #[test]
    fn missing_records_render_no_page() {
        let tmp = TempDir::new().unwrap();
        let content = small(vec![("a", sample_record("A?"))]);
        let report = build(&content, tmp.path(), true).unwrap();

        assert_eq!(report.generated, vec!["a"]);
        assert_eq!(report.not_found, vec!["b", "c", "d", "e"]);
        assert!(!tmp.path().join(answer_file("b")).exists());
        let sitemap = fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert!(!sitemap.contains("/answers/b<"));
    }

    #[test]
    fn removed_slug_page_is_deleted() {
        let tmp = TempDir::new().unwrap();
        let both = small(vec![("a", sample_record("A?")), ("b", sample_record("B?"))]);
        build(&both, tmp.path(), true).unwrap();
        assert!(tmp.path().join(answer_file("b")).exists());

        let only_a = small(vec![("a", sample_record("A?"))]);
        let report = build(&only_a, tmp.path(), true).unwrap();
        assert_eq!(report.cache.removed, 1);
        assert!(!tmp.path().join(answer_file("b")).exists());
        assert!(!tmp.path().join("answers/b").exists());
    }

    #[test]
    fn strict_validation_fails_build() {
        let tmp = TempDir::new().unwrap();
        let mut record = sample_record("A?");
        record.related_questions = vec![related("typo", "Typo?")];
        let mut content = small(vec![("a", record)]);
        assert!(!content.report.is_clean());

        content.config.validation.strict = true;
        let err = build(&content, tmp.path(), true).unwrap_err();
        assert!(matches!(err, SiteError::Validation(_)));
        assert!(!tmp.path().join("index.html").exists());
    }

    #[test]
    fn lenient_validation_builds_and_reports() {
        let tmp = TempDir::new().unwrap();
        let mut record = sample_record("A?");
        record.related_questions = vec![related("typo", "Typo?")];
        let content = small(vec![("a", record)]);
        let report = build(&content, tmp.path(), true).unwrap();
        assert!(!report.issues.is_clean());
        let html = fs::read_to_string(tmp.path().join(answer_file("a"))).unwrap();
        assert!(!html.contains("/answers/typo"));
    }

    #[test]
    fn duplicate_policy_comes_from_config() {
        let shards = vec![
            make_shard("010-one.toml", vec![("a", sample_record("First?"))]),
            make_shard("020-two.toml", vec![("a", sample_record("Second?"))]),
        ];
        let registry = Registry::from_slugs(["a", "b", "c", "d", "e"]).unwrap();

        let err = Content::from_parts(SiteConfig::default(), registry.clone(), shards.clone())
            .unwrap_err();
        assert!(matches!(err, SiteError::Catalog(_)));

        let mut config = SiteConfig::default();
        config.validation.duplicate_slugs = DuplicatePolicy::LastWins;
        let content = Content::from_parts(config, registry, shards).unwrap();
        assert_eq!(content.catalog.get("a").unwrap().question, "Second?");
        assert_eq!(content.catalog.collisions().len(), 1);
    }

    #[test]
    fn load_from_source_directory() {
        let tmp = TempDir::new().unwrap();
        let answers = tmp.path().join("answers");
        fs::create_dir_all(&answers).unwrap();
        crate::test_helpers::write_shard(&answers, "010-basics.toml", &[("what-is-a-copay", "What is a copay?")]);
        fs::write(
            tmp.path().join("config.toml"),
            "[site]\norigin = \"https://example.org\"\n",
        )
        .unwrap();

        let content = Content::load(Some(tmp.path()), tmp.path()).unwrap();
        assert_eq!(content.config.site.origin(), "https://example.org");
        assert_eq!(content.catalog.len(), 1);
        assert_eq!(content.report.missing_slugs().count(), 49);
    }
}
