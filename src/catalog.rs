//! The merged answer catalog and its build-time integrity checks.
//!
//! Shards are merged in order into a single slug → record map. Two shards
//! defining the same slug is an authoring mistake that would otherwise make
//! one record silently disappear, so the default [`DuplicatePolicy::Error`]
//! fails the merge and names both shards. [`DuplicatePolicy::LastWins`]
//! keeps the later record and remembers every overwrite so it can still be
//! reported.
//!
//! [`Catalog::validate`] checks the merged catalog against the registry once,
//! up front, instead of leaving inconsistencies to be skipped silently at
//! render time:
//!
//! - every registry slug has a record
//! - every record is reachable from the registry
//! - related-question links resolve, and their cached titles are current
//! - the record's `category` matches its registry bucket
//! - the table of contents mirrors the section headings

use crate::registry::Registry;
use crate::shards::Shard;
use crate::types::{AnswerRecord, Category};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Slug {slug} is defined in both {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}

/// What to do when two shards define the same slug.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail the merge.
    #[default]
    Error,
    /// Keep the record from the later shard and record the collision.
    LastWins,
}

impl DuplicatePolicy {
    /// Config spelling of the policy.
    pub fn label(self) -> &'static str {
        match self {
            DuplicatePolicy::Error => "error",
            DuplicatePolicy::LastWins => "last-wins",
        }
    }
}

/// A slug overwritten during a [`DuplicatePolicy::LastWins`] merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub slug: String,
    /// Shard whose record was dropped.
    pub dropped: String,
    /// Shard whose record was kept.
    pub kept: String,
}

/// Immutable slug → record map shared by every renderer.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: BTreeMap<String, AnswerRecord>,
    shard_of: BTreeMap<String, String>,
    collisions: Vec<Collision>,
}

impl Catalog {
    /// Merge shards in order.
    pub fn merge(shards: &[Shard], policy: DuplicatePolicy) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();
        for shard in shards {
            for (slug, record) in &shard.records {
                if let Some(previous) = catalog.shard_of.get(slug) {
                    match policy {
                        DuplicatePolicy::Error => {
                            return Err(CatalogError::DuplicateSlug {
                                slug: slug.clone(),
                                first: previous.clone(),
                                second: shard.source_file.clone(),
                            });
                        }
                        DuplicatePolicy::LastWins => catalog.collisions.push(Collision {
                            slug: slug.clone(),
                            dropped: previous.clone(),
                            kept: shard.source_file.clone(),
                        }),
                    }
                }
                catalog.records.insert(slug.clone(), record.clone());
                catalog
                    .shard_of
                    .insert(slug.clone(), shard.source_file.clone());
            }
        }
        Ok(catalog)
    }

    pub fn get(&self, slug: &str) -> Option<&AnswerRecord> {
        self.records.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.records.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, ordered by slug.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerRecord)> {
        self.records.iter().map(|(slug, record)| (slug.as_str(), record))
    }

    /// Source file a slug's record came from.
    pub fn shard_of(&self, slug: &str) -> Option<&str> {
        self.shard_of.get(slug).map(String::as_str)
    }

    /// Overwrites that happened under [`DuplicatePolicy::LastWins`].
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Check the catalog against the registry.
    pub fn validate(&self, registry: &Registry) -> ValidationReport {
        let mut issues: Vec<Issue> = self
            .collisions
            .iter()
            .cloned()
            .map(Issue::Overwritten)
            .collect();

        for slug in registry.slugs() {
            if !self.contains(slug) {
                issues.push(Issue::MissingRecord { slug: slug.clone() });
            }
        }

        for (slug, record) in self.iter() {
            match registry.category_of(slug) {
                None => issues.push(Issue::UnlistedRecord {
                    slug: slug.to_string(),
                }),
                Some(positional) if positional != record.category => {
                    issues.push(Issue::CategoryDrift {
                        slug: slug.to_string(),
                        declared: record.category,
                        positional,
                    });
                }
                Some(_) => {}
            }

            if let Some(position) = toc_mismatch(record) {
                issues.push(Issue::TocMismatch {
                    slug: slug.to_string(),
                    position,
                });
            }

            for related in &record.related_questions {
                if related.slug == slug {
                    issues.push(Issue::SelfReference {
                        slug: slug.to_string(),
                    });
                    continue;
                }
                match self.get(&related.slug) {
                    Some(target) if registry.contains(&related.slug) => {
                        if target.question != related.question {
                            issues.push(Issue::StaleRelatedTitle {
                                from: slug.to_string(),
                                to: related.slug.clone(),
                                cached: related.question.clone(),
                                current: target.question.clone(),
                            });
                        }
                    }
                    _ => issues.push(Issue::DanglingRelated {
                        from: slug.to_string(),
                        to: related.slug.clone(),
                    }),
                }
            }
        }

        ValidationReport { issues }
    }
}

/// Index of the first entry where the table of contents and the section
/// headings disagree, or `None` if they match exactly.
fn toc_mismatch(record: &AnswerRecord) -> Option<usize> {
    let headings = record.sections.iter().map(|s| s.heading.as_str());
    let toc = record.table_of_contents.iter().map(String::as_str);
    let first_diff = headings.zip(toc).position(|(h, t)| h != t);
    match first_diff {
        Some(pos) => Some(pos),
        None if record.sections.len() != record.table_of_contents.len() => {
            Some(record.sections.len().min(record.table_of_contents.len()))
        }
        None => None,
    }
}

/// A single data-quality problem found by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// Registry slug with no record; its page cannot be generated.
    MissingRecord { slug: String },
    /// Record whose slug is not in the registry; it is never published.
    UnlistedRecord { slug: String },
    /// Related link to a slug that is not a published answer.
    DanglingRelated { from: String, to: String },
    /// Related link whose cached title no longer matches the target.
    StaleRelatedTitle {
        from: String,
        to: String,
        cached: String,
        current: String,
    },
    SelfReference { slug: String },
    /// Record category disagrees with its registry bucket.
    CategoryDrift {
        slug: String,
        declared: Category,
        positional: Category,
    },
    /// Table of contents diverges from the section headings at `position`.
    TocMismatch { slug: String, position: usize },
    Overwritten(Collision),
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingRecord { slug } => write!(f, "{slug}: registered but has no record"),
            Issue::UnlistedRecord { slug } => write!(f, "{slug}: record is not in the registry"),
            Issue::DanglingRelated { from, to } => {
                write!(f, "{from}: related question {to} does not resolve")
            }
            Issue::StaleRelatedTitle {
                from,
                to,
                cached,
                current,
            } => write!(
                f,
                "{from}: related title for {to} is {cached:?}, target is now {current:?}"
            ),
            Issue::SelfReference { slug } => write!(f, "{slug}: lists itself as related"),
            Issue::CategoryDrift {
                slug,
                declared,
                positional,
            } => write!(
                f,
                "{slug}: category is {declared} but registry lists it under {positional}"
            ),
            Issue::TocMismatch { slug, position } => write!(
                f,
                "{slug}: table of contents differs from section headings at entry {}",
                position + 1
            ),
            Issue::Overwritten(c) => write!(
                f,
                "{}: record from {} overwritten by {}",
                c.slug, c.dropped, c.kept
            ),
        }
    }
}

/// Result of [`Catalog::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Registry slugs that will render as not-found.
    pub fn missing_slugs(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().filter_map(|issue| match issue {
            Issue::MissingRecord { slug } => Some(slug.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} catalog issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}
