//! Content shards: the authored answer bank, split across files by topic.
//!
//! Each shard is a TOML document whose top-level tables are slugs:
//!
//! ```toml
//! [what-is-npi-number]
//! question = "What is an NPI number?"
//! meta_title = "..."
//! category = "billing-basics"
//! ...
//!
//! [[what-is-npi-number.faqs]]
//! question = "..."
//! answer = "..."
//! ```
//!
//! The bundled bank is compiled into the binary. For authoring, the same
//! files can be loaded from a directory (`--source`), where `NNN-` filename
//! prefixes set the merge order:
//!
//! ```text
//! content/
//! ├── config.toml
//! └── answers/
//!     ├── 010-billing-basics.toml
//!     ├── 020-medical-coding.toml
//!     └── ...
//! ```
//!
//! Splitting is purely for authoring convenience; [`crate::catalog`] merges
//! the shards into one map and checks that no slug is defined twice.

use crate::naming::{is_valid_slug, parse_shard_stem};
use crate::types::AnswerRecord;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Directory holding shard files, relative to the content root.
pub const ANSWERS_DIR: &str = "answers";

const BUILTIN: [(&str, &str); 5] = [
    (
        "010-billing-basics.toml",
        include_str!("../content/answers/010-billing-basics.toml"),
    ),
    (
        "020-medical-coding.toml",
        include_str!("../content/answers/020-medical-coding.toml"),
    ),
    (
        "030-claims-denials.toml",
        include_str!("../content/answers/030-claims-denials.toml"),
    ),
    (
        "040-insurance-payers.toml",
        include_str!("../content/answers/040-insurance-payers.toml"),
    ),
    (
        "050-revenue-cycle.toml",
        include_str!("../content/answers/050-revenue-cycle.toml"),
    ),
];

#[derive(Error, Debug)]
pub enum ShardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Shard {source_file} is not valid: {error}")]
    Parse {
        source_file: String,
        error: toml::de::Error,
    },
    #[error("Shard {source_file} defines a slug that is not URL-safe: {slug:?}")]
    InvalidSlug { source_file: String, slug: String },
    #[error("No shard files (*.toml) found in {0}")]
    NoShards(PathBuf),
}

/// One source partition of the answer bank.
#[derive(Debug, Clone)]
pub struct Shard {
    /// Shard name with the order prefix stripped (`billing-basics`).
    pub name: String,
    /// File the shard was read from, for diagnostics.
    pub source_file: String,
    pub records: BTreeMap<String, AnswerRecord>,
}

impl Shard {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse one shard document.
pub fn parse_shard(source_file: &str, text: &str) -> Result<Shard, ShardError> {
    let records: BTreeMap<String, AnswerRecord> =
        toml::from_str(text).map_err(|error| ShardError::Parse {
            source_file: source_file.to_string(),
            error,
        })?;

    if let Some(slug) = records.keys().find(|s| !is_valid_slug(s)) {
        return Err(ShardError::InvalidSlug {
            source_file: source_file.to_string(),
            slug: slug.clone(),
        });
    }

    let stem = Path::new(source_file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_file.to_string());
    let parsed = parse_shard_stem(&stem);
    let name = if parsed.name.is_empty() {
        stem
    } else {
        parsed.name
    };

    Ok(Shard {
        name,
        source_file: source_file.to_string(),
        records,
    })
}

/// The shards compiled into the binary, in merge order.
pub fn builtin() -> Result<Vec<Shard>, ShardError> {
    BUILTIN
        .iter()
        .map(|(file, text)| parse_shard(file, text))
        .collect()
}

/// Load every `*.toml` shard under `dir`, ordered by `NNN-` prefix.
///
/// Hidden files are skipped. Nested directories are walked so large topics
/// can be split further; the prefix of the file name alone sets the order.
pub fn load_dir(dir: &Path) -> Result<Vec<Shard>, ShardError> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let is_toml = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        if entry.file_type().is_file() && is_toml && !hidden {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(ShardError::NoShards(dir.to_path_buf()));
    }

    files.sort_by(|a, b| {
        let stem_a = a.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        let stem_b = b.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        let name_a = parse_shard_stem(&stem_a);
        let name_b = parse_shard_stem(&stem_b);
        name_a.sort_key().cmp(&name_b.sort_key())
    });

    let mut shards = Vec::with_capacity(files.len());
    for path in files {
        let text = fs::read_to_string(&path)?;
        let rel = path.strip_prefix(dir).unwrap_or(&path);
        shards.push(parse_shard(&rel.to_string_lossy(), &text)?);
    }
    Ok(shards)
}

/// Load shards from `<source>/answers` when a content root is given,
/// otherwise the bundled bank.
pub fn load(source: Option<&Path>) -> Result<Vec<Shard>, ShardError> {
    match source {
        Some(root) => load_dir(&root.join(ANSWERS_DIR)),
        None => builtin(),
    }
}
