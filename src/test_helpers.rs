//! Shared test utilities: record builders, shard builders, and shard files
//! on disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut record = sample_record("What is a copay?");
//! record.related_questions = vec![related("what-is-a-deductible", "What is a deductible?")];
//! let catalog = catalog_of(vec![("what-is-a-copay", record)]);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::{Catalog, DuplicatePolicy};
use crate::shards::Shard;
use crate::types::{AnswerRecord, Category, Faq, RelatedQuestion, Section};

// =========================================================================
// Record builders
// =========================================================================

/// A fully populated record with two sections, a matching table of
/// contents, two data points and two FAQs. No related questions.
pub fn sample_record(question: &str) -> AnswerRecord {
    AnswerRecord {
        question: question.to_string(),
        meta_title: format!("{question} | Test Answers"),
        meta_description: format!("Everything about {question}"),
        category: Category::BillingBasics,
        answer: format!("The short answer to {question}"),
        sections: vec![
            Section {
                heading: "Overview".to_string(),
                content: "First paragraph.\n\nSecond paragraph.".to_string(),
            },
            Section {
                heading: "Details".to_string(),
                content: "Only paragraph.".to_string(),
            },
        ],
        table_of_contents: vec!["Overview".to_string(), "Details".to_string()],
        related_questions: vec![],
        data_points: vec!["42% of claims".to_string(), "30 days".to_string()],
        faqs: vec![
            Faq {
                question: "First FAQ?".to_string(),
                answer: "First FAQ answer.".to_string(),
            },
            Faq {
                question: "Second FAQ?".to_string(),
                answer: "Second FAQ answer.".to_string(),
            },
        ],
    }
}

pub fn related(slug: &str, question: &str) -> RelatedQuestion {
    RelatedQuestion {
        slug: slug.to_string(),
        question: question.to_string(),
    }
}

pub fn faq(question: &str, answer: &str) -> Faq {
    Faq {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

// =========================================================================
// Shard and catalog builders
// =========================================================================

/// Build an in-memory shard from `(slug, record)` pairs.
pub fn make_shard(source_file: &str, records: Vec<(&str, AnswerRecord)>) -> Shard {
    let stem = source_file.trim_end_matches(".toml");
    let name = crate::naming::parse_shard_stem(stem).name;
    Shard {
        name,
        source_file: source_file.to_string(),
        records: records
            .into_iter()
            .map(|(slug, record)| (slug.to_string(), record))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Merge a single shard of `(slug, record)` pairs into a catalog.
pub fn catalog_of(records: Vec<(&str, AnswerRecord)>) -> Catalog {
    let shard = make_shard("010-test.toml", records);
    Catalog::merge(&[shard], DuplicatePolicy::Error).unwrap()
}

// =========================================================================
// Shard files on disk
// =========================================================================

/// Minimal TOML for one record. `slug_key` is written verbatim as the table
/// header, so quoted keys can be used to test invalid slugs.
pub fn record_toml(slug_key: &str, question: &str) -> String {
    format!(
        r#"[{slug_key}]
question = "{question}"
meta_title = "{question} | Test"
meta_description = "About {question}"
category = "billing-basics"
answer = "Answer to {question}"
"#
    )
}

/// Write a shard file containing minimal records for `(slug, question)` pairs.
pub fn write_shard(dir: &Path, file_name: &str, records: &[(&str, &str)]) {
    let text: String = records
        .iter()
        .map(|(slug, question)| record_toml(slug, question))
        .collect::<Vec<_>>()
        .join("\n");
    std::fs::write(dir.join(file_name), text).unwrap();
}
