//! Answer record types shared by every pipeline stage.
//!
//! Records are authored in TOML shard files and deserialized straight into
//! these types. Field names in the shard files match the Rust field names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five fixed answer categories.
///
/// The registry assigns categories positionally; the per-record field only
/// drives the badge shown on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    BillingBasics,
    MedicalCoding,
    ClaimsDenials,
    InsurancePayers,
    RevenueCycle,
}

impl Category {
    /// All categories in registry order.
    pub const ALL: [Category; 5] = [
        Category::BillingBasics,
        Category::MedicalCoding,
        Category::ClaimsDenials,
        Category::InsurancePayers,
        Category::RevenueCycle,
    ];

    /// Human-readable label used for headings and badges.
    pub fn label(self) -> &'static str {
        match self {
            Category::BillingBasics => "Billing Basics",
            Category::MedicalCoding => "Medical Coding",
            Category::ClaimsDenials => "Claims & Denials",
            Category::InsurancePayers => "Insurance & Payers",
            Category::RevenueCycle => "Revenue Cycle",
        }
    }

    /// Kebab-case key, as written in shard files and used for HTML ids.
    pub fn key(self) -> &'static str {
        match self {
            Category::BillingBasics => "billing-basics",
            Category::MedicalCoding => "medical-coding",
            Category::ClaimsDenials => "claims-denials",
            Category::InsurancePayers => "insurance-payers",
            Category::RevenueCycle => "revenue-cycle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single published answer, keyed by slug in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerRecord {
    /// Canonical title, rendered as the H1.
    pub question: String,
    pub meta_title: String,
    pub meta_description: String,
    pub category: Category,
    /// Direct answer paragraph, used verbatim in the QAPage document.
    pub answer: String,
    /// Body sections in reading order. Paragraphs are separated by `\n\n`.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Expected to mirror `sections[].heading`, not enforced.
    #[serde(default)]
    pub table_of_contents: Vec<String>,
    #[serde(default)]
    pub related_questions: Vec<RelatedQuestion>,
    #[serde(default)]
    pub data_points: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub heading: String,
    pub content: String,
}

/// Denormalized edge to another record. `question` is a cached copy of the
/// target's title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelatedQuestion {
    pub slug: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}
