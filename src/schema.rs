//! Schema.org structured data (JSON-LD) for answer pages.
//!
//! Every answer page embeds three independent documents:
//!
//! | Type | Built from |
//! |------|-----------|
//! | `QAPage` | `question` + `answer`, exactly one accepted answer |
//! | `FAQPage` | `faqs`, one `Question` per entry, in order |
//! | `BreadcrumbList` | Home → Answers → the question |
//!
//! Field names follow Schema.org exactly; serde renames map the Rust names.
//! Struct field order is the serialization order, so output is stable.

use crate::config::SiteConfig;
use crate::types::{AnswerRecord, Faq};
use serde::Serialize;

const CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "mainEntity")]
    pub main_entity: QaQuestion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaQuestion {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub text: String,
    #[serde(rename = "answerCount")]
    pub answer_count: u32,
    #[serde(rename = "acceptedAnswer")]
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "mainEntity")]
    pub main_entity: Vec<FaqQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqQuestion {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(rename = "acceptedAnswer")]
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreadcrumbList {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "itemListElement")]
    pub item_list_element: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: u32,
    pub name: String,
    /// Absent for the last crumb, which is the current page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

/// The three JSON-LD documents of one answer page.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredData {
    pub qa_page: QaPage,
    pub faq_page: FaqPage,
    pub breadcrumbs: BreadcrumbList,
}

impl StructuredData {
    pub fn for_answer(config: &SiteConfig, record: &AnswerRecord) -> Self {
        Self {
            qa_page: qa_page(record),
            faq_page: faq_page(&record.faqs),
            breadcrumbs: breadcrumbs(config, &record.question),
        }
    }

    /// Serialize each document, in page order.
    pub fn to_json(&self) -> Result<[String; 3], serde_json::Error> {
        Ok([
            serde_json::to_string(&self.qa_page)?,
            serde_json::to_string(&self.faq_page)?,
            serde_json::to_string(&self.breadcrumbs)?,
        ])
    }
}

pub fn qa_page(record: &AnswerRecord) -> QaPage {
    QaPage {
        context: CONTEXT,
        kind: "QAPage",
        main_entity: QaQuestion {
            kind: "Question",
            name: record.question.clone(),
            text: record.question.clone(),
            answer_count: 1,
            accepted_answer: Answer {
                kind: "Answer",
                text: record.answer.clone(),
            },
        },
    }
}

pub fn faq_page(faqs: &[Faq]) -> FaqPage {
    FaqPage {
        context: CONTEXT,
        kind: "FAQPage",
        main_entity: faqs
            .iter()
            .map(|faq| FaqQuestion {
                kind: "Question",
                name: faq.question.clone(),
                accepted_answer: Answer {
                    kind: "Answer",
                    text: faq.answer.clone(),
                },
            })
            .collect(),
    }
}

pub fn breadcrumbs(config: &SiteConfig, current: &str) -> BreadcrumbList {
    let crumb = |position, name: &str, item: Option<String>| ListItem {
        kind: "ListItem",
        position,
        name: name.to_string(),
        item,
    };
    BreadcrumbList {
        context: CONTEXT,
        kind: "BreadcrumbList",
        item_list_element: vec![
            crumb(1, "Home", Some(config.site.origin().to_string())),
            crumb(2, "Answers", Some(config.site.url("/answers"))),
            crumb(3, current, None),
        ],
    }
}

/// Make serialized JSON safe to embed inside a `<script>` element.
///
/// Every `<` becomes `\u003c`, which rules out both `</script>` and `<!--`.
/// `<` only occurs inside JSON strings, where the escape decodes to the same
/// value.
pub fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}
