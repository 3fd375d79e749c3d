//! Social post previews for the admin dashboard.
//!
//! The admin backend (`GET /api/admin/social`) returns generated social
//! posts as JSON:
//!
//! ```json
//! {
//!   "posts": [
//!     { "id": "p1", "category": "national", "title": "...",
//!       "twitter": "...", "linkedin": "..." }
//!   ],
//!   "counts": { "national": 1, "states": 0, "specialties": 0 }
//! }
//! ```
//!
//! This module reads that payload and derives what the dashboard shows:
//! posts grouped into the three fixed categories, per-platform character
//! counts and whether a post exceeds the platform limit. Counts are in
//! Unicode scalar values, so an emoji or an accented letter counts once.

use crate::config::SocialConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SocialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Social feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    National,
    State,
    Specialty,
}

impl PostCategory {
    /// Dashboard group order.
    pub const ALL: [PostCategory; 3] = [
        PostCategory::National,
        PostCategory::State,
        PostCategory::Specialty,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PostCategory::National => "National",
            PostCategory::State => "State",
            PostCategory::Specialty => "Specialty",
        }
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PostCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "national" => Ok(PostCategory::National),
            "state" | "states" => Ok(PostCategory::State),
            "specialty" | "specialties" => Ok(PostCategory::Specialty),
            other => Err(format!(
                "unknown category {other:?} (expected national, state or specialty)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: String,
    pub category: PostCategory,
    pub title: String,
    pub twitter: String,
    pub linkedin: String,
}

/// Character counts of one post against the configured limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounts {
    pub twitter: usize,
    pub linkedin: usize,
    pub twitter_over: bool,
    pub linkedin_over: bool,
}

impl SocialPost {
    pub fn char_counts(&self, limits: &SocialConfig) -> CharCounts {
        let twitter = self.twitter.chars().count();
        let linkedin = self.linkedin.chars().count();
        CharCounts {
            twitter,
            linkedin,
            twitter_over: twitter > limits.twitter_limit,
            linkedin_over: linkedin > limits.linkedin_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCounts {
    pub national: usize,
    pub states: usize,
    pub specialties: usize,
}

impl FeedCounts {
    pub fn get(&self, category: PostCategory) -> usize {
        match category {
            PostCategory::National => self.national,
            PostCategory::State => self.states,
            PostCategory::Specialty => self.specialties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialFeed {
    pub posts: Vec<SocialPost>,
    #[serde(default)]
    pub counts: FeedCounts,
}

impl SocialFeed {
    /// Posts in one category, or all posts, in feed order.
    pub fn filter(&self, category: Option<PostCategory>) -> Vec<&SocialPost> {
        self.posts
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .collect()
    }

    /// Posts grouped by category in dashboard order. Empty groups are kept.
    pub fn grouped(&self) -> Vec<(PostCategory, Vec<&SocialPost>)> {
        PostCategory::ALL
            .into_iter()
            .map(|c| (c, self.filter(Some(c))))
            .collect()
    }

    /// Counts computed from the posts themselves.
    pub fn tally(&self) -> FeedCounts {
        let mut counts = FeedCounts::default();
        for post in &self.posts {
            match post.category {
                PostCategory::National => counts.national += 1,
                PostCategory::State => counts.states += 1,
                PostCategory::Specialty => counts.specialties += 1,
            }
        }
        counts
    }
}

pub fn parse_feed(json: &str) -> Result<SocialFeed, SocialError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_feed(path: &Path) -> Result<SocialFeed, SocialError> {
    let text = std::fs::read_to_string(path)?;
    parse_feed(&text)
}
