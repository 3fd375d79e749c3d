//! Name parsing for shard files and slugs.
//!
//! Shard files follow an `NNN-name.toml` convention: the numeric prefix sets
//! the merge order, the rest names the shard in CLI output.
//!
//! - `010-billing-basics` → order=Some(10), name="billing-basics", display="billing basics"
//! - `draft-topics` → order=None, name="draft-topics", display="draft topics"
//!
//! Slugs are the URL path segment of each answer and the catalog key, so they
//! are restricted to lowercase ASCII letters, digits and single dashes.

/// Result of parsing a shard file stem like `010-billing-basics`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardName {
    /// Numeric prefix if present. Unprefixed shards merge after all prefixed ones.
    pub order: Option<u32>,
    /// Name part after `NNN-`, dashes preserved. Full input when unprefixed.
    pub name: String,
    /// Name with dashes converted to spaces.
    pub display_title: String,
}

impl ShardName {
    /// Sort key: prefixed shards by number, then unprefixed ones.
    pub fn sort_key(&self) -> (u32, &str) {
        (self.order.unwrap_or(u32::MAX), &self.name)
    }
}

/// Parse a shard file stem following the `NNN-name` convention.
pub fn parse_shard_stem(stem: &str) -> ShardName {
    if let Some((prefix, rest)) = stem.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ShardName {
            order: Some(num),
            name: rest.to_string(),
            display_title: rest.replace('-', " "),
        };
    }
    if let Ok(num) = stem.parse::<u32>() {
        return ShardName {
            order: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ShardName {
        order: None,
        name: stem.to_string(),
        display_title: stem.replace('-', " "),
    }
}

/// True if `slug` is usable as a URL path segment and catalog key.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
