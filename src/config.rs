//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root given by `--source` (or the working directory when the
//! bundled bank is used) and is optional: stock defaults apply for anything
//! it leaves out.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! origin = "https://www.billinganswers.com"  # Canonical origin, no trailing slash
//! name = "Medical Billing Answers"
//! description = "Plain-language answers to common medical billing questions."
//!
//! [social]
//! twitter_site = "@billinganswers"   # Optional twitter:site handle
//! og_image = "https://..."           # Optional og:image / twitter:image URL
//! twitter_limit = 280                # Character limit shown in social previews
//! linkedin_limit = 3000
//!
//! [validation]
//! strict = false                     # Fail the build on any catalog issue
//! duplicate_slugs = "error"          # "error" or "last-wins"
//!
//! [processing]
//! max_processes = 4                  # Max parallel render workers (omit for auto)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::catalog::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity of the published site (origin, name).
    pub site: SiteSettings,
    /// Social card and social preview settings.
    pub social: SocialConfig,
    /// Catalog integrity policy.
    pub validation: ValidationConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = &self.site.origin;
        if !(origin.starts_with("https://") || origin.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.origin must start with http:// or https://".into(),
            ));
        }
        if origin.trim_end_matches('/').split("://").nth(1).is_none_or(str::is_empty) {
            return Err(ConfigError::Validation("site.origin must include a host".into()));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if let Some(handle) = &self.social.twitter_site
            && !handle.starts_with('@')
        {
            return Err(ConfigError::Validation(
                "social.twitter_site must start with @".into(),
            ));
        }
        if self.social.twitter_limit == 0 || self.social.linkedin_limit == 0 {
            return Err(ConfigError::Validation(
                "social character limits must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Identity of the published site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Scheme and host every canonical URL is built from.
    pub origin: String,
    /// Site name, used for `og:site_name` and page titles of listing pages.
    pub name: String,
    /// Meta description of the answers listing page.
    pub description: String,
}

impl SiteSettings {
    /// Origin without a trailing slash.
    pub fn origin(&self) -> &str {
        self.origin.trim_end_matches('/')
    }

    /// Absolute URL for a site-relative path (`/answers/...`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin(), path)
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            origin: "https://www.billinganswers.com".to_string(),
            name: "Medical Billing Answers".to_string(),
            description: "Plain-language answers to common medical billing questions."
                .to_string(),
        }
    }
}

/// Social card and social preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    /// `twitter:site` handle, including the leading `@`.
    pub twitter_site: Option<String>,
    /// Absolute image URL for `og:image` and `twitter:image`.
    pub og_image: Option<String>,
    /// Character limit for Twitter/X post previews.
    pub twitter_limit: usize,
    /// Character limit for LinkedIn post previews.
    pub linkedin_limit: usize,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            twitter_site: None,
            og_image: None,
            twitter_limit: 280,
            linkedin_limit: 3000,
        }
    }
}

/// Catalog integrity policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Fail the build when the catalog has any validation issue.
    pub strict: bool,
    /// Handling of a slug defined by more than one shard.
    pub duplicate_slugs: DuplicatePolicy,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, merged over
/// stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Medical Billing Answers Configuration
# =====================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root passed with --source, or in the
# working directory when building the bundled answer bank.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Scheme and host for canonical URLs, Open Graph URLs and the sitemap.
origin = "https://www.billinganswers.com"

# Site name, used for og:site_name and the listing page title.
name = "Medical Billing Answers"

# Meta description of the answers listing page.
description = "Plain-language answers to common medical billing questions."

# ---------------------------------------------------------------------------
# Social cards and social post previews
# ---------------------------------------------------------------------------
[social]
# twitter:site handle, including the leading @.
# twitter_site = "@billinganswers"

# Absolute image URL for og:image / twitter:image. Switches the twitter
# card to summary_large_image.
# og_image = "https://www.billinganswers.com/og.png"

# Character limits used by the `social` preview command.
twitter_limit = 280
linkedin_limit = 3000

# ---------------------------------------------------------------------------
# Catalog validation
# ---------------------------------------------------------------------------
[validation]
# Fail the build when any catalog issue is found (dangling related links,
# category drift, table-of-contents mismatches, ...). When false, issues
# are printed and the build continues.
strict = false

# What to do when two shard files define the same slug:
#   "error"     - fail the build, naming both files
#   "last-wins" - keep the later file's record and report the overwrite
duplicate_slugs = "error"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page-rendering workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
