//! The slug registry: every publishable answer, in order.
//!
//! The registry is a flat, ordered slug list sliced into five contiguous
//! buckets of equal size, one per [`Category`] in [`Category::ALL`] order.
//! Category membership is positional: moving a slug within the list moves
//! it between categories regardless of the record's own `category` field.
//!
//! The built-in registry is a compile-time constant; nothing inserts or
//! removes slugs at runtime.

use crate::naming::is_valid_slug;
use crate::types::Category;
use std::collections::HashSet;
use thiserror::Error;

/// Slugs per category bucket in the built-in registry.
pub const BUCKET_SIZE: usize = 10;

const BUILTIN_SLUGS: [&str; BUCKET_SIZE * 5] = [
    // Billing Basics
    "what-is-medical-billing",
    "what-is-npi-number",
    "what-is-a-superbill",
    "what-is-cms-1500-form",
    "what-is-ub-04-form",
    "what-is-a-clearinghouse",
    "what-is-an-eob",
    "what-is-patient-responsibility",
    "what-is-a-fee-schedule",
    "what-is-place-of-service-code",
    // Medical Coding
    "what-is-cpt-code",
    "what-is-icd-10-code",
    "what-is-hcpcs-code",
    "what-are-modifiers-in-medical-billing",
    "what-is-modifier-25",
    "what-is-modifier-59",
    "what-is-medical-necessity",
    "what-is-upcoding",
    "what-is-unbundling",
    "what-are-e-m-codes",
    // Claims & Denials
    "what-is-a-clean-claim",
    "what-is-a-claim-denial",
    "what-is-a-claim-rejection",
    "what-is-a-carc-code",
    "what-is-timely-filing-limit",
    "how-to-appeal-a-denied-claim",
    "what-is-a-corrected-claim",
    "what-is-coordination-of-benefits",
    "what-is-denial-code-co-97",
    "what-is-first-pass-resolution-rate",
    // Insurance & Payers
    "what-is-prior-authorization",
    "what-is-a-deductible",
    "what-is-coinsurance",
    "what-is-a-copay",
    "what-is-credentialing",
    "what-is-an-out-of-network-provider",
    "what-is-medicare-part-b",
    "what-is-medicaid-billing",
    "what-is-the-no-surprises-act",
    "what-is-eligibility-verification",
    // Revenue Cycle
    "what-is-revenue-cycle-management",
    "what-is-accounts-receivable-in-medical-billing",
    "what-is-days-in-ar",
    "what-is-a-write-off",
    "what-is-payment-posting",
    "what-is-an-era-835",
    "what-is-charge-capture",
    "what-is-net-collection-rate",
    "should-i-outsource-medical-billing",
    "how-much-does-medical-billing-cost",
];

#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("Registry is empty")]
    Empty,
    #[error("Registry of {0} slugs does not split into {n} equal buckets", n = Category::ALL.len())]
    UnevenBuckets(usize),
    #[error("Slug listed twice in registry: {0}")]
    Duplicate(String),
    #[error("Slug is not URL-safe: {0:?}")]
    InvalidSlug(String),
}

/// Ordered slug list with its positional category partition.
#[derive(Debug, Clone)]
pub struct Registry {
    slugs: Vec<String>,
    bucket_size: usize,
}

impl Registry {
    /// The registry compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            slugs: BUILTIN_SLUGS.iter().map(|s| s.to_string()).collect(),
            bucket_size: BUCKET_SIZE,
        }
    }

    /// Build a registry from an ordered slug list.
    ///
    /// The list must split evenly into one bucket per category and contain
    /// each slug once.
    pub fn from_slugs<I, S>(slugs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slugs: Vec<String> = slugs.into_iter().map(Into::into).collect();
        if slugs.is_empty() {
            return Err(RegistryError::Empty);
        }
        let buckets = Category::ALL.len();
        if slugs.len() % buckets != 0 {
            return Err(RegistryError::UnevenBuckets(slugs.len()));
        }
        let mut seen = HashSet::new();
        for slug in &slugs {
            if !is_valid_slug(slug) {
                return Err(RegistryError::InvalidSlug(slug.clone()));
            }
            if !seen.insert(slug.as_str()) {
                return Err(RegistryError::Duplicate(slug.clone()));
            }
        }
        let bucket_size = slugs.len() / buckets;
        Ok(Self { slugs, bucket_size })
    }

    /// Every slug in registry order.
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    /// Category buckets in order, each paired with its slice of slugs.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL
            .into_iter()
            .zip(self.slugs.chunks(self.bucket_size))
    }

    /// The category a slug belongs to by position, if registered.
    pub fn category_of(&self, slug: &str) -> Option<Category> {
        let pos = self.slugs.iter().position(|s| s == slug)?;
        Category::ALL.get(pos / self.bucket_size).copied()
    }

    /// Route path for every registered slug, in registry order.
    pub fn static_paths(&self) -> Vec<String> {
        self.slugs.iter().map(|s| answer_path(s)).collect()
    }
}

/// Site-relative route of an answer page.
pub fn answer_path(slug: &str) -> String {
    format!("/answers/{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_fifty_slugs() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 50);
    }

    #[test]
    fn builtin_slugs_are_valid_and_unique() {
        let slugs: Vec<&str> = BUILTIN_SLUGS.to_vec();
        assert!(Registry::from_slugs(slugs).is_ok());
    }

    #[test]
    fn builtin_partitions_into_five_buckets_of_ten() {
        let registry = Registry::builtin();
        let buckets: Vec<_> = registry.categories().collect();
        assert_eq!(buckets.len(), 5);
        for (_, slugs) in &buckets {
            assert_eq!(slugs.len(), BUCKET_SIZE);
        }
        let order: Vec<Category> = buckets.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn partition_covers_registry_exactly_once() {
        let registry = Registry::builtin();
        let mut seen = HashSet::new();
        let mut total = 0;
        for (_, slugs) in registry.categories() {
            for slug in slugs {
                assert!(seen.insert(slug.clone()), "{slug} in two buckets");
                total += 1;
            }
        }
        assert_eq!(total, registry.len());
        assert!(registry.slugs().iter().all(|s| seen.contains(s)));
    }

    #[test]
    fn category_is_positional() {
        let registry = Registry::builtin();
        assert_eq!(
            registry.category_of("what-is-medical-billing"),
            Some(Category::BillingBasics)
        );
        assert_eq!(
            registry.category_of("what-is-cpt-code"),
            Some(Category::MedicalCoding)
        );
        assert_eq!(
            registry.category_of("how-much-does-medical-billing-cost"),
            Some(Category::RevenueCycle)
        );
        assert_eq!(registry.category_of("not-registered"), None);
    }

    #[test]
    fn moving_a_slug_changes_its_category() {
        let registry = Registry::from_slugs(["a", "b", "c", "d", "e"]).unwrap();
        assert_eq!(registry.category_of("a"), Some(Category::BillingBasics));
        let moved = Registry::from_slugs(["b", "c", "d", "e", "a"]).unwrap();
        assert_eq!(moved.category_of("a"), Some(Category::RevenueCycle));
    }

    #[test]
    fn static_paths_follow_registry_order() {
        let registry = Registry::builtin();
        let paths = registry.static_paths();
        assert_eq!(paths.len(), 50);
        assert_eq!(paths[0], "/answers/what-is-medical-billing");
        assert_eq!(paths[1], "/answers/what-is-npi-number");
    }

    #[test]
    fn from_slugs_rejects_empty() {
        let empty: Vec<String> = vec![];
        assert_eq!(Registry::from_slugs(empty).unwrap_err(), RegistryError::Empty);
    }

    #[test]
    fn from_slugs_rejects_uneven_buckets() {
        assert_eq!(
            Registry::from_slugs(["a", "b", "c"]).unwrap_err(),
            RegistryError::UnevenBuckets(3)
        );
    }

    #[test]
    fn from_slugs_rejects_duplicates() {
        assert_eq!(
            Registry::from_slugs(["a", "b", "c", "d", "a"]).unwrap_err(),
            RegistryError::Duplicate("a".into())
        );
    }

    #[test]
    fn from_slugs_rejects_unsafe_slugs() {
        assert!(matches!(
            Registry::from_slugs(["a", "b", "c", "d", "E F"]),
            Err(RegistryError::InvalidSlug(_))
        ));
    }
}
