//! SiteWorks feature access — package tiers, per-site feature selection,
//! and navigation ordering.
//!
//! A site's package tier bounds which optional features it may enable and how
//! many. [`validate_and_normalize`] turns an admin-submitted feature set and
//! menu ordering into an invariant-holding [`SiteFeatureSelection`]; the
//! [`navigation`] module resolves the final menu sequence from a selection.

pub mod navigation;
pub mod selection;
pub mod tiers;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use navigation::{resolve_order, AccessRequirement, NavItem};
pub use selection::{validate_and_normalize, SiteFeatureSelection};
pub use tiers::{FeatureCountRange, PackageTier};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown package tier `{0}`")]
    UnknownTier(String),
    #[error("feature `{feature}` is not available on the {tier} package")]
    UnsupportedFeature {
        feature: FeatureId,
        tier: PackageTier,
    },
    #[error("{count} features selected but the {tier} package requires at least {min}")]
    TooFewFeatures {
        tier: PackageTier,
        count: usize,
        min: usize,
    },
    #[error("{count} features selected but the {tier} package allows at most {max}")]
    TooManyFeatures {
        tier: PackageTier,
        count: usize,
        max: usize,
    },
}

// ---------------------------------------------------------------------------
// Feature catalog
// ---------------------------------------------------------------------------

/// Every optional feature a site can enable. Dashboard is special: every
/// site has it, and it never counts toward a package's feature limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureId {
    Dashboard,
    Products,
    Categories,
    Events,
    EventServices,
    About,
    Contact,
    Hero,
}

impl FeatureId {
    /// The full feature catalog, in canonical declaration order.
    pub const ALL: &'static [FeatureId] = &[
        Self::Dashboard,
        Self::Products,
        Self::Categories,
        Self::Events,
        Self::EventServices,
        Self::About,
        Self::Contact,
        Self::Hero,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Events => "events",
            Self::EventServices => "event_services",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Hero => "hero",
        }
    }

    /// Parse a feature identifier from its wire name.
    pub fn parse(s: &str) -> Option<FeatureId> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Some(Self::Dashboard),
            "products" => Some(Self::Products),
            "categories" => Some(Self::Categories),
            "events" => Some(Self::Events),
            "event_services" | "event-services" => Some(Self::EventServices),
            "about" => Some(Self::About),
            "contact" => Some(Self::Contact),
            "hero" => Some(Self::Hero),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_features_listed() {
        assert_eq!(FeatureId::ALL.len(), 8);
        assert_eq!(FeatureId::ALL[0], FeatureId::Dashboard);
        for f in FeatureId::ALL {
            assert!(!f.as_str().is_empty());
            assert_eq!(FeatureId::parse(f.as_str()), Some(*f));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(FeatureId::parse("blog"), None);
        assert_eq!(FeatureId::parse(""), None);
    }

    #[test]
    fn test_parse_alternate_spellings() {
        assert_eq!(
            FeatureId::parse("event-services"),
            Some(FeatureId::EventServices)
        );
        assert_eq!(FeatureId::parse(" Products "), Some(FeatureId::Products));
    }
}
