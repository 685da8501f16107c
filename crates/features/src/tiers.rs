//! Static package tier table: the feature set and feature-count bounds each
//! subscription tier permits. Not mutable at runtime.

use serde::{Deserialize, Serialize};

use crate::{FeatureId, SelectionError};

/// Inclusive bounds on how many non-Dashboard features a site may enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCountRange {
    pub min: usize,
    pub max: usize,
}

/// Subscription tier for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageTier {
    Basic,
    Standard,
    Premium,
    Enterprise,
}

impl PackageTier {
    pub const ALL: &'static [PackageTier] = &[
        Self::Basic,
        Self::Standard,
        Self::Premium,
        Self::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }

    /// Parse a tier from its wire name.
    pub fn parse(s: &str) -> Result<PackageTier, SelectionError> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(SelectionError::UnknownTier(other.to_string())),
        }
    }

    /// Features a site on this tier may enable. Dashboard is always first
    /// and always present; the rest follow catalog declaration order.
    pub fn allowed_features(&self) -> &'static [FeatureId] {
        match self {
            Self::Basic => &[
                FeatureId::Dashboard,
                FeatureId::Products,
                FeatureId::Categories,
                FeatureId::About,
                FeatureId::Contact,
            ],
            Self::Standard => &[
                FeatureId::Dashboard,
                FeatureId::Products,
                FeatureId::Categories,
                FeatureId::Events,
                FeatureId::About,
                FeatureId::Contact,
                FeatureId::Hero,
            ],
            Self::Premium | Self::Enterprise => FeatureId::ALL,
        }
    }

    /// Bounds on the number of enabled features, Dashboard excluded.
    pub fn count_range(&self) -> FeatureCountRange {
        match self {
            Self::Basic => FeatureCountRange { min: 1, max: 3 },
            Self::Standard => FeatureCountRange { min: 4, max: 6 },
            Self::Premium => FeatureCountRange { min: 4, max: 7 },
            Self::Enterprise => FeatureCountRange { min: 1, max: 7 },
        }
    }

    pub fn allows(&self, feature: FeatureId) -> bool {
        self.allowed_features().contains(&feature)
    }
}

impl std::fmt::Display for PackageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tier_includes_dashboard() {
        for tier in PackageTier::ALL {
            assert_eq!(tier.allowed_features()[0], FeatureId::Dashboard);
            assert!(tier.allows(FeatureId::Dashboard));
        }
    }

    #[test]
    fn test_ranges_are_well_formed() {
        for tier in PackageTier::ALL {
            let range = tier.count_range();
            assert!(range.min <= range.max, "{tier}: {range:?}");
            // max never exceeds what the tier actually offers
            assert!(range.max <= tier.allowed_features().len() - 1);
            for f in tier.allowed_features() {
                assert!(FeatureId::ALL.contains(f));
            }
        }
    }

    #[test]
    fn test_basic_excludes_event_features() {
        assert!(!PackageTier::Basic.allows(FeatureId::Events));
        assert!(!PackageTier::Basic.allows(FeatureId::EventServices));
        assert!(!PackageTier::Basic.allows(FeatureId::Hero));
    }

    #[test]
    fn test_event_services_needs_premium() {
        assert!(!PackageTier::Standard.allows(FeatureId::EventServices));
        assert!(PackageTier::Premium.allows(FeatureId::EventServices));
        assert!(PackageTier::Enterprise.allows(FeatureId::EventServices));
    }

    #[test]
    fn test_parse() {
        assert_eq!(PackageTier::parse("Premium"), Ok(PackageTier::Premium));
        assert_eq!(
            PackageTier::parse("platinum"),
            Err(SelectionError::UnknownTier("platinum".into()))
        );
    }
}
