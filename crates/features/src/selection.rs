//! Feature selection validation and normalization.
//!
//! [`validate_and_normalize`] is the only way to mint a
//! [`SiteFeatureSelection`] from user input, so every stored selection holds
//! the invariants: Dashboard is always selected and always first in the
//! order, every ordered feature is selected, and the non-Dashboard count is
//! within the tier's bounds.

use serde::Serialize;

use crate::{FeatureId, PackageTier, SelectionError};

/// A validated, immutable per-site feature selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteFeatureSelection {
    pub(crate) tier: PackageTier,
    pub(crate) features: Vec<FeatureId>,
    pub(crate) order: Vec<FeatureId>,
}

impl SiteFeatureSelection {
    /// The provisioning default for a tier: Dashboard plus the first
    /// `count_range().min` allowed features in catalog order.
    pub fn tier_default(tier: PackageTier) -> Self {
        let min = tier.count_range().min;
        let features: Vec<FeatureId> = tier
            .allowed_features()
            .iter()
            .copied()
            .take(min + 1)
            .collect();
        Self {
            tier,
            order: features.clone(),
            features,
        }
    }

    pub fn tier(&self) -> PackageTier {
        self.tier
    }

    /// Selected features, Dashboard included.
    pub fn features(&self) -> &[FeatureId] {
        &self.features
    }

    /// Display order. `order()[0]` is always Dashboard and every element is
    /// a selected feature.
    pub fn order(&self) -> &[FeatureId] {
        &self.order
    }

    pub fn is_selected(&self, feature: FeatureId) -> bool {
        self.features.contains(&feature)
    }

    /// Number of selected features, Dashboard excluded.
    pub fn feature_count(&self) -> usize {
        self.features.len() - 1
    }
}

/// Validate a candidate feature set and menu ordering against a tier.
///
/// Dashboard is forced into the set if absent. Features outside the tier's
/// allowed set and counts outside the tier's bounds are rejected. The order
/// is normalized: identifiers not in the selection are removed, duplicates
/// keep their first occurrence, Dashboard is moved to the front, and
/// selected features missing from the order are appended in the relative
/// order they appear in `candidate_features`.
///
/// Pure function; the caller persists the result.
pub fn validate_and_normalize(
    tier: PackageTier,
    candidate_features: &[FeatureId],
    candidate_order: &[FeatureId],
) -> Result<SiteFeatureSelection, SelectionError> {
    // Step 1: dedup, forcing Dashboard membership.
    let mut features: Vec<FeatureId> = Vec::with_capacity(candidate_features.len() + 1);
    if !candidate_features.contains(&FeatureId::Dashboard) {
        features.push(FeatureId::Dashboard);
    }
    for &f in candidate_features {
        if !features.contains(&f) {
            features.push(f);
        }
    }

    // Step 2: every selected feature must be allowed on this tier.
    for &f in &features {
        if !tier.allows(f) {
            return Err(SelectionError::UnsupportedFeature { feature: f, tier });
        }
    }

    // Step 3: count bounds, Dashboard excluded.
    let count = features.len() - 1;
    let range = tier.count_range();
    if count < range.min {
        return Err(SelectionError::TooFewFeatures {
            tier,
            count,
            min: range.min,
        });
    }
    if count > range.max {
        return Err(SelectionError::TooManyFeatures {
            tier,
            count,
            max: range.max,
        });
    }

    // Step 4: normalize the display order.
    let order = normalize_order(&features, candidate_order);

    Ok(SiteFeatureSelection {
        tier,
        features,
        order,
    })
}

fn normalize_order(features: &[FeatureId], candidate: &[FeatureId]) -> Vec<FeatureId> {
    let mut order = vec![FeatureId::Dashboard];
    for &f in candidate {
        if f != FeatureId::Dashboard && features.contains(&f) && !order.contains(&f) {
            order.push(f);
        }
    }
    for &f in features {
        if !order.contains(&f) {
            order.push(f);
        }
    }
    order
}
