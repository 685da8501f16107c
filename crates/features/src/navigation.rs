//! Navigation menu ordering.
//!
//! Resolves the admin menu sequence from a site's feature selection and the
//! full navigation catalog. Role checks are a caller-supplied predicate;
//! this module never inspects who the caller is.

use serde::{Deserialize, Serialize};

use crate::{FeatureId, SiteFeatureSelection};

/// Role level an ungated navigation item demands of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequirement {
    Admin,
    SuperAdmin,
}

/// One entry in the navigation catalog. Items either gate on a feature or
/// are always present (subject to a role requirement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Stable identifier, e.g. `"settings"`.
    pub key: String,
    pub feature: Option<FeatureId>,
    pub requires: Option<AccessRequirement>,
}

impl NavItem {
    pub fn for_feature(key: impl Into<String>, feature: FeatureId) -> Self {
        Self {
            key: key.into(),
            feature: Some(feature),
            requires: None,
        }
    }

    pub fn ungated(key: impl Into<String>, requires: Option<AccessRequirement>) -> Self {
        Self {
            key: key.into(),
            feature: None,
            requires,
        }
    }
}

/// Resolve the display sequence for a site's menu.
///
/// Feature-gated items are kept only when their feature is selected and are
/// sorted by position in `selection.order()`; items whose feature is absent
/// from the order sort after all ordered items, keeping catalog declaration
/// order among themselves. Ungated items go last, kept only when
/// `role_allows` accepts them. Pure function.
pub fn resolve_order<F>(
    selection: &SiteFeatureSelection,
    nav_items: &[NavItem],
    role_allows: F,
) -> Vec<NavItem>
where
    F: Fn(&NavItem) -> bool,
{
    let mut gated: Vec<(usize, &NavItem)> = nav_items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            item.feature
                .map(|f| selection.is_selected(f))
                .unwrap_or(false)
        })
        .collect();

    // Position in the selection order, unordered features sinking to the end.
    // Catalog index breaks ties so the sort is deterministic.
    gated.sort_by_key(|(catalog_idx, item)| {
        let position = item
            .feature
            .and_then(|f| selection.order().iter().position(|&o| o == f))
            .unwrap_or(usize::MAX);
        (position, *catalog_idx)
    });

    let mut resolved: Vec<NavItem> = gated.into_iter().map(|(_, item)| item.clone()).collect();

    resolved.extend(
        nav_items
            .iter()
            .filter(|item| item.feature.is_none() && role_allows(item))
            .cloned(),
    );

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{validate_and_normalize, PackageTier};
    use FeatureId::*;

    fn catalog() -> Vec<NavItem> {
        vec![
            NavItem::for_feature("dashboard", Dashboard),
            NavItem::for_feature("products", Products),
            NavItem::for_feature("categories", Categories),
            NavItem::for_feature("events", Events),
            NavItem::for_feature("contact", Contact),
            NavItem::ungated("settings", Some(AccessRequirement::SuperAdmin)),
        ]
    }

    fn standard_selection() -> SiteFeatureSelection {
        validate_and_normalize(
            PackageTier::Standard,
            &[Products, Categories, Events, Contact],
            &[Contact, Products],
        )
        .unwrap()
    }

    #[test]
    fn test_dashboard_item_first() {
        let menu = resolve_order(&standard_selection(), &catalog(), |_| false);
        assert_eq!(menu[0].key, "dashboard");
    }

    #[test]
    fn test_follows_selection_order() {
        let menu = resolve_order(&standard_selection(), &catalog(), |_| false);
        let keys: Vec<&str> = menu.iter().map(|i| i.key.as_str()).collect();
        // Selection order is [dashboard, contact, products, categories, events].
        assert_eq!(
            keys,
            vec!["dashboard", "contact", "products", "categories", "events"]
        );
    }

    #[test]
    fn test_unselected_features_dropped() {
        let selection =
            validate_and_normalize(PackageTier::Basic, &[Products], &[]).unwrap();
        let menu = resolve_order(&selection, &catalog(), |_| false);
        let keys: Vec<&str> = menu.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["dashboard", "products"]);
    }

    #[test]
    fn test_role_predicate_gates_ungated_items() {
        let selection = standard_selection();

        // Plain admin: settings excluded.
        let menu = resolve_order(&selection, &catalog(), |item| {
            item.requires != Some(AccessRequirement::SuperAdmin)
        });
        assert!(menu.iter().all(|i| i.key != "settings"));

        // Super admin: settings included, after all feature-gated items.
        let menu = resolve_order(&selection, &catalog(), |_| true);
        assert_eq!(menu.last().unwrap().key, "settings");
    }

    #[test]
    fn test_normalized_order_round_trips() {
        let selection = standard_selection();
        let menu = resolve_order(&selection, &catalog(), |_| false);
        let round_tripped: Vec<FeatureId> =
            menu.iter().filter_map(|i| i.feature).collect();
        assert_eq!(round_tripped.as_slice(), selection.order());
    }

    #[test]
    fn test_features_omitted_from_order_sink_in_catalog_order() {
        // The stored order may omit selected features; those sink after all
        // ordered items, in catalog declaration order.
        let selection = SiteFeatureSelection {
            tier: PackageTier::Standard,
            features: vec![Dashboard, Products, Categories, Events, Contact],
            order: vec![Dashboard, Events],
        };
        let menu = resolve_order(&selection, &catalog(), |_| false);
        let keys: Vec<&str> = menu.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["dashboard", "events", "products", "categories", "contact"]
        );
    }
}
