//! Standard navigation catalog and the bridge from platform roles to the
//! resolver's access predicate. Display labels live with the rendering
//! layer, not here.

use siteworks_features::{
    resolve_order, AccessRequirement, FeatureId, NavItem, SiteFeatureSelection,
};
use siteworks_platform::Role;

/// The platform's full navigation catalog, in declaration order.
pub fn standard_catalog() -> Vec<NavItem> {
    vec![
        NavItem::for_feature("dashboard", FeatureId::Dashboard),
        NavItem::for_feature("products", FeatureId::Products),
        NavItem::for_feature("categories", FeatureId::Categories),
        NavItem::for_feature("events", FeatureId::Events),
        NavItem::for_feature("event_services", FeatureId::EventServices),
        NavItem::for_feature("about", FeatureId::About),
        NavItem::for_feature("contact", FeatureId::Contact),
        NavItem::for_feature("hero", FeatureId::Hero),
        NavItem::ungated("team", Some(AccessRequirement::Admin)),
        NavItem::ungated("settings", Some(AccessRequirement::SuperAdmin)),
    ]
}

/// Access predicate for a viewer role.
pub fn allows(role: Role) -> impl Fn(&NavItem) -> bool {
    move |item| match item.requires {
        None => true,
        Some(AccessRequirement::Admin) => matches!(role, Role::Admin | Role::SuperAdmin),
        Some(AccessRequirement::SuperAdmin) => role == Role::SuperAdmin,
    }
}

/// The resolved admin menu for a site and viewer role.
pub fn menu_for(selection: &SiteFeatureSelection, role: Role) -> Vec<NavItem> {
    resolve_order(selection, &standard_catalog(), allows(role))
}
