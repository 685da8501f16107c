//! Site settings — the transactional boundary around feature-selection
//! updates. Validation runs first; only a fully validated selection reaches
//! the store, and a store failure leaves nothing half-written.

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use siteworks_features::{
    validate_and_normalize, FeatureId, PackageTier, SelectionError, SiteFeatureSelection,
};
use siteworks_platform::SiteManager;

/// Failure inside the persistence collaborator.
#[derive(Debug, Error)]
#[error("selection store failure: {0}")]
pub struct StoreError(pub String);

/// Everything the update path can fail with. Validation failures are
/// terminal for the request and reported verbatim; nothing is retried.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("site not found: {0}")]
    SiteNotFound(Uuid),
    #[error(transparent)]
    Validation(#[from] SelectionError),
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

/// Persistence contract for site feature selections.
///
/// `load_selection` returns the latest committed state. `save_selection`
/// replaces the feature set, order, tier, and updated-at timestamp in one
/// atomic write; readers never observe a partial update.
pub trait SelectionStore {
    fn load_selection(&self, site_id: Uuid) -> Result<Option<SiteFeatureSelection>, StoreError>;
    fn save_selection(
        &self,
        site_id: Uuid,
        selection: &SiteFeatureSelection,
    ) -> Result<(), StoreError>;
}

impl SelectionStore for SiteManager {
    fn load_selection(&self, site_id: Uuid) -> Result<Option<SiteFeatureSelection>, StoreError> {
        Ok(self.get_site(site_id).map(|site| site.selection))
    }

    fn save_selection(
        &self,
        site_id: Uuid,
        selection: &SiteFeatureSelection,
    ) -> Result<(), StoreError> {
        self.replace_selection(site_id, selection.clone())
            .map(|_| ())
            .ok_or_else(|| StoreError(format!("site vanished during update: {site_id}")))
    }
}

/// Site settings operations over a selection store.
pub struct SiteSettingsOps<'a, S: SelectionStore> {
    store: &'a S,
}

impl<'a, S: SelectionStore> SiteSettingsOps<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The latest committed selection for a site.
    pub fn current_selection(&self, site_id: Uuid) -> Result<SiteFeatureSelection, SettingsError> {
        self.store
            .load_selection(site_id)?
            .ok_or(SettingsError::SiteNotFound(site_id))
    }

    /// Validate and persist a new feature selection for a site.
    ///
    /// The requested tier applies when given; otherwise the site's stored
    /// tier does. On validation failure the persisted state is untouched and
    /// the specific error is surfaced to the caller.
    pub fn update_site_features(
        &self,
        site_id: Uuid,
        tier: Option<PackageTier>,
        requested_features: &[FeatureId],
        requested_order: &[FeatureId],
    ) -> Result<SiteFeatureSelection, SettingsError> {
        let current = self.current_selection(site_id)?;
        let tier = tier.unwrap_or_else(|| current.tier());

        let selection = validate_and_normalize(tier, requested_features, requested_order)?;
        self.store.save_selection(site_id, &selection)?;

        info!(
            site_id = %site_id,
            tier = %tier,
            features = selection.feature_count(),
            "Site features updated"
        );
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteworks_features::FeatureId::*;

    fn standard_site(mgr: &SiteManager) -> Uuid {
        mgr.create_site("Harbor Hall".into(), Uuid::new_v4(), PackageTier::Standard)
            .id
    }

    #[test]
    fn test_update_persists_normalized_selection() {
        let mgr = SiteManager::new();
        let site_id = standard_site(&mgr);
        let ops = SiteSettingsOps::new(&mgr);

        let selection = ops
            .update_site_features(
                site_id,
                None,
                &[Products, Categories, Events, Contact],
                &[Contact, Products],
            )
            .unwrap();

        assert_eq!(
            selection.order(),
            &[Dashboard, Contact, Products, Categories, Events]
        );
        // The store reflects the committed state.
        assert_eq!(ops.current_selection(site_id).unwrap(), selection);
        assert_eq!(
            mgr.get_site(site_id).unwrap().package_tier,
            PackageTier::Standard
        );
    }

    #[test]
    fn test_validation_failure_leaves_state_untouched() {
        let mgr = SiteManager::new();
        let site_id = standard_site(&mgr);
        let ops = SiteSettingsOps::new(&mgr);
        let before = ops.current_selection(site_id).unwrap();

        // EventServices is not available on Standard.
        let err = ops
            .update_site_features(site_id, None, &[Products, EventServices], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Validation(SelectionError::UnsupportedFeature {
                feature: EventServices,
                ..
            })
        ));

        assert_eq!(ops.current_selection(site_id).unwrap(), before);
    }

    #[test]
    fn test_unknown_site() {
        let mgr = SiteManager::new();
        let ops = SiteSettingsOps::new(&mgr);
        let missing = Uuid::new_v4();

        let err = ops
            .update_site_features(missing, None, &[Products], &[])
            .unwrap_err();
        assert!(matches!(err, SettingsError::SiteNotFound(id) if id == missing));
    }

    #[test]
    fn test_tier_change_rides_along_atomically() {
        let mgr = SiteManager::new();
        let site_id = standard_site(&mgr);
        let ops = SiteSettingsOps::new(&mgr);

        let selection = ops
            .update_site_features(
                site_id,
                Some(PackageTier::Premium),
                &[Products, Categories, Events, EventServices],
                &[],
            )
            .unwrap();
        assert_eq!(selection.tier(), PackageTier::Premium);

        let site = mgr.get_site(site_id).unwrap();
        assert_eq!(site.package_tier, PackageTier::Premium);
        assert_eq!(site.selection, selection);
    }

    #[test]
    fn test_store_failure_surfaces_as_persistence() {
        struct FailingStore;
        impl SelectionStore for FailingStore {
            fn load_selection(
                &self,
                _site_id: Uuid,
            ) -> Result<Option<SiteFeatureSelection>, StoreError> {
                Ok(Some(SiteFeatureSelection::tier_default(
                    PackageTier::Standard,
                )))
            }
            fn save_selection(
                &self,
                _site_id: Uuid,
                _selection: &SiteFeatureSelection,
            ) -> Result<(), StoreError> {
                Err(StoreError("backing store unavailable".into()))
            }
        }

        let ops = SiteSettingsOps::new(&FailingStore);
        let err = ops
            .update_site_features(
                Uuid::new_v4(),
                None,
                &[Products, Categories, Events, Contact],
                &[],
            )
            .unwrap_err();
        assert!(matches!(err, SettingsError::Persistence(_)));
    }
}
