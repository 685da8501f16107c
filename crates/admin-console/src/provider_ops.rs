//! Provider operations — super-admin work that spans tenants: package tier
//! assignment and the cross-site platform overview.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use siteworks_features::{validate_and_normalize, FeatureId, PackageTier, SiteFeatureSelection};
use siteworks_platform::rbac::Permission;
use siteworks_platform::tenancy::SiteStatus;
use siteworks_platform::{RoleAssignments, SiteManager};

/// Result of a tier migration, with the selection changes it forced.
#[derive(Debug, Clone, Serialize)]
pub struct TierMigration {
    pub site_id: Uuid,
    pub previous_tier: PackageTier,
    pub new_tier: PackageTier,
    pub dropped_features: Vec<FeatureId>,
    pub added_features: Vec<FeatureId>,
    pub selection: SiteFeatureSelection,
    pub performed_at: DateTime<Utc>,
}

/// Site counts by package tier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TierCounts {
    pub basic: u64,
    pub standard: u64,
    pub premium: u64,
    pub enterprise: u64,
}

/// Cross-tenant platform snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderOverview {
    pub total_sites: u64,
    pub active_sites: u64,
    pub suspended_sites: u64,
    pub trial_sites: u64,
    pub cancelled_sites: u64,
    pub sites_by_tier: TierCounts,
    pub feature_adoption: Vec<(FeatureId, u64)>,
    pub generated_at: DateTime<Utc>,
}

/// Provider-level operations composing tenancy and RBAC.
pub struct ProviderOps<'a> {
    sites: &'a SiteManager,
    roles: &'a RoleAssignments,
}

impl<'a> ProviderOps<'a> {
    pub fn new(sites: &'a SiteManager, roles: &'a RoleAssignments) -> Self {
        Self { sites, roles }
    }

    /// Move a site to a new package tier, carrying its selection across.
    ///
    /// Features the new tier does not offer are dropped, the selection is
    /// topped up from the tier's allowed list when it falls below the
    /// minimum, and trimmed from the tail of the display order when above
    /// the maximum. The adjusted selection passes through the validator
    /// before the atomic write, so a migrated site always holds the tier
    /// invariants.
    pub fn assign_tier(
        &self,
        actor_id: Uuid,
        site_id: Uuid,
        new_tier: PackageTier,
    ) -> anyhow::Result<TierMigration> {
        if !self.roles.check(actor_id, site_id, Permission::PackageAssign) {
            return Err(anyhow::anyhow!(
                "Actor {actor_id} may not assign packages"
            ));
        }

        let site = self
            .sites
            .get_site(site_id)
            .ok_or_else(|| anyhow::anyhow!("Site not found: {site_id}"))?;

        let previous_tier = site.package_tier;
        if previous_tier == new_tier {
            return Err(anyhow::anyhow!(
                "Site is already on the {new_tier} package"
            ));
        }

        // Carry over what the new tier still allows, in display order.
        let mut kept: Vec<FeatureId> = site
            .selection
            .order()
            .iter()
            .copied()
            .filter(|&f| f != FeatureId::Dashboard && new_tier.allows(f))
            .collect();
        let mut dropped: Vec<FeatureId> = site
            .selection
            .features()
            .iter()
            .copied()
            .filter(|&f| f != FeatureId::Dashboard && !new_tier.allows(f))
            .collect();

        let range = new_tier.count_range();
        let mut added = Vec::new();
        for &f in new_tier.allowed_features() {
            if kept.len() >= range.min {
                break;
            }
            if f != FeatureId::Dashboard && !kept.contains(&f) {
                kept.push(f);
                added.push(f);
            }
        }
        if kept.len() > range.max {
            dropped.extend(kept.split_off(range.max));
        }

        let selection = validate_and_normalize(new_tier, &kept, &kept)?;
        let updated = self
            .sites
            .replace_selection(site_id, selection.clone())
            .ok_or_else(|| anyhow::anyhow!("Site vanished during migration: {site_id}"))?;

        info!(
            site_id = %site_id,
            previous_tier = %previous_tier,
            new_tier = %new_tier,
            dropped = dropped.len(),
            added = added.len(),
            "Package tier migrated"
        );

        Ok(TierMigration {
            site_id,
            previous_tier,
            new_tier,
            dropped_features: dropped,
            added_features: added,
            selection: updated.selection,
            performed_at: Utc::now(),
        })
    }

    /// Build the cross-tenant overview.
    pub fn overview(&self) -> ProviderOverview {
        let all_sites = self.sites.list_sites();
        let total = all_sites.len() as u64;

        let mut active = 0u64;
        let mut suspended = 0u64;
        let mut trial = 0u64;
        let mut cancelled = 0u64;
        let mut tiers = TierCounts::default();
        let mut adoption: Vec<(FeatureId, u64)> =
            FeatureId::ALL.iter().map(|&f| (f, 0)).collect();

        for site in &all_sites {
            match site.status {
                SiteStatus::Active => active += 1,
                SiteStatus::Suspended => suspended += 1,
                SiteStatus::Trial => trial += 1,
                SiteStatus::Cancelled => cancelled += 1,
            }
            match site.package_tier {
                PackageTier::Basic => tiers.basic += 1,
                PackageTier::Standard => tiers.standard += 1,
                PackageTier::Premium => tiers.premium += 1,
                PackageTier::Enterprise => tiers.enterprise += 1,
            }
            for (feature, count) in adoption.iter_mut() {
                if site.selection.is_selected(*feature) {
                    *count += 1;
                }
            }
        }

        ProviderOverview {
            total_sites: total,
            active_sites: active,
            suspended_sites: suspended,
            trial_sites: trial,
            cancelled_sites: cancelled,
            sites_by_tier: tiers,
            feature_adoption: adoption,
            generated_at: Utc::now(),
        }
    }
}
