//! Multi-tenancy: site lifecycle, package tiers, and per-site feature
//! selections.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use siteworks_features::{PackageTier, SiteFeatureSelection};

/// Site lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    Active,
    Suspended,
    Trial,
    Cancelled,
}

/// A single tenant site on the platform.
#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: SiteStatus,
    pub package_tier: PackageTier,
    pub selection: SiteFeatureSelection,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Multi-tenant site manager backed by DashMap.
pub struct SiteManager {
    sites: DashMap<Uuid, Site>,
}

impl Default for SiteManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self {
            sites: DashMap::new(),
        }
    }

    /// Provision a new site with its tier-default feature selection.
    pub fn create_site(&self, name: String, owner_id: Uuid, tier: PackageTier) -> Site {
        let now = Utc::now();
        let slug = name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>();

        let site = Site {
            id: Uuid::new_v4(),
            name,
            slug,
            status: SiteStatus::Active,
            package_tier: tier,
            selection: SiteFeatureSelection::tier_default(tier),
            owner_id,
            created_at: now,
            updated_at: now,
        };

        info!(site_id = %site.id, site_name = %site.name, tier = %tier, "Site provisioned");
        self.sites.insert(site.id, site.clone());
        site
    }

    /// Look up a site by id.
    pub fn get_site(&self, id: Uuid) -> Option<Site> {
        self.sites.get(&id).map(|e| e.value().clone())
    }

    /// List all sites.
    pub fn list_sites(&self) -> Vec<Site> {
        self.sites.iter().map(|e| e.value().clone()).collect()
    }

    /// Atomically replace a site's feature selection. The tier, feature
    /// set, order, and `updated_at` are written together under the entry
    /// lock; readers never observe a partial update. Last write wins.
    pub fn replace_selection(&self, id: Uuid, selection: SiteFeatureSelection) -> Option<Site> {
        if let Some(mut entry) = self.sites.get_mut(&id) {
            entry.package_tier = selection.tier();
            entry.selection = selection;
            entry.updated_at = Utc::now();
            info!(
                site_id = %id,
                tier = %entry.package_tier,
                features = entry.selection.feature_count(),
                "Site feature selection replaced"
            );
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Suspend a site.
    pub fn suspend_site(&self, id: Uuid) -> Option<Site> {
        if let Some(mut entry) = self.sites.get_mut(&id) {
            entry.status = SiteStatus::Suspended;
            entry.updated_at = Utc::now();
            info!(site_id = %id, "Site suspended");
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Reactivate a suspended or cancelled site.
    pub fn reactivate_site(&self, id: Uuid) -> Option<Site> {
        if let Some(mut entry) = self.sites.get_mut(&id) {
            entry.status = SiteStatus::Active;
            entry.updated_at = Utc::now();
            info!(site_id = %id, "Site reactivated");
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Delete a site. The feature selection cascades with the record.
    pub fn delete_site(&self, id: Uuid) -> bool {
        let removed = self.sites.remove(&id).is_some();
        if removed {
            info!(site_id = %id, "Site deleted");
        }
        removed
    }

    /// Seed three demo sites in different package tiers.
    pub fn seed_demo_sites(&self) -> Vec<Site> {
        let sites = vec![
            self.create_site("Cedar Bakery".into(), Uuid::new_v4(), PackageTier::Basic),
            self.create_site(
                "Harbor Event Hall".into(),
                Uuid::new_v4(),
                PackageTier::Standard,
            ),
            self.create_site(
                "Lakeside Weddings".into(),
                Uuid::new_v4(),
                PackageTier::Premium,
            ),
        ];
        info!("Demo sites seeded");
        sites
    }
}
