//! Event-service packages — named bundles of services a site offers for
//! its events (catering, decoration, AV, and so on).

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// A purchasable bundle of event services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePackage {
    pub id: Uuid,
    pub site_id: Uuid,
    pub name: String,
    pub description: String,
    pub services: Vec<String>,
    pub price_cents: u64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service package manager backed by DashMap.
pub struct ServicePackageManager {
    packages: DashMap<Uuid, ServicePackage>,
}

impl Default for ServicePackageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ServicePackageManager {
    pub fn new() -> Self {
        Self {
            packages: DashMap::new(),
        }
    }

    /// Create a package. At least one service is required.
    pub fn create_package(
        &self,
        site_id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        services: Vec<String>,
        price_cents: u64,
    ) -> anyhow::Result<ServicePackage> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Package name must not be empty"));
        }
        if services.is_empty() {
            return Err(anyhow::anyhow!(
                "Package must include at least one service"
            ));
        }

        let now = Utc::now();
        let package = ServicePackage {
            id: Uuid::new_v4(),
            site_id,
            name: name.clone(),
            description: description.into(),
            services,
            price_cents,
            active: true,
            created_at: now,
            updated_at: now,
        };
        info!(package_id = %package.id, site_id = %site_id, name = %name, "Service package created");
        self.packages.insert(package.id, package.clone());
        Ok(package)
    }

    pub fn get_package(&self, id: Uuid) -> Option<ServicePackage> {
        self.packages.get(&id).map(|e| e.value().clone())
    }

    /// All packages for a site, active first, then by name.
    pub fn list_for_site(&self, site_id: Uuid) -> Vec<ServicePackage> {
        let mut packages: Vec<_> = self
            .packages
            .iter()
            .filter(|e| e.value().site_id == site_id)
            .map(|e| e.value().clone())
            .collect();
        packages.sort_by(|a, b| b.active.cmp(&a.active).then(a.name.cmp(&b.name)));
        packages
    }

    /// Add a service to a package. Duplicates are ignored.
    pub fn add_service(&self, id: Uuid, service: impl Into<String>) -> anyhow::Result<ServicePackage> {
        let service = service.into();
        let mut entry = self
            .packages
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Package not found: {id}"))?;
        if !entry.services.contains(&service) {
            entry.services.push(service);
            entry.updated_at = Utc::now();
        }
        Ok(entry.clone())
    }

    /// Remove a service. The last service cannot be removed.
    pub fn remove_service(&self, id: Uuid, service: &str) -> anyhow::Result<ServicePackage> {
        let mut entry = self
            .packages
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Package not found: {id}"))?;
        if !entry.services.iter().any(|s| s == service) {
            return Err(anyhow::anyhow!("Service not in package: {service}"));
        }
        if entry.services.len() == 1 {
            return Err(anyhow::anyhow!(
                "Package must keep at least one service"
            ));
        }
        entry.services.retain(|s| s != service);
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    pub fn set_price(&self, id: Uuid, price_cents: u64) -> anyhow::Result<ServicePackage> {
        let mut entry = self
            .packages
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Package not found: {id}"))?;
        entry.price_cents = price_cents;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    pub fn set_active(&self, id: Uuid, active: bool) -> anyhow::Result<ServicePackage> {
        let mut entry = self
            .packages
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Package not found: {id}"))?;
        entry.active = active;
        entry.updated_at = Utc::now();
        info!(package_id = %id, active = active, "Service package availability changed");
        Ok(entry.clone())
    }

    pub fn delete_package(&self, id: Uuid) -> bool {
        let removed = self.packages.remove(&id).is_some();
        if removed {
            info!(package_id = %id, "Service package deleted");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(mgr: &ServicePackageManager, site: Uuid, name: &str) -> ServicePackage {
        mgr.create_package(
            site,
            name,
            "Full service",
            vec!["catering".into(), "decoration".into()],
            250_000,
        )
        .unwrap()
    }

    #[test]
    fn test_create_requires_services() {
        let mgr = ServicePackageManager::new();
        let result = mgr.create_package(Uuid::new_v4(), "Empty", "", vec![], 1000);
        assert!(result.is_err());
    }

    #[test]
    fn test_service_editing() {
        let mgr = ServicePackageManager::new();
        let pkg = sample(&mgr, Uuid::new_v4(), "Gold");

        let updated = mgr.add_service(pkg.id, "av_equipment").unwrap();
        assert_eq!(updated.services.len(), 3);

        // Adding a duplicate is a no-op.
        let updated = mgr.add_service(pkg.id, "catering").unwrap();
        assert_eq!(updated.services.len(), 3);

        let updated = mgr.remove_service(pkg.id, "decoration").unwrap();
        assert_eq!(updated.services.len(), 2);

        assert!(mgr.remove_service(pkg.id, "florist").is_err());
    }

    #[test]
    fn test_last_service_protected() {
        let mgr = ServicePackageManager::new();
        let pkg = mgr
            .create_package(Uuid::new_v4(), "Solo", "", vec!["catering".into()], 1000)
            .unwrap();
        assert!(mgr.remove_service(pkg.id, "catering").is_err());
    }

    #[test]
    fn test_listing_active_first() {
        let mgr = ServicePackageManager::new();
        let site = Uuid::new_v4();
        let a = sample(&mgr, site, "Alpha");
        sample(&mgr, site, "Beta");
        mgr.set_active(a.id, false).unwrap();

        let listed = mgr.list_for_site(site);
        assert_eq!(listed[0].name, "Beta");
        assert_eq!(listed[1].name, "Alpha");
        assert!(!listed[1].active);
    }
}
