//! Product management — per-site CRUD with category links.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// A product listed on a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub site_id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: u64,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product manager backed by DashMap.
pub struct ProductManager {
    products: DashMap<Uuid, Product>,
}

impl Default for ProductManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductManager {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
        }
    }

    /// Create a product. New products start active and uncategorized.
    pub fn create_product(
        &self,
        site_id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        price_cents: u64,
    ) -> anyhow::Result<Product> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Product name must not be empty"));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            site_id,
            name: name.clone(),
            description: description.into(),
            price_cents,
            image_url: None,
            category_id: None,
            active: true,
            created_at: now,
            updated_at: now,
        };
        info!(product_id = %product.id, site_id = %site_id, name = %name, "Product created");
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    pub fn get_product(&self, id: Uuid) -> Option<Product> {
        self.products.get(&id).map(|e| e.value().clone())
    }

    /// All products for a site, sorted by name.
    pub fn list_for_site(&self, site_id: Uuid) -> Vec<Product> {
        let mut products: Vec<_> = self
            .products
            .iter()
            .filter(|e| e.value().site_id == site_id)
            .map(|e| e.value().clone())
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// Products in a category for a site, sorted by name.
    pub fn list_by_category(&self, site_id: Uuid, category_id: Uuid) -> Vec<Product> {
        let mut products: Vec<_> = self
            .products
            .iter()
            .filter(|e| {
                let p = e.value();
                p.site_id == site_id && p.category_id == Some(category_id)
            })
            .map(|e| e.value().clone())
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// Update name, description, and price together.
    pub fn update_details(
        &self,
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        price_cents: u64,
    ) -> anyhow::Result<Product> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Product name must not be empty"));
        }
        let mut entry = self
            .products
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Product not found: {id}"))?;
        entry.name = name;
        entry.description = description.into();
        entry.price_cents = price_cents;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Move a product into a category, or out of any with `None`.
    pub fn assign_category(&self, id: Uuid, category_id: Option<Uuid>) -> anyhow::Result<Product> {
        let mut entry = self
            .products
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Product not found: {id}"))?;
        entry.category_id = category_id;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    pub fn set_image(&self, id: Uuid, image_url: Option<String>) -> anyhow::Result<Product> {
        let mut entry = self
            .products
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Product not found: {id}"))?;
        entry.image_url = image_url;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    pub fn set_active(&self, id: Uuid, active: bool) -> anyhow::Result<Product> {
        let mut entry = self
            .products
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Product not found: {id}"))?;
        entry.active = active;
        entry.updated_at = Utc::now();
        info!(product_id = %id, active = active, "Product availability changed");
        Ok(entry.clone())
    }

    pub fn delete_product(&self, id: Uuid) -> bool {
        let removed = self.products.remove(&id).is_some();
        if removed {
            info!(product_id = %id, "Product deleted");
        }
        removed
    }

    /// Detach every product of a site from a category. Returns the number
    /// of products touched. Used when the category itself is deleted.
    pub fn detach_category(&self, site_id: Uuid, category_id: Uuid) -> usize {
        let mut detached = 0;
        for mut entry in self.products.iter_mut() {
            let p = entry.value_mut();
            if p.site_id == site_id && p.category_id == Some(category_id) {
                p.category_id = None;
                p.updated_at = Utc::now();
                detached += 1;
            }
        }
        detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_list() {
        let mgr = ProductManager::new();
        let site = Uuid::new_v4();

        mgr.create_product(site, "Sourdough Loaf", "Naturally leavened", 850)
            .unwrap();
        mgr.create_product(site, "Baguette", "Classic French", 450)
            .unwrap();
        mgr.create_product(Uuid::new_v4(), "Other Site Item", "", 100)
            .unwrap();

        let listed = mgr.list_for_site(site);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Baguette");
        assert_eq!(listed[1].name, "Sourdough Loaf");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mgr = ProductManager::new();
        assert!(mgr.create_product(Uuid::new_v4(), "  ", "", 100).is_err());
    }

    #[test]
    fn test_category_assignment_and_detach() {
        let mgr = ProductManager::new();
        let site = Uuid::new_v4();
        let category = Uuid::new_v4();

        let a = mgr.create_product(site, "A", "", 100).unwrap();
        let b = mgr.create_product(site, "B", "", 200).unwrap();
        mgr.assign_category(a.id, Some(category)).unwrap();
        mgr.assign_category(b.id, Some(category)).unwrap();

        assert_eq!(mgr.list_by_category(site, category).len(), 2);

        let detached = mgr.detach_category(site, category);
        assert_eq!(detached, 2);
        assert!(mgr.list_by_category(site, category).is_empty());
        assert!(mgr.get_product(a.id).unwrap().category_id.is_none());
    }

    #[test]
    fn test_update_missing_product() {
        let mgr = ProductManager::new();
        assert!(mgr.update_details(Uuid::new_v4(), "X", "", 1).is_err());
        assert!(mgr.set_active(Uuid::new_v4(), false).is_err());
    }

    #[test]
    fn test_deactivate() {
        let mgr = ProductManager::new();
        let p = mgr
            .create_product(Uuid::new_v4(), "Seasonal", "", 300)
            .unwrap();
        assert!(p.active);
        let updated = mgr.set_active(p.id, false).unwrap();
        assert!(!updated.active);
    }
}
