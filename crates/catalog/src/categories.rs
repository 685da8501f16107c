//! Category management — per-site grouping for catalog products.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::products::ProductManager;

/// A product category on a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub site_id: Uuid,
    pub name: String,
    pub description: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category manager backed by DashMap.
pub struct CategoryManager {
    categories: DashMap<Uuid, Category>,
}

impl Default for CategoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryManager {
    pub fn new() -> Self {
        Self {
            categories: DashMap::new(),
        }
    }

    /// Create a category. Duplicate names within a site are rejected.
    pub fn create_category(
        &self,
        site_id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        position: u32,
    ) -> anyhow::Result<Category> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Category name must not be empty"));
        }
        let duplicate = self
            .categories
            .iter()
            .any(|e| e.value().site_id == site_id && e.value().name == name);
        if duplicate {
            return Err(anyhow::anyhow!(
                "Category already exists on this site: {name}"
            ));
        }

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            site_id,
            name: name.clone(),
            description: description.into(),
            position,
            created_at: now,
            updated_at: now,
        };
        info!(category_id = %category.id, site_id = %site_id, name = %name, "Category created");
        self.categories.insert(category.id, category.clone());
        Ok(category)
    }

    pub fn get_category(&self, id: Uuid) -> Option<Category> {
        self.categories.get(&id).map(|e| e.value().clone())
    }

    /// All categories for a site, sorted by position then name.
    pub fn list_for_site(&self, site_id: Uuid) -> Vec<Category> {
        let mut categories: Vec<_> = self
            .categories
            .iter()
            .filter(|e| e.value().site_id == site_id)
            .map(|e| e.value().clone())
            .collect();
        categories.sort_by(|a, b| a.position.cmp(&b.position).then(a.name.cmp(&b.name)));
        categories
    }

    pub fn update_details(
        &self,
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> anyhow::Result<Category> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Category name must not be empty"));
        }
        let mut entry = self
            .categories
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Category not found: {id}"))?;
        entry.name = name;
        entry.description = description.into();
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    pub fn set_position(&self, id: Uuid, position: u32) -> anyhow::Result<Category> {
        let mut entry = self
            .categories
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Category not found: {id}"))?;
        entry.position = position;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Delete a category, detaching (not deleting) its products.
    pub fn delete_category(&self, id: Uuid, products: &ProductManager) -> anyhow::Result<usize> {
        let (_, category) = self
            .categories
            .remove(&id)
            .ok_or_else(|| anyhow::anyhow!("Category not found: {id}"))?;
        let detached = products.detach_category(category.site_id, id);
        info!(
            category_id = %id,
            site_id = %category.site_id,
            products_detached = detached,
            "Category deleted"
        );
        Ok(detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sorted_listing() {
        let mgr = CategoryManager::new();
        let site = Uuid::new_v4();

        mgr.create_category(site, "Pastries", "", 2).unwrap();
        mgr.create_category(site, "Breads", "", 1).unwrap();
        mgr.create_category(site, "Cakes", "", 1).unwrap();

        let listed = mgr.list_for_site(site);
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Breads", "Cakes", "Pastries"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mgr = CategoryManager::new();
        let site = Uuid::new_v4();
        mgr.create_category(site, "Breads", "", 0).unwrap();
        assert!(mgr.create_category(site, "Breads", "", 1).is_err());
        // Same name on another site is fine.
        assert!(mgr.create_category(Uuid::new_v4(), "Breads", "", 0).is_ok());
    }

    #[test]
    fn test_delete_detaches_products() {
        let categories = CategoryManager::new();
        let products = ProductManager::new();
        let site = Uuid::new_v4();

        let category = categories.create_category(site, "Breads", "", 0).unwrap();
        let p = products.create_product(site, "Rye", "", 700).unwrap();
        products.assign_category(p.id, Some(category.id)).unwrap();

        let detached = categories.delete_category(category.id, &products).unwrap();
        assert_eq!(detached, 1);
        assert!(categories.get_category(category.id).is_none());
        // Product survives, uncategorized.
        let p = products.get_product(p.id).unwrap();
        assert!(p.category_id.is_none());
    }
}
