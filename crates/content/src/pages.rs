//! About and contact page content, one record of each per site.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// About-page content for a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutPage {
    pub site_id: Uuid,
    pub headline: String,
    pub body: String,
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Contact-page content for a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPage {
    pub site_id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Page content manager. Updates are whole-record upserts.
pub struct PageManager {
    about: DashMap<Uuid, AboutPage>,
    contact: DashMap<Uuid, ContactPage>,
}

impl Default for PageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PageManager {
    pub fn new() -> Self {
        Self {
            about: DashMap::new(),
            contact: DashMap::new(),
        }
    }

    /// Upsert a site's about page.
    pub fn update_about(
        &self,
        site_id: Uuid,
        headline: impl Into<String>,
        body: impl Into<String>,
        image_url: Option<String>,
    ) -> anyhow::Result<AboutPage> {
        let headline = headline.into();
        if headline.trim().is_empty() {
            return Err(anyhow::anyhow!("About headline must not be empty"));
        }
        let page = AboutPage {
            site_id,
            headline,
            body: body.into(),
            image_url,
            updated_at: Utc::now(),
        };
        info!(site_id = %site_id, "About page updated");
        self.about.insert(site_id, page.clone());
        Ok(page)
    }

    /// Upsert a site's contact page. The email must look like an address.
    pub fn update_contact(
        &self,
        site_id: Uuid,
        email: impl Into<String>,
        phone: Option<String>,
        address: Option<String>,
        opening_hours: Option<String>,
    ) -> anyhow::Result<ContactPage> {
        let email = email.into();
        if !email.contains('@') || email.trim().len() < 3 {
            return Err(anyhow::anyhow!("Invalid contact email: {email}"));
        }
        let page = ContactPage {
            site_id,
            email,
            phone,
            address,
            opening_hours,
            updated_at: Utc::now(),
        };
        info!(site_id = %site_id, "Contact page updated");
        self.contact.insert(site_id, page.clone());
        Ok(page)
    }

    pub fn about_for(&self, site_id: Uuid) -> Option<AboutPage> {
        self.about.get(&site_id).map(|e| e.value().clone())
    }

    pub fn contact_for(&self, site_id: Uuid) -> Option<ContactPage> {
        self.contact.get(&site_id).map(|e| e.value().clone())
    }

    /// Remove all page content for a site (tenant offboarding cascade).
    pub fn clear_site(&self, site_id: Uuid) {
        self.about.remove(&site_id);
        self.contact.remove(&site_id);
    }
}
