//! Site branding — per-site color palettes with a platform-wide default.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// A four-color site palette. Colors are `#rrggbb` hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#1f3a5f".into(),
            secondary: "#4f6d90".into(),
            accent: "#e8a94c".into(),
            background: "#f7f5f0".into(),
        }
    }
}

impl Palette {
    /// Reject any malformed color value.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (field, value) in [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("background", &self.background),
        ] {
            if !is_hex_color(value) {
                return Err(anyhow::anyhow!(
                    "Invalid {field} color: {value} (expected #rrggbb)"
                ));
            }
        }
        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// A site's stored palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitePalette {
    pub site_id: Uuid,
    pub palette: Palette,
    pub updated_at: DateTime<Utc>,
}

/// Branding manager: per-site palettes plus the platform default used by
/// sites that never customized theirs.
pub struct BrandingManager {
    palettes: DashMap<Uuid, SitePalette>,
    default_palette: RwLock<Palette>,
}

impl Default for BrandingManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BrandingManager {
    pub fn new() -> Self {
        Self {
            palettes: DashMap::new(),
            default_palette: RwLock::new(Palette::default()),
        }
    }

    /// Set a site's palette after validation.
    pub fn set_palette(&self, site_id: Uuid, palette: Palette) -> anyhow::Result<SitePalette> {
        palette.validate()?;
        let stored = SitePalette {
            site_id,
            palette,
            updated_at: Utc::now(),
        };
        info!(site_id = %site_id, "Site palette updated");
        self.palettes.insert(site_id, stored.clone());
        Ok(stored)
    }

    /// The palette a site renders with, falling back to the platform default.
    pub fn palette_for(&self, site_id: Uuid) -> Palette {
        self.palettes
            .get(&site_id)
            .map(|e| e.value().palette.clone())
            .unwrap_or_else(|| self.default_palette.read().clone())
    }

    /// Drop a site's customization. Returns `true` when one existed.
    pub fn reset_palette(&self, site_id: Uuid) -> bool {
        let removed = self.palettes.remove(&site_id).is_some();
        if removed {
            info!(site_id = %site_id, "Site palette reset to default");
        }
        removed
    }

    /// Replace the platform default palette.
    pub fn set_default_palette(&self, palette: Palette, actor: &str) -> anyhow::Result<()> {
        palette.validate()?;
        *self.default_palette.write() = palette;
        info!(actor = actor, "Default palette changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_validation() {
        assert!(Palette::default().validate().is_ok());

        let bad = Palette {
            primary: "1f3a5f".into(),
            ..Palette::default()
        };
        assert!(bad.validate().is_err());

        let bad = Palette {
            accent: "#12345".into(),
            ..Palette::default()
        };
        assert!(bad.validate().is_err());

        let bad = Palette {
            background: "#gggggg".into(),
            ..Palette::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_fallback_to_default() {
        let mgr = BrandingManager::new();
        let site = Uuid::new_v4();
        assert_eq!(mgr.palette_for(site), Palette::default());

        let custom = Palette {
            primary: "#aa0000".into(),
            ..Palette::default()
        };
        mgr.set_palette(site, custom.clone()).unwrap();
        assert_eq!(mgr.palette_for(site), custom);

        assert!(mgr.reset_palette(site));
        assert_eq!(mgr.palette_for(site), Palette::default());
        assert!(!mgr.reset_palette(site));
    }

    #[test]
    fn test_invalid_palette_rejected_on_set() {
        let mgr = BrandingManager::new();
        let bad = Palette {
            secondary: "blue".into(),
            ..Palette::default()
        };
        assert!(mgr.set_palette(Uuid::new_v4(), bad).is_err());
    }

    #[test]
    fn test_default_palette_change_applies_to_uncustomized() {
        let mgr = BrandingManager::new();
        let site = Uuid::new_v4();

        let new_default = Palette {
            primary: "#101010".into(),
            ..Palette::default()
        };
        mgr.set_default_palette(new_default.clone(), "ops-admin")
            .unwrap();
        assert_eq!(mgr.palette_for(site), new_default);
    }
}
