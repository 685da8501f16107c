use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `SITEWORKS__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_instance_name")]
    pub instance_name: String,
    #[serde(default = "default_package_tier")]
    pub default_package_tier: String,
    #[serde(default)]
    pub platform: PlatformConfig,
}

/// Tenancy-wide limits and signup policy.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_max_sites")]
    pub max_sites: u32,
    #[serde(default = "default_trial_days")]
    pub trial_days: u32,
    #[serde(default = "default_allow_self_signup")]
    pub allow_self_signup: bool,
}

// Default functions
fn default_instance_name() -> String {
    "siteworks".to_string()
}
fn default_package_tier() -> String {
    "standard".to_string()
}
fn default_max_sites() -> u32 {
    10_000
}
fn default_trial_days() -> u32 {
    14
}
fn default_allow_self_signup() -> bool {
    true
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            max_sites: default_max_sites(),
            trial_days: default_trial_days(),
            allow_self_signup: default_allow_self_signup(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instance_name: default_instance_name(),
            default_package_tier: default_package_tier(),
            platform: PlatformConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("SITEWORKS")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.instance_name, "siteworks");
        assert_eq!(cfg.default_package_tier, "standard");
        assert_eq!(cfg.platform.trial_days, 14);
        assert!(cfg.platform.allow_self_signup);
    }
}
