use crate::domain::value_objects::GatewayIdentifier;

#[derive(Debug, Clone)]
pub struct Config {
    // Gateway coordinates
    pub subscription_id: String,
    pub resource_group: String,
    pub gateway_name: String,

    // Build inputs
    pub snapshot_path: String,
    pub watch_namespaces: Vec<String>,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subscription_id: String::new(),
            resource_group: String::new(),
            gateway_name: String::new(),
            snapshot_path: "snapshot.json".to_string(),
            watch_namespaces: Vec::new(),
            debug: false,
        }
    }
}

impl Config {
    /// Identifier used for every gateway sub-resource of the build.
    pub fn gateway_identifier(&self) -> GatewayIdentifier {
        GatewayIdentifier::new(
            self.subscription_id.clone(),
            self.resource_group.clone(),
            self.gateway_name.clone(),
        )
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subscription_id.is_empty() {
            return Err(ConfigError::MissingSubscriptionId);
        }
        if self.resource_group.is_empty() {
            return Err(ConfigError::MissingResourceGroup);
        }
        if self.gateway_name.is_empty() {
            return Err(ConfigError::MissingGatewayName);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("subscription_id is required")]
    MissingSubscriptionId,
    #[error("resource_group is required")]
    MissingResourceGroup,
    #[error("gateway_name is required")]
    MissingGatewayName,
}

/// Split a comma separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Build a `Config` from any key lookup (the environment in production).
pub fn load_config_from<F>(get: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let subscription_id = get("LDP_BUILDER_SUBSCRIPTION_ID").unwrap_or_default();
    let resource_group = get("LDP_BUILDER_RESOURCE_GROUP").unwrap_or_default();
    let gateway_name = get("LDP_BUILDER_GATEWAY_NAME").unwrap_or_default();

    let snapshot_path = get("LDP_BUILDER_SNAPSHOT_PATH").unwrap_or(defaults.snapshot_path);

    let watch_namespaces = get("LDP_BUILDER_WATCH_NAMESPACES")
        .map(|v| parse_list(&v))
        .unwrap_or_default();

    let debug = get("DEBUG").is_some();

    let cfg = Config {
        subscription_id,
        resource_group,
        gateway_name,
        snapshot_path,
        watch_namespaces,
        debug,
    };
    cfg.validate()?;

    Ok(cfg)
}
