use std::fmt::{Display, Formatter};

use tracing::{info, instrument};

pub const APP_CONFIGURATION_NAME: &str = "APP_ENVIRONMENT";
pub const DEFAULT_APP_PRODUCTION_CONFIG_NAME: &str = "production";
pub const DEFAULT_APP_LOCAL_CONFIG_NAME: &str = "local";

/// Selects which configuration files are merged on startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigVariant {
    /// `base.toml` + `production.toml` from the deployment folder
    Production,
    /// `base.toml` + `local.toml` from the crate's infrastructure folder
    Local,
    /// `base.toml` + `<name>.toml` from the crate's infrastructure folder
    CustomName(String),
    /// A single file, nothing merged underneath
    OnlyOneFilepath(String),
}

impl Display for ConfigVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigVariant::Production => f.write_str(DEFAULT_APP_PRODUCTION_CONFIG_NAME),
            ConfigVariant::Local => f.write_str(DEFAULT_APP_LOCAL_CONFIG_NAME),
            ConfigVariant::CustomName(name) => f.write_str(name),
            ConfigVariant::OnlyOneFilepath(path) => f.write_str(path),
        }
    }
}

impl ConfigVariant {
    #[instrument(level = "trace", ret)]
    pub fn init() -> ConfigVariant {
        info!("{:?}", std::env::var(APP_CONFIGURATION_NAME));
        if let Ok(x) = std::env::var(APP_CONFIGURATION_NAME)
            && x == DEFAULT_APP_PRODUCTION_CONFIG_NAME
        {
            ConfigVariant::Production
        } else {
            ConfigVariant::Local
        }
    }
}
