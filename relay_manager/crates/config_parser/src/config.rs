use config::{Config, Environment};
use global_utils::config_variant::ConfigVariant;
use relay_manager_core::manager::InitParams;
use relay_manager_core::types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::{debug, instrument, trace};

use crate::error::ConfigParserError;

const CONFIG_FOLDER_NAME: &str = "../../infrastructure/configuration";
const PRODUCTION_CONFIG_FOLDER_NAME: &str = "configuration_relay_manager";
const CARGO_MANIFEST_DIR: &str = "CARGO_MANIFEST_DIR";
const DEFAULT_APP_LOCAL_BASE_FILENAME: &str = "base";
const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(rename = "http_server_ip")]
    pub ip: String,
    #[serde(rename = "http_server_port")]
    pub port: u16,
}

/// Founding relay manager state, addresses as hex strings.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct RelayManagerConfig {
    #[serde(with = "serde_str")]
    pub admin_fee: Amount,
    pub bridge_wallet: String,
    pub threshold: u32,
    pub signers: Vec<String>,
    #[serde(default)]
    pub operators: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct ProcessorConfig {
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct InitialBalance {
    pub account: String,
    #[serde(with = "serde_str")]
    pub amount: Amount,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub struct TokenConfig {
    #[serde(default)]
    pub initial_balances: Vec<InitialBalance>,
}

/// Struct used for initialization of different kinds of configurations
///
/// Example of using local configuration:
/// ```rust
/// use global_utils::config_variant::ConfigVariant;
/// use relay_manager_config_parser::config::ServerConfig;
/// let config = ServerConfig::init_config(ConfigVariant::Local);
/// assert!(config.is_ok())
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(rename(deserialize = "application"))]
    pub server: AppConfig,
    #[serde(rename = "relay_manager_config")]
    pub relay_manager: RelayManagerConfig,
    #[serde(rename = "processor_config", default)]
    pub processor: ProcessorConfig,
    #[serde(rename = "token_config", default)]
    pub token: TokenConfig,
}

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

pub fn get_cargo_manifest_dir() -> String {
    std::env::var(CARGO_MANIFEST_DIR).unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_string())
}

fn parse_address(field: &'static str, value: &str) -> crate::error::Result<Address> {
    Address::from_str(value).map_err(|source| ConfigParserError::InvalidValue {
        field,
        value: value.to_string(),
        source,
    })
}

impl AppConfig {
    #[inline]
    pub fn get_app_binding_url(&self) -> crate::error::Result<SocketAddr> {
        Ok(SocketAddr::from_str(&format!("{}:{}", self.ip, self.port))?)
    }
}

impl RelayManagerConfig {
    pub fn init_params(&self) -> crate::error::Result<InitParams> {
        Ok(InitParams {
            admin_fee: self.admin_fee,
            bridge_wallet: parse_address("relay_manager_config.bridge_wallet", &self.bridge_wallet)?,
            threshold: self.threshold,
            signers: self
                .signers
                .iter()
                .map(|signer| parse_address("relay_manager_config.signers", signer))
                .collect::<crate::error::Result<Vec<_>>>()?,
        })
    }

    pub fn operator_addresses(&self) -> crate::error::Result<Vec<Address>> {
        self.operators
            .iter()
            .map(|operator| parse_address("relay_manager_config.operators", operator))
            .collect()
    }
}

impl TokenConfig {
    pub fn balances(&self) -> crate::error::Result<Vec<(Address, Amount)>> {
        self.initial_balances
            .iter()
            .map(|balance| Ok((parse_address("token_config.initial_balances", &balance.account)?, balance.amount)))
            .collect()
    }
}

impl ServerConfig {
    #[instrument(level = "debug", ret)]
    pub fn init_config(config_variant: ConfigVariant) -> crate::error::Result<Self> {
        trace!("Initializing, {config_variant}...");
        let format_name = |folder_path: &str, config_folder_name: &str, filename: &str| -> String {
            format!("{folder_path}{config_folder_name}/{filename}.toml")
        };
        if config_variant != ConfigVariant::Production {
            let _ = dotenvy::dotenv().ok();
        }
        let config = match config_variant {
            ConfigVariant::OnlyOneFilepath(filepath) => {
                debug!(onepath = %filepath);
                Config::builder()
                    .add_source(config::File::with_name(&filepath))
                    .add_source(Environment::with_prefix("config").separator("_").keep_prefix(false))
                    .build()?
                    .try_deserialize::<ServerConfig>()?
            }
            variant => {
                let (folder_path, config_folder_name) = match variant {
                    ConfigVariant::Production => ("/".to_string(), PRODUCTION_CONFIG_FOLDER_NAME),
                    _ => (format!("{}/", get_cargo_manifest_dir()), CONFIG_FOLDER_NAME),
                };
                let path_to_base = format_name(&folder_path, config_folder_name, DEFAULT_APP_LOCAL_BASE_FILENAME);
                let path_to_overlay = format_name(&folder_path, config_folder_name, &variant.to_string());
                debug!(path = %path_to_overlay, config_path = %path_to_base);
                Config::builder()
                    .add_source(config::File::with_name(&path_to_base))
                    .add_source(config::File::with_name(&path_to_overlay).required(false))
                    .add_source(Environment::with_prefix("config").separator("_").keep_prefix(false))
                    .build()?
                    .try_deserialize::<ServerConfig>()?
            }
        };
        Ok(config)
    }
}
