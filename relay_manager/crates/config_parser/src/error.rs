use config::ConfigError;
use relay_manager_core::errors::ParseError;
use std::net::AddrParseError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, ConfigParserError>;

#[derive(Debug, Error)]
pub enum ConfigParserError {
    #[error("Failed to convert SocketAddr, err: {0}")]
    SocketConversionError(#[from] AddrParseError),
    #[error("Failed to merge configuration, err: {0}")]
    ConfigMergingError(#[from] ConfigError),
    #[error("Failed to parse '{value}' in '{field}', err: {source}")]
    InvalidValue {
        field: &'static str,
        value: String,
        #[source]
        source: ParseError,
    },
}
