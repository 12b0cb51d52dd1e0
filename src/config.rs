//! 配置加载
//!
//! 从 TOML 文档中读取 `[microsphere.spring.cloud.client.discovery]` 配置段

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::DISCOVERY_CLIENT_PROPERTY_PREFIX;
use crate::discovery::DiscoveryClientConfig;
use crate::error::{ErrorBuilder, ErrorCode, Result};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub discovery: DiscoveryClientConfig,
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ErrorBuilder::new(ErrorCode::ConfigurationError, "failed to read configuration file")
                .details(e.to_string())
                .param("path", path.display().to_string())
                .build_error()
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let root: toml::Table = toml::from_str(content).map_err(|e| {
            ErrorBuilder::new(ErrorCode::DeserializationError, "invalid TOML configuration")
                .details(e.to_string())
                .build_error()
        })?;

        let section = DISCOVERY_CLIENT_PROPERTY_PREFIX
            .split('.')
            .try_fold(&root, |table, segment| match table.get(segment) {
                Some(toml::Value::Table(next)) => Some(next),
                _ => None,
            });

        let discovery = match section {
            Some(table) => toml::Value::Table(table.clone())
                .try_into::<DiscoveryClientConfig>()
                .map_err(|e| {
                    ErrorBuilder::new(ErrorCode::DeserializationError, "invalid discovery client configuration")
                        .details(e.to_string())
                        .build_error()
                })?,
            None => DiscoveryClientConfig::default(),
        };

        Ok(Self { discovery })
    }
}
