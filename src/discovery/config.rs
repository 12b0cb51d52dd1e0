//! 服务发现配置

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::constants::{DISCOVERY_CLIENT_MODE_PROPERTY, UNION_DISCOVERY_CLIENT_MODE};
use crate::discovery::instance::ServiceInstance;

/// 服务发现客户端模式
///
/// 只有 `union` 会启用聚合客户端，缺省或任何其他取值（包括非字符串）都回落到默认客户端。
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(into = "String")]
pub enum DiscoveryMode {
    /// 默认（Composite）客户端
    #[default]
    Default,
    /// Union 聚合客户端
    Union,
}

impl DiscoveryMode {
    /// 解析配置值，大小写不敏感，未知取值视为 `Default`
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(UNION_DISCOVERY_CLIENT_MODE) {
            DiscoveryMode::Union
        } else {
            DiscoveryMode::Default
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, DiscoveryMode::Union)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMode::Default => "default",
            DiscoveryMode::Union => UNION_DISCOVERY_CLIENT_MODE,
        }
    }
}

impl<'de> Deserialize<'de> for DiscoveryMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawMode {
            Text(String),
            Other(#[allow(dead_code)] IgnoredAny),
        }

        Ok(match RawMode::deserialize(deserializer)? {
            RawMode::Text(value) => Self::parse(&value),
            RawMode::Other(_) => DiscoveryMode::Default,
        })
    }
}

impl From<DiscoveryMode> for String {
    fn from(mode: DiscoveryMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 服务发现客户端配置
///
/// 对应配置前缀 `microsphere.spring.cloud.client.discovery`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryClientConfig {
    /// 客户端模式
    #[serde(default)]
    pub mode: DiscoveryMode,

    /// 静态服务实例
    #[serde(default)]
    pub simple: SimpleDiscoveryConfig,
}

impl DiscoveryClientConfig {
    /// 使用指定模式创建配置
    pub fn with_mode(mode: DiscoveryMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// 从扁平属性表读取（键为完整配置名，如 `microsphere.spring.cloud.client.discovery.mode`）
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let mode = properties
            .get(DISCOVERY_CLIENT_MODE_PROPERTY)
            .map(|value| DiscoveryMode::parse(value))
            .unwrap_or_default();
        Self::with_mode(mode)
    }
}

/// 静态服务发现配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleDiscoveryConfig {
    /// 服务 ID -> 实例列表
    #[serde(default)]
    pub instances: HashMap<String, Vec<ServiceInstance>>,
}
