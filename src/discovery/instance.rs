//! 服务实例定义

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 服务实例
///
/// 表示某个服务的一个可访问网络端点。由发现后端返回后即视为不可变。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInstance {
    /// 服务 ID（如 "orders", "message-orchestrator"）
    #[serde(default)]
    pub service_id: String,

    /// 实例 ID（可选，由后端分配）
    #[serde(default)]
    pub instance_id: Option<String>,

    /// 主机名或 IP
    pub host: String,

    /// 端口
    pub port: u16,

    /// 是否使用 https
    #[serde(default)]
    pub secure: bool,

    /// 元数据
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ServiceInstance {
    /// 创建新的服务实例
    pub fn new(service_id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            service_id: service_id.into(),
            instance_id: None,
            host: host.into(),
            port,
            secure: false,
            metadata: HashMap::new(),
        }
    }

    /// 设置实例 ID
    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    /// 添加元数据
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// 设置是否使用 https
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// 协议（http / https）
    pub fn scheme(&self) -> &'static str {
        if self.secure { "https" } else { "http" }
    }

    /// 转换为 URI
    pub fn uri(&self) -> String {
        format!("{}://{}:{}", self.scheme(), self.host, self.port)
    }

    /// 端点标识 `(host, port)`，用于跨后端去重
    pub fn endpoint(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    /// 实例 ID，缺省时使用 `host:port`
    pub fn instance_id_or_endpoint(&self) -> String {
        self.instance_id
            .clone()
            .unwrap_or_else(|| format!("{}:{}", self.host, self.port))
    }
}

impl fmt::Display for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.service_id, self.host, self.port)
    }
}
