//! 服务发现客户端常量

/// 服务发现客户端配置项前缀
pub const DISCOVERY_CLIENT_PROPERTY_PREFIX: &str = "microsphere.spring.cloud.client.discovery";

/// "mode" 配置项名称
pub const MODE_PROPERTY_NAME: &str = "mode";

/// 启用 [`UnionDiscoveryClient`](crate::discovery::UnionDiscoveryClient) 的 "mode" 取值
pub const UNION_DISCOVERY_CLIENT_MODE: &str = "union";

/// "mode" 配置项的完整键名
pub const DISCOVERY_CLIENT_MODE_PROPERTY: &str = "microsphere.spring.cloud.client.discovery.mode";
