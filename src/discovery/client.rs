//! 服务发现客户端抽象

use async_trait::async_trait;

use crate::discovery::instance::ServiceInstance;
use crate::error::Result;

/// 服务发现客户端 trait
///
/// 所有发现后端（静态配置、注册中心、以及组合客户端本身）都需要实现这个 trait。
/// 由于需要动态分发（dyn），使用 async-trait。
#[async_trait]
pub trait DiscoveryClient: Send + Sync {
    /// 客户端描述，用于日志
    fn description(&self) -> &str;

    /// 获取指定服务的所有实例
    ///
    /// # 参数
    /// * `service_id` - 服务 ID
    ///
    /// # 返回
    /// 返回服务实例列表；服务不存在时返回空列表
    async fn get_instances(&self, service_id: &str) -> Result<Vec<ServiceInstance>>;

    /// 获取所有已知的服务 ID
    async fn get_services(&self) -> Result<Vec<String>>;
}
