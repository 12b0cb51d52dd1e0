//! 服务注册 Trait 定义

use async_trait::async_trait;

use crate::discovery::ServiceInstance;
use crate::error::Result;

/// 注册信息：提交给注册中心的服务实例
pub type Registration = ServiceInstance;

/// 服务注册中心 Trait
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// 注册中心描述，用于日志
    fn description(&self) -> &str;

    /// 注册服务实例
    async fn register(&self, registration: &Registration) -> Result<()>;

    /// 注销服务实例
    async fn deregister(&self, registration: &Registration) -> Result<()>;
}
