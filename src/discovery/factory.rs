//! 服务发现客户端工厂
//!
//! 根据 `mode` 配置决定使用 Union 客户端还是默认客户端

use std::sync::Arc;
use tracing::info;

use crate::discovery::{
    CompositeDiscoveryClient, DiscoveryClient, DiscoveryClientConfig, DiscoveryMode,
    SimpleDiscoveryClient, UnionDiscoveryClient,
};

const SIMPLE_CLIENT_DESCRIPTION: &str = "Simple Discovery Client";

/// 服务发现客户端工厂
pub struct DiscoveryClientFactory;

impl DiscoveryClientFactory {
    /// 从配置创建逻辑客户端
    ///
    /// 配置中声明了静态实例时，会在 `delegates` 之后追加一个静态客户端。
    ///
    /// # 参数
    /// * `config` - 服务发现客户端配置
    /// * `delegates` - 外部提供的发现后端，顺序即优先级
    pub fn create(
        config: &DiscoveryClientConfig,
        mut delegates: Vec<Arc<dyn DiscoveryClient>>,
    ) -> Arc<dyn DiscoveryClient> {
        if !config.simple.instances.is_empty() {
            delegates.push(Arc::new(SimpleDiscoveryClient::from_config(
                SIMPLE_CLIENT_DESCRIPTION,
                &config.simple,
            )));
        }

        info!(
            mode = %config.mode,
            delegates = delegates.len(),
            "Creating discovery client"
        );

        match config.mode {
            DiscoveryMode::Union => Arc::new(UnionDiscoveryClient::new(delegates)),
            DiscoveryMode::Default => Arc::new(CompositeDiscoveryClient::new(delegates)),
        }
    }
}
