//! 默认（Composite）模式服务发现客户端
//!
//! 按后端顺序查询，返回第一个非空结果；服务列表取所有后端的并集。

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::discovery::client::DiscoveryClient;
use crate::discovery::instance::ServiceInstance;
use crate::error::Result;

const DESCRIPTION: &str = "Composite Discovery Client";

/// 默认模式服务发现客户端
pub struct CompositeDiscoveryClient {
    delegates: Vec<Arc<dyn DiscoveryClient>>,
}

impl CompositeDiscoveryClient {
    pub fn new(delegates: Vec<Arc<dyn DiscoveryClient>>) -> Self {
        Self { delegates }
    }

    pub fn delegates(&self) -> &[Arc<dyn DiscoveryClient>] {
        &self.delegates
    }
}

#[async_trait]
impl DiscoveryClient for CompositeDiscoveryClient {
    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn get_instances(&self, service_id: &str) -> Result<Vec<ServiceInstance>> {
        for delegate in &self.delegates {
            let instances = delegate.get_instances(service_id).await?;
            if !instances.is_empty() {
                return Ok(instances);
            }
        }
        Ok(Vec::new())
    }

    async fn get_services(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut services = Vec::new();
        for delegate in &self.delegates {
            for service in delegate.get_services().await? {
                if seen.insert(service.clone()) {
                    services.push(service);
                }
            }
        }
        Ok(services)
    }
}
