//! 静态服务发现客户端
//!
//! 实例来自配置，不访问任何外部系统

use async_trait::async_trait;
use std::collections::HashMap;

use crate::discovery::client::DiscoveryClient;
use crate::discovery::config::SimpleDiscoveryConfig;
use crate::discovery::instance::ServiceInstance;
use crate::error::Result;

/// 静态服务发现客户端
#[derive(Debug, Clone)]
pub struct SimpleDiscoveryClient {
    description: String,
    instances: HashMap<String, Vec<ServiceInstance>>,
}

impl SimpleDiscoveryClient {
    /// 创建空的静态客户端
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            instances: HashMap::new(),
        }
    }

    /// 从配置创建，实例的 `service_id` 以配置键为准
    pub fn from_config(description: impl Into<String>, config: &SimpleDiscoveryConfig) -> Self {
        let mut client = Self::new(description);
        for (service_id, instances) in &config.instances {
            for instance in instances {
                client = client.with_instance(ServiceInstance {
                    service_id: service_id.clone(),
                    ..instance.clone()
                });
            }
        }
        client
    }

    /// 添加实例
    pub fn with_instance(mut self, instance: ServiceInstance) -> Self {
        self.instances
            .entry(instance.service_id.clone())
            .or_default()
            .push(instance);
        self
    }
}

#[async_trait]
impl DiscoveryClient for SimpleDiscoveryClient {
    fn description(&self) -> &str {
        &self.description
    }

    async fn get_instances(&self, service_id: &str) -> Result<Vec<ServiceInstance>> {
        Ok(self.instances.get(service_id).cloned().unwrap_or_default())
    }

    async fn get_services(&self) -> Result<Vec<String>> {
        let mut services: Vec<String> = self.instances.keys().cloned().collect();
        services.sort();
        Ok(services)
    }
}
