//! 内存注册中心
//!
//! 注册信息保存在进程内，同时作为发现后端使用

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::discovery::{DiscoveryClient, ServiceInstance};
use crate::error::{FlareError, Result};
use crate::registry::trait_def::{Registration, ServiceRegistry};

const DESCRIPTION: &str = "In-Memory Service Registry";

/// 内存注册中心
#[derive(Default)]
pub struct InMemoryServiceRegistry {
    // service_id -> 按注册顺序排列的实例
    registrations: RwLock<HashMap<String, Vec<Registration>>>,
}

impl InMemoryServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前注册的实例总数
    pub async fn len(&self) -> usize {
        self.registrations.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryServiceRegistry {
    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        if registration.service_id.trim().is_empty() {
            return Err(FlareError::invalid_argument(
                "The registration 'serviceId' must not be empty!",
            ));
        }

        let mut registrations = self.registrations.write().await;
        let instances = registrations
            .entry(registration.service_id.clone())
            .or_default();

        // 同一端点重复注册视为更新
        match instances
            .iter()
            .position(|existing| existing.endpoint() == registration.endpoint())
        {
            Some(index) => instances[index] = registration.clone(),
            None => instances.push(registration.clone()),
        }

        debug!(registration = %registration, "Registration stored");
        Ok(())
    }

    async fn deregister(&self, registration: &Registration) -> Result<()> {
        let mut registrations = self.registrations.write().await;
        let Some(instances) = registrations.get_mut(&registration.service_id) else {
            return Err(FlareError::deregistration_failed(format!(
                "service '{}' is not registered",
                registration.service_id
            )));
        };

        let before = instances.len();
        instances.retain(|existing| existing.endpoint() != registration.endpoint());
        if instances.len() == before {
            return Err(FlareError::deregistration_failed(format!(
                "instance '{}' is not registered",
                registration
            )));
        }
        if instances.is_empty() {
            registrations.remove(&registration.service_id);
        }

        debug!(registration = %registration, "Registration removed");
        Ok(())
    }
}

#[async_trait]
impl DiscoveryClient for InMemoryServiceRegistry {
    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn get_instances(&self, service_id: &str) -> Result<Vec<ServiceInstance>> {
        Ok(self
            .registrations
            .read()
            .await
            .get(service_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_services(&self) -> Result<Vec<String>> {
        let mut services: Vec<String> = self.registrations.read().await.keys().cloned().collect();
        services.sort();
        Ok(services)
    }
}
