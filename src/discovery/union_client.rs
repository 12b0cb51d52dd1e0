//! Union 模式服务发现客户端
//!
//! 将多个发现后端聚合为一个逻辑视图：同一服务在各后端的实例按后端顺序拼接，
//! 并按 `(host, port)` 去重（保留首次出现）。部分后端失败时只返回成功部分；
//! 存在失败后端且合并结果为空时返回错误，不会把失败伪装成"没有实例"。

use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::discovery::client::DiscoveryClient;
use crate::discovery::instance::ServiceInstance;
use crate::error::{FlareError, Result};

const DESCRIPTION: &str = "Union Discovery Client";

/// Union 模式服务发现客户端
pub struct UnionDiscoveryClient {
    delegates: Vec<Arc<dyn DiscoveryClient>>,
}

impl UnionDiscoveryClient {
    /// 创建新的 Union 客户端，`delegates` 的顺序即结果的合并顺序
    pub fn new(delegates: Vec<Arc<dyn DiscoveryClient>>) -> Self {
        Self { delegates }
    }

    /// 追加一个后端
    pub fn add_delegate(&mut self, delegate: Arc<dyn DiscoveryClient>) {
        self.delegates.push(delegate);
    }

    /// 所有后端
    pub fn delegates(&self) -> &[Arc<dyn DiscoveryClient>] {
        &self.delegates
    }

    /// 把各后端的结果拆分为成功部分与失败描述，保持后端顺序
    fn partition<T>(
        &self,
        operation: &str,
        service_id: Option<&str>,
        results: Vec<Result<T>>,
    ) -> (Vec<T>, Vec<String>) {
        let mut succeeded = Vec::with_capacity(results.len());
        let mut failures = Vec::new();

        for (delegate, result) in self.delegates.iter().zip(results) {
            match result {
                Ok(value) => succeeded.push(value),
                Err(e) => {
                    warn!(
                        delegate = %delegate.description(),
                        operation = %operation,
                        service_id = ?service_id,
                        error = %e,
                        "Discovery backend failed, skipping it"
                    );
                    failures.push(format!("{}: {}", delegate.description(), e));
                }
            }
        }

        (succeeded, failures)
    }
}

#[async_trait]
impl DiscoveryClient for UnionDiscoveryClient {
    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn get_instances(&self, service_id: &str) -> Result<Vec<ServiceInstance>> {
        let results = join_all(
            self.delegates
                .iter()
                .map(|delegate| delegate.get_instances(service_id)),
        )
        .await;

        let (succeeded, failures) = self.partition("get_instances", Some(service_id), results);

        let mut seen = HashSet::new();
        let mut instances = Vec::new();
        for instance in succeeded.into_iter().flatten() {
            if seen.insert((instance.host.clone(), instance.port)) {
                instances.push(instance);
            }
        }

        if instances.is_empty() && !failures.is_empty() {
            return Err(FlareError::discovery_backend_failed(service_id, &failures));
        }

        debug!(
            service_id = %service_id,
            instances = instances.len(),
            failed_backends = failures.len(),
            "Union discovery resolved instances"
        );
        Ok(instances)
    }

    async fn get_services(&self) -> Result<Vec<String>> {
        let results = join_all(self.delegates.iter().map(|delegate| delegate.get_services())).await;

        let (succeeded, failures) = self.partition("get_services", None, results);

        let mut seen = HashSet::new();
        let services: Vec<String> = succeeded
            .into_iter()
            .flatten()
            .filter(|service| seen.insert(service.clone()))
            .collect();

        if services.is_empty() && !failures.is_empty() {
            return Err(FlareError::discovery_services_failed(&failures));
        }
        Ok(services)
    }
}
