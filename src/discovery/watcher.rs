//! 服务实例变更检测
//!
//! 定期查询发现客户端，与上一次快照比较；实例列表变化时通过
//! [`ChangeEventDispatcher`] 发布 [`ServiceInstancesChangedEvent`](crate::event::ServiceInstancesChangedEvent)。

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};
use tracing::{debug, info, warn};

use crate::discovery::{DiscoveryClient, ServiceInstance};
use crate::error::Result;
use crate::event::ChangeEventDispatcher;

/// 服务实例变更检测器
pub struct ServiceInstancesWatcher {
    client: Arc<dyn DiscoveryClient>,
    dispatcher: Arc<ChangeEventDispatcher>,
    services: Vec<String>,
    snapshots: RwLock<HashMap<String, Vec<ServiceInstance>>>,
}

impl ServiceInstancesWatcher {
    /// 创建检测器
    ///
    /// # 参数
    /// * `client` - 发现客户端（通常是 Union 客户端）
    /// * `dispatcher` - 变更事件分发器
    /// * `services` - 需要检测的服务 ID
    pub fn new(
        client: Arc<dyn DiscoveryClient>,
        dispatcher: Arc<ChangeEventDispatcher>,
        services: Vec<String>,
    ) -> Self {
        Self {
            client,
            dispatcher,
            services,
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// 最近一次观察到的实例列表
    pub async fn snapshot(&self, service_id: &str) -> Option<Vec<ServiceInstance>> {
        self.snapshots.read().await.get(service_id).cloned()
    }

    /// 检测一个服务
    ///
    /// # 返回
    /// * `Ok(true)` - 实例列表发生变化且事件已发布
    /// * `Ok(false)` - 没有变化，或变为空列表（空列表不产生事件）
    /// * `Err` - 查询失败，或有监听器处理失败
    pub async fn poll(&self, service_id: &str) -> Result<bool> {
        let instances = self.client.get_instances(service_id).await?;

        {
            let mut snapshots = self.snapshots.write().await;
            let unchanged = match snapshots.get(service_id) {
                Some(previous) => *previous == instances,
                None => instances.is_empty(),
            };
            if unchanged {
                snapshots.entry(service_id.to_string()).or_default();
                return Ok(false);
            }
            snapshots.insert(service_id.to_string(), instances.clone());
        }

        if instances.is_empty() {
            info!(service_id = %service_id, "All instances of service are gone");
            return Ok(false);
        }

        debug!(
            service_id = %service_id,
            instances = instances.len(),
            "Service instances changed"
        );
        self.dispatcher.publish(service_id, instances)?;
        Ok(true)
    }

    /// 检测所有服务，单个服务失败只记录日志
    ///
    /// # 返回
    /// 发布了事件的服务数量
    pub async fn poll_all(&self) -> usize {
        let mut changed = 0;
        for service_id in &self.services {
            match self.poll(service_id).await {
                Ok(true) => changed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(service_id = %service_id, error = %e, "Failed to refresh service instances");
                }
            }
        }
        changed
    }

    /// 启动后台检测任务
    ///
    /// 立即执行一次检测，之后每隔 `period` 检测一次，直到 [`WatchHandle::shutdown`]。
    pub fn spawn(self: Arc<Self>, period: Duration) -> WatchHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

        let join = tokio::spawn(async move {
            let mut interval_timer = interval(period);
            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        self.poll_all().await;
                    }
                    _ = shutdown_rx.recv() => {
                        info!(services = self.services.len(), "🛑 Service instances watcher stopped");
                        break;
                    }
                }
            }
        });

        WatchHandle {
            shutdown_tx: Some(shutdown_tx),
            join: Some(join),
        }
    }
}

/// 后台检测任务句柄
pub struct WatchHandle {
    shutdown_tx: Option<mpsc::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl WatchHandle {
    /// 停止后台任务并等待其退出
    pub async fn shutdown(mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(()).await;
        }
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                warn!(error = %e, "Service instances watcher task ended abnormally");
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.try_send(());
        }
    }
}
