//! 服务实例变更事件

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::discovery::ServiceInstance;
use crate::error::{FlareError, Result};

/// 某个服务的实例列表发生变化时产生的事件
///
/// 实例列表在构造时转为只读容器，之后不可修改；唯一可变的状态是
/// `processed` 标记，它只能从 `false` 变为 `true`。
#[derive(Debug)]
pub struct ServiceInstancesChangedEvent {
    event_id: Uuid,
    service_name: String,
    service_instances: Arc<[ServiceInstance]>,
    processed: AtomicBool,
    timestamp: DateTime<Utc>,
}

impl ServiceInstancesChangedEvent {
    /// 创建事件
    ///
    /// # 参数
    /// * `service_name` - 发生变化的服务名称，不能为空
    /// * `service_instances` - 该服务当前的全部实例，不能为空
    ///
    /// # 错误
    /// 任一参数为空时返回 `InvalidParameter` 错误
    pub fn new(
        service_name: impl Into<String>,
        service_instances: Vec<ServiceInstance>,
    ) -> Result<Self> {
        let service_name = service_name.into();
        if service_name.is_empty() {
            return Err(FlareError::invalid_argument(
                "The argument 'serviceName' must not be empty!",
            ));
        }
        if service_instances.is_empty() {
            return Err(FlareError::invalid_argument(
                "The arguments 'serviceInstances' must not be empty!",
            ));
        }

        Ok(Self {
            event_id: Uuid::new_v4(),
            service_name,
            service_instances: service_instances.into(),
            processed: AtomicBool::new(false),
            timestamp: Utc::now(),
        })
    }

    /// 发生变化的服务名称
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// 该服务当前的全部实例
    pub fn service_instances(&self) -> &[ServiceInstance] {
        &self.service_instances
    }

    /// 标记事件已处理
    pub fn processed(&self) {
        self.processed.store(true, Ordering::Release);
    }

    /// 事件是否已处理
    pub fn is_processed(&self) -> bool {
        self.processed.load(Ordering::Acquire)
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
