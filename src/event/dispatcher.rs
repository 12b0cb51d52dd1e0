//! 服务实例变更事件分发器

use std::sync::Arc;
use tracing::debug;

use crate::discovery::ServiceInstance;
use crate::error::Result;
use crate::event::instances_changed::ServiceInstancesChangedEvent;
use crate::event::listener::{EventListener, EventMulticaster, FnListener};

/// 服务实例变更事件分发器
///
/// 同步分发：`publish` 在调用线程上按注册顺序调用所有监听器，全部返回后才返回。
/// 监听器失败的处理策略见 [`EventMulticaster::multicast`]。
#[derive(Default)]
pub struct ChangeEventDispatcher {
    multicaster: EventMulticaster<ServiceInstancesChangedEvent>,
}

impl ChangeEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册监听器
    pub fn register<L>(&self, listener: L)
    where
        L: EventListener<ServiceInstancesChangedEvent> + 'static,
    {
        self.multicaster.add_listener(Arc::new(listener));
    }

    /// 以闭包注册监听器
    pub fn register_fn<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&ServiceInstancesChangedEvent) -> Result<()> + Send + Sync + 'static,
    {
        self.register(FnListener::new(name, handler));
    }

    pub fn listener_count(&self) -> usize {
        self.multicaster.listener_count()
    }

    /// 发布服务实例变更
    ///
    /// # 参数
    /// * `service_name` - 服务名称
    /// * `new_instances` - 变更后的全部实例
    ///
    /// # 返回
    /// * `Ok(event)` - 所有监听器均处理成功，返回已分发的事件
    /// * `Err` - 参数非法（实例列表为空），或至少一个监听器失败
    pub fn publish(
        &self,
        service_name: impl Into<String>,
        new_instances: Vec<ServiceInstance>,
    ) -> Result<ServiceInstancesChangedEvent> {
        let event = ServiceInstancesChangedEvent::new(service_name, new_instances)?;
        self.publish_event(event)
    }

    /// 分发一个已构造好的事件
    pub fn publish_event(
        &self,
        event: ServiceInstancesChangedEvent,
    ) -> Result<ServiceInstancesChangedEvent> {
        debug!(
            event_id = %event.event_id(),
            service_name = %event.service_name(),
            instances = event.service_instances().len(),
            listeners = self.listener_count(),
            "Publishing service instances changed event"
        );
        self.multicaster.multicast(&event, event.service_name())?;
        Ok(event)
    }
}
