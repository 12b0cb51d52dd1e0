//! 发布注册事件的注册中心装饰器
//!
//! 流程：
//! - 注册：`PreRegistered` -> 委托注册 -> `Registered`
//! - 注销：`PreDeregistered` -> 委托注销 -> `Deregistered`
//!
//! 前置事件的监听器失败会中止操作；委托失败时不发送后置事件；
//! 后置事件的监听器失败只记录日志，因为操作已经完成。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{FlareError, Result};
use crate::event::{EventListener, EventMulticaster, RegistrationEvent};
use crate::registry::trait_def::{Registration, ServiceRegistry};

const DESCRIPTION: &str = "Event Publishing Service Registry";

/// 发布注册事件的注册中心
pub struct EventPublishingServiceRegistry {
    delegate: Arc<dyn ServiceRegistry>,
    multicaster: EventMulticaster<RegistrationEvent>,
}

impl EventPublishingServiceRegistry {
    pub fn new(delegate: Arc<dyn ServiceRegistry>) -> Self {
        Self {
            delegate,
            multicaster: EventMulticaster::new(),
        }
    }

    /// 注册事件监听器
    pub fn add_listener<L>(&self, listener: L)
    where
        L: EventListener<RegistrationEvent> + 'static,
    {
        self.multicaster.add_listener(Arc::new(listener));
    }

    /// 被装饰的注册中心
    pub fn delegate(&self) -> &Arc<dyn ServiceRegistry> {
        &self.delegate
    }

    fn publish_after(&self, event: RegistrationEvent) {
        let registration = event.registration().to_string();
        if let Err(e) = self.multicaster.multicast(&event, &registration) {
            warn!(
                kind = %event.kind(),
                registration = %registration,
                error = %e,
                "Listener failed after registry operation completed"
            );
        }
    }
}

#[async_trait]
impl ServiceRegistry for EventPublishingServiceRegistry {
    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        let event = RegistrationEvent::pre_registered(self.delegate.clone(), registration.clone());
        self.multicaster
            .multicast(&event, &registration.to_string())
            .map_err(|e| FlareError::registration_rejected("register", &e))?;

        self.delegate.register(registration).await?;
        info!(
            registry = %self.delegate.description(),
            registration = %registration,
            "✅ Service registered"
        );

        self.publish_after(RegistrationEvent::registered(
            self.delegate.clone(),
            registration.clone(),
        ));
        Ok(())
    }

    async fn deregister(&self, registration: &Registration) -> Result<()> {
        let event = RegistrationEvent::pre_deregistered(self.delegate.clone(), registration.clone());
        self.multicaster
            .multicast(&event, &registration.to_string())
            .map_err(|e| FlareError::registration_rejected("deregister", &e))?;

        self.delegate.deregister(registration).await?;
        info!(
            registry = %self.delegate.description(),
            registration = %registration,
            "✅ Service deregistered"
        );

        self.publish_after(RegistrationEvent::deregistered(
            self.delegate.clone(),
            registration.clone(),
        ));
        Ok(())
    }
}
