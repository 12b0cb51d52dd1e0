//! 服务注册生命周期事件
//!
//! 每个事件都是一次性通知，由注册流程在注册中心操作之前或之后创建。

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use crate::registry::{Registration, ServiceRegistry};

/// 注册事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationEventType {
    /// 注册之前
    PreRegistered,
    /// 注册之后
    Registered,
    /// 注销之前
    PreDeregistered,
    /// 注销之后
    Deregistered,
}

impl RegistrationEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationEventType::PreRegistered => "PRE_REGISTERED",
            RegistrationEventType::Registered => "REGISTERED",
            RegistrationEventType::PreDeregistered => "PRE_DEREGISTERED",
            RegistrationEventType::Deregistered => "DEREGISTERED",
        }
    }
}

impl fmt::Display for RegistrationEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 注册事件
#[derive(Clone)]
pub struct RegistrationEvent {
    kind: RegistrationEventType,
    registry: Arc<dyn ServiceRegistry>,
    registration: Registration,
    timestamp: DateTime<Utc>,
}

impl RegistrationEvent {
    pub fn new(
        kind: RegistrationEventType,
        registry: Arc<dyn ServiceRegistry>,
        registration: Registration,
    ) -> Self {
        Self {
            kind,
            registry,
            registration,
            timestamp: Utc::now(),
        }
    }

    /// 注册之前的事件
    pub fn pre_registered(registry: Arc<dyn ServiceRegistry>, registration: Registration) -> Self {
        Self::new(RegistrationEventType::PreRegistered, registry, registration)
    }

    pub fn registered(registry: Arc<dyn ServiceRegistry>, registration: Registration) -> Self {
        Self::new(RegistrationEventType::Registered, registry, registration)
    }

    pub fn pre_deregistered(registry: Arc<dyn ServiceRegistry>, registration: Registration) -> Self {
        Self::new(RegistrationEventType::PreDeregistered, registry, registration)
    }

    pub fn deregistered(registry: Arc<dyn ServiceRegistry>, registration: Registration) -> Self {
        Self::new(RegistrationEventType::Deregistered, registry, registration)
    }

    pub fn kind(&self) -> RegistrationEventType {
        self.kind
    }

    /// 执行注册操作的注册中心
    pub fn registry(&self) -> &Arc<dyn ServiceRegistry> {
        &self.registry
    }

    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_pre_registered(&self) -> bool {
        self.kind == RegistrationEventType::PreRegistered
    }

    pub fn is_registered(&self) -> bool {
        self.kind == RegistrationEventType::Registered
    }

    pub fn is_pre_deregistered(&self) -> bool {
        self.kind == RegistrationEventType::PreDeregistered
    }

    pub fn is_deregistered(&self) -> bool {
        self.kind == RegistrationEventType::Deregistered
    }
}

impl fmt::Debug for RegistrationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationEvent")
            .field("kind", &self.kind)
            .field("registry", &self.registry.description())
            .field("registration", &self.registration)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}
