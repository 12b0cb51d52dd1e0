//! 事件模块
//!
//! 服务实例变更事件、注册生命周期事件，以及同步分发它们的广播器

pub mod dispatcher;
pub mod instances_changed;
pub mod listener;
pub mod registration;

pub use dispatcher::ChangeEventDispatcher;
pub use instances_changed::ServiceInstancesChangedEvent;
pub use listener::{EventListener, EventMulticaster, FnListener};
pub use registration::{RegistrationEvent, RegistrationEventType};
