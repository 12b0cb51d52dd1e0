//! 服务注册模块
//!
//! 注册中心抽象、内存实现，以及在注册前后发布生命周期事件的装饰器

pub mod in_memory;
pub mod publishing;
pub mod trait_def;

pub use in_memory::InMemoryServiceRegistry;
pub use publishing::EventPublishingServiceRegistry;
pub use trait_def::{Registration, ServiceRegistry};
