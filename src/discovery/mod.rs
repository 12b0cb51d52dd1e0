//! 服务发现模块
//!
//! 提供统一的发现客户端抽象、Union / 默认两种聚合模式、静态客户端，
//! 以及基于快照比较的实例变更检测。

pub mod client;
pub mod composite;
pub mod config;
pub mod factory;
pub mod instance;
pub mod simple;
pub mod union_client;
pub mod watcher;

pub use client::DiscoveryClient;
pub use composite::CompositeDiscoveryClient;
pub use config::{DiscoveryClientConfig, DiscoveryMode, SimpleDiscoveryConfig};
pub use factory::DiscoveryClientFactory;
pub use instance::ServiceInstance;
pub use simple::SimpleDiscoveryClient;
pub use union_client::UnionDiscoveryClient;
pub use watcher::{ServiceInstancesWatcher, WatchHandle};
