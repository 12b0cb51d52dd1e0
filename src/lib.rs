//! Flare Cloud Commons
//!
//! Service discovery and registry extension points: a union discovery client that
//! aggregates several discovery backends, a synchronous dispatcher for service
//! instance change events, and registration lifecycle events.

pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod event;
pub mod logging;
pub mod registry;

pub use config::Config;
pub use constants::{
    DISCOVERY_CLIENT_MODE_PROPERTY, DISCOVERY_CLIENT_PROPERTY_PREFIX, MODE_PROPERTY_NAME,
    UNION_DISCOVERY_CLIENT_MODE,
};
pub use discovery::{
    CompositeDiscoveryClient, DiscoveryClient, DiscoveryClientConfig, DiscoveryClientFactory,
    DiscoveryMode, ServiceInstance, ServiceInstancesWatcher, SimpleDiscoveryClient,
    SimpleDiscoveryConfig, UnionDiscoveryClient, WatchHandle,
};
pub use error::{ErrorBuilder, ErrorCode, FlareError, InfraResult, InfraResultExt, Result};
pub use event::{
    ChangeEventDispatcher, EventListener, EventMulticaster, FnListener, RegistrationEvent,
    RegistrationEventType, ServiceInstancesChangedEvent,
};
pub use logging::init_tracing;
pub use registry::{EventPublishingServiceRegistry, InMemoryServiceRegistry, Registration, ServiceRegistry};
