//! 注册生命周期事件测试

use async_trait::async_trait;
use flare_cloud_commons::discovery::{DiscoveryClient, ServiceInstance};
use flare_cloud_commons::error::{ErrorCode, FlareError, Result};
use flare_cloud_commons::event::{
    EventListener, FnListener, RegistrationEvent, RegistrationEventType,
};
use flare_cloud_commons::registry::{
    EventPublishingServiceRegistry, InMemoryServiceRegistry, Registration, ServiceRegistry,
};
use std::sync::{Arc, Mutex};

/// 总是失败的注册中心
struct BrokenRegistry;

#[async_trait]
impl ServiceRegistry for BrokenRegistry {
    fn description(&self) -> &str {
        "broken"
    }

    async fn register(&self, _registration: &Registration) -> Result<()> {
        Err(FlareError::registration_failed("registry is read-only"))
    }

    async fn deregister(&self, _registration: &Registration) -> Result<()> {
        Err(FlareError::deregistration_failed("registry is read-only"))
    }
}

/// 记录事件类型的监听器
struct KindRecorder {
    kinds: Arc<Mutex<Vec<RegistrationEventType>>>,
}

impl EventListener<RegistrationEvent> for KindRecorder {
    fn on_event(&self, event: &RegistrationEvent) -> Result<()> {
        self.kinds.lock().unwrap().push(event.kind());
        Ok(())
    }
}

fn registration() -> Registration {
    ServiceInstance::new("orders", "10.0.0.1", 8080).with_instance_id("orders-1")
}

fn publishing_registry(
    delegate: Arc<dyn ServiceRegistry>,
) -> (EventPublishingServiceRegistry, Arc<Mutex<Vec<RegistrationEventType>>>) {
    let kinds = Arc::new(Mutex::new(Vec::new()));
    let registry = EventPublishingServiceRegistry::new(delegate);
    registry.add_listener(KindRecorder { kinds: kinds.clone() });
    (registry, kinds)
}

#[test]
fn test_pre_registered_event_carries_registry_and_registration() {
    let registry: Arc<dyn ServiceRegistry> = Arc::new(InMemoryServiceRegistry::new());
    let event = RegistrationEvent::pre_registered(registry.clone(), registration());

    assert_eq!(event.kind(), RegistrationEventType::PreRegistered);
    assert!(event.is_pre_registered());
    assert!(!event.is_registered());
    assert_eq!(event.registration(), &registration());
    assert!(Arc::ptr_eq(event.registry(), &registry));
    assert_eq!(event.kind().to_string(), "PRE_REGISTERED");
    assert!(format!("{:?}", event).contains("In-Memory Service Registry"));
}

#[test]
fn test_deregistration_events_and_timestamps() {
    let registry: Arc<dyn ServiceRegistry> = Arc::new(InMemoryServiceRegistry::new());
    let before = chrono::Utc::now();
    let pre = RegistrationEvent::pre_deregistered(registry.clone(), registration());
    let done = RegistrationEvent::deregistered(registry, registration());
    let after = chrono::Utc::now();

    assert!(pre.is_pre_deregistered());
    assert!(!pre.is_deregistered());
    assert!(done.is_deregistered());
    assert!(!done.is_pre_deregistered());
    assert!(!done.is_registered());
    assert_eq!(done.kind().to_string(), "DEREGISTERED");

    assert!(before <= pre.timestamp() && pre.timestamp() <= done.timestamp());
    assert!(done.timestamp() <= after);
}

#[tokio::test]
async fn test_register_and_deregister_emit_lifecycle_events() {
    let delegate = Arc::new(InMemoryServiceRegistry::new());
    let (registry, kinds) = publishing_registry(delegate.clone());

    registry.register(&registration()).await.expect("register");
    assert_eq!(
        delegate.get_instances("orders").await.expect("lookup"),
        vec![registration()]
    );

    registry.deregister(&registration()).await.expect("deregister");
    assert!(delegate.is_empty().await);

    assert_eq!(
        *kinds.lock().unwrap(),
        vec![
            RegistrationEventType::PreRegistered,
            RegistrationEventType::Registered,
            RegistrationEventType::PreDeregistered,
            RegistrationEventType::Deregistered,
        ]
    );
}

#[tokio::test]
async fn test_pre_registered_listener_sees_registration_before_it_is_stored() {
    let delegate = Arc::new(InMemoryServiceRegistry::new());
    let registry = EventPublishingServiceRegistry::new(delegate.clone());

    let observed = Arc::new(Mutex::new(Vec::new()));
    let sink = observed.clone();
    registry.add_listener(FnListener::new("observer", move |event: &RegistrationEvent| -> Result<()> {
        sink.lock()
            .unwrap()
            .push((event.kind(), event.registration().instance_id.clone()));
        Ok(())
    }));

    registry.register(&registration()).await.expect("register");

    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 2);
    assert_eq!(observed[0], (RegistrationEventType::PreRegistered, Some("orders-1".to_string())));
    assert_eq!(observed[1].0, RegistrationEventType::Registered);
}

#[tokio::test]
async fn test_failing_pre_listener_rejects_registration() {
    let delegate = Arc::new(InMemoryServiceRegistry::new());
    let registry = EventPublishingServiceRegistry::new(delegate.clone());
    registry.add_listener(FnListener::new("veto", |event: &RegistrationEvent| {
        if event.is_pre_registered() {
            Err(FlareError::event_rejected("maintenance window"))
        } else {
            Ok(())
        }
    }));

    let err = registry
        .register(&registration())
        .await
        .expect_err("pre-registration listener vetoed");

    assert!(err.is(ErrorCode::RegistrationRejected));
    assert!(err.reason().starts_with("register rejected"));
    assert_eq!(err.param("operation"), Some("register"));
    assert_eq!(err.param("cause_code"), Some("LISTENER_FAILED"));
    assert_eq!(err.param("failed_listeners"), Some("1"));
    assert_eq!(err.param("event_source"), Some("orders@10.0.0.1:8080"));
    let details = err.details().expect("listener failures are kept");
    assert!(details.contains("veto"));
    assert!(details.contains("maintenance window"));
    assert!(delegate.is_empty().await);
}

#[tokio::test]
async fn test_failing_pre_listener_rejects_deregistration() {
    let delegate = Arc::new(InMemoryServiceRegistry::new());
    let registry = EventPublishingServiceRegistry::new(delegate.clone());
    registry.add_listener(FnListener::new("pin", |event: &RegistrationEvent| {
        if event.is_pre_deregistered() {
            Err(FlareError::event_rejected("instance is pinned"))
        } else {
            Ok(())
        }
    }));
    assert!(Arc::ptr_eq(
        registry.delegate(),
        &(delegate.clone() as Arc<dyn ServiceRegistry>)
    ));

    registry.register(&registration()).await.expect("register");
    let err = registry
        .deregister(&registration())
        .await
        .expect_err("pre-deregistration listener vetoed");

    assert!(err.is(ErrorCode::RegistrationRejected));
    assert_eq!(err.param("operation"), Some("deregister"));
    assert!(err.details().expect("details").contains("instance is pinned"));
    assert_eq!(delegate.len().await, 1);
}

#[tokio::test]
async fn test_failing_post_listener_does_not_undo_registration() {
    let delegate = Arc::new(InMemoryServiceRegistry::new());
    let registry = EventPublishingServiceRegistry::new(delegate.clone());
    registry.add_listener(FnListener::new("late-failure", |event: &RegistrationEvent| {
        if event.is_registered() {
            Err(FlareError::event_rejected("audit log unavailable"))
        } else {
            Ok(())
        }
    }));

    tokio_test::assert_ok!(registry.register(&registration()).await);
    assert_eq!(delegate.len().await, 1);
}

#[tokio::test]
async fn test_delegate_failure_skips_post_event() {
    let (registry, kinds) = publishing_registry(Arc::new(BrokenRegistry));

    let err = registry.register(&registration()).await.expect_err("delegate failed");
    assert!(err.is(ErrorCode::RegistrationFailed));

    let err = registry.deregister(&registration()).await.expect_err("delegate failed");
    assert!(err.is(ErrorCode::DeregistrationFailed));

    assert_eq!(
        *kinds.lock().unwrap(),
        vec![
            RegistrationEventType::PreRegistered,
            RegistrationEventType::PreDeregistered,
        ]
    );
}

#[tokio::test]
async fn test_in_memory_registry_updates_same_endpoint() {
    let registry = InMemoryServiceRegistry::new();

    registry.register(&registration()).await.expect("register");
    let updated = registration().with_metadata("version", "2");
    registry.register(&updated).await.expect("re-register");
    registry
        .register(&ServiceInstance::new("users", "10.0.0.9", 9090))
        .await
        .expect("register users");

    assert_eq!(registry.len().await, 2);
    assert_eq!(
        registry.get_instances("orders").await.expect("lookup"),
        vec![updated]
    );
    assert_eq!(
        registry.get_services().await.expect("services"),
        vec!["orders", "users"]
    );
}

#[tokio::test]
async fn test_in_memory_registry_rejects_unknown_deregistration() {
    let registry = InMemoryServiceRegistry::new();

    let err = tokio_test::assert_err!(registry.deregister(&registration()).await);
    assert!(err.is(ErrorCode::DeregistrationFailed));

    let err = registry
        .register(&ServiceInstance::new("", "10.0.0.1", 1))
        .await
        .expect_err("service id is required");
    assert!(err.is(ErrorCode::InvalidParameter));
}
