//! 服务实例变更事件与分发器测试

use flare_cloud_commons::discovery::ServiceInstance;
use flare_cloud_commons::error::{ErrorCode, FlareError, Result};
use flare_cloud_commons::event::{ChangeEventDispatcher, EventListener, ServiceInstancesChangedEvent};
use std::sync::{Arc, Mutex};

/// 记录调用顺序的监听器
struct RecordingListener {
    name: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl EventListener<ServiceInstancesChangedEvent> for RecordingListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&self, event: &ServiceInstancesChangedEvent) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, event.service_name()));
        Ok(())
    }
}

fn recording(name: &str, calls: &Arc<Mutex<Vec<String>>>) -> RecordingListener {
    RecordingListener {
        name: name.to_string(),
        calls: calls.clone(),
    }
}

fn instance_a() -> ServiceInstance {
    ServiceInstance::new("orders", "10.0.0.1", 8080)
}

#[test]
fn test_event_exposes_constructor_arguments() {
    let instances = vec![
        instance_a(),
        ServiceInstance::new("orders", "10.0.0.2", 8080).with_instance_id("orders-2"),
    ];

    let event = ServiceInstancesChangedEvent::new("orders", instances.clone()).unwrap();

    assert_eq!(event.service_name(), "orders");
    assert_eq!(event.service_instances(), instances.as_slice());

    // 取出的副本与事件内部状态无关
    let mut copy = event.service_instances().to_vec();
    copy.clear();
    assert_eq!(event.service_instances().len(), 2);
}

#[test]
fn test_event_rejects_empty_instances() {
    let err = ServiceInstancesChangedEvent::new("orders", Vec::new()).unwrap_err();

    assert!(err.is(ErrorCode::InvalidParameter));
    assert!(!err.is_retryable());
    assert_eq!(err.reason(), "The arguments 'serviceInstances' must not be empty!");
}

#[test]
fn test_event_rejects_empty_service_name() {
    let err = ServiceInstancesChangedEvent::new("", vec![instance_a()]).unwrap_err();
    assert!(err.is(ErrorCode::InvalidParameter));
    assert_eq!(err.reason(), "The argument 'serviceName' must not be empty!");

    let event = ServiceInstancesChangedEvent::new("  ", vec![instance_a()])
        .expect("only an empty name is rejected");
    assert_eq!(event.service_name(), "  ");
}

#[test]
fn test_processed_is_a_one_way_latch() {
    let event = ServiceInstancesChangedEvent::new("orders", vec![instance_a()]).unwrap();
    assert!(!event.is_processed());
    assert!(!event.is_processed(), "reading does not change state");

    event.processed();
    assert!(event.is_processed());

    event.processed();
    event.processed();
    assert!(event.is_processed());
}

#[test]
fn test_publish_delivers_in_registration_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = ChangeEventDispatcher::new();
    dispatcher.register(recording("L1", &calls));
    dispatcher.register(recording("L2", &calls));
    dispatcher.register(recording("L3", &calls));
    assert_eq!(dispatcher.listener_count(), 3);

    dispatcher.publish("orders", vec![instance_a()]).unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec!["L1:orders", "L2:orders", "L3:orders"]
    );
}

#[test]
fn test_publish_orders_scenario() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = ChangeEventDispatcher::new();

    let sink = received.clone();
    dispatcher.register_fn("inspector", move |event| {
        sink.lock().unwrap().push((
            event.service_name().to_string(),
            event.service_instances().to_vec(),
            event.is_processed(),
        ));
        Ok(())
    });

    let event = dispatcher.publish("orders", vec![instance_a()]).unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "orders");
    assert_eq!(received[0].1, vec![instance_a()]);
    assert!(!received[0].2);
    assert!(!event.is_processed(), "not processed until a listener marks it");

    event.processed();
    assert!(event.is_processed());
}

#[test]
fn test_listener_can_mark_event_processed() {
    let dispatcher = ChangeEventDispatcher::new();
    dispatcher.register_fn("marker", |event| {
        event.processed();
        Ok(())
    });

    let seen_processed = Arc::new(Mutex::new(None));
    let sink = seen_processed.clone();
    dispatcher.register_fn("observer", move |event| {
        *sink.lock().unwrap() = Some(event.is_processed());
        Ok(())
    });

    let event = dispatcher.publish("orders", vec![instance_a()]).unwrap();
    assert!(event.is_processed());
    assert_eq!(*seen_processed.lock().unwrap(), Some(true));
}

#[test]
fn test_publish_rejects_empty_instances_without_notifying() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = ChangeEventDispatcher::new();
    dispatcher.register(recording("L1", &calls));

    let err = dispatcher.publish("orders", Vec::new()).unwrap_err();

    assert!(err.is(ErrorCode::InvalidParameter));
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_failing_listener_does_not_stop_delivery() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = ChangeEventDispatcher::new();
    dispatcher.register(recording("L1", &calls));
    dispatcher.register_fn("broken", |_event| {
        Err(FlareError::event_rejected("cannot refresh load balancer"))
    });
    dispatcher.register(recording("L3", &calls));

    let err = dispatcher.publish("orders", vec![instance_a()]).unwrap_err();

    assert_eq!(*calls.lock().unwrap(), vec!["L1:orders", "L3:orders"]);
    assert!(err.is(ErrorCode::ListenerFailed));
    assert_eq!(err.param("failed_listeners"), Some("1"));
    assert_eq!(err.param("event_source"), Some("orders"));
    assert!(err.details().unwrap().contains("broken"));
    assert!(err.details().unwrap().contains("cannot refresh load balancer"));
}

#[test]
fn test_listener_registered_during_dispatch_applies_to_next_publish() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = Arc::new(ChangeEventDispatcher::new());

    let inner_dispatcher = dispatcher.clone();
    let inner_calls = calls.clone();
    let registered = Arc::new(Mutex::new(false));
    dispatcher.register_fn("registrar", move |_event| {
        let mut registered = registered.lock().unwrap();
        if !*registered {
            inner_dispatcher.register(recording("late", &inner_calls));
            *registered = true;
        }
        Ok(())
    });

    dispatcher.publish("orders", vec![instance_a()]).unwrap();
    assert!(calls.lock().unwrap().is_empty());

    dispatcher.publish("users", vec![instance_a()]).unwrap();
    assert_eq!(*calls.lock().unwrap(), vec!["late:users"]);
}

#[test]
fn test_publish_prebuilt_event() {
    let dispatcher = ChangeEventDispatcher::new();
    let event = ServiceInstancesChangedEvent::new("orders", vec![instance_a()]).unwrap();
    let event_id = event.event_id();

    let delivered = dispatcher.publish_event(event).unwrap();
    assert_eq!(delivered.event_id(), event_id);
}
