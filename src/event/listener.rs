//! 事件监听器与同步事件广播器

use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use crate::error::{FlareError, Result};

/// 事件监听器
pub trait EventListener<E>: Send + Sync {
    /// 监听器名称，用于日志与错误汇总
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// 处理事件
    fn on_event(&self, event: &E) -> Result<()>;
}

/// 以闭包实现的监听器
pub struct FnListener<F> {
    name: String,
    handler: F,
}

impl<F> FnListener<F> {
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<E, F> EventListener<E> for FnListener<F>
where
    F: Fn(&E) -> Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&self, event: &E) -> Result<()> {
        (self.handler)(event)
    }
}

/// 同步事件广播器
///
/// 在调用线程上按注册顺序依次调用监听器。某个监听器失败不会中断后续监听器，
/// 所有监听器返回后再把失败汇总为一个 `ListenerFailed` 错误。
/// 监听器 panic 不会被捕获。
pub struct EventMulticaster<E> {
    listeners: RwLock<Vec<Arc<dyn EventListener<E>>>>,
}

impl<E: 'static> EventMulticaster<E> {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// 注册监听器，注册顺序即调用顺序
    pub fn add_listener(&self, listener: Arc<dyn EventListener<E>>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// 当前监听器数量
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// 广播事件
    ///
    /// 调用前先对监听器列表做快照，监听器内部可以继续注册新的监听器，
    /// 新监听器从下一次广播开始生效。
    ///
    /// # 参数
    /// * `event` - 事件
    /// * `source` - 事件来源，用于日志与错误信息
    pub fn multicast(&self, event: &E, source: &str) -> Result<()> {
        let listeners: Vec<Arc<dyn EventListener<E>>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut failures = Vec::new();
        for listener in &listeners {
            match listener.on_event(event) {
                Ok(()) => {
                    debug!(listener = %listener.name(), source = %source, "Event delivered");
                }
                Err(e) => {
                    warn!(
                        listener = %listener.name(),
                        source = %source,
                        error = %e,
                        "Event listener failed, continuing with remaining listeners"
                    );
                    failures.push(format!("{}: {}", listener.name(), e));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(FlareError::listener_failed(source, &failures))
        }
    }
}

impl<E: 'static> Default for EventMulticaster<E> {
    fn default() -> Self {
        Self::new()
    }
}
