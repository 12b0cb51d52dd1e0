//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 安装全局 fmt 订阅器
///
/// `RUST_LOG` 优先，未设置时使用 `default_filter`（如 `"info,flare_cloud_commons=debug"`）。
/// 已有全局订阅器时返回 `false`，可重复调用。
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
