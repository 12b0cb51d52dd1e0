//! 统一错误类型

use super::builder::ErrorBuilder;
use super::code::ErrorCode;
use std::collections::HashMap;
use thiserror::Error;

/// 统一错误类型
#[derive(Error, Debug, Clone)]
pub enum FlareError {
    /// 带错误代码的业务错误
    #[error("错误 [{code}] {reason}", code = .code.as_str())]
    Localized {
        code: ErrorCode,
        reason: String,
        details: Option<String>,
        params: Option<HashMap<String, String>>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl FlareError {
    /// 创建带错误代码的错误
    pub fn localized(code: ErrorCode, reason: impl Into<String>) -> Self {
        FlareError::Localized {
            code,
            reason: reason.into(),
            details: None,
            params: None,
            timestamp: chrono::Utc::now(),
        }
    }

    // ============================================================
    // 便捷方法：参数相关错误
    // ============================================================

    /// 创建非法参数错误
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::InvalidParameter, reason)
    }

    // ============================================================
    // 便捷方法：服务发现相关错误
    // ============================================================

    /// 所有发现后端在查询某个服务的实例时均失败
    ///
    /// `failures` 中每一项对应一个失败的后端，格式为 `"<后端描述>: <错误>"`
    pub fn discovery_backend_failed(service_id: impl Into<String>, failures: &[String]) -> Self {
        let service_id = service_id.into();
        ErrorBuilder::new(
            ErrorCode::DiscoveryBackendFailed,
            format!("all {} discovery backends failed for '{}'", failures.len(), service_id),
        )
        .details(failures.join("; "))
        .param("operation", "get_instances")
        .param("service_id", service_id)
        .param("failed_backends", failures.len().to_string())
        .build_error()
    }

    /// 所有发现后端在列举服务名时均失败
    pub fn discovery_services_failed(failures: &[String]) -> Self {
        ErrorBuilder::new(
            ErrorCode::DiscoveryBackendFailed,
            format!("all {} discovery backends failed to list services", failures.len()),
        )
        .details(failures.join("; "))
        .param("operation", "get_services")
        .param("failed_backends", failures.len().to_string())
        .build_error()
    }

    // ============================================================
    // 便捷方法：事件相关错误
    // ============================================================

    /// 监听器处理失败（汇总所有失败的监听器）
    pub fn listener_failed(event_source: impl Into<String>, failures: &[String]) -> Self {
        let event_source = event_source.into();
        ErrorBuilder::new(
            ErrorCode::ListenerFailed,
            format!("{} listener(s) failed while handling event of '{}'", failures.len(), event_source),
        )
        .details(failures.join("; "))
        .param("event_source", event_source)
        .param("failed_listeners", failures.len().to_string())
        .build_error()
    }

    /// 监听器拒绝处理事件
    pub fn event_rejected(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::EventRejected, reason)
    }

    // ============================================================
    // 便捷方法：服务注册相关错误
    // ============================================================

    /// 注册失败
    pub fn registration_failed(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::RegistrationFailed, reason)
    }

    /// 注销失败
    pub fn deregistration_failed(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::DeregistrationFailed, reason)
    }

    /// 注册被拒绝（注册前事件的监听器失败）
    ///
    /// 保留监听器错误的详情与参数，原因前缀为操作名
    pub fn registration_rejected(operation: &str, cause: &FlareError) -> Self {
        let mut builder = ErrorBuilder::new(
            ErrorCode::RegistrationRejected,
            format!("{} rejected: {}", operation, cause.reason()),
        )
        .param("operation", operation)
        .param("cause_code", cause.code().as_str());
        if let Some(details) = cause.details() {
            builder = builder.details(details);
        }
        if let Some(params) = cause.params() {
            for (key, value) in params {
                builder = builder.param(key.clone(), value.clone());
            }
        }
        builder.build_error()
    }

    // ============================================================
    // 信息获取方法
    // ============================================================

    /// 获取错误代码
    pub fn code(&self) -> ErrorCode {
        let FlareError::Localized { code, .. } = self;
        *code
    }

    /// 获取错误原因
    pub fn reason(&self) -> &str {
        let FlareError::Localized { reason, .. } = self;
        reason
    }

    /// 获取错误详情
    pub fn details(&self) -> Option<&str> {
        let FlareError::Localized { details, .. } = self;
        details.as_deref()
    }

    /// 获取全部错误参数
    pub fn params(&self) -> Option<&HashMap<String, String>> {
        let FlareError::Localized { params, .. } = self;
        params.as_ref()
    }

    /// 获取错误参数
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params().and_then(|p| p.get(key)).map(String::as_str)
    }

    /// 判断是否为指定错误代码
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code() == code
    }

    /// 判断是否为可重试的错误
    pub fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, FlareError>;
