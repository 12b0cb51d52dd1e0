//! 错误代码定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 错误代码枚举
///
/// 错误代码按类别分组，每个类别占用1000个代码范围：
/// - 1000-1999: 服务发现相关错误
/// - 2000-2999: 服务注册相关错误
/// - 3000-3999: 事件分发相关错误
/// - 6000-6999: 配置相关错误
/// - 8000-8999: 序列化相关错误
/// - 9000-9999: 通用错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum ErrorCode {
    // ============================================================
    // 服务发现相关错误 (1000-1999)
    // ============================================================
    DiscoveryBackendFailed = 1000,
    DiscoveryBackendUnavailable = 1001,

    // ============================================================
    // 服务注册相关错误 (2000-2999)
    // ============================================================
    RegistrationFailed = 2000,
    DeregistrationFailed = 2001,
    RegistrationRejected = 2002,

    // ============================================================
    // 事件分发相关错误 (3000-3999)
    // ============================================================
    ListenerFailed = 3000,
    EventRejected = 3001,

    // ============================================================
    // 配置相关错误 (6000-6999)
    // ============================================================
    ConfigurationError = 6003,

    // ============================================================
    // 序列化相关错误 (8000-8999)
    // ============================================================
    DeserializationError = 8001,

    // ============================================================
    // 通用错误 (9000-9999)
    // ============================================================
    InvalidParameter = 9001,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorCode {
    /// 获取错误代码的英文标识符
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DiscoveryBackendFailed => "DISCOVERY_BACKEND_FAILED",
            ErrorCode::DiscoveryBackendUnavailable => "DISCOVERY_BACKEND_UNAVAILABLE",
            ErrorCode::RegistrationFailed => "REGISTRATION_FAILED",
            ErrorCode::DeregistrationFailed => "DEREGISTRATION_FAILED",
            ErrorCode::RegistrationRejected => "REGISTRATION_REJECTED",
            ErrorCode::ListenerFailed => "LISTENER_FAILED",
            ErrorCode::EventRejected => "EVENT_REJECTED",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::DeserializationError => "DESERIALIZATION_ERROR",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
        }
    }

    /// 判断是否为可重试的错误
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::DiscoveryBackendFailed | ErrorCode::DiscoveryBackendUnavailable
        )
    }
}
