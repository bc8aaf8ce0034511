use std::fmt;

// =========================================================
// 网关错误 (Gate Errors)
// =========================================================

/// Worker 对外返回的错误
///
/// 每个变体对应一个 HTTP 状态码与机器可读的错误代码。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// 502: 未配置 BACKEND_ORIGIN
    BackendNotConfigured,
    /// 500: BACKEND_ORIGIN 不是 http(s) 地址
    InvalidBackendOrigin(String),
    /// 502: 后端不可达
    Upstream(String),
    /// 405: 不支持转发的方法
    UnsupportedMethod(String),
    /// 500: Worker 运行时错误（绑定缺失、请求体读取失败等）
    Runtime(String),
}

impl GateError {
    pub fn status_code(&self) -> u16 {
        match self {
            GateError::BackendNotConfigured | GateError::Upstream(_) => 502,
            GateError::UnsupportedMethod(_) => 405,
            GateError::InvalidBackendOrigin(_) | GateError::Runtime(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GateError::BackendNotConfigured => "BACKEND_NOT_CONFIGURED",
            GateError::InvalidBackendOrigin(_) => "INVALID_BACKEND_ORIGIN",
            GateError::Upstream(_) => "UPSTREAM_ERROR",
            GateError::UnsupportedMethod(_) => "METHOD_NOT_ALLOWED",
            GateError::Runtime(_) => "WORKER_RUNTIME_ERROR",
        }
    }
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::BackendNotConfigured => write!(f, "backend origin is not configured"),
            GateError::InvalidBackendOrigin(origin) => {
                write!(f, "invalid backend origin: {}", origin)
            }
            GateError::Upstream(msg) => write!(f, "backend unreachable: {}", msg),
            GateError::UnsupportedMethod(method) => {
                write!(f, "method {} cannot be forwarded", method)
            }
            GateError::Runtime(msg) => write!(f, "worker error: {}", msg),
        }
    }
}

impl std::error::Error for GateError {}

impl From<worker::Error> for GateError {
    fn from(e: worker::Error) -> Self {
        GateError::Runtime(e.to_string())
    }
}

pub type GateResult<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(GateError::BackendNotConfigured.status_code(), 502);
        assert_eq!(GateError::Upstream("timeout".into()).status_code(), 502);
        assert_eq!(GateError::UnsupportedMethod("TRACE".into()).status_code(), 405);
        assert_eq!(GateError::Runtime("x".into()).status_code(), 500);
        assert_eq!(
            GateError::InvalidBackendOrigin("ftp://x".into()).error_code(),
            "INVALID_BACKEND_ORIGIN"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            GateError::Upstream("connection refused".into()).to_string(),
            "backend unreachable: connection refused"
        );
    }
}
