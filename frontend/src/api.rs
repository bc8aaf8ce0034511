//! 后端 API 客户端
//!
//! 每个端点在 `naviswork_shared::protocol` 中以 `ApiRequest` 描述，
//! 这里只负责传输：附加 Bearer 令牌、编码请求体、解析响应信封。
//! 任何 401 响应都会清除会话。

use std::fmt;

use gloo_net::http::{Request, RequestBuilder};
use leptos::logging::error;
use leptos::prelude::*;
use naviswork_shared::error::SchemaError;
use naviswork_shared::protocol::{ApiEnvelope, ApiRequest, HttpMethod, RequestBody, decode_envelope};
use serde_json::Value;

use crate::auth::SessionContext;
use crate::config::{API_BASE, api_url};

// =========================================================
// 错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 请求构建失败（请求体编码、FormData 等）
    Build(String),
    /// 网络请求失败
    Network(String),
    /// 令牌缺失或失效
    Unauthorized,
    /// 非 2xx 响应
    Status { status: u16, message: Option<String> },
    /// 响应与约定结构不符
    Decode(String),
    /// 后端返回 `success: false`
    Rejected(Option<String>),
}

impl ApiError {
    /// 面向用户的提示：优先使用后端返回的消息
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(msg), ..
            }
            | ApiError::Rejected(Some(msg)) => msg.clone(),
            ApiError::Unauthorized => "Phiên đăng nhập đã hết hạn".to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Build(msg) => write!(f, "请求构建失败: {}", msg),
            ApiError::Network(msg) => write!(f, "网络错误: {}", msg),
            ApiError::Unauthorized => write!(f, "未授权 (401)"),
            ApiError::Status { status, message } => match message {
                Some(msg) => write!(f, "HTTP {}: {}", status, msg),
                None => write!(f, "HTTP {}", status),
            },
            ApiError::Decode(msg) => write!(f, "响应解析失败: {}", msg),
            ApiError::Rejected(Some(msg)) => write!(f, "请求被拒绝: {}", msg),
            ApiError::Rejected(None) => write!(f, "请求被拒绝"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<SchemaError> for ApiError {
    fn from(e: SchemaError) -> Self {
        match e {
            SchemaError::Rejected(msg) => ApiError::Rejected(msg),
            other => ApiError::Decode(other.to_string()),
        }
    }
}

/// 非 2xx 响应体里尽量取出 `message`
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiEnvelope<Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|msg| !msg.is_empty())
}

/// 按状态码与响应体得出结果
pub fn interpret<T: serde::de::DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    match status {
        401 => Err(ApiError::Unauthorized),
        200..=299 => Ok(decode_envelope(body)?),
        _ => Err(ApiError::Status {
            status,
            message: error_message(body),
        }),
    }
}

// =========================================================
// 客户端
// =========================================================

#[derive(Clone)]
pub struct ConsoleApi {
    base_url: String,
    session: SessionContext,
}

impl ConsoleApi {
    pub fn new(base_url: &str, session: SessionContext) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn builder(&self, method: HttpMethod, path: &str) -> RequestBuilder {
        let url = api_url(&self.base_url, path);
        let builder = match method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    fn form_data(fields: &[(String, String)]) -> Result<web_sys::FormData, ApiError> {
        let form = web_sys::FormData::new().map_err(|e| ApiError::Build(format!("{:?}", e)))?;
        for (name, value) in fields {
            form.append_with_str(name, value)
                .map_err(|e| ApiError::Build(format!("{:?}", e)))?;
        }
        Ok(form)
    }

    /// 发送请求并返回信封中的 `result`
    pub async fn execute<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let path = req.path();
        let builder = self.builder(R::METHOD, &path);

        let request = match req.body().map_err(|e| ApiError::Build(e.to_string()))? {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(raw) => builder.header("Content-Type", "application/json").body(raw),
            // 浏览器自行设置 multipart 边界
            RequestBody::Multipart(fields) => builder.body(Self::form_data(&fields)?),
        }
        .map_err(|e| ApiError::Build(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let result = interpret(status, &body);
        if let Err(e) = &result {
            error!("[Api] {} {} failed: {}", R::METHOD.as_str(), path, e);
            if *e == ApiError::Unauthorized {
                self.session.expire();
            }
        }
        result
    }
}

/// 在 App 根部提供 API 客户端
pub fn provide_api(session: SessionContext) {
    provide_context(ConsoleApi::new(API_BASE, session));
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> ConsoleApi {
    use_context::<ConsoleApi>().expect("ConsoleApi should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use naviswork_shared::TokenPair;
    use naviswork_shared::protocol::Ack;

    #[test]
    fn test_success_unwraps_result() {
        let pair: TokenPair =
            interpret(200, r#"{"success":true,"result":{"accessToken":"a","refreshToken":"r"}}"#)
                .unwrap();
        assert_eq!(pair.access_token, "a");
    }

    #[test]
    fn test_unauthorized() {
        assert_eq!(interpret::<Ack>(401, "").unwrap_err(), ApiError::Unauthorized);
    }

    #[test]
    fn test_status_error_keeps_backend_message() {
        let err = interpret::<Ack>(400, r#"{"success":false,"message":"Name already exists"}"#)
            .unwrap_err();
        assert_eq!(err.user_message("Delete failed!"), "Name already exists");

        let err = interpret::<Ack>(502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 502,
                message: None
            }
        );
        assert_eq!(err.user_message("Delete failed!"), "Delete failed!");
    }

    #[test]
    fn test_rejection_and_decode_errors() {
        let err = interpret::<Ack>(200, r#"{"success":false,"message":"Invalid"}"#).unwrap_err();
        assert_eq!(err, ApiError::Rejected(Some("Invalid".into())));

        let err = interpret::<TokenPair>(200, r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
