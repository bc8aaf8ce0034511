use std::fmt;

/// 边界解码错误
///
/// 后端返回的数据（响应包、设置 JSON 串）与约定的结构不一致时返回，
/// 替代原先静默的形状不匹配。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// JSON 语法或结构错误
    Malformed(String),
    /// 后端明确拒绝（`success: false`）
    Rejected(Option<String>),
    /// 缺少必需的 `result` 字段
    MissingResult,
    /// 设置串不是 JSON 对象
    NotAnObject,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Malformed(msg) => write!(f, "malformed payload: {}", msg),
            SchemaError::Rejected(Some(msg)) => write!(f, "rejected by server: {}", msg),
            SchemaError::Rejected(None) => write!(f, "rejected by server"),
            SchemaError::MissingResult => write!(f, "response has no result"),
            SchemaError::NotAnObject => write!(f, "setting is not a JSON object"),
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Malformed(e.to_string())
    }
}

pub type SchemaResult<T> = std::result::Result<T, SchemaError>;
