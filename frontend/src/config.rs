//! 前端运行配置
//!
//! API 地址在编译期通过 `NAVISWORK_API_BASE` 注入，缺省为同源（由 Worker 转发 `/api`）。

use std::time::Duration;

pub use naviswork_shared::query::PAGE_SIZE_OPTIONS;

pub const API_BASE: &str = match option_env!("NAVISWORK_API_BASE") {
    Some(base) => base,
    None => "",
};

/// 搜索框输入防抖
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// 通知显示时长
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// 拼接 API 地址
pub fn api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        assert_eq!(api_url("", "/api/v1/Project/search"), "/api/v1/Project/search");
        assert_eq!(
            api_url("https://api.example.com/", "api/v1/Auth/sign-in"),
            "https://api.example.com/api/v1/Auth/sign-in"
        );
    }
}
