//! 会话状态与守卫规则
//!
//! - `SessionStatus`: 三态（未知 / 已授权 / 未授权），未知时守卫不渲染任何内容
//! - `Guard`: 受保护路由与公开路由两种守卫变体
//! - Cookie 读写的纯字符串工具（前端与 Worker 共用）

use crate::route::AppRoute;

/// 会话三态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// 尚未检查（启动中）
    #[default]
    Unknown,
    Authorized,
    Unauthorized,
}

impl SessionStatus {
    /// 只看令牌是否存在，不校验有效性
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.is_empty() => SessionStatus::Authorized,
            _ => SessionStatus::Unauthorized,
        }
    }
}

/// 路由守卫变体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// 需要登录：未授权时跳转登录页
    Protected,
    /// 仅限未登录：已授权时跳转首页
    Public,
}

/// 守卫判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// 状态未知，不渲染
    Pending,
    Render,
    Redirect(AppRoute),
}

impl Guard {
    pub fn evaluate(self, status: SessionStatus) -> GuardOutcome {
        match (self, status) {
            (_, SessionStatus::Unknown) => GuardOutcome::Pending,
            (Guard::Protected, SessionStatus::Unauthorized) => {
                GuardOutcome::Redirect(AppRoute::auth_failure_redirect())
            }
            (Guard::Public, SessionStatus::Authorized) => {
                GuardOutcome::Redirect(AppRoute::auth_success_redirect())
            }
            _ => GuardOutcome::Render,
        }
    }

    /// 路由对应的守卫
    pub fn for_route(route: &AppRoute) -> Self {
        if route.requires_auth() {
            Guard::Protected
        } else {
            Guard::Public
        }
    }
}

// =========================================================
// Cookie 工具
// =========================================================

/// 从 `Cookie` 头（或 `document.cookie`）中取出指定名称的值
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

/// Cookie 中是否存在非空令牌
pub fn has_token_cookie(header: Option<&str>, name: &str) -> bool {
    header
        .and_then(|h| cookie_value(h, name))
        .is_some_and(|v| !v.is_empty())
}

/// 构造令牌 Cookie
pub fn token_cookie(name: &str, token: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name, token, max_age_secs
    )
}

/// 构造立即过期的 Cookie（用于登出）
pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; Max-Age=0; SameSite=Lax", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_token() {
        assert_eq!(SessionStatus::from_token(Some("jwt")), SessionStatus::Authorized);
        assert_eq!(SessionStatus::from_token(Some("")), SessionStatus::Unauthorized);
        assert_eq!(SessionStatus::from_token(None), SessionStatus::Unauthorized);
    }

    #[test]
    fn test_guards_render_nothing_while_unknown() {
        assert_eq!(
            Guard::Protected.evaluate(SessionStatus::Unknown),
            GuardOutcome::Pending
        );
        assert_eq!(
            Guard::Public.evaluate(SessionStatus::Unknown),
            GuardOutcome::Pending
        );
    }

    #[test]
    fn test_protected_guard() {
        assert_eq!(
            Guard::Protected.evaluate(SessionStatus::Unauthorized),
            GuardOutcome::Redirect(AppRoute::SignIn)
        );
        assert_eq!(
            Guard::Protected.evaluate(SessionStatus::Authorized),
            GuardOutcome::Render
        );
    }

    #[test]
    fn test_public_guard() {
        assert_eq!(
            Guard::Public.evaluate(SessionStatus::Authorized),
            GuardOutcome::Redirect(AppRoute::Projects)
        );
        assert_eq!(
            Guard::Public.evaluate(SessionStatus::Unauthorized),
            GuardOutcome::Render
        );
        assert_eq!(Guard::for_route(&AppRoute::SignIn), Guard::Public);
        assert_eq!(Guard::for_route(&AppRoute::NotFound), Guard::Protected);
    }

    #[test]
    fn test_cookie_lookup() {
        let header = "theme=dark; accessToken=eyJ.abc.def ; lang=vi";
        assert_eq!(cookie_value(header, "accessToken"), Some("eyJ.abc.def"));
        assert_eq!(cookie_value(header, "lang"), Some("vi"));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("", "accessToken"), None);

        assert!(has_token_cookie(Some(header), "accessToken"));
        assert!(!has_token_cookie(Some("accessToken="), "accessToken"));
        assert!(!has_token_cookie(None, "accessToken"));
    }

    #[test]
    fn test_cookie_formatting() {
        assert_eq!(
            token_cookie("accessToken", "t", 86400),
            "accessToken=t; Path=/; Max-Age=86400; SameSite=Lax"
        );
        let expired = expired_cookie("accessToken");
        assert!(expired.starts_with("accessToken=;"));
        assert!(expired.contains("Max-Age=0"));
    }
}
