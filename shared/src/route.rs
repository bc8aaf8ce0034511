//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 前端路由服务与 Worker 导航网关共用这里的路由表和守卫规则。

use std::fmt::Display;

use crate::{API_PREFIX, HOME_PATH, SIGN_IN_PATH};

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    SignIn,
    /// 项目列表 (默认路由，需要认证)
    #[default]
    Projects,
    /// 某项目的区域列表 (需要认证)
    ProjectAreas { project_id: String },
    /// 页面未找到
    NotFound,
}

/// 去掉查询串、片段和末尾的 `/`
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    }
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = normalize(path);
        if path == HOME_PATH {
            return Self::Projects;
        }
        if path == SIGN_IN_PATH {
            return Self::SignIn;
        }

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            [project_id, "area"] if !project_id.is_empty() => Self::ProjectAreas {
                project_id: project_id.to_string(),
            },
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::SignIn => SIGN_IN_PATH.to_string(),
            Self::Projects => HOME_PATH.to_string(),
            Self::ProjectAreas { project_id } => format!("/{}/area", project_id),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：除登录页外的所有页面都需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::SignIn)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::SignIn)
    }

    /// 登录页不使用应用外壳（顶栏）
    pub fn uses_shell(&self) -> bool {
        !matches!(self, Self::SignIn)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::SignIn
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Projects
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 导航网关 (Navigation Gate)
// =========================================================

/// 网关判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// 放行
    Pass,
    /// 重定向到指定路径
    Redirect(&'static str),
}

/// 静态资源目录
const ASSET_PREFIXES: [&str; 2] = ["/pkg/", "/assets/"];
/// Trunk 输出到根目录的打包产物扩展名
const BUNDLE_EXTENSIONS: [&str; 4] = ["js", "wasm", "css", "ico"];

/// 静态资源：资源目录下，或根目录下的打包产物（`.html` 等其它文件不在此列）
fn is_static_asset(path: &str) -> bool {
    if ASSET_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return true;
    }
    let Some(file) = path.strip_prefix('/').filter(|f| !f.contains('/')) else {
        return false;
    };
    file.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && BUNDLE_EXTENSIONS.contains(&ext))
}

/// 页面渲染前的导航判定
///
/// 只检查令牌是否存在，不校验有效性：过期但仍存在的令牌会被放行。
/// API 请求和静态资源不经过判定。
pub fn gate_navigation(path: &str, has_token: bool) -> GateDecision {
    let path = normalize(path);

    if path.starts_with(API_PREFIX) || is_static_asset(path) {
        return GateDecision::Pass;
    }

    if !has_token && path != SIGN_IN_PATH {
        return GateDecision::Redirect(SIGN_IN_PATH);
    }

    if has_token && path == SIGN_IN_PATH {
        return GateDecision::Redirect(HOME_PATH);
    }

    GateDecision::Pass
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Projects);
        assert_eq!(AppRoute::from_path(""), AppRoute::Projects);
        assert_eq!(AppRoute::from_path("/sign-in"), AppRoute::SignIn);
        assert_eq!(AppRoute::from_path("/sign-in/?next=1"), AppRoute::SignIn);
        assert_eq!(
            AppRoute::from_path("/3fa85f64/area"),
            AppRoute::ProjectAreas {
                project_id: "3fa85f64".into()
            }
        );
        assert_eq!(AppRoute::from_path("/3fa85f64"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/a/b/area"), AppRoute::NotFound);
    }

    #[test]
    fn test_route_round_trip() {
        let route = AppRoute::ProjectAreas {
            project_id: "p-1".into(),
        };
        assert_eq!(route.to_path(), "/p-1/area");
        assert_eq!(AppRoute::from_path(&route.to_path()), route);
        assert_eq!(AppRoute::from_path(&AppRoute::SignIn.to_path()), AppRoute::SignIn);
    }

    #[test]
    fn test_every_page_but_sign_in_requires_auth() {
        assert!(!AppRoute::SignIn.requires_auth());
        assert!(AppRoute::Projects.requires_auth());
        assert!(AppRoute::NotFound.requires_auth());
        assert!(AppRoute::SignIn.should_redirect_when_authenticated());
        assert!(!AppRoute::Projects.should_redirect_when_authenticated());
    }

    #[test]
    fn test_gate_redirects_anonymous_navigation() {
        for path in ["/", "/p-1/area", "/anything/else", "/settings?tab=2"] {
            assert_eq!(
                gate_navigation(path, false),
                GateDecision::Redirect("/sign-in"),
                "path {}",
                path
            );
        }
        assert_eq!(gate_navigation("/sign-in", false), GateDecision::Pass);
    }

    #[test]
    fn test_gate_only_exempts_bundle_assets() {
        for path in [
            "/pkg/naviswork-frontend_bg.wasm",
            "/assets/logo.svg",
            "/favicon.ico",
            "/naviswork-frontend-1a2b.js",
            "/naviswork-frontend-1a2b_bg.wasm",
            "/styles.css",
        ] {
            assert_eq!(gate_navigation(path, false), GateDecision::Pass, "path {}", path);
        }
        for path in [
            "/index.html",
            "/report.pdf",
            "/p-1/area.bak",
            "/foo.bar",
            "/p-1/app.js",
            "/.js",
        ] {
            assert_eq!(
                gate_navigation(path, false),
                GateDecision::Redirect("/sign-in"),
                "path {}",
                path
            );
        }
    }

    #[test]
    fn test_gate_sends_signed_in_users_home() {
        assert_eq!(gate_navigation("/sign-in", true), GateDecision::Redirect("/"));
        assert_eq!(gate_navigation("/sign-in/", true), GateDecision::Redirect("/"));
        assert_eq!(gate_navigation("/", true), GateDecision::Pass);
        assert_eq!(gate_navigation("/p-1/area", true), GateDecision::Pass);
    }

    #[test]
    fn test_gate_ignores_api_and_assets() {
        assert_eq!(gate_navigation("/api/v1/Auth/sign-in", false), GateDecision::Pass);
        assert_eq!(gate_navigation("/api/v1/Project/search", false), GateDecision::Pass);
        assert_eq!(gate_navigation("/favicon.ico", false), GateDecision::Pass);
        assert_eq!(gate_navigation("/assets/logo", false), GateDecision::Pass);
        assert_eq!(
            gate_navigation("/naviswork-frontend-1a2b_bg.wasm", false),
            GateDecision::Pass
        );
    }
}
