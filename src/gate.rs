//! 导航网关
//!
//! 页面渲染之前按 Cookie 中是否存在访问令牌决定放行或重定向。
//! 只检查存在性，令牌有效性由后端在 API 调用时判断。

use naviswork_shared::route::{GateDecision, gate_navigation};
use naviswork_shared::session::has_token_cookie;

pub struct NavigationGate {
    cookie_name: String,
}

impl NavigationGate {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    /// `cookie_header` 为请求的原始 `Cookie` 头
    pub fn decide(&self, path: &str, cookie_header: Option<&str>) -> GateDecision {
        gate_navigation(path, has_token_cookie(cookie_header, &self.cookie_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_requests_are_sent_to_sign_in() {
        let gate = NavigationGate::new("accessToken");
        assert_eq!(gate.decide("/", None), GateDecision::Redirect("/sign-in"));
        assert_eq!(
            gate.decide("/p-1/area", Some("theme=dark")),
            GateDecision::Redirect("/sign-in")
        );
        assert_eq!(
            gate.decide("/p-1/area", Some("accessToken=")),
            GateDecision::Redirect("/sign-in")
        );
        assert_eq!(gate.decide("/sign-in", None), GateDecision::Pass);
    }

    #[test]
    fn test_signed_in_requests() {
        let gate = NavigationGate::new("accessToken");
        let cookie = Some("lang=vi; accessToken=eyJ.x.y");
        assert_eq!(gate.decide("/sign-in", cookie), GateDecision::Redirect("/"));
        assert_eq!(gate.decide("/", cookie), GateDecision::Pass);
        assert_eq!(gate.decide("/p-1/area", cookie), GateDecision::Pass);
    }

    #[test]
    fn test_custom_cookie_name() {
        let gate = NavigationGate::new("session");
        assert_eq!(gate.decide("/", Some("session=abc")), GateDecision::Pass);
        assert_eq!(
            gate.decide("/", Some("accessToken=abc")),
            GateDecision::Redirect("/sign-in")
        );
    }

    #[test]
    fn test_api_and_assets_bypass_the_gate() {
        let gate = NavigationGate::new("accessToken");
        assert_eq!(gate.decide("/api/v1/Project/search", None), GateDecision::Pass);
        assert_eq!(gate.decide("/index-8f2c.js", None), GateDecision::Pass);
    }

    #[test]
    fn test_html_documents_are_gated() {
        let gate = NavigationGate::new("accessToken");
        assert_eq!(
            gate.decide("/index.html", None),
            GateDecision::Redirect("/sign-in")
        );
        assert_eq!(
            gate.decide("/index.html", Some("accessToken=abc")),
            GateDecision::Pass
        );
    }
}
