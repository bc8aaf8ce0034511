//! 路由守卫组件
//!
//! 状态未知时不渲染任何内容；判定为跳转时交给路由服务重定向。
//! 与路由服务共用 `naviswork_shared::session::Guard` 的判定。

use leptos::prelude::*;
use naviswork_shared::session::{Guard, GuardOutcome};

use crate::auth::use_session;
use crate::web::router::use_router;

#[component]
pub fn RouteGuard(guard: Guard, children: ChildrenFn) -> impl IntoView {
    let session = use_session().status_signal();
    let router = use_router();

    // 会话在当前页面上失效时立即离开
    Effect::new(move |_| {
        if let GuardOutcome::Redirect(target) = guard.evaluate(session.get()) {
            router.redirect(target);
        }
    });

    move || match guard.evaluate(session.get()) {
        GuardOutcome::Render => Some(children()),
        GuardOutcome::Pending | GuardOutcome::Redirect(_) => None,
    }
}
