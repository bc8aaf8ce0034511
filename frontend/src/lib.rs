//! NavisWork 管理控制台前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `naviswork_shared::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话生命周期
//! - `api`: 后端 API 客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod components {
    mod area_dialog;
    pub mod areas;
    mod data_table;
    pub mod guard;
    mod icons;
    pub mod layout;
    mod list_state;
    pub mod login;
    mod modal;
    pub mod notification;
    mod project_dialog;
    pub mod projects;
    mod setting_dialog;
}
mod web;

use crate::api::provide_api;
use crate::auth::{SessionContext, init_session};
use crate::components::areas::ProjectAreasPage;
use crate::components::guard::RouteGuard;
use crate::components::layout::{NotFoundPage, Shell};
use crate::components::login::SignInPage;
use crate::components::notification::{Toast, provide_notifier};
use crate::components::projects::ProjectsPage;

use leptos::prelude::*;
use naviswork_shared::route::AppRoute;
use naviswork_shared::session::Guard;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件，登录页之外的页面都套上应用外壳。
fn route_matcher(route: AppRoute) -> AnyView {
    let guard = Guard::for_route(&route);
    if !route.uses_shell() {
        return view! {
            <RouteGuard guard=guard>
                <SignInPage />
            </RouteGuard>
        }
        .into_any();
    }

    view! {
        <RouteGuard guard=guard>
            <Shell clone:route>
                {match route.clone() {
                    AppRoute::ProjectAreas { project_id } => {
                        view! { <ProjectAreasPage project_id=project_id /> }.into_any()
                    }
                    AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
                    AppRoute::Projects | AppRoute::SignIn => view! { <ProjectsPage /> }.into_any(),
                }}
            </Shell>
        </RouteGuard>
    }
    .into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let session = SessionContext::new();
    provide_context(session);

    // 2. 从 Cookie（或旧版 LocalStorage）载入令牌
    init_session(&session);

    // 3. 通知与 API 客户端
    provide_notifier();
    provide_api(session);

    view! {
        // 4. 路由器组件：注入会话状态信号实现守卫
        <Router session=session.status_signal()>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <Toast />
    }
}
