//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："监听 -> 守卫 -> 处理 -> 加载"。守卫规则来自
//! `naviswork_shared::session::Guard`，会话状态以信号注入。

use leptos::logging::log;
use leptos::prelude::*;
use naviswork_shared::route::AppRoute;
use naviswork_shared::session::{Guard, GuardOutcome, SessionStatus};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(path: &str, use_push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let _ = if use_push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新，会话状态由外部注入。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<SessionStatus>,
}

impl RouterService {
    fn new(session: Signal<SessionStatus>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// 重定向（替换当前历史记录）
    pub fn redirect(&self, route: AppRoute) {
        self.navigate_to_route(route, false);
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let status = self.session.get_untracked();
        let route = match Guard::for_route(&target).evaluate(status) {
            GuardOutcome::Redirect(redirect) => {
                log!("[Router] {} denied ({:?}), redirecting to {}", target, status, redirect);
                redirect
            }
            // 状态未知时先记录目标路由，由 RouteGuard 暂不渲染
            GuardOutcome::Pending | GuardOutcome::Render => target,
        };

        write_history(&route.to_path(), use_push);
        self.set_route.set(route);
    }

    /// 浏览器后退/前进时同样执行守卫
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.navigate_to_route(AppRoute::from_path(&current_path()), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话状态变化（登录 / 登出 / 令牌失效）时重新评估当前路由
    fn setup_session_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            let status = router.session.get();
            let route = router.current_route.get_untracked();
            if let GuardOutcome::Redirect(redirect) = Guard::for_route(&route).evaluate(status) {
                log!("[Router] session is {:?}, leaving {} for {}", status, route, redirect);
                write_history(&redirect.to_path(), true);
                router.set_route.set(redirect);
            }
        });
    }
}

fn provide_router(session: Signal<SessionStatus>) -> RouterService {
    let router = RouterService::new(session);
    router.init_popstate_listener();
    router.setup_session_redirect();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<SessionStatus>,
    children: Children,
) -> impl IntoView {
    provide_router(session);
    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接：阻止整页跳转，交给路由服务
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
