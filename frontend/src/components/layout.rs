//! 应用外壳：顶部菜单 + 内容区
//!
//! 菜单中除"登出"外均为占位项。

use leptos::prelude::*;

use crate::auth::use_session;
use crate::components::icons::LogOut;
use crate::components::notification::use_notifier;
use crate::web::router::Link;

const PLACEHOLDER_ITEMS: [&str; 4] = ["Contact us", "Management", "Setting", "Language"];

#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();

    // 会话结束后由路由服务跳回登录页
    let on_logout = move |_| {
        session.end();
        notifier.success("Đăng xuất thành công!");
    };

    view! {
        <div class="min-h-screen flex flex-col bg-base-200">
            <header class="navbar bg-neutral text-neutral-content sticky top-0 z-10 px-6">
                <div class="flex-1 gap-2">
                    <Link to="/" class="btn btn-ghost text-lg">"NavisWork"</Link>
                    <ul class="menu menu-horizontal px-1">
                        <li><Link to="/">"Projects"</Link></li>
                        {PLACEHOLDER_ITEMS
                            .iter()
                            .map(|label| view! { <li><a>{*label}</a></li> })
                            .collect_view()}
                    </ul>
                </div>
                <div class="flex-none">
                    <button class="btn btn-ghost btn-square" title="Logout" on:click=on_logout>
                        <LogOut attr:class="h-5 w-5" />
                    </button>
                </div>
            </header>
            <main class="flex-1 p-4 md:px-6">
                <div class="bg-base-100 rounded-box shadow p-4 min-h-full">{children()}</div>
            </main>
        </div>
    }
}

/// 未匹配的路径
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-24">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <Link to="/" class="btn btn-link mt-2">"Back to projects"</Link>
            </div>
        </div>
    }
}
