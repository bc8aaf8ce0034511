use crate::api::use_api;
use crate::auth::use_session;
use crate::components::icons::ShieldCheck;
use crate::components::notification::use_notifier;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use naviswork_shared::validate::{FormErrors, SignInDraft};

#[component]
pub fn SignInPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let notifier = use_notifier();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let field_errors = RwSignal::new(None::<FormErrors>);

    let field_error = move |field: &'static str| {
        field_errors.with(|errors| {
            errors
                .as_ref()
                .and_then(|e| e.message_for(field))
                .map(str::to_string)
        })
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = SignInDraft {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let request = match draft.validate() {
            Ok(request) => request,
            Err(errors) => {
                field_errors.set(Some(errors));
                notifier.error("Vui lòng điền đầy đủ thông tin.");
                return;
            }
        };

        field_errors.set(None);
        submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            match api.execute(&request).await {
                Ok(pair) => {
                    // 会话建立后由路由服务离开登录页
                    session.establish(&pair);
                    notifier.success("Đăng nhập thành công!");
                }
                Err(e) => {
                    error!("[SignIn] Đăng nhập thất bại: {}", e);
                    notifier.error(
                        "Đăng nhập thất bại. Vui lòng kiểm tra tên người dùng hoặc mật khẩu.",
                    );
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"NavisWork"</h1>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Tên người dùng (địa chỉ email)"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="off"
                                placeholder="Tên người dùng (địa chỉ email)"
                                on:input=move |ev| username.set(event_target_value(&ev))
                                prop:value=move || username.get()
                                class="input input-bordered input-lg"
                            />
                            {move || field_error("username").map(|msg| view! {
                                <span class="label-text-alt text-error mt-1">{msg}</span>
                            })}
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Mật khẩu"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="Mật khẩu"
                                on:input=move |ev| password.set(event_target_value(&ev))
                                prop:value=move || password.get()
                                class="input input-bordered input-lg"
                            />
                            {move || field_error("password").map(|msg| view! {
                                <span class="label-text-alt text-error mt-1">{msg}</span>
                            })}
                        </div>
                        <div class="text-right">
                            <a href="#" class="link link-hover text-sm">"Quên mật khẩu?"</a>
                        </div>
                        <div class="form-control mt-4">
                            <button type="submit" class="btn btn-primary btn-lg" disabled=move || submitting.get()>
                                {move || if submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Đăng Nhập" }.into_any()
                                } else {
                                    "Đăng Nhập".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
