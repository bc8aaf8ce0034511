mod basic_info_form;
mod form_state;
mod project_meta_section;

use basic_info_form::BasicInfoForm;
use form_state::FormState;
use project_meta_section::ProjectMetaSection;

use crate::api::use_api;
use crate::components::icons::Settings;
use crate::components::modal::use_modal;
use crate::components::notification::use_notifier;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use naviswork_shared::Project;
use naviswork_shared::protocol::{CreateProject, UpdateProject};
use naviswork_shared::validate::FormMode;

/// 项目创建 / 编辑弹窗（含触发按钮）
///
/// 成功后关闭、重置表单并调用 `on_changed`；失败时保持打开。
#[component]
pub fn ProjectDialog(
    mode: FormMode,
    /// 编辑模式下的列表行
    #[prop(optional)]
    project: Option<Project>,
    #[prop(into)] on_changed: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let modal = use_modal();
    let state = FormState::new();
    let (saving, set_saving) = signal(false);
    let project = StoredValue::new(project);
    let is_edit = mode == FormMode::Edit;

    let open = move |_| {
        match project.get_value() {
            Some(p) if is_edit => state.fill(&p),
            _ => state.reset(),
        }
        modal.open();
    };

    let close = move || {
        modal.close();
        state.reset();
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Ok(fields) = state.to_fields(mode) else {
            return;
        };

        set_saving.set(true);
        let api = api.clone();
        let target_id = project.with_value(|p| p.as_ref().map(|p| p.id.clone()));
        spawn_local(async move {
            let result = match (mode, target_id) {
                (FormMode::Edit, Some(id)) => api.execute(&UpdateProject { id, fields }).await,
                _ => api.execute(&CreateProject(fields)).await,
            };
            set_saving.set(false);

            match result {
                Ok(_) => {
                    notifier.success(if is_edit {
                        "Project updated successfully"
                    } else {
                        "Project created successfully"
                    });
                    close();
                    on_changed.run(());
                }
                Err(e) => {
                    let action = if is_edit { "Update" } else { "Create" };
                    error!("[Project] {} project error: {}", action, e);
                    notifier.error(e.user_message(&format!("{} project failed", action)));
                }
            }
        });
    };

    view! {
        {if is_edit {
            view! {
                <button class="btn btn-ghost btn-sm btn-square" title="Edit Project" on:click=open>
                    <Settings attr:class="h-5 w-5" />
                </button>
            }
            .into_any()
        } else {
            view! {
                <button class="btn btn-primary" on:click=open>"+ Create Project"</button>
            }
            .into_any()
        }}

        <dialog class="modal" node_ref=modal.node on:close=move |_| modal.on_native_close()>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {if is_edit { "Edit Project" } else { "Create Project" }}
                </h3>

                <form on:submit=on_submit class="space-y-3 pt-4" novalidate>
                    <BasicInfoForm state=state mode=mode />

                    {move || {
                        project
                            .get_value()
                            .filter(|_| is_edit)
                            .map(|p| view! { <ProjectMetaSection project=p /> })
                    }}

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || saving.get().then(|| view! { <span class="loading loading-spinner"></span> })}
                            "OK"
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
