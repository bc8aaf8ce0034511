//! 区域创建 / 编辑弹窗
//!
//! 打开时先拉取工种选项并等待完成，再把编辑对象的 `typeOfWork` 反查为 stageName
//! 预选，预选因此不会和选项加载竞争。

use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use naviswork_shared::protocol::{ListWorkTypes, UpdateArea};
use naviswork_shared::validate::{FormErrors, FormMode, STAGE_FIELD, area_payload, stage_for_work_type};
use naviswork_shared::{FilterOption, ProjectArea};

use crate::api::use_api;
use crate::components::icons::Pencil;
use crate::components::modal::use_modal;
use crate::components::notification::use_notifier;

#[component]
pub fn AreaDialog(
    mode: FormMode,
    #[prop(into)] project_id: String,
    /// 编辑模式下的列表行
    #[prop(optional)]
    area: Option<ProjectArea>,
    #[prop(into)] on_changed: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let modal = use_modal();
    let is_edit = mode == FormMode::Edit;

    let options = RwSignal::new(Vec::<FilterOption>::new());
    let loading_options = RwSignal::new(false);
    let selected = RwSignal::new(None::<String>);
    let errors = RwSignal::new(None::<FormErrors>);
    let saving = RwSignal::new(false);
    let area = StoredValue::new(area);
    let project_id = StoredValue::new(project_id);

    let open = {
        let api = api.clone();
        move |_| {
            selected.set(None);
            errors.set(None);
            modal.open();

            let api = api.clone();
            let needs_options = options.with_untracked(|o| o.is_empty());
            let type_of_work = area.with_value(|a| a.as_ref().and_then(|a| a.type_of_work.clone()));
            spawn_local(async move {
                if needs_options {
                    loading_options.set(true);
                    match api.execute(&ListWorkTypes).await {
                        Ok(page) => options.set(page.items),
                        Err(e) => {
                            error!("[Area] getFilters error: {}", e);
                            notifier.error("Failed to load setting list");
                        }
                    }
                    loading_options.set(false);
                }

                // 选项就绪后再预选
                if let Some(type_of_work) = type_of_work {
                    let stage = options
                        .with_untracked(|o| stage_for_work_type(o, &type_of_work).map(str::to_string));
                    selected.set(stage);
                }
            });
        }
    };

    let close = move || {
        modal.close();
        selected.set(None);
        errors.set(None);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = options.with_untracked(|o| {
            area_payload(
                o,
                selected.get_untracked().as_deref(),
                &project_id.get_value(),
            )
        });
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                notifier.error(e.to_string());
                errors.set(Some(e));
                return;
            }
        };

        errors.set(None);
        saving.set(true);
        let api = api.clone();
        let area_id = area.with_value(|a| a.as_ref().map(|a| a.id.clone()));
        spawn_local(async move {
            let result = match (mode, area_id) {
                (FormMode::Edit, Some(id)) => api.execute(&UpdateArea { id, payload }).await,
                _ => api.execute(&payload).await,
            };
            saving.set(false);

            match result {
                Ok(_) => {
                    notifier.success(if is_edit {
                        "Area updated successfully"
                    } else {
                        "Area added successfully"
                    });
                    close();
                    on_changed.run(());
                }
                Err(e) => {
                    error!("[Area] save failed: {}", e);
                    notifier.error(if is_edit {
                        "Failed to update area"
                    } else {
                        "Failed to add area"
                    });
                }
            }
        });
    };

    let stage_error = move || {
        errors.with(|e| {
            e.as_ref()
                .and_then(|e| e.message_for(STAGE_FIELD))
                .map(str::to_string)
        })
    };

    view! {
        {if is_edit {
            view! {
                <button class="btn btn-ghost btn-sm btn-square" title="Edit area" on:click=open>
                    <Pencil attr:class="h-4 w-4" />
                </button>
            }
            .into_any()
        } else {
            view! {
                <button class="btn btn-primary" on:click=open>"+ Add area"</button>
            }
            .into_any()
        }}

        <dialog class="modal" node_ref=modal.node on:close=move |_| modal.on_native_close()>
            <div class="modal-box">
                <h3 class="font-bold text-lg text-error">
                    {if is_edit { "Edit area" } else { "Add new area" }}
                </h3>
                <div class="divider my-2"></div>

                <form on:submit=on_submit class="space-y-3" novalidate>
                    <div class="form-control">
                        <label class="label" for="stage">
                            <span class="label-text">
                                <span class="text-error">"* "</span>
                                "Setting construction:"
                            </span>
                        </label>
                        <select
                            id="stage"
                            class="select select-bordered w-full"
                            disabled=move || loading_options.get()
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                selected.set((!value.is_empty()).then_some(value));
                            }
                        >
                            <option value="" disabled selected=move || selected.get().is_none()>
                                "Please select setting construction"
                            </option>
                            <For
                                each=move || options.get()
                                key=|o| o.stage_name.clone()
                                children=move |option| {
                                    let stage = option.stage_name.clone();
                                    view! {
                                        <option
                                            value=option.stage_name.clone()
                                            selected=move || selected.get().as_deref() == Some(stage.as_str())
                                        >
                                            {option.name.clone()}
                                        </option>
                                    }
                                }
                            />
                        </select>
                        {move || stage_error().map(|msg| view! {
                            <span class="label-text-alt text-error mt-1">{msg}</span>
                        })}
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || saving.get().then(|| view! { <span class="loading loading-spinner"></span> })}
                            {if is_edit { "Save area" } else { "Add area" }}
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
