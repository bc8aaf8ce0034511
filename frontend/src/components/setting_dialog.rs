//! 现场初期设定弹窗
//!
//! 打开时读取区域设置；保存时把可见列和基准值合并回原文档（未知字段原样保留）
//! 再整体写回。

mod basis_table;
mod column_picker;

use basis_table::BasisTable;
use column_picker::ColumnPicker;

use leptos::logging::{error, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use naviswork_shared::catalog::{ColumnSelection, SettingDocument};
use naviswork_shared::protocol::{GetAreaSetting, SaveAreaSetting};
use naviswork_shared::query::LoadState;

use crate::api::use_api;
use crate::components::icons::Settings;
use crate::components::modal::use_modal;
use crate::components::notification::use_notifier;

const TABS: [&str; 3] = ["基準値", "施工結果表", "固化材"];

#[component]
pub fn SettingDialog(#[prop(into)] area_id: String) -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let modal = use_modal();
    let area_id = StoredValue::new(area_id);

    let document = RwSignal::new(SettingDocument::default());
    let selection = RwSignal::new(ColumnSelection::default());
    let active_tab = RwSignal::new(0usize);
    let load_state = RwSignal::new(LoadState::Idle);
    let saving = RwSignal::new(false);

    let open = {
        let api = api.clone();
        move |_| {
            document.set(SettingDocument::default());
            selection.set(ColumnSelection::default());
            active_tab.set(0);
            modal.open();

            let api = api.clone();
            let request = GetAreaSetting {
                area_id: area_id.get_value(),
            };
            load_state.set(LoadState::Loading);
            spawn_local(async move {
                match api.execute(&request).await {
                    Ok(setting) => {
                        let raw = setting.and_then(|s| s.setting).unwrap_or_default();
                        match SettingDocument::parse(&raw) {
                            Ok(doc) => {
                                selection.set(doc.selection());
                                document.set(doc);
                            }
                            Err(e) => {
                                warn!("[Setting] {}, falling back to defaults", e);
                                notifier.error(format!("Dữ liệu setting không hợp lệ: {}", e));
                            }
                        }
                        load_state.set(LoadState::Loaded);
                    }
                    Err(e) => {
                        // 未读到原文档时禁止保存，避免覆盖服务端设置
                        error!("[Setting] load failed: {}", e);
                        notifier.error("Không thể lấy dữ liệu setting");
                        load_state.set(LoadState::Failed);
                    }
                }
            });
        }
    };

    let on_save = move |_| {
        if !load_state.get_untracked().can_write_back() {
            return;
        }
        let mut doc = document.get_untracked();
        selection.with_untracked(|s| doc.set_selection(s));
        let request = SaveAreaSetting {
            project_area_id: area_id.get_value(),
            json: doc.to_json_string(),
        };

        saving.set(true);
        let api = api.clone();
        spawn_local(async move {
            match api.execute(&request).await {
                Ok(_) => {
                    document.set(doc);
                    notifier.success("Lưu thành công!");
                    modal.close();
                }
                Err(e) => {
                    error!("[Setting] save failed: {}", e);
                    notifier.error("Lưu thất bại!");
                }
            }
            saving.set(false);
        });
    };

    view! {
        <button class="btn btn-ghost btn-sm btn-square" title="現場初期設定" on:click=open>
            <Settings attr:class="h-4 w-4" />
        </button>

        <dialog class="modal" node_ref=modal.node on:close=move |_| modal.on_native_close()>
            <div class="modal-box w-11/12 max-w-none">
                <h3 class="font-bold text-lg">"現場初期設定"</h3>

                <div role="tablist" class="tabs tabs-bordered my-4">
                    {TABS
                        .iter()
                        .enumerate()
                        .map(|(index, title)| view! {
                            <a
                                role="tab"
                                class=move || if active_tab.get() == index { "tab tab-active" } else { "tab" }
                                on:click=move |_| active_tab.set(index)
                            >
                                {*title}
                            </a>
                        })
                        .collect_view()}
                </div>

                <Show
                    when=move || !load_state.get().is_loading()
                    fallback=|| view! {
                        <div class="flex justify-center py-8">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    // 施工結果表 / 固化材 暂无内容
                    <Show when=move || active_tab.get() == 0>
                        <ColumnPicker selection=selection />
                        <BasisTable selection=selection document=document />
                    </Show>
                </Show>

                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| modal.close()>
                        "Cancel"
                    </button>
                    <button type="button" class="btn btn-outline">"Preview"</button>
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=move || saving.get() || !load_state.get().can_write_back()
                        on:click=on_save
                    >
                        {move || saving.get().then(|| view! { <span class="loading loading-spinner"></span> })}
                        "OK"
                    </button>
                </div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
