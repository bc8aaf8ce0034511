//! 可见列选择
//!
//! 始终列出完整目录；禁用列的复选框不可操作，无论存储的状态如何。

use leptos::prelude::*;
use naviswork_shared::catalog::{COLUMN_CATALOG, ColumnSelection};

#[component]
pub fn ColumnPicker(selection: RwSignal<ColumnSelection>) -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-x-4 gap-y-2 mb-4">
            {COLUMN_CATALOG
                .iter()
                .map(|spec| {
                    let key = spec.key;
                    view! {
                        <label class="label cursor-pointer gap-2 p-0">
                            <input
                                type="checkbox"
                                class="checkbox checkbox-sm checkbox-primary"
                                disabled=spec.locked
                                prop:checked=move || selection.with(|s| s.is_checked(key))
                                on:change=move |_| {
                                    selection.update(|s| {
                                        s.toggle(key);
                                    });
                                }
                            />
                            <span class="label-text">{spec.title}</span>
                        </label>
                    }
                })
                .collect_view()}
        </div>
    }
}
