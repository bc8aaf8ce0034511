//! 基准值表
//!
//! 第一行为单位，其后为空打行和试样行。单元格编辑直接写回设置文档的 `基準値`。

use leptos::prelude::*;
use naviswork_shared::catalog::{BASIS_ROWS, ColumnSelection, SettingDocument, UNIT_ROW_LABEL};

#[component]
pub fn BasisTable(
    selection: RwSignal<ColumnSelection>,
    document: RwSignal<SettingDocument>,
) -> impl IntoView {
    let columns = move || selection.with(|s| s.visible_columns());

    view! {
        <div class="overflow-x-auto">
            <table class="table table-bordered table-sm text-center">
                <thead>
                    <tr>
                        <th class="whitespace-nowrap">"項目"</th>
                        {move || {
                            columns()
                                .into_iter()
                                .map(|spec| view! { <th class="whitespace-nowrap">{spec.title}</th> })
                                .collect_view()
                        }}
                    </tr>
                </thead>
                <tbody>
                    <tr>
                        <td class="font-bold whitespace-nowrap">{UNIT_ROW_LABEL}</td>
                        {move || {
                            columns()
                                .into_iter()
                                .map(|spec| view! { <td class="font-bold">{spec.unit}</td> })
                                .collect_view()
                        }}
                    </tr>
                    {BASIS_ROWS
                        .iter()
                        .map(|(row, label)| {
                            let row = *row;
                            view! {
                                <tr>
                                    <td class="whitespace-nowrap">{*label}</td>
                                    {move || {
                                        columns()
                                            .into_iter()
                                            .map(|spec| {
                                                let data_index = spec.data_index;
                                                let cell = move || {
                                                    document.with(|d| d.basis_cell(data_index, row))
                                                };
                                                view! {
                                                    <td>
                                                        <div class="flex items-center justify-center gap-1 whitespace-nowrap">
                                                            <input
                                                                type="text"
                                                                class="input input-bordered input-sm w-full min-w-20"
                                                                disabled=spec.read_only
                                                                prop:value=move || cell().value
                                                                on:change=move |ev| {
                                                                    let value = event_target_value(&ev);
                                                                    document.update(|d| d.set_basis_value(data_index, row, value));
                                                                }
                                                            />
                                                            <span>{move || cell().suffix}</span>
                                                        </div>
                                                    </td>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
