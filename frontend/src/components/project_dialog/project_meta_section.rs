//! 项目元数据（只读，编辑模式下显示）

use leptos::prelude::*;
use naviswork_shared::Project;

#[component]
pub fn ProjectMetaSection(project: Project) -> impl IntoView {
    let rows = [
        ("Created by:", project.created_by.unwrap_or_default()),
        ("Data size:", project.size_unit.unwrap_or_default()),
        (
            "Total area:",
            project.total_area.map(|a| a.to_string()).unwrap_or_default(),
        ),
    ];

    view! {
        <div class="divider my-2"></div>
        <div class="grid grid-cols-3 gap-y-2">
            {rows
                .into_iter()
                .map(|(label, value)| view! {
                    <span class="font-semibold">{label}</span>
                    <span class="col-span-2">{value}</span>
                })
                .collect_view()}
        </div>
    }
}
