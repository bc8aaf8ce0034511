use crate::api::use_api;
use crate::components::area_dialog::AreaDialog;
use crate::components::data_table::{ConfirmButton, Pagination, SearchBox, SortHeader};
use crate::components::icons::{CheckCircle, Trash2};
use crate::components::list_state::use_list;
use crate::components::notification::use_notifier;
use crate::components::setting_dialog::SettingDialog;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use naviswork_shared::ProjectArea;
use naviswork_shared::protocol::{DeleteArea, SearchAreas};
use naviswork_shared::query::SearchEncoding;
use naviswork_shared::validate::{FormMode, require_id};

#[component]
fn ModelStatus(completed: bool) -> impl IntoView {
    if completed {
        view! {
            <span class="badge badge-success badge-outline gap-1 py-3 px-3">
                <CheckCircle attr:class="h-4 w-4" />
                "Completed"
            </span>
        }
        .into_any()
    } else {
        view! { <span class="badge badge-ghost py-3 px-3 opacity-60">"Not yet created"</span> }
            .into_any()
    }
}

/// 某项目下的区域列表
#[component]
pub fn ProjectAreasPage(project_id: String) -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let list = use_list("project areas", {
        let api = api.clone();
        let project_id = project_id.clone();
        move |query| {
            let api = api.clone();
            let request = SearchAreas {
                project_id: project_id.clone(),
                request: query.to_request(SearchEncoding::Text),
            };
            async move { api.execute(&request).await }
        }
    });

    let on_changed = Callback::new(move |_: ()| list.reload());

    let handle_delete = move |area: ProjectArea| {
        let id = match require_id(Some(area.id.as_str()), "area") {
            Ok(id) => id,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };
        let api = api.clone();
        spawn_local(async move {
            match api.execute(&DeleteArea { id }).await {
                Ok(_) => {
                    notifier.success("Deleted successfully!");
                    list.reload();
                }
                Err(e) => {
                    error!("[Area] Delete failed: {}", e);
                    notifier.error(e.user_message("Delete failed!"));
                }
            }
        });
    };
    let handle_delete = StoredValue::new(handle_delete);
    let project_id = StoredValue::new(project_id);

    let is_loading = move || list.state.get().is_loading();
    let is_empty = move || list.rows.with(|rows| rows.is_empty());

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">"List Area"</h2>
                <AreaDialog mode=FormMode::Create project_id=project_id.get_value() on_changed=on_changed />
            </div>

            <SearchBox query=list.query placeholder="Search" />

            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <SortHeader label="Name" column="name" query=list.query />
                            <SortHeader label="Last Update" column="updatedOn" query=list.query />
                            <th>"Model Status"</th>
                            <th>"List file"</th>
                            <SortHeader label="Pile file" column="totalPile" query=list.query />
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || is_loading() && is_empty()>
                            <tr>
                                <td colspan="6" class="text-center py-8 text-base-content/50">
                                    <span class="loading loading-spinner loading-md"></span>
                                </td>
                            </tr>
                        </Show>
                        <Show when=move || !is_loading() && is_empty()>
                            <tr>
                                <td colspan="6" class="text-center py-8 text-base-content/50">"No data"</td>
                            </tr>
                        </Show>
                        <For
                            each=move || list.rows.get()
                            key=|a| a.id.clone()
                            children=move |area| {
                                let row = area.clone();
                                view! {
                                    <tr>
                                        <td class="font-medium">{area.name.clone()}</td>
                                        <td class="whitespace-nowrap">{area.updated_on_display()}</td>
                                        <td><ModelStatus completed=area.has_model() /></td>
                                        <td>{area.total_list}</td>
                                        <td>{area.total_pile}</td>
                                        <td>
                                            <div class="flex items-center gap-1">
                                                <SettingDialog area_id=area.id.clone() />
                                                <AreaDialog
                                                    mode=FormMode::Edit
                                                    project_id=project_id.get_value()
                                                    area=area.clone()
                                                    on_changed=on_changed
                                                />
                                                <ConfirmButton
                                                    message="Are you sure to delete this area?"
                                                    on_confirm=move |_| handle_delete.with_value(|f| f(row.clone()))
                                                    class="btn btn-ghost btn-sm btn-square text-error"
                                                >
                                                    <Trash2 attr:class="h-4 w-4" />
                                                </ConfirmButton>
                                            </div>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <Pagination query=list.query total=list.total />
        </div>
    }
}
