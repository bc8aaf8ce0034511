use crate::api::use_api;
use crate::components::data_table::{ConfirmButton, Pagination, SearchBox, SortHeader};
use crate::components::icons::{RefreshCw, Trash2};
use crate::components::list_state::use_list;
use crate::components::notification::use_notifier;
use crate::components::project_dialog::ProjectDialog;
use crate::web::router::Link;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use naviswork_shared::Project;
use naviswork_shared::protocol::{DeleteProjects, SearchProjects};
use naviswork_shared::query::SearchEncoding;
use naviswork_shared::route::AppRoute;
use naviswork_shared::validate::{FormMode, require_id};

/// 全局搜索词展开到这些列
const SEARCHABLE_COLUMNS: &[&str] = &["name", "province", "companyName"];

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let list = use_list("projects", {
        let api = api.clone();
        move |query| {
            let api = api.clone();
            async move {
                let request = query.to_request(SearchEncoding::ExpandOver(SEARCHABLE_COLUMNS));
                api.execute(&SearchProjects(request)).await
            }
        }
    });

    let on_changed = Callback::new(move |_: ()| list.reload());

    let handle_delete = move |project: Project| {
        let id = match require_id(Some(project.id.as_str()), "project") {
            Ok(id) => id,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };
        let api = api.clone();
        spawn_local(async move {
            match api.execute(&DeleteProjects { ids: vec![id] }).await {
                Ok(_) => {
                    notifier.success("Deleted successfully!");
                    list.reload();
                }
                Err(e) => {
                    error!("[Project] Delete failed: {}", e);
                    notifier.error(e.user_message("Delete failed!"));
                }
            }
        });
    };
    let handle_delete = StoredValue::new(handle_delete);

    let is_loading = move || list.state.get().is_loading();
    let is_empty = move || list.rows.with(|rows| rows.is_empty());

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">"Project list"</h2>
                <div class="flex items-center gap-2">
                    <button class="btn btn-ghost btn-circle" disabled=is_loading on:click=move |_| list.reload()>
                        <RefreshCw attr:class=move || if is_loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                    <ProjectDialog mode=FormMode::Create on_changed=on_changed />
                </div>
            </div>

            <SearchBox query=list.query placeholder="Search global..." />

            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <SortHeader label="Project name" column="name" query=list.query filter=true />
                            <SortHeader label="Province" column="province" query=list.query filter=true />
                            <SortHeader label="Company" column="companyName" query=list.query filter=true />
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || is_loading() && is_empty()>
                            <tr>
                                <td colspan="4" class="text-center py-8 text-base-content/50">
                                    <span class="loading loading-spinner loading-md"></span>
                                </td>
                            </tr>
                        </Show>
                        <Show when=move || !is_loading() && is_empty()>
                            <tr>
                                <td colspan="4" class="text-center py-8 text-base-content/50">"No data"</td>
                            </tr>
                        </Show>
                        <For
                            each=move || list.rows.get()
                            key=|p| p.id.clone()
                            children=move |project| {
                                let areas = AppRoute::ProjectAreas {
                                    project_id: project.id.clone(),
                                }
                                .to_path();
                                let row = project.clone();
                                let name = project.name.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <Link to=areas class="link link-primary font-medium">
                                                {name}
                                            </Link>
                                        </td>
                                        <td>{project.province.clone()}</td>
                                        <td>{project.company_name.clone()}</td>
                                        <td>
                                            <div class="flex items-center gap-2">
                                                <ProjectDialog
                                                    mode=FormMode::Edit
                                                    project=project.clone()
                                                    on_changed=on_changed
                                                />
                                                <ConfirmButton
                                                    message="Are you sure to delete this project?"
                                                    on_confirm=move |_| handle_delete.with_value(|f| f(row.clone()))
                                                    class="btn btn-outline btn-error btn-sm"
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
