//! 表格部件：排序表头、列筛选、全局搜索、分页、删除确认
//!
//! 所有部件都直接读写列表的 `RwSignal<ListQuery>`，规则（互斥、回到第 1 页等）
//! 由 `ListQuery` 保证。

use leptos::prelude::*;
use naviswork_shared::query::{ListQuery, SortOrder, page_count};

use crate::components::icons::{ArrowDown, ArrowUp, ArrowUpDown, ChevronLeft, ChevronRight, Search};
use crate::config::{PAGE_SIZE_OPTIONS, SEARCH_DEBOUNCE_MS};
use crate::web::Debounce;

// =========================================================
// 排序与筛选表头
// =========================================================

/// 可排序列头，点击循环 none → 升序 → 降序 → none，多列排序累积
#[component]
pub fn SortHeader(
    label: &'static str,
    column: &'static str,
    query: RwSignal<ListQuery>,
    /// 可选的列筛选（放在标题旁）
    #[prop(optional)]
    filter: bool,
) -> impl IntoView {
    let order = move || query.with(|q| q.sort_order(column));
    let on_click = move |_| {
        query.update(|q| {
            q.toggle_sort(column, true);
        });
    };

    view! {
        <th>
            <div class="flex items-center gap-1">
                <button class="flex items-center gap-1 font-semibold" on:click=on_click>
                    {label}
                    {move || match order() {
                        SortOrder::Ascending => view! { <ArrowUp attr:class="h-3 w-3 text-primary" /> }.into_any(),
                        SortOrder::Descending => view! { <ArrowDown attr:class="h-3 w-3 text-primary" /> }.into_any(),
                        SortOrder::None => view! { <ArrowUpDown attr:class="h-3 w-3 opacity-30" /> }.into_any(),
                    }}
                </button>
                {filter.then(|| view! { <ColumnFilter column=column query=query /> })}
            </div>
        </th>
    }
}

/// 列筛选下拉框，回车后生效
#[component]
pub fn ColumnFilter(column: &'static str, query: RwSignal<ListQuery>) -> impl IntoView {
    let active = Memo::new(move |_| query.with(|q| q.filter_value(column).map(str::to_string)));
    let draft = RwSignal::new(String::new());

    // 全局搜索会清空列筛选，输入框随之同步
    Effect::new(move |_| draft.set(active.get().unwrap_or_default()));

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            let value = draft.get_untracked().trim().to_string();
            query.update(|q| q.apply_column_filter(column, value));
        }
    };

    view! {
        <div class="dropdown dropdown-bottom">
            <div
                tabindex="0"
                role="button"
                class=move || {
                    if active.get().is_some() {
                        "btn btn-ghost btn-xs text-primary"
                    } else {
                        "btn btn-ghost btn-xs opacity-50"
                    }
                }
            >
                <Search attr:class="h-3 w-3" />
            </div>
            <div tabindex="0" class="dropdown-content z-[1] p-2 shadow bg-base-100 rounded-box w-56">
                <input
                    type="text"
                    class="input input-bordered input-sm w-full"
                    placeholder=format!("Search {}", column)
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
            </div>
        </div>
    }
}

// =========================================================
// 全局搜索
// =========================================================

/// 防抖搜索框：停止输入 500ms 后才写入查询
#[component]
pub fn SearchBox(
    query: RwSignal<ListQuery>,
    #[prop(into)] placeholder: String,
) -> impl IntoView {
    let applied = Memo::new(move |_| query.with(|q| q.search().map(str::to_string)));
    let text = RwSignal::new(String::new());
    let debounce = Debounce::new(SEARCH_DEBOUNCE_MS);

    // 列筛选会清空全局搜索，输入框随之同步
    Effect::new(move |_| text.set(applied.get().unwrap_or_default()));

    let apply = move |value: String| {
        if query.with_untracked(|q| q.search_differs(&value)) {
            query.update(|q| q.set_search(value));
        }
    };

    // 回车总是提交，空搜索词同样清空列筛选
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            debounce.cancel();
            let value = text.get_untracked().trim().to_string();
            query.update(|q| q.set_search(value));
        }
    };

    view! {
        <label class="input input-bordered flex items-center gap-2 max-w-sm">
            <Search attr:class="h-4 w-4 opacity-50" />
            <input
                type="search"
                class="grow"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    text.set(value.clone());
                    debounce.call(move || apply(value.trim().to_string()));
                }
                on:keydown=on_keydown
            />
        </label>
    }
}

// =========================================================
// 分页
// =========================================================

#[component]
pub fn Pagination(query: RwSignal<ListQuery>, total: RwSignal<u64>) -> impl IntoView {
    let page = move || query.with(|q| q.page());
    let pages = move || page_count(total.get(), query.with(|q| q.page_size())).max(1);

    let go = move |target: u32| query.update(|q| q.set_page(target));

    view! {
        <div class="flex flex-wrap items-center justify-end gap-3 pt-4">
            <span class="text-sm opacity-70">{move || format!("Total {} items", total.get())}</span>
            <div class="join">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || page() <= 1
                    on:click=move |_| go(page().saturating_sub(1))
                >
                    <ChevronLeft attr:class="h-4 w-4" />
                </button>
                <button class="join-item btn btn-sm no-animation">
                    {move || format!("{} / {}", page(), pages())}
                </button>
                <button
                    class="join-item btn btn-sm"
                    disabled=move || u64::from(page()) >= pages()
                    on:click=move |_| go(page() + 1)
                >
                    <ChevronRight attr:class="h-4 w-4" />
                </button>
            </div>
            <select
                class="select select-bordered select-sm"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        query.update(|q| q.set_page_size(size));
                    }
                }
            >
                {PAGE_SIZE_OPTIONS
                    .iter()
                    .map(|size| {
                        let size = *size;
                        view! {
                            <option
                                value=size.to_string()
                                selected=move || query.with(|q| q.page_size()) == size
                            >
                                {format!("{} / page", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

// =========================================================
// 删除确认
// =========================================================

/// 两步删除按钮：先弹出确认气泡，选择 Yes 才执行
#[component]
pub fn ConfirmButton(
    #[prop(into)] message: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let asking = RwSignal::new(false);

    view! {
        <div class="relative inline-block">
            <button class=class on:click=move |_| asking.update(|a| *a = !*a)>
                {children()}
            </button>
            <Show when=move || asking.get()>
                <div class="absolute right-0 z-20 mt-1 w-64 rounded-box bg-base-100 p-3 shadow-lg border border-base-300">
                    <p class="text-sm mb-2">{message.clone()}</p>
                    <div class="flex justify-end gap-2">
                        <button class="btn btn-xs" on:click=move |_| asking.set(false)>"No"</button>
                        <button
                            class="btn btn-xs btn-primary"
                            on:click=move |_| {
                                asking.set(false);
                                on_confirm.run(());
                            }
                        >
                            "Yes"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
