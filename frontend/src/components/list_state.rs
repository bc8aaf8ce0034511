//! 列表视图控制器
//!
//! 查询参数变化（或手动刷新）时重新请求，状态机 Idle → Loading → Loaded | Failed。
//! 每次请求领取一个票据，只有最新票据的响应会写入表格。

use std::future::Future;

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use naviswork_shared::protocol::Page;
use naviswork_shared::query::{ListQuery, LoadState, RequestSequencer};

use crate::api::ApiError;
use crate::components::notification::use_notifier;

pub struct ListController<T: Send + Sync + 'static> {
    pub query: RwSignal<ListQuery>,
    pub rows: RwSignal<Vec<T>>,
    pub total: RwSignal<u64>,
    pub state: RwSignal<LoadState>,
    refresh: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for ListController<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListController<T> {}

impl<T: Send + Sync + 'static> ListController<T> {
    /// 保持当前分页 / 排序 / 筛选重新加载
    pub fn reload(&self) {
        self.refresh.update(|n| *n += 1);
    }
}

/// 创建列表控制器并立即发起首次加载
///
/// `fetch` 把当前查询交给具体的 search 接口。
pub fn use_list<T, F, Fut>(label: &'static str, fetch: F) -> ListController<T>
where
    T: Send + Sync + 'static,
    F: Fn(ListQuery) -> Fut + 'static,
    Fut: Future<Output = Result<Page<T>, ApiError>> + 'static,
{
    let notifier = use_notifier();
    let controller = ListController {
        query: RwSignal::new(ListQuery::default()),
        rows: RwSignal::new(Vec::new()),
        total: RwSignal::new(0),
        state: RwSignal::new(LoadState::Idle),
        refresh: RwSignal::new(0),
    };
    let sequencer = StoredValue::new(RequestSequencer::default());

    Effect::new(move |_| {
        controller.refresh.track();
        let query = controller.query.get();
        let Some(ticket) = sequencer.try_update_value(|s| s.issue()) else {
            return;
        };

        controller.state.set(LoadState::Loading);
        let pending = fetch(query);

        spawn_local(async move {
            let result = pending.await;
            if !sequencer
                .try_with_value(|s| s.is_current(ticket))
                .unwrap_or(false)
            {
                warn!("[List] dropping stale {} response", label);
                return;
            }

            match result {
                Ok(page) => {
                    controller.total.set(page.total_count);
                    controller.rows.set(page.items);
                    controller.state.set(LoadState::Loaded);
                }
                Err(e) => {
                    controller.state.set(LoadState::Failed);
                    if e != ApiError::Unauthorized {
                        notifier.error(e.user_message(&format!("Error loading {}", label)));
                    }
                }
            }
        });
    });

    controller
}
