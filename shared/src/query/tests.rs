use super::*;
use serde_json::json;

const PROJECT_COLUMNS: &[&str] = &["name", "province", "companyName"];

// =========================================================
// 排序
// =========================================================

#[test]
fn test_sort_cycle_is_none_asc_desc_none() {
    let mut query = ListQuery::default();

    let mut codes = Vec::new();
    for _ in 0..3 {
        query.toggle_sort("name", true);
        codes.push(
            query
                .to_request(SearchEncoding::Text)
                .sorts
                .first()
                .map(|s| s.sort.code())
                .unwrap_or(0),
        );
    }

    assert_eq!(codes, vec![1, 2, 0]);
    assert!(query.sorts().is_empty());
}

#[test]
fn test_sort_is_cumulative_when_multi() {
    let mut query = ListQuery::default();
    query.toggle_sort("name", true);
    query.toggle_sort("province", true);
    query.toggle_sort("name", true);

    let body = serde_json::to_value(query.to_request(SearchEncoding::Text)).unwrap();
    assert_eq!(
        body["sorts"],
        json!([
            { "key": "name", "sort": 2 },
            { "key": "province", "sort": 1 }
        ])
    );
}

#[test]
fn test_single_sort_replaces_other_columns() {
    let mut query = ListQuery::default();
    query.toggle_sort("name", false);
    query.toggle_sort("updatedOn", false);

    assert_eq!(query.sorts().len(), 1);
    assert_eq!(query.sort_order("updatedOn"), SortOrder::Ascending);
    assert_eq!(query.sort_order("name"), SortOrder::None);
}

#[test]
fn test_sort_code_rejects_unknown_value() {
    let parsed: Result<SortItem, _> = serde_json::from_value(json!({ "key": "name", "sort": 3 }));
    assert!(parsed.is_err());

    let parsed: SortItem = serde_json::from_value(json!({ "key": "name", "sort": 2 })).unwrap();
    assert_eq!(parsed.sort, SortOrder::Descending);
}

// =========================================================
// 搜索 / 筛选互斥
// =========================================================

#[test]
fn test_global_search_clears_column_filters() {
    let mut query = ListQuery::default();
    query.apply_column_filter("province", "Hanoi");
    query.apply_column_filter("name", "Tower");
    assert_eq!(query.filters().len(), 2);

    query.set_search("bridge");

    assert!(query.filters().is_empty());
    assert_eq!(query.search(), Some("bridge"));
}

#[test]
fn test_column_filter_clears_global_search() {
    let mut query = ListQuery::default();
    query.set_search("bridge");

    query.apply_column_filter("name", "Tower");

    assert_eq!(query.search(), None);
    assert_eq!(query.filter_value("name"), Some("Tower"));
}

#[test]
fn test_empty_search_still_clears_filters() {
    let mut query = ListQuery::default();
    query.apply_column_filter("name", "Tower");

    query.set_search("");

    assert!(query.filters().is_empty());
    assert_eq!(query.to_request(SearchEncoding::Text).search, None);
}

#[test]
fn test_empty_search_differs_while_filters_are_active() {
    let mut query = ListQuery::default();
    assert!(!query.search_differs(""));
    assert!(query.search_differs("Tower"));

    query.apply_column_filter("province", "Tokyo");
    assert!(query.search_differs(""));

    query.set_search("");
    assert!(!query.search_differs(""));

    query.set_search("Tower");
    assert!(!query.search_differs("Tower"));
    assert!(query.search_differs(""));
}

#[test]
fn test_column_filter_update_and_removal() {
    let mut query = ListQuery::default();
    query.apply_column_filter("name", "Tow");
    query.apply_column_filter("name", "Tower");
    assert_eq!(query.filters(), &[FilterPair::new("name", "Tower")]);

    query.apply_column_filter("name", "");
    assert!(query.filters().is_empty());
}

#[test]
fn test_search_and_filter_reset_page() {
    let mut query = ListQuery::default();
    query.set_page(4);
    query.set_search("x");
    assert_eq!(query.page(), 1);

    query.set_page(3);
    query.apply_column_filter("name", "y");
    assert_eq!(query.page(), 1);

    query.set_page(2);
    query.set_page_size(50);
    assert_eq!(query.page(), 1);
    assert_eq!(query.page_size(), 50);
}

// =========================================================
// 请求编码
// =========================================================

#[test]
fn test_project_global_search_expands_over_columns() {
    let mut query = ListQuery::default();
    query.set_search("ha");

    let body =
        serde_json::to_value(query.to_request(SearchEncoding::ExpandOver(PROJECT_COLUMNS)))
            .unwrap();

    assert_eq!(
        body,
        json!({
            "pageNumber": 1,
            "pageSize": 20,
            "search": [
                { "key": "name", "value": "ha" },
                { "key": "province", "value": "ha" },
                { "key": "companyName", "value": "ha" }
            ],
            "sorts": []
        })
    );
}

#[test]
fn test_area_global_search_is_plain_text() {
    let mut query = ListQuery::new(10);
    query.set_search("zone");
    query.set_page(2);

    let body = serde_json::to_value(query.to_request(SearchEncoding::Text)).unwrap();
    assert_eq!(body["search"], json!("zone"));
    assert_eq!(body["pageNumber"], 2);
    assert_eq!(body["pageSize"], 10);
}

#[test]
fn test_column_filters_are_sent_as_pairs() {
    let mut query = ListQuery::default();
    query.apply_column_filter("companyName", "ACME");

    let request = query.to_request(SearchEncoding::ExpandOver(PROJECT_COLUMNS));
    assert_eq!(
        request.search,
        Some(SearchCriteria::Pairs(vec![FilterPair::new("companyName", "ACME")]))
    );
}

#[test]
fn test_no_criteria_omits_search_field() {
    let body = serde_json::to_value(ListQuery::default().to_request(SearchEncoding::Text)).unwrap();
    assert!(body.get("search").is_none());
}

// =========================================================
// 分页与请求序号
// =========================================================

#[test]
fn test_page_count() {
    assert_eq!(page_count(57, 20), 3);
    assert_eq!(page_count(60, 20), 3);
    assert_eq!(page_count(61, 20), 4);
    assert_eq!(page_count(0, 20), 0);
    assert_eq!(page_count(5, 0), 0);
}

#[test]
fn test_only_latest_ticket_is_current() {
    let mut seq = RequestSequencer::default();
    let first = seq.issue();
    let second = seq.issue();

    // 第一个请求的响应晚到，应被丢弃
    assert!(!seq.is_current(first));
    assert!(seq.is_current(second));
}

#[test]
fn test_only_loaded_state_allows_write_back() {
    assert!(LoadState::Loaded.can_write_back());
    for state in [LoadState::Idle, LoadState::Loading, LoadState::Failed] {
        assert!(!state.can_write_back(), "{:?}", state);
    }
}
