//! 列表查询状态模块
//!
//! 负责项目 / 区域列表的分页、排序、列筛选与全局搜索状态，
//! 并将其编码为后端 `search` 接口的请求体。
//! 纯数据逻辑，不依赖 DOM，可在原生环境下测试。

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const PAGE_SIZE_OPTIONS: &[u32] = &[10, 20, 50, 100];

// =========================================================
// 排序 (Sorting)
// =========================================================

/// 排序方向，线上编码为 0 / 1 / 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn code(self) -> u8 {
        match self {
            SortOrder::None => 0,
            SortOrder::Ascending => 1,
            SortOrder::Descending => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SortOrder::None),
            1 => Some(SortOrder::Ascending),
            2 => Some(SortOrder::Descending),
            _ => None,
        }
    }

    /// 点击表头时的下一个状态：none -> asc -> desc -> none
    pub fn next(self) -> Self {
        match self {
            SortOrder::None => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::None,
        }
    }
}

impl Serialize for SortOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        SortOrder::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid sort code {}", code)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    pub key: String,
    pub sort: SortOrder,
}

// =========================================================
// 筛选与搜索 (Filtering & Search)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPair {
    pub key: String,
    pub value: String,
}

impl FilterPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// `search` 字段：单个字符串，或 `{key, value}` 数组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchCriteria {
    Text(String),
    Pairs(Vec<FilterPair>),
}

/// 全局搜索词的编码方式（各列表接口不同）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEncoding {
    /// 直接作为字符串发送
    Text,
    /// 展开为每个可搜索列一个 `{key, value}`
    ExpandOver(&'static [&'static str]),
}

/// 列表接口请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub page_number: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchCriteria>,
    #[serde(default)]
    pub sorts: Vec<SortItem>,
}

// =========================================================
// 查询状态 (Query State)
// =========================================================

/// 单个列表视图的查询状态
///
/// 不变式：全局搜索与列筛选互斥，设置其一即清空另一方；
/// 任何搜索 / 筛选变化都回到第 1 页。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    page_size: u32,
    sorts: Vec<SortItem>,
    filters: Vec<FilterPair>,
    search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            sorts: Vec::new(),
            filters: Vec::new(),
            search: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn sorts(&self) -> &[SortItem] {
        &self.sorts
    }

    pub fn filters(&self) -> &[FilterPair] {
        &self.filters
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// 当前某列的筛选值
    pub fn filter_value(&self, key: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// 当前某列的排序方向
    pub fn sort_order(&self, key: &str) -> SortOrder {
        self.sorts
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.sort)
            .unwrap_or_default()
    }

    /// 设置全局搜索词，清空所有列筛选
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.filters.clear();
        self.search = if text.is_empty() { None } else { Some(text) };
        self.page = 1;
    }

    /// 写入该搜索词是否会改变查询（搜索词不同，或仍有列筛选待清空）
    pub fn search_differs(&self, text: &str) -> bool {
        self.search().unwrap_or_default() != text || !self.filters.is_empty()
    }

    /// 应用单列筛选，清空全局搜索；空值表示移除该列筛选
    pub fn apply_column_filter(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        self.search = None;
        if value.is_empty() {
            self.filters.retain(|f| f.key != key);
        } else if let Some(existing) = self.filters.iter_mut().find(|f| f.key == key) {
            existing.value = value;
        } else {
            self.filters.push(FilterPair::new(key, value));
        }
        self.page = 1;
    }

    /// 点击列头切换排序，返回该列的新方向
    ///
    /// `multi` 为 true 时排序在多列间累积（按首次点击的顺序）；
    /// 否则只保留当前列。回到 none 的列从列表中移除。
    pub fn toggle_sort(&mut self, key: &str, multi: bool) -> SortOrder {
        let next = self.sort_order(key).next();

        if !multi {
            self.sorts.retain(|s| s.key == key);
        }

        match (self.sorts.iter().position(|s| s.key == key), next) {
            (Some(idx), SortOrder::None) => {
                self.sorts.remove(idx);
            }
            (Some(idx), order) => self.sorts[idx].sort = order,
            (None, SortOrder::None) => {}
            (None, order) => self.sorts.push(SortItem {
                key: key.to_string(),
                sort: order,
            }),
        }
        next
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// 编码为请求体
    pub fn to_request(&self, encoding: SearchEncoding) -> SearchRequest {
        let search = match (&self.search, encoding) {
            (Some(text), SearchEncoding::Text) => Some(SearchCriteria::Text(text.clone())),
            (Some(text), SearchEncoding::ExpandOver(columns)) => Some(SearchCriteria::Pairs(
                columns
                    .iter()
                    .map(|column| FilterPair::new(*column, text.clone()))
                    .collect(),
            )),
            (None, _) if !self.filters.is_empty() => {
                Some(SearchCriteria::Pairs(self.filters.clone()))
            }
            (None, _) => None,
        };

        SearchRequest {
            page_number: self.page,
            page_size: self.page_size,
            search,
            sorts: self.sorts.clone(),
        }
    }
}

/// 总页数
pub fn page_count(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size))
}

// =========================================================
// 加载状态与请求序号 (Load State & Sequencing)
// =========================================================

/// 加载状态（列表视图与设置弹窗共用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    pub fn is_loading(self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// 只有成功载入的数据才能回写，加载中或失败时保存会覆盖服务端内容
    pub fn can_write_back(self) -> bool {
        matches!(self, LoadState::Loaded)
    }
}

/// 请求票据
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// 请求序号分配器
///
/// 每次发起列表请求时领取一个票据，响应返回时只有最新票据的结果会被应用，
/// 较早发出但较晚到达的响应被丢弃。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests;
