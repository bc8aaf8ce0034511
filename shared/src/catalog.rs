//! 现场初期设定模块
//!
//! 包含：
//! - 固定的测量列目录（key / 标题 / 数据索引 / 单位）
//! - 列可见性选择（部分列永久禁用）
//! - 区域设置 JSON 文档的解析与回写（保留未知字段）

use serde_json::{Map, Value};

use crate::error::{SchemaError, SchemaResult};

/// 设置文档中可见列的键
pub const CHECKED_KEYS_FIELD: &str = "checkedKeys";
/// 设置文档中基准值表的键
pub const BASIS_VALUES_FIELD: &str = "基準値";
/// 基准值单元格中的数值 / 后缀字段
const CELL_VALUE_FIELD: &str = "1";
const CELL_SUFFIX_FIELD: &str = "2";

/// 未保存过设置时默认可见的列
pub const DEFAULT_CHECKED_KEYS: &[&str] = &["2", "4", "5", "7"];

// =========================================================
// 列目录 (Column Catalog)
// =========================================================

/// 单个测量列定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub data_index: &'static str,
    pub unit: &'static str,
    /// 复选框永久禁用
    pub locked: bool,
    /// 基准值输入框只读
    pub read_only: bool,
}

const fn column(
    key: &'static str,
    title: &'static str,
    data_index: &'static str,
    unit: &'static str,
    locked: bool,
    read_only: bool,
) -> ColumnSpec {
    ColumnSpec {
        key,
        title,
        data_index,
        unit,
        locked,
        read_only,
    }
}

/// 数据索引即 `基準値` 中的键，多数与标题相同；3、4 列不带【】
pub const COLUMN_CATALOG: [ColumnSpec; 9] = [
    column("1", "貫入時間", "貫入時間", "min/m", false, false),
    column("2", "改良時間", "改良時間", "min/m", false, false),
    column("3", "平均回転数【貫入】", "平均回転数貫入", "rpm", false, false),
    column("4", "平均回転数【改良】", "平均回転数改良", "rpm", false, false),
    column("5", "平均注入圧力", "平均注入圧力", "MPa", false, false),
    column("6", "水注入量【貫入】", "水注入量【貫入】", "L", true, false),
    column("7", "スラリー注入量", "スラリー注入量", "L", false, true),
    column("8", "平均空気量", "平均空気量", "N㎥/min", true, false),
    column("9", "発生土改質液注入量", "発生土改質液注入量", "L", true, false),
];

pub fn find_column(key: &str) -> Option<&'static ColumnSpec> {
    COLUMN_CATALOG.iter().find(|c| c.key == key)
}

/// 基准值表的数据行：(行号, 标签)。第 0 行为空打，第 1 行为试样
pub const BASIS_ROWS: [(usize, &str); 2] = [(0, "空打"), (1, "1")];
pub const UNIT_ROW_LABEL: &str = "単位";

// =========================================================
// 列选择 (Column Selection)
// =========================================================

/// 可见列集合
///
/// 目录内的键按目录顺序排列；目录外的键（旧数据）原样保留在末尾。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    keys: Vec<String>,
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self::from_keys(DEFAULT_CHECKED_KEYS.iter().map(|k| k.to_string()))
    }
}

impl ColumnSelection {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self { keys: Vec::new() };
        for key in keys {
            selection.insert(key.into());
        }
        selection
    }

    fn insert(&mut self, key: String) {
        if self.keys.contains(&key) {
            return;
        }
        self.keys.push(key);
        self.keys.sort_by_key(|k| {
            COLUMN_CATALOG
                .iter()
                .position(|c| c.key == k.as_str())
                .unwrap_or(usize::MAX)
        });
    }

    pub fn is_checked(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// 切换某列可见性，禁用列或目录外的键不会改变，返回是否发生变化
    pub fn toggle(&mut self, key: &str) -> bool {
        match find_column(key) {
            Some(spec) if !spec.locked => {
                if self.is_checked(key) {
                    self.keys.retain(|k| k != key);
                } else {
                    self.insert(key.to_string());
                }
                true
            }
            _ => false,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// 按目录顺序返回可见列
    pub fn visible_columns(&self) -> Vec<&'static ColumnSpec> {
        COLUMN_CATALOG
            .iter()
            .filter(|c| self.is_checked(c.key))
            .collect()
    }
}

// =========================================================
// 设置文档 (Setting Document)
// =========================================================

/// 基准值单元格：数值与后缀
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasisCell {
    pub value: String,
    pub suffix: String,
}

/// 区域设置文档
///
/// 对客户端而言是不透明的 JSON 对象，仅读写 `checkedKeys` 与 `基準値`，
/// 其余字段保存时原样写回。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingDocument {
    fields: Map<String, Value>,
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 按行号取子项：对象以字符串键索引，数组以下标索引
fn row_entry(column: &Value, row: usize) -> Option<&Value> {
    match column {
        Value::Object(map) => map.get(&row.to_string()),
        Value::Array(items) => items.get(row),
        _ => None,
    }
}

impl SettingDocument {
    /// 解析后端返回的设置串；空串视为空文档
    pub fn parse(raw: &str) -> SchemaResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(fields) => Ok(Self { fields }),
            Value::Null => Ok(Self::default()),
            _ => Err(SchemaError::NotAnObject),
        }
    }

    /// 已保存的可见列（字段缺失或不是数组时为 None）
    pub fn checked_keys(&self) -> Option<Vec<String>> {
        match self.fields.get(CHECKED_KEYS_FIELD)? {
            Value::Array(items) => Some(items.iter().filter_map(scalar_text).collect()),
            _ => None,
        }
    }

    /// 已保存且非空的可见列，否则为默认列
    pub fn selection(&self) -> ColumnSelection {
        match self.checked_keys() {
            Some(keys) if !keys.is_empty() => ColumnSelection::from_keys(keys),
            _ => ColumnSelection::default(),
        }
    }

    pub fn set_selection(&mut self, selection: &ColumnSelection) {
        let keys = selection
            .keys()
            .iter()
            .cloned()
            .map(Value::String)
            .collect();
        self.fields
            .insert(CHECKED_KEYS_FIELD.to_string(), Value::Array(keys));
    }

    pub fn basis_cell(&self, data_index: &str, row: usize) -> BasisCell {
        let entry = self
            .fields
            .get(BASIS_VALUES_FIELD)
            .and_then(|base| base.get(data_index))
            .and_then(|column| row_entry(column, row));

        let field = |name: &str| {
            entry
                .and_then(|e| e.get(name))
                .and_then(scalar_text)
                .unwrap_or_default()
        };

        BasisCell {
            value: field(CELL_VALUE_FIELD),
            suffix: field(CELL_SUFFIX_FIELD),
        }
    }

    /// 写入基准值，保留单元格后缀与其它行
    pub fn set_basis_value(&mut self, data_index: &str, row: usize, value: impl Into<String>) {
        let base = self
            .fields
            .entry(BASIS_VALUES_FIELD.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !base.is_object() {
            *base = Value::Object(Map::new());
        }
        let Value::Object(base) = base else { return };

        let column = base
            .entry(data_index.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        // 数组形式的旧数据转换为以行号为键的对象
        if let Value::Array(items) = column {
            let converted = items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect();
            *column = Value::Object(converted);
        }
        if !column.is_object() {
            *column = Value::Object(Map::new());
        }
        let Value::Object(column) = column else { return };

        let cell = column
            .entry(row.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !cell.is_object() {
            *cell = Value::Object(Map::new());
        }
        if let Value::Object(cell) = cell {
            cell.insert(CELL_VALUE_FIELD.to_string(), Value::String(value.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn to_json_string(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

#[cfg(test)]
mod tests;
