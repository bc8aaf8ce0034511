//! 时间显示模块
//!
//! 后端返回的 `updatedOn` 可能带时区（RFC 3339），也可能是不带时区的
//! ISO 本地时间（.NET 默认格式）。这里统一格式化为 `YYYY-MM-DD HH:MM:SS`，
//! 无法解析时原样返回。

use chrono::{DateTime, Local, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 不带时区的时间格式（按优先级尝试）
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 解析带时区的时间并转换为本地时间
fn parse_zoned(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// 将后端时间字符串格式化为显示文本
pub fn display_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    parse_zoned(raw)
        .or_else(|| parse_naive(raw))
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_timestamp() {
        assert_eq!(
            display_timestamp("2024-05-01T10:04:05.1234567"),
            "2024-05-01 10:04:05"
        );
        assert_eq!(
            display_timestamp("2024-05-01 10:04:05"),
            "2024-05-01 10:04:05"
        );
    }

    #[test]
    fn test_zoned_timestamp_is_converted() {
        let shown = display_timestamp("2024-05-01T10:04:05Z");
        // 具体值依赖本地时区，只检查格式
        assert_eq!(shown.len(), "2024-05-01 10:04:05".len());
        assert_eq!(&shown[4..5], "-");
    }

    #[test]
    fn test_unparseable_is_kept() {
        assert_eq!(display_timestamp("yesterday"), "yesterday");
        assert_eq!(display_timestamp(""), "");
    }
}
