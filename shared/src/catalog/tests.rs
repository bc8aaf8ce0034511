use super::*;
use serde_json::json;

fn keys(selection: &ColumnSelection) -> Vec<&str> {
    selection.keys().iter().map(String::as_str).collect()
}

// =========================================================
// 列目录
// =========================================================

#[test]
fn test_catalog_locked_and_read_only_columns() {
    let locked: Vec<&str> = COLUMN_CATALOG
        .iter()
        .filter(|c| c.locked)
        .map(|c| c.key)
        .collect();
    assert_eq!(locked, vec!["6", "8", "9"]);

    assert!(find_column("7").unwrap().read_only);
    assert_eq!(find_column("8").unwrap().unit, "N㎥/min");
    assert!(find_column("10").is_none());
}

// =========================================================
// 列选择
// =========================================================

#[test]
fn test_default_selection() {
    let selection = ColumnSelection::default();
    assert_eq!(keys(&selection), vec!["2", "4", "5", "7"]);
}

#[test]
fn test_toggle_keeps_catalog_order() {
    let mut selection = ColumnSelection::default();
    assert!(selection.toggle("1"));
    assert!(selection.toggle("4"));

    assert_eq!(keys(&selection), vec!["1", "2", "5", "7"]);
    let titles: Vec<&str> = selection.visible_columns().iter().map(|c| c.key).collect();
    assert_eq!(titles, vec!["1", "2", "5", "7"]);
}

#[test]
fn test_locked_columns_cannot_be_toggled() {
    let mut selection = ColumnSelection::from_keys(["2", "6"]);

    // 已存储的禁用列保持选中，也不能被取消
    assert!(!selection.toggle("6"));
    assert!(selection.is_checked("6"));

    assert!(!selection.toggle("8"));
    assert!(!selection.is_checked("8"));
}

#[test]
fn test_unknown_keys_are_preserved() {
    let mut selection = ColumnSelection::from_keys(["legacy", "3"]);
    assert!(!selection.toggle("legacy"));
    assert_eq!(keys(&selection), vec!["3", "legacy"]);
    assert_eq!(selection.visible_columns().len(), 1);
}

// =========================================================
// 设置文档
// =========================================================

#[test]
fn test_missing_or_empty_checked_keys_use_defaults() {
    let doc = SettingDocument::parse(r#"{"other": 1}"#).unwrap();
    assert_eq!(doc.checked_keys(), None);
    assert_eq!(doc.selection(), ColumnSelection::default());

    let doc = SettingDocument::parse(r#"{"checkedKeys": []}"#).unwrap();
    assert_eq!(doc.selection(), ColumnSelection::default());

    let doc = SettingDocument::parse("").unwrap();
    assert_eq!(doc.selection(), ColumnSelection::default());
}

#[test]
fn test_stored_checked_keys_are_used() {
    let doc = SettingDocument::parse(r#"{"checkedKeys": ["1", "3"]}"#).unwrap();
    assert_eq!(keys(&doc.selection()), vec!["1", "3"]);
}

#[test]
fn test_round_trip_preserves_selection_and_unknown_fields() {
    let loaded = SettingDocument::parse(
        r#"{"checkedKeys": ["1"], "version": 3, "notes": {"a": [1, 2]}}"#,
    )
    .unwrap();

    let mut doc = loaded.clone();
    doc.set_selection(&ColumnSelection::from_keys(["2", "4", "5", "7"]));
    let saved = doc.to_json_string();

    let reopened = SettingDocument::parse(&saved).unwrap();
    assert_eq!(keys(&reopened.selection()), vec!["2", "4", "5", "7"]);
    assert_eq!(reopened.get("version"), Some(&json!(3)));
    assert_eq!(reopened.get("notes"), Some(&json!({"a": [1, 2]})));
}

#[test]
fn test_malformed_setting_is_reported() {
    assert!(matches!(
        SettingDocument::parse("{not json"),
        Err(SchemaError::Malformed(_))
    ));
    assert_eq!(
        SettingDocument::parse("[1, 2]"),
        Err(SchemaError::NotAnObject)
    );
}

#[test]
fn test_basis_cells_read_object_and_array_rows() {
    let doc = SettingDocument::parse(
        &json!({
            "基準値": {
                "改良時間": { "0": { "1": "1.5", "2": "以上" }, "1": { "1": 2 } },
                "平均注入圧力": [ { "1": "0.8" } ],
                "平均回転数改良": null
            }
        })
        .to_string(),
    )
    .unwrap();

    assert_eq!(
        doc.basis_cell("改良時間", 0),
        BasisCell {
            value: "1.5".into(),
            suffix: "以上".into()
        }
    );
    assert_eq!(doc.basis_cell("改良時間", 1).value, "2");
    assert_eq!(doc.basis_cell("平均注入圧力", 0).value, "0.8");
    assert_eq!(doc.basis_cell("平均回転数改良", 0), BasisCell::default());
    assert_eq!(doc.basis_cell("貫入時間", 1), BasisCell::default());
}

#[test]
fn test_set_basis_value_keeps_suffix_and_siblings() {
    let mut doc = SettingDocument::parse(
        &json!({
            "基準値": {
                "改良時間": { "0": { "1": "1.5", "2": "以上" }, "1": { "1": "2" } },
                "平均注入圧力": [ { "1": "0.8" } ]
            }
        })
        .to_string(),
    )
    .unwrap();

    doc.set_basis_value("改良時間", 0, "1.8");
    doc.set_basis_value("平均注入圧力", 1, "0.9");
    doc.set_basis_value("貫入時間", 0, "3");

    let reopened = SettingDocument::parse(&doc.to_json_string()).unwrap();
    assert_eq!(
        reopened.basis_cell("改良時間", 0),
        BasisCell {
            value: "1.8".into(),
            suffix: "以上".into()
        }
    );
    assert_eq!(reopened.basis_cell("改良時間", 1).value, "2");
    assert_eq!(reopened.basis_cell("平均注入圧力", 0).value, "0.8");
    assert_eq!(reopened.basis_cell("平均注入圧力", 1).value, "0.9");
    assert_eq!(reopened.basis_cell("貫入時間", 0).value, "3");
}

#[test]
fn test_rotation_columns_use_bracketless_data_index() {
    let penetration = find_column("3").unwrap();
    let improvement = find_column("4").unwrap();
    assert_eq!(penetration.title, "平均回転数【貫入】");
    assert_eq!(penetration.data_index, "平均回転数貫入");
    assert_eq!(improvement.data_index, "平均回転数改良");
    assert_eq!(find_column("6").unwrap().data_index, "水注入量【貫入】");

    let mut doc = SettingDocument::parse(
        &json!({
            "基準値": {
                "平均回転数貫入": [ { "1": "30", "2": "rpm" } ]
            }
        })
        .to_string(),
    )
    .unwrap();
    assert_eq!(
        doc.basis_cell(penetration.data_index, 0),
        BasisCell {
            value: "30".into(),
            suffix: "rpm".into()
        }
    );

    doc.set_basis_value(penetration.data_index, 0, "32");
    let saved: serde_json::Value = serde_json::from_str(&doc.to_json_string()).unwrap();
    let basis = saved["基準値"].as_object().unwrap();
    assert_eq!(basis["平均回転数貫入"][0]["1"], "32");
    assert!(!basis.contains_key("平均回転数【貫入】"));
}
