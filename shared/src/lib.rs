use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod date;
pub mod error;
pub mod protocol;
pub mod query;
pub mod route;
pub mod session;
pub mod validate;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 访问令牌 Cookie 名称，同时也是 LocalStorage 的键
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// 令牌 Cookie 有效期（约 24 小时）
pub const TOKEN_MAX_AGE_SECS: u64 = 24 * 60 * 60;

pub const SIGN_IN_PATH: &str = "/sign-in";
pub const HOME_PATH: &str = "/";
pub const API_PREFIX: &str = "/api";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 项目列表行 / 编辑对象
///
/// `contractorName` 只在创建时提交；`createdBy`、`sizeUnit`、`totalArea`
/// 只在编辑弹窗中只读展示。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_area: Option<f64>,
}

/// 模型文件版本描述，只用来判断模型是否已生成
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersion {
    #[serde(default)]
    pub object_key: Option<String>,
}

/// 项目区域列表行
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectArea {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub updated_on: Option<String>,
    /// 工种 ID（后端真实标识，表单中用 stageName 代理）
    #[serde(default)]
    pub type_of_work: Option<String>,
    #[serde(default)]
    pub file_version_dtos: Option<FileVersion>,
    #[serde(default)]
    pub total_list: u64,
    #[serde(default)]
    pub total_pile: u64,
}

impl ProjectArea {
    /// 是否已生成模型
    pub fn has_model(&self) -> bool {
        self.file_version_dtos
            .as_ref()
            .and_then(|v| v.object_key.as_deref())
            .is_some_and(|key| !key.is_empty())
    }

    pub fn updated_on_display(&self) -> String {
        self.updated_on
            .as_deref()
            .map(date::display_timestamp)
            .unwrap_or_default()
    }
}

/// 工种 / 施工设置选项
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub id: String,
    pub name: String,
    /// 表单选择键，提交前需解析回 `id`
    pub stage_name: String,
}

/// 登录返回的令牌对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_area_model_status() {
        let mut area: ProjectArea = serde_json::from_value(json!({
            "id": "a1",
            "name": "Zone A",
            "updatedOn": "2024-05-01T10:00:00",
            "fileVersionDtos": { "objectKey": "models/a1.nwd" },
            "totalList": 3,
            "totalPile": 12
        }))
        .unwrap();
        assert!(area.has_model());
        assert_eq!(area.total_pile, 12);

        area.file_version_dtos = Some(FileVersion {
            object_key: Some(String::new()),
        });
        assert!(!area.has_model());

        area.file_version_dtos = None;
        assert!(!area.has_model());
    }

    #[test]
    fn test_area_tolerates_missing_fields() {
        let area: ProjectArea = serde_json::from_value(json!({ "id": "a2" })).unwrap();
        assert_eq!(area.name, "");
        assert_eq!(area.total_list, 0);
        assert!(area.type_of_work.is_none());
        assert_eq!(area.updated_on_display(), "");
    }

    #[test]
    fn test_project_omits_absent_metadata() {
        let project = Project {
            id: "p1".into(),
            name: "Tower".into(),
            province: "Hanoi".into(),
            company_name: "ACME".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["companyName"], "ACME");
        assert!(value.get("contractorName").is_none());
        assert!(value.get("totalArea").is_none());
    }
}
