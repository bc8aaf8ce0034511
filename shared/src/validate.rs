//! 表单校验
//!
//! 所有必填字段在发出任何请求之前完成检查；只含空白的输入视为未填写。

use std::fmt;

use crate::protocol::{AreaPayload, ProjectFields, SignInRequest};
use crate::{FilterOption, Project};

/// 区域请求体中固定的 `type` 值
pub const AREA_KIND: i32 = 0;

// =========================================================
// 错误类型
// =========================================================

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// 一次提交的全部字段错误
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field,
            message: message.into(),
        }])
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// 指定字段的第一条错误
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl std::error::Error for FormErrors {}

fn filled(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =========================================================
// 登录表单
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignInDraft {
    pub username: String,
    pub password: String,
}

impl SignInDraft {
    pub fn validate(&self) -> Result<SignInRequest, FormErrors> {
        let mut errors = FormErrors::default();
        let username = filled(&self.username);
        if username.is_none() {
            errors.push("username", "Vui lòng nhập tên người dùng!");
        }
        // 密码不做 trim，只拒绝空串
        if self.password.is_empty() {
            errors.push("password", "Vui lòng nhập mật khẩu!");
        }
        errors.into_result(SignInRequest {
            username: username.unwrap_or_default(),
            password: self.password.clone(),
        })
    }
}

// =========================================================
// 项目表单
// =========================================================

/// 表单模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// 项目表单字段：(提交字段名, 标签)
pub const PROJECT_FIELDS: [(&str, &str); 3] = [
    ("name", "Project name"),
    ("province", "Province"),
    ("companyName", "Company name"),
];
pub const CONTRACTOR_FIELD: (&str, &str) = ("contractorName", "Contractor name");

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub province: String,
    pub company_name: String,
    pub contractor_name: String,
}

impl ProjectDraft {
    /// 编辑时从列表行预填
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            province: project.province.clone(),
            company_name: project.company_name.clone(),
            contractor_name: project.contractor_name.clone().unwrap_or_default(),
        }
    }

    fn value_of(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "province" => &self.province,
            "companyName" => &self.company_name,
            "contractorName" => &self.contractor_name,
            _ => "",
        }
    }

    /// 校验并生成 multipart 字段；`contractorName` 只在创建时必填并提交
    pub fn validate(&self, mode: FormMode) -> Result<ProjectFields, FormErrors> {
        let mut required: Vec<(&'static str, &'static str)> = PROJECT_FIELDS.to_vec();
        if mode == FormMode::Create {
            required.push(CONTRACTOR_FIELD);
        }

        let mut errors = FormErrors::default();
        let mut fields = Vec::with_capacity(required.len());
        for (field, label) in required {
            match filled(self.value_of(field)) {
                Some(value) => fields.push((field.to_string(), value)),
                None => errors.push(field, format!("Please input {}!", label.to_lowercase())),
            }
        }
        errors.into_result(ProjectFields(fields))
    }
}

// =========================================================
// 区域表单
// =========================================================

pub const STAGE_FIELD: &str = "stageName";
const STAGE_REQUIRED: &str = "Please select setting construction";
const STAGE_UNKNOWN: &str = "Invalid filter selected";

/// 编辑时把区域的 `typeOfWork` 反查为选项的 stageName
pub fn stage_for_work_type<'a>(options: &'a [FilterOption], type_of_work: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|o| o.id == type_of_work)
        .map(|o| o.stage_name.as_str())
}

/// 把选中的 stageName 解析回选项；不在列表中的选择被拒绝
pub fn resolve_stage<'a>(
    options: &'a [FilterOption],
    stage_name: Option<&str>,
) -> Result<&'a FilterOption, FormErrors> {
    let stage_name = stage_name
        .and_then(filled)
        .ok_or_else(|| FormErrors::single(STAGE_FIELD, STAGE_REQUIRED))?;
    options
        .iter()
        .find(|o| o.stage_name == stage_name)
        .ok_or_else(|| FormErrors::single(STAGE_FIELD, STAGE_UNKNOWN))
}

/// 生成区域创建 / 更新请求体
pub fn area_payload(
    options: &[FilterOption],
    stage_name: Option<&str>,
    project_id: &str,
) -> Result<AreaPayload, FormErrors> {
    let option = resolve_stage(options, stage_name)?;
    Ok(AreaPayload {
        type_of_work: option.id.clone(),
        kind: AREA_KIND,
        project_id: project_id.to_string(),
    })
}

// =========================================================
// 删除
// =========================================================

/// 删除前检查行 id；缺失时不得发出请求
pub fn require_id(id: Option<&str>, entity: &str) -> Result<String, FormErrors> {
    id.and_then(filled)
        .ok_or_else(|| FormErrors::single("id", format!("Missing {} ID to delete", entity)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<FilterOption> {
        vec![
            FilterOption {
                id: "w-1".into(),
                name: "Deep mixing".into(),
                stage_name: "DM".into(),
            },
            FilterOption {
                id: "w-2".into(),
                name: "Jet grouting".into(),
                stage_name: "JG".into(),
            },
        ]
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let err = SignInDraft::default().validate().unwrap_err();
        assert_eq!(err.errors().len(), 2);
        assert!(err.message_for("username").is_some());

        let req = SignInDraft {
            username: "  admin@example.com ".into(),
            password: " pw ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(req.username, "admin@example.com");
        assert_eq!(req.password, " pw ");
    }

    #[test]
    fn test_project_create_requires_contractor() {
        let draft = ProjectDraft {
            name: "Tower".into(),
            province: "Hanoi".into(),
            company_name: "ACME".into(),
            contractor_name: "   ".into(),
        };
        let err = draft.validate(FormMode::Create).unwrap_err();
        assert_eq!(
            err.message_for("contractorName"),
            Some("Please input contractor name!")
        );

        let fields = draft.validate(FormMode::Edit).unwrap();
        assert_eq!(fields.get("companyName"), Some("ACME"));
        assert_eq!(fields.get("contractorName"), None);
    }

    #[test]
    fn test_project_whitespace_counts_as_missing() {
        let err = ProjectDraft {
            name: " ".into(),
            province: "\t".into(),
            ..Default::default()
        }
        .validate(FormMode::Edit)
        .unwrap_err();
        assert_eq!(err.message_for("name"), Some("Please input project name!"));
        assert_eq!(err.message_for("province"), Some("Please input province!"));
        assert_eq!(
            err.message_for("companyName"),
            Some("Please input company name!")
        );
    }

    #[test]
    fn test_project_fields_are_trimmed_in_order() {
        let fields = ProjectDraft {
            name: " Tower ".into(),
            province: "Hanoi".into(),
            company_name: "ACME".into(),
            contractor_name: "Builder Co".into(),
        }
        .validate(FormMode::Create)
        .unwrap();
        let names: Vec<&str> = fields.0.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["name", "province", "companyName", "contractorName"]);
        assert_eq!(fields.get("name"), Some("Tower"));
    }

    #[test]
    fn test_prefill_from_row() {
        let project = Project {
            id: "p1".into(),
            name: "Tower".into(),
            contractor_name: Some("Builder".into()),
            ..Default::default()
        };
        let draft = ProjectDraft::from_project(&project);
        assert_eq!(draft.name, "Tower");
        assert_eq!(draft.contractor_name, "Builder");
    }

    #[test]
    fn test_stage_resolution() {
        let options = options();
        assert_eq!(stage_for_work_type(&options, "w-2"), Some("JG"));
        assert_eq!(stage_for_work_type(&options, "w-9"), None);

        let payload = area_payload(&options, Some("JG"), "p-1").unwrap();
        assert_eq!(payload.type_of_work, "w-2");
        assert_eq!(payload.kind, 0);
        assert_eq!(payload.project_id, "p-1");
    }

    #[test]
    fn test_unknown_or_missing_stage_is_rejected() {
        let options = options();
        let err = resolve_stage(&options, Some("XX")).unwrap_err();
        assert_eq!(err.message_for(STAGE_FIELD), Some("Invalid filter selected"));

        let err = resolve_stage(&options, None).unwrap_err();
        assert_eq!(
            err.message_for(STAGE_FIELD),
            Some("Please select setting construction")
        );
        assert!(resolve_stage(&[], Some("DM")).is_err());
    }

    #[test]
    fn test_delete_requires_id() {
        assert_eq!(require_id(Some("p-1"), "project"), Ok("p-1".to_string()));
        assert_eq!(
            require_id(None, "area").unwrap_err().to_string(),
            "Missing area ID to delete"
        );
        assert!(require_id(Some(""), "project").is_err());
    }
}
