//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有与重置
//! - 编辑时从列表行预填
//! - 提交前的校验（规则在 `naviswork_shared::validate`）

use leptos::prelude::*;
use naviswork_shared::Project;
use naviswork_shared::protocol::ProjectFields;
use naviswork_shared::validate::{FormErrors, FormMode, ProjectDraft};

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub province: RwSignal<String>,
    pub company_name: RwSignal<String>,
    /// 仅创建时填写
    pub contractor_name: RwSignal<String>,
    /// 上一次提交的校验错误
    pub errors: RwSignal<Option<FormErrors>>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            province: RwSignal::new(String::new()),
            company_name: RwSignal::new(String::new()),
            contractor_name: RwSignal::new(String::new()),
            errors: RwSignal::new(None),
        }
    }

    /// 按提交字段名取对应的信号
    pub fn field(&self, name: &str) -> Option<RwSignal<String>> {
        match name {
            "name" => Some(self.name),
            "province" => Some(self.province),
            "companyName" => Some(self.company_name),
            "contractorName" => Some(self.contractor_name),
            _ => None,
        }
    }

    pub fn reset(&self) {
        self.load(&ProjectDraft::default());
    }

    /// 编辑模式：用列表行预填
    pub fn fill(&self, project: &Project) {
        self.load(&ProjectDraft::from_project(project));
    }

    fn load(&self, draft: &ProjectDraft) {
        self.name.set(draft.name.clone());
        self.province.set(draft.province.clone());
        self.company_name.set(draft.company_name.clone());
        self.contractor_name.set(draft.contractor_name.clone());
        self.errors.set(None);
    }

    fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.get_untracked(),
            province: self.province.get_untracked(),
            company_name: self.company_name.get_untracked(),
            contractor_name: self.contractor_name.get_untracked(),
        }
    }

    /// 校验并转换为 multipart 字段，失败时记录错误供表单显示
    pub fn to_fields(&self, mode: FormMode) -> Result<ProjectFields, FormErrors> {
        let result = self.draft().validate(mode);
        self.errors.set(result.as_ref().err().cloned());
        result
    }

    pub fn error_for(&self, field: &str) -> Option<String> {
        self.errors.with(|errors| {
            errors
                .as_ref()
                .and_then(|e| e.message_for(field))
                .map(str::to_string)
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
