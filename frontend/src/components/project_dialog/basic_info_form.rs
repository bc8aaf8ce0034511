//! 基础信息表单组件
//!
//! 项目名称、省份、公司名称（以及创建时的承包商名称）的输入渲染。

use leptos::prelude::*;
use naviswork_shared::validate::{CONTRACTOR_FIELD, FormMode, PROJECT_FIELDS};

use super::form_state::FormState;

#[component]
fn TextField(state: FormState, name: &'static str, label: &'static str) -> impl IntoView {
    let Some(value) = state.field(name) else {
        return ().into_any();
    };
    let placeholder = format!("Input {}", label.to_lowercase());

    view! {
        <div class="form-control">
            <label for=name class="label">
                <span class="label-text">
                    <span class="text-error">"* "</span>
                    {label}
                </span>
            </label>
            <input
                id=name
                type="text"
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
                class=move || {
                    if state.error_for(name).is_some() {
                        "input input-bordered input-error w-full"
                    } else {
                        "input input-bordered w-full"
                    }
                }
            />
            {move || state.error_for(name).map(|msg| view! {
                <span class="label-text-alt text-error mt-1">{msg}</span>
            })}
        </div>
    }
    .into_any()
}

/// 基础信息表单组件
#[component]
pub fn BasicInfoForm(state: FormState, mode: FormMode) -> impl IntoView {
    view! {
        {PROJECT_FIELDS
            .iter()
            .map(|(name, label)| view! { <TextField state=state name=*name label=*label /> })
            .collect_view()}
        {(mode == FormMode::Create).then(|| {
            let (name, label) = CONTRACTOR_FIELD;
            view! { <TextField state=state name=name label=label /> }
        })}
    }
}
