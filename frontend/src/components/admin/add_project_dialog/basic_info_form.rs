//! 基础信息表单组件
//!
//! 标题、描述、地点、赞助方与初始状态的输入。

use crate::components::common::{TextArea, TextField, lens};
use leptos::prelude::*;
use vikasam_shared::ProjectStatus;

use super::form_state::FormState;

#[component]
pub fn BasicInfoForm(state: FormState) -> impl IntoView {
    let draft = state.draft;

    view! {
        <TextField
            label="Project Title"
            field=lens(draft, |d| &d.title, |d| &mut d.title)
            placeholder="e.g. Village library renovation"
            required=true
        />
        <TextArea
            label="Description"
            field=lens(draft, |d| &d.description, |d| &mut d.description)
            rows=3
            required=true
        />

        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <TextField
                label="Village"
                field=lens(draft, |d| &d.village, |d| &mut d.village)
                required=true
            />
            <TextField
                label="Mandal"
                field=lens(draft, |d| &d.mandal, |d| &mut d.mandal)
                required=true
            />
            <TextField
                label="Constituency"
                field=lens(draft, |d| &d.constituency, |d| &mut d.constituency)
                required=true
            />
        </div>

        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <TextField
                label="Sponsor"
                field=lens(draft, |d| &d.sponsor, |d| &mut d.sponsor)
                placeholder="Optional"
            />
            <label class="form-control w-full">
                <div class="label">
                    <span class="label-text font-semibold">"Status"</span>
                </div>
                <select
                    class="select select-bordered w-full"
                    prop:value=move || draft.with(|d| d.status.as_str())
                    on:change=move |ev| {
                        if let Some(status) = ProjectStatus::parse(&event_target_value(&ev)) {
                            draft.update(|d| d.status = status);
                        }
                    }
                >
                    {ProjectStatus::ALL
                        .into_iter()
                        .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                        .collect_view()}
                </select>
            </label>
        </div>
    }
}
