//! 新建项目对话框
//!
//! 项目以 multipart 表单提交，图片作为 `images` 字段逐个附加。

mod basic_info_form;
mod form_state;
mod image_picker;

use crate::auth::use_auth;
use crate::components::common::ErrorBanner;
use crate::components::icons::Plus;
use crate::components::toast::use_toast;
use crate::config::use_config;
use crate::web::abort::RequestScope;
use basic_info_form::BasicInfoForm;
use form_state::FormState;
use image_picker::ImagePicker;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vikasam_shared::error::ServerMessage;
use vikasam_shared::{ApiError, ApiResult, Project};

/// 创建成功时回传服务器返回的项目；响应体无法解析时回传 `None`，由调用方重新加载
#[component]
pub fn AddProjectDialog(#[prop(into)] on_added: Callback<Option<Project>>) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let config = use_config();
    let scope = RequestScope::new();

    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let state = FormState::new(auth.admin().as_ref());
    let projects_url = StoredValue::new(config.projects_url());

    on_cleanup(move || state.release());

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    // 关闭即放弃：清空表单并释放预览地址
    let close = move || {
        set_open.try_set(false);
        set_error.try_set(None);
        state.reset();
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let draft = state.to_draft();
        if let Err(e) = draft.validate() {
            set_error.set(Some(e.message().to_string()));
            return;
        }
        let form = match state.to_form_data(&draft) {
            Ok(form) => form,
            Err(e) => {
                log::error!("[Admin] building project form failed: {}", e);
                set_error.set(Some("Failed to create project".into()));
                return;
            }
        };

        set_loading.set(true);
        set_error.set(None);
        let http = scope.http();
        let token = auth.token();
        let url = projects_url.get_value();

        spawn_local(async move {
            let result: ApiResult<Option<Project>> = async {
                let resp = http.post_form(&url, token.as_deref(), form).await?;
                if !resp.is_success() {
                    let message = ServerMessage::extract(&resp.body)
                        .unwrap_or_else(|| "Failed to create project".to_string());
                    return Err(ApiError::from_status(resp.status, message)
                        .in_op("projects.create"));
                }
                Ok(resp.json::<Project>().ok())
            }
            .await;

            match result {
                Ok(project) => {
                    log::info!("[Admin] project \"{}\" created", draft.title.trim());
                    toast.success("Project created successfully");
                    on_added.run(project);
                    close();
                }
                Err(e) if e.is_aborted() => return,
                Err(e) if auth.handle_error(&e) => {}
                Err(e) => {
                    log::error!("[Admin] create project failed: {}", e);
                    set_error.set(Some(e.message().to_string()));
                }
            }
            set_loading.try_set(false);
        });
    };

    let on_image_error = Callback::new(move |message: String| set_error.set(Some(message)));

    view! {
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" />
            "Add New Project"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| close()>
            <div class="modal-box w-11/12 max-w-3xl">
                <h3 class="font-bold text-lg">"Add New Project"</h3>
                <p class="py-2 text-base-content/70">"Describe the work and where it is happening."</p>

                <form on:submit=on_submit class="space-y-4">
                    <ErrorBanner message=error />
                    <BasicInfoForm state=state />
                    <ImagePicker state=state on_error=on_image_error />

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <button type="submit" disabled=move || loading.get() class="btn btn-primary">
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                            } else {
                                "Create Project".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
