//! 新建项目表单状态
//!
//! 文本字段集中在一个 `ProjectDraft` 中；图片文件与其预览分开保存，
//! 预览是 `Send + Sync` 的普通数据，`File` 只能留在本地存储里。

use crate::web::preview::{PhotoPreview, object_url, revoke, revoke_all};
use leptos::prelude::*;
use vikasam_shared::validate::{ProjectDraft, check_image_batch};
use vikasam_shared::{AdminProfile, ApiError, ApiResult};
use web_sys::{File, FormData};

#[derive(Clone, Copy)]
pub struct FormState {
    pub draft: RwSignal<ProjectDraft>,
    pub previews: RwSignal<Vec<PhotoPreview>>,
    files: StoredValue<Vec<File>, LocalStorage>,
    // 重置时恢复的默认选区
    constituency: StoredValue<String>,
}

impl FormState {
    pub fn new(admin: Option<&AdminProfile>) -> Self {
        let draft = ProjectDraft::for_admin(admin);
        Self {
            constituency: StoredValue::new(draft.constituency.clone()),
            draft: RwSignal::new(draft),
            previews: RwSignal::new(Vec::new()),
            files: StoredValue::new_local(Vec::new()),
        }
    }

    /// 清空字段并释放所有预览地址
    pub fn reset(&self) {
        self.previews.try_update(|p| {
            revoke_all(p.iter());
            p.clear();
        });
        self.files.try_update_value(Vec::clear);
        let constituency = self.constituency.try_get_value().unwrap_or_default();
        self.draft.try_set(ProjectDraft {
            constituency,
            ..ProjectDraft::default()
        });
    }

    /// 组件卸载时调用，此时 signal 可能已被回收
    pub fn release(&self) {
        self.previews.try_with_untracked(|p| revoke_all(p));
    }

    pub fn to_draft(&self) -> ProjectDraft {
        self.draft.get_untracked()
    }

    pub fn image_count(&self) -> usize {
        self.previews.with(Vec::len)
    }

    /// 追加一批图片；超出上限时整批拒绝
    pub fn add_images(&self, selected: Vec<File>) -> ApiResult<()> {
        check_image_batch(self.previews.with_untracked(Vec::len), selected.len())?;

        let previews: Vec<PhotoPreview> = selected.iter().filter_map(object_url).collect();
        if previews.len() != selected.len() {
            revoke_all(&previews);
            return Err(ApiError::invalid_input("Could not read the selected images"));
        }

        self.previews.update(|p| p.extend(previews));
        self.files.update_value(|f| f.extend(selected));
        Ok(())
    }

    pub fn remove_image(&self, index: usize) {
        let removed = self.previews.try_update(|p| {
            if index < p.len() {
                Some(p.remove(index))
            } else {
                None
            }
        });
        if let Some(Some(preview)) = removed {
            revoke(&preview.url);
            self.files.update_value(|f| {
                if index < f.len() {
                    f.remove(index);
                }
            });
        }
    }

    /// 组装 multipart 请求体：文本字段加上每张图片一个 `images` 条目
    pub fn to_form_data(&self, draft: &ProjectDraft) -> ApiResult<FormData> {
        let js_err = |e: wasm_bindgen::JsValue| ApiError::network(format!("{:?}", e));

        let form = FormData::new().map_err(js_err)?;
        for (key, value) in draft.multipart_fields() {
            form.append_with_str(key, &value).map_err(js_err)?;
        }
        self.files.with_value(|files| {
            files
                .iter()
                .try_for_each(|file| form.append_with_blob("images", file).map_err(js_err))
        })?;
        Ok(form)
    }
}
