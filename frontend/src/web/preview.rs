//! 本地图片预览
//!
//! 选中的文件通过 object URL 预览；移除、提交或组件卸载时必须 revoke。

use web_sys::{File, HtmlInputElement, Url};

/// 待上传的图片及其预览地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPreview {
    pub name: String,
    pub url: String,
}

pub fn object_url(file: &File) -> Option<PhotoPreview> {
    match Url::create_object_url_with_blob(file) {
        Ok(url) => Some(PhotoPreview {
            name: file.name(),
            url,
        }),
        Err(e) => {
            log::warn!("[Preview] failed to create object URL for {}: {:?}", file.name(), e);
            None
        }
    }
}

pub fn revoke(url: &str) {
    if let Err(e) = Url::revoke_object_url(url) {
        log::warn!("[Preview] failed to revoke {}: {:?}", url, e);
    }
}

pub fn revoke_all<'a>(previews: impl IntoIterator<Item = &'a PhotoPreview>) {
    for p in previews {
        revoke(&p.url);
    }
}

/// 取出文件输入框中选中的文件，并清空输入框以便再次选择同一文件
pub fn take_selected_files(input: &HtmlInputElement) -> Vec<File> {
    let files = input
        .files()
        .map(|list| (0..list.length()).filter_map(|i| list.item(i)).collect())
        .unwrap_or_default();
    input.set_value("");
    files
}
