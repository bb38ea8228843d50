//! 编译期配置
//!
//! 由 `option_env!` 在构建时注入，缺省时使用 `DEFAULT_*` 常量。

use leptos::prelude::*;
use vikasam_shared::DEFAULT_API_BASE_URL;

pub const DEFAULT_JOIN_RELAY_URL: &str = "https://script.google.com/macros/s/AKfycbwsl8ePJIsBx7B_0GHzU8EC7UhK5DR2mcE5_QSHJywiFVqaWIZNYlYiGJRhekyQV4KEog/exec";
pub const DEFAULT_CONTACT_RELAY_URL: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub join_relay_url: String,
    pub contact_relay_url: String,
    /// 联系表单转发服务的 access key；为空时联系表单提交直接报错
    pub contact_access_key: Option<String>,
    /// 问题上报照片的图床地址与上传预设，二者齐备才上传
    pub image_upload: Option<ImageUploadTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUploadTarget {
    pub url: String,
    pub preset: String,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl AppConfig {
    /// 构建时注入的配置
    pub fn from_build_env() -> Self {
        Self::resolve(|key| match key {
            "VIKASAM_API_URL" => option_env!("VIKASAM_API_URL"),
            "VIKASAM_JOIN_RELAY_URL" => option_env!("VIKASAM_JOIN_RELAY_URL"),
            "VIKASAM_CONTACT_RELAY_URL" => option_env!("VIKASAM_CONTACT_RELAY_URL"),
            "VIKASAM_CONTACT_ACCESS_KEY" => option_env!("VIKASAM_CONTACT_ACCESS_KEY"),
            "VIKASAM_IMAGE_UPLOAD_URL" => option_env!("VIKASAM_IMAGE_UPLOAD_URL"),
            "VIKASAM_IMAGE_UPLOAD_PRESET" => option_env!("VIKASAM_IMAGE_UPLOAD_PRESET"),
            _ => None,
        })
    }

    pub fn resolve<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let api_base_url = non_empty(lookup("VIKASAM_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let image_upload = match (
            non_empty(lookup("VIKASAM_IMAGE_UPLOAD_URL")),
            non_empty(lookup("VIKASAM_IMAGE_UPLOAD_PRESET")),
        ) {
            (Some(url), Some(preset)) => Some(ImageUploadTarget { url, preset }),
            _ => None,
        };

        Self {
            api_base_url,
            join_relay_url: non_empty(lookup("VIKASAM_JOIN_RELAY_URL"))
                .unwrap_or_else(|| DEFAULT_JOIN_RELAY_URL.to_string()),
            contact_relay_url: non_empty(lookup("VIKASAM_CONTACT_RELAY_URL"))
                .unwrap_or_else(|| DEFAULT_CONTACT_RELAY_URL.to_string()),
            contact_access_key: non_empty(lookup("VIKASAM_CONTACT_ACCESS_KEY")),
            image_upload,
        }
    }

    /// 管理端新建项目的 multipart 地址
    pub fn projects_url(&self) -> String {
        format!("{}/projects", self.api_base_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = AppConfig::resolve(|_| None);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.contact_relay_url, DEFAULT_CONTACT_RELAY_URL);
        assert_eq!(cfg.join_relay_url, DEFAULT_JOIN_RELAY_URL);
        assert!(cfg.contact_access_key.is_none());
        assert!(cfg.image_upload.is_none());
    }

    #[test]
    fn api_url_trailing_slash_is_trimmed() {
        let cfg = AppConfig::resolve(|key| match key {
            "VIKASAM_API_URL" => Some("http://localhost:5000/api/"),
            _ => None,
        });
        assert_eq!(cfg.api_base_url, "http://localhost:5000/api");
        assert_eq!(cfg.projects_url(), "http://localhost:5000/api/projects");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = AppConfig::resolve(|key| match key {
            "VIKASAM_CONTACT_ACCESS_KEY" => Some("   "),
            "VIKASAM_API_URL" => Some(""),
            _ => None,
        });
        assert!(cfg.contact_access_key.is_none());
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn image_upload_needs_both_values() {
        let only_url = AppConfig::resolve(|key| match key {
            "VIKASAM_IMAGE_UPLOAD_URL" => Some("https://img.example/upload"),
            _ => None,
        });
        assert!(only_url.image_upload.is_none());

        let both = AppConfig::resolve(|key| match key {
            "VIKASAM_IMAGE_UPLOAD_URL" => Some("https://img.example/upload"),
            "VIKASAM_IMAGE_UPLOAD_PRESET" => Some("reports"),
            _ => None,
        });
        assert_eq!(
            both.image_upload,
            Some(ImageUploadTarget {
                url: "https://img.example/upload".into(),
                preset: "reports".into()
            })
        );
    }
}
