//! 表单草稿与客户端校验
//!
//! 只做必填项检查，其余一律交给服务器。校验失败返回 `InvalidInput`。

use crate::error::{ApiError, ApiResult};
use crate::{AdminProfile, ProjectStatus};
use serde::Serialize;

pub const MAX_PROJECT_IMAGES: usize = 5;

fn require(fields: &[(&'static str, &String)]) -> ApiResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| *k)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::invalid_input(format!(
            "Please fill in all required fields: {}",
            missing.join(", ")
        )))
    }
}

// =========================================================
// 新建项目
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub village: String,
    pub mandal: String,
    pub constituency: String,
    pub sponsor: String,
    pub status: ProjectStatus,
}

impl ProjectDraft {
    /// 选区默认取管理员所属选区
    pub fn for_admin(admin: Option<&AdminProfile>) -> Self {
        Self {
            constituency: admin
                .and_then(|a| a.constituency.clone())
                .unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        require(&[
            ("title", &self.title),
            ("description", &self.description),
            ("village", &self.village),
            ("mandal", &self.mandal),
            ("constituency", &self.constituency),
        ])
        .map_err(|e| e.in_op("project_draft.validate"))
    }

    /// multipart 文本字段；图片由调用方以 `images` 逐个追加
    pub fn multipart_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.trim().to_string()),
            ("description", self.description.trim().to_string()),
            ("village", self.village.trim().to_string()),
            ("mandal", self.mandal.trim().to_string()),
            ("constituency", self.constituency.trim().to_string()),
            ("sponsor", self.sponsor.trim().to_string()),
            ("status", self.status.as_str().to_string()),
        ]
    }
}

/// 追加一批图片前检查数量上限
pub fn check_image_batch(existing: usize, incoming: usize) -> ApiResult<()> {
    if existing + incoming > MAX_PROJECT_IMAGES {
        Err(ApiError::invalid_input(format!(
            "Maximum {} images allowed",
            MAX_PROJECT_IMAGES
        )))
    } else {
        Ok(())
    }
}

// =========================================================
// 加入申请
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinApplication {
    pub name: String,
    pub role: String,
    pub district: String,
    pub mandal: String,
    pub village: String,
    pub college_profession: String,
    pub contact: String,
    pub motivation: String,
}

impl JoinApplication {
    pub fn validate(&self) -> ApiResult<()> {
        require(&[
            ("name", &self.name),
            ("role", &self.role),
            ("district", &self.district),
            ("mandal", &self.mandal),
            ("village", &self.village),
            ("collegeProfession", &self.college_profession),
            ("contact", &self.contact),
            ("motivation", &self.motivation),
        ])
        .map_err(|e| e.in_op("join.validate"))
    }
}

// =========================================================
// 联系表单
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> ApiResult<()> {
        require(&[
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ])?;
        if !self.email.contains('@') {
            return Err(ApiError::invalid_input("Please enter a valid email address")
                .in_op("contact.validate"));
        }
        Ok(())
    }

    /// web3forms 请求体
    pub fn relay_body(&self, access_key: &str) -> serde_json::Value {
        serde_json::json!({
            "access_key": access_key,
            "subject": format!("New message from {}", self.name.trim()),
            "name": self.name.trim(),
            "email": self.email.trim(),
            "message": self.message.trim(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_draft_prefills_constituency() {
        let admin = AdminProfile {
            username: "tenali".into(),
            role: "constituency".into(),
            district: None,
            constituency: Some("Tenali".into()),
        };
        let draft = ProjectDraft::for_admin(Some(&admin));
        assert_eq!(draft.constituency, "Tenali");
        assert_eq!(draft.status, ProjectStatus::Pending);
        assert_eq!(ProjectDraft::for_admin(None).constituency, "");
    }

    #[test]
    fn project_draft_requires_core_fields() {
        let mut draft = ProjectDraft {
            title: "Library".into(),
            description: "Village library".into(),
            village: "Kothapalli".into(),
            mandal: "Tenali".into(),
            constituency: String::new(),
            ..ProjectDraft::default()
        };
        let err = draft.validate().unwrap_err();
        assert!(err.message().contains("constituency"));

        draft.constituency = "Tenali".into();
        assert!(draft.validate().is_ok());

        let fields = draft.multipart_fields();
        assert!(fields.contains(&("status", "Pending".to_string())));
        assert!(fields.contains(&("sponsor", String::new())));
    }

    #[test]
    fn image_limit() {
        assert!(check_image_batch(0, 5).is_ok());
        assert!(check_image_batch(3, 2).is_ok());
        let err = check_image_batch(3, 3).unwrap_err();
        assert_eq!(err.message(), "Maximum 5 images allowed");
    }

    #[test]
    fn join_application_serializes_camel_case() {
        let app = JoinApplication {
            name: "Sita".into(),
            role: "Volunteer".into(),
            district: "Krishna".into(),
            mandal: "Gudivada".into(),
            village: "Ramapuram".into(),
            college_profession: "Student".into(),
            contact: "9000000000".into(),
            motivation: "Serve".into(),
        };
        assert!(app.validate().is_ok());
        let body = serde_json::to_value(&app).unwrap();
        assert_eq!(body["collegeProfession"], "Student");

        let blank = JoinApplication::default();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn contact_requires_email_shape() {
        let mut msg = ContactMessage {
            name: "A".into(),
            email: "not-an-email".into(),
            message: "Hello".into(),
        };
        assert!(msg.validate().is_err());
        msg.email = "a@b.in".into();
        assert!(msg.validate().is_ok());

        let body = msg.relay_body("key-123");
        assert_eq!(body["access_key"], "key-123");
        assert_eq!(body["email"], "a@b.in");
    }
}
