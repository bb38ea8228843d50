//! Andhra Vikasam 共享领域层
//!
//! 不依赖 DOM / web_sys，可在原生目标上测试：
//! - 领域模型（本文件）
//! - `protocol` / `client`: API 契约与客户端
//! - `board` / `members` / `search` / `wizard`: 各管理视图与向导的业务规则
//! - `stats` / `format`: 统计数据与展示格式化
//! - `cache`: 按端点缓存的查询状态

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod board;
pub mod cache;
pub mod client;
pub mod error;
pub mod format;
pub mod members;
pub mod paginate;
pub mod protocol;
pub mod search;
pub mod serde_helper;
pub mod stats;
pub mod validate;
pub mod wizard;

pub use error::{ApiError, ApiErrorKind, ApiResult};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const DEFAULT_API_BASE_URL: &str = "https://andhravikasam-server.onrender.com/api";

// =========================================================
// 项目 (Project)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Solved,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Pending,
        ProjectStatus::InProgress,
        ProjectStatus::Solved,
    ];

    /// 与后端一致的线上字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "Pending",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Solved => "Solved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub village: String,
    #[serde(default)]
    pub mandal: String,
    #[serde(default)]
    pub constituency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(
        default,
        rename = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Project {
    /// 封面图，缺省时使用站内默认图片
    pub fn cover_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or("/default-project.jpg")
    }

    /// 空字符串的赞助方视为未填写
    pub fn sponsor(&self) -> Option<&str> {
        self.sponsor.as_deref().filter(|s| !s.trim().is_empty())
    }
}

// =========================================================
// 成员 (Member)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl MemberStatus {
    pub const ALL: [MemberStatus; 3] = [
        MemberStatus::Pending,
        MemberStatus::Approved,
        MemberStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Pending => "pending",
            MemberStatus::Approved => "approved",
            MemberStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub district: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub status: MemberStatus,
}

/// 志愿者层级，仅作为加入表单中的标签，不附带任何权限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolunteerRole {
    Volunteer,
    VillageIncharge,
    MandalIncharge,
    ConstituencyIncharge,
    DistrictIncharge,
}

impl VolunteerRole {
    pub const ALL: [VolunteerRole; 5] = [
        VolunteerRole::Volunteer,
        VolunteerRole::VillageIncharge,
        VolunteerRole::MandalIncharge,
        VolunteerRole::ConstituencyIncharge,
        VolunteerRole::DistrictIncharge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VolunteerRole::Volunteer => "Volunteer",
            VolunteerRole::VillageIncharge => "Village Incharge",
            VolunteerRole::MandalIncharge => "Mandal Incharge",
            VolunteerRole::ConstituencyIncharge => "Constituency Incharge",
            VolunteerRole::DistrictIncharge => "District Incharge",
        }
    }
}

// =========================================================
// 问题报告 (Problem Report)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemCategory {
    Infrastructure,
    Water,
    Electricity,
    Healthcare,
    Education,
    Environment,
    Transportation,
    Other,
}

impl ProblemCategory {
    pub const ALL: [ProblemCategory; 8] = [
        ProblemCategory::Infrastructure,
        ProblemCategory::Water,
        ProblemCategory::Electricity,
        ProblemCategory::Healthcare,
        ProblemCategory::Education,
        ProblemCategory::Environment,
        ProblemCategory::Transportation,
        ProblemCategory::Other,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ProblemCategory::Infrastructure => "infrastructure",
            ProblemCategory::Water => "water",
            ProblemCategory::Electricity => "electricity",
            ProblemCategory::Healthcare => "healthcare",
            ProblemCategory::Education => "education",
            ProblemCategory::Environment => "environment",
            ProblemCategory::Transportation => "transportation",
            ProblemCategory::Other => "other",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProblemCategory::Infrastructure => "Infrastructure",
            ProblemCategory::Water => "Water & Sanitation",
            ProblemCategory::Electricity => "Electricity",
            ProblemCategory::Healthcare => "Healthcare",
            ProblemCategory::Education => "Education",
            ProblemCategory::Environment => "Environment",
            ProblemCategory::Transportation => "Transportation",
            ProblemCategory::Other => "Other Issues",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProblemCategory::Infrastructure => "Roads, bridges, buildings, public facilities",
            ProblemCategory::Water => "Water supply, drainage, sewage, toilets",
            ProblemCategory::Electricity => "Power supply, street lights, electrical issues",
            ProblemCategory::Healthcare => "Medical facilities, equipment, staff shortage",
            ProblemCategory::Education => "Schools, teachers, educational resources",
            ProblemCategory::Environment => "Pollution, waste management, cleanliness",
            ProblemCategory::Transportation => "Public transport, connectivity issues",
            ProblemCategory::Other => "Any other community problem",
        }
    }

    pub fn timeline(&self) -> &'static str {
        match self {
            ProblemCategory::Infrastructure => "Est. Timeline: 2-4 weeks",
            ProblemCategory::Water => "Est. Timeline: 1-3 weeks",
            ProblemCategory::Electricity => "Est. Timeline: 1-2 weeks",
            ProblemCategory::Healthcare => "Est. Timeline: 2-6 weeks",
            ProblemCategory::Education => "Est. Timeline: 3-8 weeks",
            ProblemCategory::Environment => "Est. Timeline: 1-4 weeks",
            ProblemCategory::Transportation => "Est. Timeline: 2-6 weeks",
            ProblemCategory::Other => "Est. Timeline: 1-4 weeks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 4] = [
        UrgencyLevel::Low,
        UrgencyLevel::Medium,
        UrgencyLevel::High,
        UrgencyLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
            UrgencyLevel::Critical => "Critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemLocation {
    pub village: String,
    pub district: String,
    pub state: String,
    pub pin_code: String,
    pub landmark: String,
    /// `"lat,lng"`，未获取时为空
    pub gps_location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemDetails {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "serde_helper::de_lenient_string")]
    pub people_affected: String,
    pub urgency_level: UrgencyLevel,
    pub name: String,
    pub contact: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemReport {
    #[serde(rename = "_id")]
    pub id: String,
    /// 读取侧保留原始字符串，后端可能返回枚举之外的分类
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: ProblemLocation,
    #[serde(default)]
    pub details: ProblemDetails,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProblemReport {
    pub fn category_title(&self) -> String {
        ProblemCategory::from_id(&self.category)
            .map(|c| c.title().to_string())
            .unwrap_or_else(|| self.category.clone())
    }

    /// 卡片上 "+N" 角标的数量
    pub fn extra_image_count(&self) -> usize {
        self.images.len().saturating_sub(1)
    }
}

// =========================================================
// 管理员 (Admin)
// =========================================================

/// 登录后写入 `adminData` 的管理员资料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_decodes_backend_shape() {
        let raw = r#"{
            "_id": "p1",
            "title": "Borewell repair",
            "description": "Hand pump broken",
            "village": "Kothapalli",
            "mandal": "Tenali",
            "constituency": "Tenali",
            "status": "In Progress",
            "images": ["https://img/1.jpg"],
            "createdAt": "2024-03-12T10:00:00.000Z",
            "__v": 0
        }"#;
        let project: Project = serde_json::from_str(raw).unwrap();
        assert_eq!(project.id, "p1");
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.sponsor(), None);
        assert_eq!(project.cover_image(), "https://img/1.jpg");
        assert!(project.created_at.is_some());
    }

    #[test]
    fn project_without_images_uses_default_cover() {
        let project: Project = serde_json::from_str(r#"{"_id":"p2","sponsor":"  "}"#).unwrap();
        assert_eq!(project.cover_image(), "/default-project.jpg");
        assert_eq!(project.sponsor(), None);
        assert_eq!(project.status, ProjectStatus::Pending);
    }

    #[test]
    fn status_strings_round_trip_through_parse() {
        for status in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProjectStatus::parse("in progress"), None);
        assert_eq!(MemberStatus::parse("approved"), Some(MemberStatus::Approved));
    }

    #[test]
    fn report_accepts_numeric_people_affected() {
        let raw = r#"{
            "_id": "r1",
            "category": "water",
            "details": {"title": "No water", "peopleAffected": 120},
            "images": ["a", "b", "c"]
        }"#;
        let report: ProblemReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.details.people_affected, "120");
        assert_eq!(report.details.urgency_level, UrgencyLevel::Medium);
        assert_eq!(report.category_title(), "Water & Sanitation");
        assert_eq!(report.extra_image_count(), 2);
    }

    #[test]
    fn unknown_category_falls_back_to_raw_text() {
        let report: ProblemReport =
            serde_json::from_str(r#"{"_id":"r2","category":"roads"}"#).unwrap();
        assert_eq!(report.category_title(), "roads");
    }
}
