use crate::error::ApiResult;
use crate::members::MemberFilter;
use crate::search::{ReportFilters, SuggestionField};
use crate::serde_helper::lenient_string;
use crate::stats::StatBag;
use crate::{
    AdminProfile, Member, MemberStatus, ProblemDetails, ProblemLocation, ProblemReport, Project,
    ProjectStatus,
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::marker::PhantomData;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// 不关心内容的响应体
pub type Ack = serde::de::IgnoredAny;

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// 是否必须携带管理员令牌；没有令牌时直接返回 Unauthorized
    const AUTH: bool;
    /// 错误追踪中使用的操作名
    const OPERATION: &'static str;

    /// 相对于 API 根地址的路径
    fn path(&self) -> String;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> ApiResult<Option<Value>> {
        Ok(None)
    }
}

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

// =========================================================
// 管理员登录
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct AdminLogin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub admin: AdminProfile,
}

impl ApiRequest for AdminLogin {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: bool = false;
    const OPERATION: &'static str = "admin.login";

    fn path(&self) -> String {
        "/admin/login".to_string()
    }

    fn body(&self) -> ApiResult<Option<Value>> {
        Ok(Some(serde_json::to_value(self)?))
    }
}

// =========================================================
// 项目
// =========================================================

/// 项目列表；公开页面按状态在服务器端筛选，管理端取全部
#[derive(Debug, Clone, Default)]
pub struct ListProjects {
    pub status: Option<ProjectStatus>,
}

impl ApiRequest for ListProjects {
    type Response = Vec<Project>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: bool = false;
    const OPERATION: &'static str = "projects.list";

    fn path(&self) -> String {
        "/projects".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.status
            .map(|s| vec![("status", s.as_str().to_string())])
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProjectStatus {
    pub id: String,
    pub status: ProjectStatus,
}

impl ApiRequest for UpdateProjectStatus {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Patch;
    const AUTH: bool = true;
    const OPERATION: &'static str = "projects.update_status";

    fn path(&self) -> String {
        format!("/projects/{}/status", segment(&self.id))
    }

    fn body(&self) -> ApiResult<Option<Value>> {
        Ok(Some(json!({ "status": self.status })))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub id: String,
}

impl ApiRequest for DeleteProject {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const AUTH: bool = true;
    const OPERATION: &'static str = "projects.delete";

    fn path(&self) -> String {
        format!("/projects/{}", segment(&self.id))
    }
}

// =========================================================
// 成员
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct ListMembers {
    pub filter: MemberFilter,
}

impl ApiRequest for ListMembers {
    type Response = Vec<Member>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: bool = true;
    const OPERATION: &'static str = "members.list";

    fn path(&self) -> String {
        "/members".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("status", self.filter.status.as_str().to_string())];
        if let Some(district) = &self.filter.district {
            params.push(("district", district.clone()));
        }
        params
    }
}

#[derive(Debug, Clone)]
pub struct UpdateMemberStatus {
    pub id: String,
    pub status: MemberStatus,
}

impl ApiRequest for UpdateMemberStatus {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Patch;
    const AUTH: bool = true;
    const OPERATION: &'static str = "members.update_status";

    fn path(&self) -> String {
        format!("/members/{}/status", segment(&self.id))
    }

    fn body(&self) -> ApiResult<Option<Value>> {
        Ok(Some(json!({ "status": self.status })))
    }
}

// =========================================================
// 问题报告
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct SearchProblems {
    pub filters: ReportFilters,
}

impl ApiRequest for SearchProblems {
    type Response = Vec<ProblemReport>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: bool = true;
    const OPERATION: &'static str = "problems.search";

    fn path(&self) -> String {
        "/problems".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.filters.to_params()
    }
}

#[derive(Debug, Clone)]
pub struct ProblemSuggestions {
    pub field: SuggestionField,
    pub query: String,
}

/// 联想词列表，元素可能是字符串或数字（邮编）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions(pub Vec<String>);

impl<'de> Deserialize<'de> for Suggestions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Suggestions(
            raw.iter()
                .map(lenient_string)
                .filter(|s| !s.is_empty())
                .collect(),
        ))
    }
}

impl ApiRequest for ProblemSuggestions {
    type Response = Suggestions;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: bool = true;
    const OPERATION: &'static str = "problems.suggestions";

    fn path(&self) -> String {
        "/problems/suggestions".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", self.field.as_str().to_string()),
            ("query", self.query.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct DeleteProblem {
    pub id: String,
}

impl ApiRequest for DeleteProblem {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const AUTH: bool = true;
    const OPERATION: &'static str = "problems.delete";

    fn path(&self) -> String {
        format!("/problems/{}", segment(&self.id))
    }
}

/// 公开的问题上报，无需登录
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProblem {
    pub category: String,
    pub problem_type: String,
    pub location: ProblemLocation,
    pub details: ProblemDetails,
    pub images: Vec<String>,
}

impl ApiRequest for SubmitProblem {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: bool = false;
    const OPERATION: &'static str = "problems.submit";

    fn path(&self) -> String {
        "/problems".to_string()
    }

    fn body(&self) -> ApiResult<Option<Value>> {
        Ok(Some(serde_json::to_value(self)?))
    }
}

// =========================================================
// 统计
// =========================================================

/// 读取统计包；响应保持原始 JSON，由 `StatBag::from_value` 宽松解析
#[derive(Debug, Clone, Copy)]
pub struct GetStats<S>(PhantomData<S>);

impl<S> Default for GetStats<S> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<S: StatBag> ApiRequest for GetStats<S> {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: bool = false;
    const OPERATION: &'static str = "stats.get";

    fn path(&self) -> String {
        S::ENDPOINT.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateStats<S> {
    pub stats: S,
}

impl<S: StatBag> ApiRequest for UpdateStats<S> {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Patch;
    const AUTH: bool = true;
    const OPERATION: &'static str = "stats.update";

    fn path(&self) -> String {
        S::update_path()
    }

    fn body(&self) -> ApiResult<Option<Value>> {
        Ok(Some(self.stats.to_body()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{HeroStats, TransparencyStats};

    #[test]
    fn ids_are_escaped_in_paths() {
        let req = DeleteProject {
            id: "a/b c".to_string(),
        };
        assert_eq!(req.path(), "/projects/a%2Fb%20c");
    }

    #[test]
    fn status_body_uses_wire_string() {
        let req = UpdateProjectStatus {
            id: "p1".into(),
            status: ProjectStatus::InProgress,
        };
        assert_eq!(req.path(), "/projects/p1/status");
        assert_eq!(
            req.body().unwrap(),
            Some(json!({"status": "In Progress"}))
        );

        let member = UpdateMemberStatus {
            id: "m1".into(),
            status: MemberStatus::Approved,
        };
        assert_eq!(member.body().unwrap(), Some(json!({"status": "approved"})));
    }

    #[test]
    fn member_query_includes_district_only_when_scoped() {
        let req = ListMembers::default();
        assert_eq!(req.query(), vec![("status", "pending".to_string())]);

        let scoped = ListMembers {
            filter: MemberFilter {
                status: MemberStatus::Rejected,
                district: Some("Guntur".into()),
            },
        };
        assert_eq!(
            scoped.query(),
            vec![
                ("status", "rejected".to_string()),
                ("district", "Guntur".to_string())
            ]
        );
    }

    #[test]
    fn public_project_list_filters_by_status() {
        assert!(ListProjects::default().query().is_empty());
        let solved = ListProjects {
            status: Some(ProjectStatus::Solved),
        };
        assert_eq!(solved.query(), vec![("status", "Solved".to_string())]);
    }

    #[test]
    fn suggestions_accept_mixed_values() {
        let parsed: Suggestions = serde_json::from_str(r#"["Guntur", 522001, null, ""]"#).unwrap();
        assert_eq!(parsed.0, vec!["Guntur".to_string(), "522001".to_string()]);
        let empty: Suggestions = serde_json::from_str("null").unwrap();
        assert!(empty.0.is_empty());
    }

    #[test]
    fn stats_paths() {
        assert_eq!(GetStats::<HeroStats>::default().path(), "/stats");
        let update = UpdateStats {
            stats: TransparencyStats::default(),
        };
        assert_eq!(update.path(), "/stats-transparency/update");
        assert!(update.body().unwrap().is_some());
    }
}
