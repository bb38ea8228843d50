use super::mock::MockHttpClient;
use super::*;
use crate::board::ProjectBoard;
use crate::members::MemberFilter;
use crate::protocol::{
    AdminLogin, DeleteProject, ListMembers, ListProjects, ProblemSuggestions, SearchProblems,
    UpdateProjectStatus,
};
use crate::search::{ReportFilters, SuggestionField};
use crate::stats::{AboutStats, HeroStats};
use crate::{ApiErrorKind, MemberStatus, ProjectStatus};
use serde_json::json;

const BASE: &str = "https://api.test/api";

fn client() -> ApiClient<MockHttpClient> {
    ApiClient::new(MockHttpClient::new(), format!("{}/", BASE)).with_token(Some("tok".into()))
}

fn projects_json() -> serde_json::Value {
    json!([
        {"_id": "p1", "title": "Road", "mandal": "Tenali", "constituency": "Tenali", "status": "Pending"},
        {"_id": "p2", "title": "Well", "mandal": "Ponnur", "constituency": "Ponnur", "status": "Solved"},
        {"_id": "p3", "title": "School", "mandal": "Tenali", "constituency": "Tenali", "status": "In Progress"}
    ])
}

#[tokio::test]
async fn bearer_token_and_json_headers_are_attached() {
    let api = client();
    api.http().mock_json(
        HttpMethod::Patch,
        &format!("{}/projects/p1/status", BASE),
        200,
        json!({"ok": true}),
    );

    api.call(&UpdateProjectStatus {
        id: "p1".into(),
        status: ProjectStatus::Solved,
    })
    .await
    .unwrap();

    let requests = api.http().requests.borrow();
    let req = &requests[0];
    assert_eq!(req.method, HttpMethod::Patch);
    assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer tok");
    assert_eq!(req.headers.get("Content-Type").unwrap(), "application/json");
    assert_eq!(req.body.as_deref(), Some(r#"{"status":"Solved"}"#));
}

#[tokio::test]
async fn status_change_updates_only_matching_project_after_success() {
    let api = client();
    api.http()
        .mock_json(HttpMethod::Get, &format!("{}/projects", BASE), 200, projects_json());
    api.http().mock_response(
        HttpMethod::Patch,
        &format!("{}/projects/p1/status", BASE),
        200,
        "",
    );

    let mut board = ProjectBoard::new(api.call(&ListProjects::default()).await.unwrap());
    let before = board.all().to_vec();

    let req = UpdateProjectStatus {
        id: "p1".into(),
        status: ProjectStatus::InProgress,
    };
    api.call(&req).await.unwrap();
    assert!(board.apply_status(&req.id, req.status));

    assert_eq!(board.all()[0].status, ProjectStatus::InProgress);
    assert_eq!(board.all()[1], before[1]);
    assert_eq!(board.all()[2], before[2]);
    assert_eq!(board.counts().in_progress, 2);
}

#[tokio::test]
async fn failed_patch_leaves_board_untouched() {
    let api = client();
    api.http().mock_json(
        HttpMethod::Patch,
        &format!("{}/projects/p2/status", BASE),
        500,
        json!({"message": "Database unavailable"}),
    );

    let board = ProjectBoard::new(serde_json::from_value(projects_json()).unwrap());
    let err = api
        .call(&UpdateProjectStatus {
            id: "p2".into(),
            status: ProjectStatus::Pending,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.user_message(), "Database unavailable");
    assert_eq!(err.spans()[0].operation, "projects.update_status");
    assert_eq!(board.all()[1].status, ProjectStatus::Solved);
}

#[tokio::test]
async fn delete_issues_one_call_and_removes_one_entry() {
    let api = client();
    api.http()
        .mock_json(HttpMethod::Delete, &format!("{}/projects/p3", BASE), 200, json!({}));

    let mut board = ProjectBoard::new(serde_json::from_value(projects_json()).unwrap());
    api.call(&DeleteProject { id: "p3".into() }).await.unwrap();
    board.remove("p3");

    assert_eq!(api.http().request_count(), 1);
    assert_eq!(api.http().requests.borrow()[0].method, HttpMethod::Delete);
    assert_eq!(board.all().len(), 2);
    assert!(board.all().iter().all(|p| p.id != "p3"));
}

#[tokio::test]
async fn admin_calls_without_token_fail_before_sending() {
    let api = ApiClient::new(MockHttpClient::new(), BASE);
    let err = api
        .call(&ListMembers {
            filter: MemberFilter::default(),
        })
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(api.http().request_count(), 0);
}

#[tokio::test]
async fn expired_session_maps_to_unauthorized() {
    let api = client();
    api.http().mock_json(
        HttpMethod::Get,
        &format!("{}/members?status=pending", BASE),
        401,
        json!({"message": "Token expired"}),
    );
    let err = api.call(&ListMembers::default()).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.status, Some(401));
}

#[tokio::test]
async fn member_query_is_scoped_and_encoded() {
    let api = client();
    let url = format!("{}/members?status=approved&district=West%20Godavari", BASE);
    api.http().mock_json(
        HttpMethod::Get,
        &url,
        200,
        json!([{"_id": "m1", "name": "Anil", "status": "approved", "district": "West Godavari"}]),
    );

    let members = api
        .call(&ListMembers {
            filter: MemberFilter {
                status: MemberStatus::Approved,
                district: Some("West Godavari".into()),
            },
        })
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    assert!(members[0].status.actions().is_empty());
}

#[tokio::test]
async fn search_and_suggestions_build_query_strings() {
    let api = client();
    api.http().mock_json(
        HttpMethod::Get,
        &format!("{}/problems?pinCode=522201&category=water", BASE),
        200,
        json!([{"_id": "r1", "category": "water"}]),
    );
    api.http().mock_json(
        HttpMethod::Get,
        &format!("{}/problems/suggestions?type=district&query=Gun", BASE),
        200,
        json!(["Guntur"]),
    );

    let filters = ReportFilters {
        pin_code: "522201".into(),
        category: "water".into(),
        ..ReportFilters::default()
    };
    let results = api.call(&SearchProblems { filters }).await.unwrap();
    assert_eq!(results.len(), 1);

    let suggestions = api
        .call(&ProblemSuggestions {
            field: SuggestionField::District,
            query: "Gun".into(),
        })
        .await
        .unwrap();
    assert_eq!(suggestions.0, vec!["Guntur".to_string()]);
}

#[tokio::test]
async fn login_is_public_and_returns_profile() {
    let api = ApiClient::new(MockHttpClient::new(), BASE);
    api.http().mock_json(
        HttpMethod::Post,
        &format!("{}/admin/login", BASE),
        200,
        json!({"token": "abc", "admin": {"username": "root", "role": "super", "district": "Guntur"}}),
    );
    let resp = api
        .call(&AdminLogin {
            username: "root".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(resp.token, "abc");
    assert_eq!(resp.admin.district.as_deref(), Some("Guntur"));
    assert!(
        api.http().requests.borrow()[0]
            .headers
            .get("Authorization")
            .is_none()
    );
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_text() {
    let api = ApiClient::new(MockHttpClient::new(), BASE);
    let err = api.call(&ListProjects::default()).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::NotFound);
    assert_eq!(err.message(), "HTTP error! status: 404");
}

#[tokio::test]
async fn stats_are_parsed_leniently() {
    let api = ApiClient::new(MockHttpClient::new(), BASE);
    api.http().mock_json(
        HttpMethod::Get,
        &format!("{}/stats-about", BASE),
        200,
        json!({"districts": "13", "impactGenerated": 500000000}),
    );
    let about: AboutStats = api.stats().await.unwrap();
    assert_eq!(about.districts, 13.0);
    assert_eq!(about.yearly_fund, 500000000.0);
}

#[tokio::test]
async fn hero_update_uses_envelope() {
    let api = client();
    api.http().mock_json(
        HttpMethod::Patch,
        &format!("{}/stats/update", BASE),
        200,
        json!({"success": true, "stats": {"villages": 12, "problems": 3, "funds": 1.5, "volunteers": 40}}),
    );
    let updated = api
        .update_stats(HeroStats {
            villages: 12.0,
            problems: 3.0,
            funds: 1.5,
            volunteers: 40.0,
        })
        .await
        .unwrap();
    assert_eq!(updated.funds, 1.5);

    api.http().mock_json(
        HttpMethod::Patch,
        &format!("{}/stats/update", BASE),
        200,
        json!({"success": false}),
    );
    assert!(api.update_stats(HeroStats::default()).await.is_err());
}

#[test]
fn query_encoding_matches_url_search_params() {
    assert_eq!(
        encode_query(&[("query", "a b&c".to_string()), ("type", "pinCode".to_string())]),
        "query=a%20b%26c&type=pinCode"
    );
}
