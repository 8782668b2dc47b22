mod common;

use hrdocs::db::models::{BookmarkView, StatusResponse};
use mongodb::bson::oid::ObjectId;

#[tokio::test]
async fn bookmarks_are_appended_without_dedup() {
    let env = common::TestEnv::start_seeded().await;
    let server = env.server();
    let owner = format!("team-{}", uuid::Uuid::new_v4());
    let guide = env.seeded(&server, "benefits-enrollment-guide").await;

    for _ in 0..2 {
        let response: StatusResponse = server
            .post("/api/bookmarks")
            .json(&serde_json::json!({
                "name": "Open enrollment",
                "owner": owner,
                "document_id": guide.id
            }))
            .await
            .json();
        assert_eq!(response.status, "ok");
    }

    let bookmarks: Vec<BookmarkView> = server
        .get("/api/bookmarks")
        .add_query_param("owner", &owner)
        .await
        .json();
    assert_eq!(bookmarks.len(), 2);
    assert!(bookmarks.iter().all(|b| b.document == guide));
    assert!(bookmarks.iter().all(|b| !b.bookmark.shared));
}

#[tokio::test]
async fn bookmarks_filter_by_owner_and_shared() {
    let env = common::TestEnv::start_seeded().await;
    let server = env.server();
    let handbook = env.seeded(&server, "employee-handbook").await;
    let form = env.seeded(&server, "expense-reimbursement-form").await;

    let entries = [
        ("Policies", "people-ops", &handbook, true),
        ("Expenses", "people-ops", &form, false),
        ("My handbook", "ana", &handbook, false),
    ];
    for (name, owner, doc, shared) in entries {
        server
            .post("/api/bookmarks")
            .json(&serde_json::json!({
                "name": name,
                "owner": owner,
                "document_id": doc.id,
                "shared": shared
            }))
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let all: Vec<BookmarkView> = server.get("/api/bookmarks").await.json();
    let names: Vec<_> = all.iter().map(|b| b.bookmark.name.as_str()).collect();
    assert_eq!(names, vec!["My handbook", "Expenses", "Policies"]);

    let team: Vec<BookmarkView> = server
        .get("/api/bookmarks")
        .add_query_param("owner", "people-ops")
        .await
        .json();
    assert_eq!(team.len(), 2);

    let shared: Vec<serde_json::Value> = server
        .get("/api/bookmarks")
        .add_query_param("shared", "true")
        .await
        .json();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0]["title"], "Employee Handbook");
    assert_eq!(shared[0]["bookmark"]["name"], "Policies");
    assert_eq!(shared[0]["bookmark"]["owner"], "people-ops");
    assert_eq!(shared[0]["bookmark"]["shared"], true);

    let private_team: Vec<BookmarkView> = server
        .get("/api/bookmarks")
        .add_query_param("owner", "people-ops")
        .add_query_param("shared", "false")
        .await
        .json();
    assert_eq!(private_team.len(), 1);
    assert_eq!(private_team[0].document, form);
}

#[tokio::test]
async fn bookmark_errors_do_not_write() {
    let env = common::TestEnv::start_seeded().await;
    let server = env.server_permissive();

    server
        .post("/api/bookmarks")
        .json(&serde_json::json!({
            "name": "Broken",
            "owner": "ana",
            "document_id": "12345"
        }))
        .await
        .assert_status_bad_request();

    server
        .post("/api/bookmarks")
        .json(&serde_json::json!({
            "name": "Missing",
            "owner": "ana",
            "document_id": ObjectId::new().to_hex()
        }))
        .await
        .assert_status_not_found();

    server
        .get("/api/bookmarks")
        .add_query_param("shared", "sometimes")
        .await
        .assert_status_bad_request();

    let bookmarks: Vec<BookmarkView> = server.get("/api/bookmarks").await.json();
    assert!(bookmarks.is_empty());
}
