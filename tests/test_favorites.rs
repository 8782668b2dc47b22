mod common;

use hrdocs::db::models::{FavoriteView, StatusResponse};
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;

async fn favorite_count(env: &common::TestEnv, user_id: &str) -> u64 {
    env.db
        .collection::<mongodb::bson::Document>("favorite")
        .count_documents(doc! { "user_id": user_id })
        .await
        .unwrap()
}

#[tokio::test]
async fn repeated_favorite_upserts_single_record() {
    let env = common::TestEnv::start_seeded().await;
    let server = env.server();
    let user = format!("user-{}", uuid::Uuid::new_v4());

    let handbook = env.seeded(&server, "employee-handbook").await;

    for note in ["first read", "bookmark section 4", "final"] {
        let response: StatusResponse = server
            .post("/api/favorites")
            .json(&serde_json::json!({
                "user_id": user,
                "document_id": handbook.id,
                "note": note
            }))
            .await
            .json();
        assert_eq!(response.status, "ok");
    }

    assert_eq!(favorite_count(&env, &user).await, 1);

    let favorites: Vec<FavoriteView> = server
        .get("/api/favorites")
        .add_query_param("user_id", &user)
        .await
        .json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].document, handbook);
    assert_eq!(favorites[0].note.as_deref(), Some("final"));
}

#[tokio::test]
async fn concurrent_favorites_for_same_pair_do_not_duplicate() {
    let env = common::TestEnv::start_seeded().await;
    let server = env.server();
    let user = format!("user-{}", uuid::Uuid::new_v4());
    let form = env.seeded(&server, "pto-request-form").await;

    let calls = (0..8).map(|i| {
        let server = &server;
        let user = &user;
        let id = &form.id;
        async move {
            server
                .post("/api/favorites")
                .json(&serde_json::json!({
                    "user_id": user,
                    "document_id": id,
                    "note": format!("note {i}")
                }))
                .await
        }
    });
    futures::future::join_all(calls).await;

    assert_eq!(favorite_count(&env, &user).await, 1);
}

#[tokio::test]
async fn favorites_list_newest_first_with_saved_at() {
    let env = common::TestEnv::start_seeded().await;
    let server = env.server();
    let user = format!("user-{}", uuid::Uuid::new_v4());

    for canonical in ["remote-work-policy", "offer-letter-template"] {
        let doc = env.seeded(&server, canonical).await;
        server
            .post("/api/favorites")
            .json(&serde_json::json!({ "user_id": user, "document_id": doc.id }))
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let raw: Vec<serde_json::Value> = server
        .get("/api/favorites")
        .add_query_param("user_id", &user)
        .await
        .json();
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["title"], "Offer Letter Template");
    assert_eq!(raw[1]["title"], "Remote Work Policy");
    assert!(raw[0]["saved_at"].is_string());
    assert!(raw[0]["note"].is_null());
}

#[tokio::test]
async fn favorite_errors_do_not_write() {
    let env = common::TestEnv::start_seeded().await;
    let server = env.server_permissive();
    let user = format!("user-{}", uuid::Uuid::new_v4());

    server
        .post("/api/favorites")
        .json(&serde_json::json!({ "user_id": user, "document_id": "nope" }))
        .await
        .assert_status_bad_request();

    server
        .post("/api/favorites")
        .json(&serde_json::json!({
            "user_id": user,
            "document_id": ObjectId::new().to_hex()
        }))
        .await
        .assert_status_not_found();

    server
        .post("/api/favorites")
        .json(&serde_json::json!({ "document_id": ObjectId::new().to_hex() }))
        .await
        .assert_status_bad_request();

    assert_eq!(favorite_count(&env, &user).await, 0);
}

#[tokio::test]
async fn favorites_require_user_id() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    server
        .get("/api/favorites")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn favorite_of_deleted_document_is_dropped() {
    let env = common::TestEnv::start_seeded().await;
    let server = env.server();
    let user = format!("user-{}", uuid::Uuid::new_v4());
    let doc = env.seeded(&server, "exit-interview-checklist").await;

    server
        .post("/api/favorites")
        .json(&serde_json::json!({ "user_id": user, "document_id": doc.id }))
        .await;

    let oid = ObjectId::parse_str(&doc.id).unwrap();
    env.db
        .collection::<mongodb::bson::Document>("document")
        .delete_one(doc! { "_id": oid })
        .await
        .unwrap();

    let favorites: Vec<FavoriteView> = server
        .get("/api/favorites")
        .add_query_param("user_id", &user)
        .await
        .json();
    assert!(favorites.is_empty());
}
