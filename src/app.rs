use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::state::AppState;

/// Build the HTTP router with every catalog route.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::documents::root_handler))
        .route("/api/suggested", get(api::documents::suggested_handler))
        .route("/api/recents", get(api::documents::recents_handler))
        .route("/api/documents", get(api::documents::search_handler))
        .route(
            "/api/documents/{id}",
            get(api::documents::get_document_handler),
        )
        .route(
            "/api/canonical/{canonical_id}/latest",
            get(api::documents::get_latest_handler),
        )
        .route(
            "/api/favorites",
            get(api::favorites::list_favorites_handler).post(api::favorites::add_favorite_handler),
        )
        .route(
            "/api/bookmarks",
            get(api::bookmarks::list_bookmarks_handler).post(api::bookmarks::add_bookmark_handler),
        )
        .route("/test", get(api::diagnostics::diagnostics_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum_test::TestServer;

    use super::*;
    use crate::config::ExplicitSettings;
    use crate::db::diagnostics::MockStoreProbe;
    use crate::db::mock::{MockBookmarkRepo, MockDocumentRepo, MockFavoriteRepo};
    use crate::db::models::{BookmarkView, DocumentView};
    use crate::demo_seeder::demo_documents;

    fn server() -> TestServer {
        let documents = MockDocumentRepo::new();
        for document in demo_documents() {
            documents.add(document);
        }

        let state = AppState {
            document_repo: Arc::new(documents),
            favorite_repo: Arc::new(MockFavoriteRepo::new()),
            bookmark_repo: Arc::new(MockBookmarkRepo::new()),
            store_probe: Arc::new(MockStoreProbe::new()),
            explicit_settings: ExplicitSettings::default(),
        };
        TestServer::builder()
            .try_build(router(state))
            .expect("Failed to build TestServer")
    }

    #[tokio::test]
    async fn test_repeated_search_keys_use_last_value() {
        let server = server();

        let response = server
            .get("/api/documents")
            .add_query_param("q", "form")
            .add_query_param("q", "handbook")
            .await;
        response.assert_status_ok();
        let results: Vec<DocumentView> = response.json();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Employee Handbook");

        let results: Vec<DocumentView> = server
            .get("/api/documents")
            .add_query_param("departments", "Finance")
            .add_query_param("departments", "Design")
            .await
            .json();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_repeated_recents_limit_uses_last_value() {
        let response = server()
            .get("/api/recents")
            .add_query_param("limit", "1")
            .add_query_param("limit", "2")
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<DocumentView>>().len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_bookmark_filter_keys_are_accepted() {
        let response = server()
            .get("/api/bookmarks")
            .add_query_param("owner", "a")
            .add_query_param("owner", "b")
            .await;
        response.assert_status_ok();
        assert!(response.json::<Vec<BookmarkView>>().is_empty());
    }

    #[tokio::test]
    async fn test_query_errors_use_json_body() {
        let server = server();

        let response = server
            .get("/api/bookmarks")
            .add_query_param("shared", "maybe")
            .await;
        response.assert_status_bad_request();
        assert!(response.json::<serde_json::Value>()["error"].is_string());

        let response = server.get("/api/favorites").await;
        response.assert_status_bad_request();
        assert!(response.json::<serde_json::Value>()["error"]
            .as_str()
            .is_some_and(|msg| msg.contains("user_id")));
    }
}
