#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use hrdocs::config::ExplicitSettings;
use hrdocs::db::bookmark_repository::{BookmarkRepository, MongoBookmarkRepository};
use hrdocs::db::diagnostics::MongoStoreProbe;
use hrdocs::db::favorite_repository::{FavoriteRepository, MongoFavoriteRepository};
use hrdocs::db::models::DocumentView;
use hrdocs::db::repository::{DocumentRepository, MongoDocumentRepository};
use hrdocs::state::AppState;

/// Holds a running MongoDB container and provides the Axum router for
/// integration tests.
///
/// The container is kept alive for as long as this struct lives. When
/// dropped, it is stopped and cleaned up automatically.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub db: mongodb::Database,
    pub router: Router,
    pub document_repo: Arc<dyn DocumentRepository>,
    pub favorite_repo: Arc<dyn FavoriteRepository>,
    pub bookmark_repo: Arc<dyn BookmarkRepository>,
}

impl TestEnv {
    /// Spin up MongoDB and build a router wired to real repositories.
    pub async fn start() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let db = mongo_client.database("hrdocs_test");

        let favorites = MongoFavoriteRepository::new(&db);
        favorites
            .ensure_indexes()
            .await
            .expect("Failed to create favorite indexes");

        let document_repo: Arc<dyn DocumentRepository> =
            Arc::new(MongoDocumentRepository::new(&db));
        let favorite_repo: Arc<dyn FavoriteRepository> = Arc::new(favorites);
        let bookmark_repo: Arc<dyn BookmarkRepository> =
            Arc::new(MongoBookmarkRepository::new(&db));

        let app_state = AppState {
            document_repo: document_repo.clone(),
            favorite_repo: favorite_repo.clone(),
            bookmark_repo: bookmark_repo.clone(),
            store_probe: Arc::new(MongoStoreProbe::new(&db)),
            explicit_settings: ExplicitSettings {
                database_url: true,
                database_name: false,
            },
        };

        Self {
            _mongo: mongo_container,
            db,
            router: hrdocs::app::router(app_state),
            document_repo,
            favorite_repo,
            bookmark_repo,
        }
    }

    /// Start and load the demo catalog.
    pub async fn start_seeded() -> Self {
        let env = Self::start().await;
        let inserted = hrdocs::demo_seeder::try_seed_if_empty(env.document_repo.as_ref())
            .await
            .expect("Failed to seed demo documents");
        assert_eq!(inserted, 10);
        env
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Helper: fetch the seeded document with the given canonical id.
    pub async fn seeded(&self, server: &axum_test::TestServer, canonical_id: &str) -> DocumentView {
        server
            .get(&format!("/api/canonical/{canonical_id}/latest"))
            .await
            .json::<DocumentView>()
    }
}
