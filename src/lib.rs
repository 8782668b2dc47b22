pub mod app;
pub mod config;
pub mod demo_seeder;
pub mod error;
pub mod state;
pub mod db {
    pub mod bookmark_repository;
    pub mod diagnostics;
    pub mod favorite_repository;
    #[cfg(test)]
    pub mod mock;
    pub mod models;
    pub mod repository;
}
pub mod search {
    pub mod query;
}
pub mod api {
    pub mod bookmarks;
    pub mod diagnostics;
    pub mod documents;
    pub mod errors;
    pub mod expand;
    pub mod favorites;
    pub mod params;
}
