use ::config::{Config, Environment, Map};
use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE_NAME: &str = "techvista_hr";

/// Which optional store settings were given explicitly rather than defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitSettings {
    pub database_url: bool,
    pub database_name: bool,
}

/// Service configuration read from environment variables.
///
/// Recognized variables:
/// - `DATABASE_URL` — MongoDB connection string
/// - `DATABASE_NAME` — database holding the catalog collections
/// - `HOST` / `PORT` — listen address
/// - `SEED_DEMO_DATA` — seed an empty catalog at startup (default `true`)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub database_name: Option<String>,
    pub host: String,
    pub port: u16,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::load(Environment::default().try_parsing(true))
    }

    /// Build from an explicit variable map (useful for testing).
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, AppError> {
        Self::load(Environment::default().try_parsing(true).source(Some(vars)))
    }

    fn load(env: Environment) -> Result<Self, AppError> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("seed_demo_data", true)?
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn mongo_uri(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn database(&self) -> &str {
        self.database_name.as_deref().unwrap_or(DEFAULT_DATABASE_NAME)
    }

    pub fn explicit_settings(&self) -> ExplicitSettings {
        ExplicitSettings {
            database_url: self.database_url.is_some(),
            database_name: self.database_name.is_some(),
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The connection string with any password masked, for logging.
    pub fn redacted_mongo_uri(&self) -> String {
        match url::Url::parse(self.mongo_uri()) {
            Ok(mut parsed) => {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("****"));
                }
                parsed.to_string()
            }
            Err(_) => "<unparsable connection string>".to_string(),
        }
    }
}
