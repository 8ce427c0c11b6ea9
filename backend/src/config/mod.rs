//! Central module for application-wide configuration settings.
//!
//! This module loads the listening port, the session signing secret, the
//! allowed browser origin and the document store connection parameters from
//! the process environment (optionally seeded from a `.env` file).

use std::{env, fmt::Display, str::FromStr};

use adapters::{MongoSettings, DEFAULT_DATABASE};
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_PORT: &str = "5000";
const DEFAULT_CLUSTER: &str = "cluster0.91makds.mongodb.net";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),

    #[error("invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Which `StoreAdapter` the server runs against.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreKind {
    Mongo(MongoSettings),
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub access_token_secret: String,
    pub cors_origin: String,
    pub store: StoreKind,
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_err() {
            info!("No .env file found, using process environment only");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = try_load(&var, "PORT", DEFAULT_PORT)?;
        let access_token_secret = var("ACCESS_TOKEN").ok_or(ConfigError::Missing("ACCESS_TOKEN"))?;
        let cors_origin = var("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let store = match var("STORE").as_deref().unwrap_or("mongo") {
            "memory" => {
                warn!("Using the in-memory store, data is lost on shutdown");
                StoreKind::Memory
            }
            "mongo" => StoreKind::Mongo(MongoSettings {
                uri: mongo_uri(&var)?,
                database: var("DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            }),
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORE",
                    reason: format!("expected `mongo` or `memory`, got `{other}`"),
                })
            }
        };

        Ok(Self {
            port,
            access_token_secret,
            cors_origin,
            store,
        })
    }
}

fn try_load<T, F>(var: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}

fn mongo_uri<F>(var: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(uri) = var("MONGODB_URI") {
        return Ok(uri);
    }
    let user = var("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
    let pass = var("DB_PASS").ok_or(ConfigError::Missing("DB_PASS"))?;
    let cluster = var("DB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
    Ok(format!(
        "mongodb+srv://{user}:{pass}@{cluster}/?retryWrites=true&w=majority"
    ))
}
