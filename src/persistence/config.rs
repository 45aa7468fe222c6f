//! Document-store connection settings parsed from environment variables.

use super::PersistenceError;

pub const DEFAULT_PROJECTS_COLLECTION: &str = "projects";
pub const DEFAULT_PRODUCTS_COLLECTION: &str = "products";

/// Optional client timeouts. Unset means the request waits as long as the
/// network does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// API root, without a trailing slash (e.g. `https://store.example.com/v1`).
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub projects_collection: String,
    pub products_collection: String,
    pub timeouts: BackendTimeouts,
}

impl BackendConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `BACKEND_ENDPOINT`
    /// - `BACKEND_PROJECT_ID`
    /// - `BACKEND_DATABASE_ID`
    /// - `BACKEND_API_KEY_ENV` (names the env var containing the key)
    ///
    /// Optional:
    /// - `PROJECTS_COLLECTION_ID`: default `projects`
    /// - `PRODUCTS_COLLECTION_ID`: default `products`
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: no timeout when unset
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: no timeout when unset
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable or the API key is missing, or
    /// a timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, PersistenceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable or the API key is missing, or
    /// a timeout is not a whole number of seconds.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PersistenceError> {
        let endpoint = required(&lookup, "BACKEND_ENDPOINT")?.trim_end_matches('/').to_string();
        let project_id = required(&lookup, "BACKEND_PROJECT_ID")?;
        let database_id = required(&lookup, "BACKEND_DATABASE_ID")?;

        let key_var = lookup("BACKEND_API_KEY_ENV")
            .ok_or_else(|| PersistenceError::MissingApiKey { var: "BACKEND_API_KEY_ENV".into() })?;
        let api_key = lookup(&key_var).ok_or_else(|| PersistenceError::MissingApiKey { var: key_var.clone() })?;

        let projects_collection =
            lookup("PROJECTS_COLLECTION_ID").unwrap_or_else(|| DEFAULT_PROJECTS_COLLECTION.to_string());
        let products_collection =
            lookup("PRODUCTS_COLLECTION_ID").unwrap_or_else(|| DEFAULT_PRODUCTS_COLLECTION.to_string());
        let timeouts = BackendTimeouts {
            request_secs: parse_secs(&lookup, "BACKEND_REQUEST_TIMEOUT_SECS")?,
            connect_secs: parse_secs(&lookup, "BACKEND_CONNECT_TIMEOUT_SECS")?,
        };

        Ok(Self { endpoint, project_id, api_key, database_id, projects_collection, products_collection, timeouts })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, PersistenceError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PersistenceError::Config(format!("{key} is required"))),
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>, PersistenceError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| PersistenceError::Config(format!("{key} must be a whole number of seconds, got {raw:?}")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
