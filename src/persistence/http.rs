//! Document-store REST client.
//!
//! Thin HTTP wrapper over the store's document API:
//! `{endpoint}/databases/{db}/collections/{collection}/documents[/{id}]`,
//! authenticated by project id and API key headers. Documents carry their
//! identity in `$id`. Status handling and body parsing are pure functions so
//! they can be tested without a server.
//!
//! The catalog is read in pages of [`PAGE_SIZE`], each after the last `$id`
//! of the previous page, until a short page comes back.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::config::BackendConfig;
use super::{PersistenceError, ProjectRepository};
use crate::catalog::Product;
use crate::project::ProjectRecord;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

/// Asks the store to generate the document id.
const UNIQUE_ID: &str = "unique()";

/// Catalog documents requested per list call.
const PAGE_SIZE: usize = 100;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpRepository {
    http: reqwest::Client,
    config: BackendConfig,
}

impl HttpRepository {
    /// Build a client. Timeouts apply only when configured.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::HttpClientBuild`] if the client cannot be
    /// constructed.
    pub fn new(config: BackendConfig) -> Result<Self, PersistenceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| PersistenceError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn documents_url(&self, collection: &str) -> String {
        documents_url(&self.config.endpoint, &self.config.database_id, collection)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{id}", self.documents_url(&self.config.projects_collection))
    }

    /// Send a request and return the status and body text.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), PersistenceError> {
        let response = request
            .header(PROJECT_HEADER, &self.config.project_id)
            .header(KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| PersistenceError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| PersistenceError::Request(e.to_string()))?;
        debug!(status, bytes = text.len(), "document store response");
        Ok((status, text))
    }
}

#[async_trait::async_trait]
impl ProjectRepository for HttpRepository {
    async fn get_all_products(&self) -> Result<Vec<Product>, PersistenceError> {
        let url = self.documents_url(&self.config.products_collection);
        let mut products: Vec<Product> = Vec::new();
        loop {
            let queries = page_queries(products.last().map(|p| p.id.as_str()));
            let (status, body) = self.send(self.http.get(&url).query(&queries)).await?;
            let body = check_status(status, body, "products")?;
            let page: Vec<Product> = parse_document_list(&body)?;
            let more = page.len() == PAGE_SIZE;
            products.extend(page);
            if !more {
                break;
            }
        }
        debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }

    async fn get_project(&self, id: &str) -> Result<ProjectRecord, PersistenceError> {
        let (status, body) = self.send(self.http.get(self.document_url(id))).await?;
        check_status(status, body, id).and_then(|body| parse_document(&body))
    }

    async fn create_project(&self, fields: ProjectRecord) -> Result<ProjectRecord, PersistenceError> {
        let body = CreateBody { document_id: UNIQUE_ID, data: fields.fields() };
        let url = self.documents_url(&self.config.projects_collection);
        let (status, body) = self.send(self.http.post(url).json(&body)).await?;
        check_status(status, body, "new project").and_then(|body| parse_document(&body))
    }

    async fn update_project(&self, id: &str, fields: ProjectRecord) -> Result<ProjectRecord, PersistenceError> {
        let body = UpdateBody { data: fields.fields() };
        let (status, body) = self.send(self.http.patch(self.document_url(id)).json(&body)).await?;
        check_status(status, body, id).and_then(|body| parse_document(&body))
    }

    async fn delete_project(&self, id: &str) -> Result<(), PersistenceError> {
        let (status, body) = self.send(self.http.delete(self.document_url(id))).await?;
        check_status(status, body, id).map(|_| ())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody<'a> {
    document_id: &'a str,
    data: ProjectRecord,
}

#[derive(Serialize)]
struct UpdateBody {
    data: ProjectRecord,
}

#[derive(Deserialize)]
struct DocumentList<T> {
    documents: Vec<T>,
}

// =============================================================================
// PURE HELPERS
// =============================================================================

fn documents_url(endpoint: &str, database_id: &str, collection: &str) -> String {
    format!("{endpoint}/databases/{database_id}/collections/{collection}/documents")
}

/// List query parameters for one catalog page, starting after `cursor`.
fn page_queries(cursor: Option<&str>) -> Vec<(&'static str, String)> {
    let mut queries = vec![("queries[]", json!({ "method": "limit", "values": [PAGE_SIZE] }).to_string())];
    if let Some(id) = cursor {
        queries.push(("queries[]", json!({ "method": "cursorAfter", "values": [id] }).to_string()));
    }
    queries
}

/// Map a response status to the body on success or an error otherwise.
/// `what` names the requested document for not-found errors.
fn check_status(status: u16, body: String, what: &str) -> Result<String, PersistenceError> {
    match status {
        200..=299 => Ok(body),
        404 => Err(PersistenceError::NotFound(what.to_owned())),
        _ => Err(PersistenceError::Response { status, body }),
    }
}

fn parse_document<T: DeserializeOwned>(body: &str) -> Result<T, PersistenceError> {
    serde_json::from_str(body).map_err(|e| PersistenceError::Parse(e.to_string()))
}

fn parse_document_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, PersistenceError> {
    let list: DocumentList<T> = parse_document(body)?;
    Ok(list.documents)
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
