//! HTTP client for the document backend.
//!
//! `BackendClient` issues the backend's four operations — list, index,
//! delete, search — each as a single blocking round trip, and normalizes
//! transport and body failures into [`ClientError`]. No retries, no
//! caching: one call, one HTTP request.

use miette::Diagnostic;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::model::{DocType, DocumentRecord, IndexRequest, ListResponse, SearchRequest};

// ---------------------------------------------------------------------------
// Client error
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ClientError {
    #[error("backend request failed: {message}")]
    #[diagnostic(
        code(docdeck::client::request),
        help("Is the backend running, and is the configured base URL correct?")
    )]
    Request { message: String },

    #[error("unexpected response from backend: {message}")]
    #[diagnostic(code(docdeck::client::response), help("Backend version mismatch?"))]
    Response { message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

// ---------------------------------------------------------------------------
// BackendClient
// ---------------------------------------------------------------------------

/// Synchronous client for the document backend.
///
/// Holds the base URL and a reusable agent; carries no other state between
/// calls.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    http: ureq::Agent,
}

impl BackendClient {
    /// Create a client for `base_url` (trailing slash trimmed).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: ureq::Agent::new(),
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -- helpers for the JSON round trips --

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .send_json(body)
            .map_err(|e| ClientError::Request {
                message: e.to_string(),
            })?;
        resp.into_json().map_err(|e| ClientError::Response {
            message: format!("failed to parse JSON: {e}"),
        })
    }

    fn delete_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .delete(&url)
            .call()
            .map_err(|e| ClientError::Request {
                message: e.to_string(),
            })?;
        resp.into_json().map_err(|e| ClientError::Response {
            message: format!("failed to parse JSON: {e}"),
        })
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// List all indexed documents (GET on the backend root).
    ///
    /// A 2xx body that is not the expected JSON envelope degrades to an
    /// empty list — the raw body is logged and the UI shows an empty
    /// catalog instead of failing. Transport errors and non-2xx statuses
    /// are not covered by this and propagate as [`ClientError::Request`].
    pub fn list_documents(&self) -> ClientResult<Vec<DocumentRecord>> {
        let resp = self
            .http
            .get(&self.base_url)
            .call()
            .map_err(|e| ClientError::Request {
                message: e.to_string(),
            })?;
        let raw = resp.into_string().map_err(|e| ClientError::Request {
            message: format!("failed to read response body: {e}"),
        })?;

        match serde_json::from_str::<ListResponse>(&raw) {
            Ok(list) => Ok(list.documents),
            Err(e) => {
                warn!(error = %e, body = %raw, "invalid document list from backend");
                Ok(Vec::new())
            }
        }
    }

    /// Index a new document (POST `/index`).
    ///
    /// Returns the backend's response verbatim; callers read `doc_id` from
    /// it and surface its absence themselves.
    pub fn index_document(
        &self,
        doc_type: DocType,
        source: &str,
        config: Value,
    ) -> ClientResult<Value> {
        let req = IndexRequest {
            doc_type,
            source: source.to_string(),
            config,
        };
        self.post_json("/index", &req)
    }

    /// Delete a document by ID (DELETE `/delete?doc_id=...`, no body).
    ///
    /// The backend echoes `doc_id` on success. No existence check is made.
    pub fn delete_document(&self, doc_id: &str) -> ClientResult<Value> {
        self.delete_json(&format!("/delete?doc_id={doc_id}"))
    }

    /// Search indexed content (POST `/search`).
    ///
    /// `query` may be empty and `top_k` is forwarded unvalidated — the
    /// input widgets own the [1,10] bound. Returns the `{"results": [...]}`
    /// envelope verbatim; callers unwrap `results`.
    pub fn search_documents(&self, query: &str, top_k: usize) -> ClientResult<Value> {
        let req = SearchRequest {
            query: query.to_string(),
            top_k,
        };
        self.post_json("/search", &req)
    }
}
