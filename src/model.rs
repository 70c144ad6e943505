//! Wire-level data types for the backend protocol.
//!
//! Everything here is transient request/response state; nothing is persisted
//! locally. Field names and ordering are part of the backend contract and
//! must not be renamed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported document source types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Pdf,
    Webpage,
    Manual,
}

impl DocType {
    /// Wire name, also shown in the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Webpage => "webpage",
            Self::Manual => "manual",
        }
    }

    /// All variants, in selector order.
    pub const ALL: [DocType; 3] = [Self::Pdf, Self::Webpage, Self::Manual];

    /// Next variant in selector order, wrapping.
    pub fn next(self) -> Self {
        match self {
            Self::Pdf => Self::Webpage,
            Self::Webpage => Self::Manual,
            Self::Manual => Self::Pdf,
        }
    }

    /// Previous variant in selector order, wrapping.
    pub fn prev(self) -> Self {
        match self {
            Self::Pdf => Self::Manual,
            Self::Webpage => Self::Pdf,
            Self::Manual => Self::Webpage,
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(Self::Pdf),
            "webpage" => Ok(Self::Webpage),
            "manual" => Ok(Self::Manual),
            other => Err(format!(
                "invalid doc type \"{other}\" (expected pdf, webpage, or manual)"
            )),
        }
    }
}

/// One indexed document as reported by the backend.
///
/// Only `doc_id` is guaranteed; every other field is opaque metadata the
/// backend attached, preserved as-is for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Backend-assigned unique identifier.
    pub doc_id: String,
    /// Remaining fields, verbatim.
    #[serde(flatten)]
    pub meta: serde_json::Map<String, Value>,
}

/// Body of `POST /index`. Field order is the wire order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRequest {
    pub doc_type: DocType,
    /// URL for webpages, file path for PDFs, or inline text for manual docs.
    pub source: String,
    /// Free-form ingestion options, forwarded untouched.
    pub config: Value,
}

/// Body of `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
}

/// Envelope of `GET /`. A missing `documents` key means an empty catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
}

/// Ingestion options pre-filled for new documents.
pub fn default_index_config() -> Value {
    serde_json::json!({
        "chunk_size": 1000,
        "chunk_overlap": 200,
    })
}
