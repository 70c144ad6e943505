//! # docdeck
//!
//! Terminal frontend for a remote vector-document backend. The backend owns
//! chunking, embedding, and vector search; this crate is the client side:
//! four HTTP operations plus a page-based TUI and a scripting CLI.
//!
//! - **Backend client** (`client`): list, index, delete, search — one
//!   blocking HTTP round trip per call
//! - **Wire types** (`model`): the request/response shapes of the backend
//!   contract
//! - **Configuration** (`config`): backend base URL from flag, environment,
//!   or XDG config file
//! - **TUI** (`tui`): Home / Add Document / Search pages over the client
//!
//! ## Library usage
//!
//! ```no_run
//! use docdeck::client::BackendClient;
//! use docdeck::model::{DocType, default_index_config};
//!
//! let client = BackendClient::new("http://127.0.0.1:8000");
//! let docs = client.list_documents().unwrap();
//! let resp = client
//!     .index_document(DocType::Manual, "hello world", default_index_config())
//!     .unwrap();
//! ```

pub mod client;
pub mod config;
pub mod model;
pub mod tui;

pub use client::{BackendClient, ClientError, ClientResult};
pub use model::{DocType, DocumentRecord};
