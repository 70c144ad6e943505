//! Client integration tests against an in-process mock backend.
//!
//! The mock backend is an axum router bound to an ephemeral port and served
//! from a current-thread runtime on a background thread; the synchronous
//! client then exercises real HTTP against it. The router captures request
//! bodies so tests can assert the exact wire shapes.

use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use docdeck::client::{BackendClient, ClientError};
use docdeck::model::DocType;

/// Scripted behavior and captured requests for one mock backend.
#[derive(Default)]
struct MockState {
    /// Raw body served for `GET /`.
    list_body: String,
    /// When true, every route answers 500.
    fail: bool,
    last_index_body: Option<Value>,
    last_search_body: Option<Value>,
    last_delete_id: Option<String>,
}

type Shared = Arc<Mutex<MockState>>;

fn router(state: Shared) -> Router {
    Router::new()
        .route("/", get(serve_root))
        .route("/index", post(serve_index))
        .route("/delete", delete(serve_delete))
        .route("/search", post(serve_search))
        .with_state(state)
}

async fn serve_root(State(state): State<Shared>) -> impl IntoResponse {
    let (fail, body) = {
        let s = state.lock().unwrap();
        (s.fail, s.list_body.clone())
    };
    let status = if fail {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

async fn serve_index(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut s = state.lock().unwrap();
    s.last_index_body = Some(body);
    if s.fail {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"})))
    } else {
        (
            StatusCode::OK,
            Json(json!({"doc_id": "doc-new", "status": "indexed"})),
        )
    }
}

#[derive(Deserialize)]
struct DeleteParams {
    doc_id: String,
}

async fn serve_delete(
    State(state): State<Shared>,
    Query(params): Query<DeleteParams>,
) -> impl IntoResponse {
    let mut s = state.lock().unwrap();
    s.last_delete_id = Some(params.doc_id.clone());
    if s.fail {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"})))
    } else {
        (StatusCode::OK, Json(json!({"doc_id": params.doc_id})))
    }
}

async fn serve_search(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut s = state.lock().unwrap();
    s.last_search_body = Some(body);
    if s.fail {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"})))
    } else {
        (
            StatusCode::OK,
            Json(json!({
                "results": [
                    {"text": "first chunk", "score": 0.93},
                    {"text": "second chunk", "score": 0.71},
                ]
            })),
        )
    }
}

/// Start a mock backend on an ephemeral port; returns a client pointed at it.
fn spawn_backend(state: Shared) -> BackendClient {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router(state)).await.unwrap();
        });
    });

    BackendClient::new(&format!("http://{addr}"))
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_returns_documents_in_order() {
    let state = Shared::default();
    state.lock().unwrap().list_body = json!({
        "documents": [
            {"doc_id": "doc-a", "title": "Alpha", "chunks": 12},
            {"doc_id": "doc-b"},
            {"doc_id": "doc-c", "source": "https://example.com"},
        ]
    })
    .to_string();
    let client = spawn_backend(state);

    let docs = client.list_documents().unwrap();
    let ids: Vec<&str> = docs.iter().map(|d| d.doc_id.as_str()).collect();
    assert_eq!(ids, ["doc-a", "doc-b", "doc-c"]);

    // Opaque metadata is preserved as-is.
    assert_eq!(docs[0].meta["title"], "Alpha");
    assert_eq!(docs[0].meta["chunks"], 12);
    assert!(docs[1].meta.is_empty());
}

#[test]
fn list_with_non_json_body_degrades_to_empty() {
    let state = Shared::default();
    state.lock().unwrap().list_body = "<html>Service Warming Up</html>".to_string();
    let client = spawn_backend(state);

    let docs = client.list_documents().unwrap();
    assert!(docs.is_empty());
}

#[test]
fn list_without_documents_key_is_empty() {
    let state = Shared::default();
    state.lock().unwrap().list_body = "{}".to_string();
    let client = spawn_backend(state);

    assert!(client.list_documents().unwrap().is_empty());
}

#[test]
fn list_with_records_missing_doc_id_degrades_to_empty() {
    let state = Shared::default();
    state.lock().unwrap().list_body = json!({
        "documents": [{"title": "no id here"}]
    })
    .to_string();
    let client = spawn_backend(state);

    assert!(client.list_documents().unwrap().is_empty());
}

#[test]
fn list_error_status_propagates() {
    // Fail-soft covers body shape only; a 500 still surfaces.
    let state = Shared::default();
    state.lock().unwrap().fail = true;
    let client = spawn_backend(state);

    let err = client.list_documents().unwrap_err();
    assert!(matches!(err, ClientError::Request { .. }));
}

// ---------------------------------------------------------------------------
// index
// ---------------------------------------------------------------------------

#[test]
fn index_posts_exact_body_and_returns_response_verbatim() {
    let state = Shared::default();
    let client = spawn_backend(Arc::clone(&state));

    let resp = client
        .index_document(
            DocType::Manual,
            "hello world",
            json!({"chunk_size": 1000, "chunk_overlap": 200}),
        )
        .unwrap();
    assert_eq!(resp, json!({"doc_id": "doc-new", "status": "indexed"}));

    let captured = state.lock().unwrap().last_index_body.clone().unwrap();
    assert_eq!(
        captured,
        json!({
            "doc_type": "manual",
            "source": "hello world",
            "config": {"chunk_size": 1000, "chunk_overlap": 200},
        })
    );
}

#[test]
fn index_http_500_is_a_request_error() {
    let state = Shared::default();
    state.lock().unwrap().fail = true;
    let client = spawn_backend(state);

    let err = client
        .index_document(DocType::Pdf, "/tmp/a.pdf", json!({}))
        .unwrap_err();
    assert!(matches!(err, ClientError::Request { .. }));
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

#[test]
fn delete_sends_doc_id_as_query_param() {
    let state = Shared::default();
    let client = spawn_backend(Arc::clone(&state));

    let resp = client.delete_document("doc-123").unwrap();
    assert_eq!(resp["doc_id"], "doc-123");
    assert_eq!(
        state.lock().unwrap().last_delete_id.as_deref(),
        Some("doc-123")
    );
}

#[test]
fn delete_http_500_is_a_request_error() {
    let state = Shared::default();
    state.lock().unwrap().fail = true;
    let client = spawn_backend(state);

    let err = client.delete_document("doc-123").unwrap_err();
    assert!(matches!(err, ClientError::Request { .. }));
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_posts_query_and_top_k() {
    let state = Shared::default();
    let client = spawn_backend(Arc::clone(&state));

    let resp = client.search_documents("cats", 3).unwrap();
    let results = resp["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["text"], "first chunk");

    let captured = state.lock().unwrap().last_search_body.clone().unwrap();
    assert_eq!(captured, json!({"query": "cats", "top_k": 3}));
}

#[test]
fn search_passes_empty_query_through() {
    let state = Shared::default();
    let client = spawn_backend(Arc::clone(&state));

    client.search_documents("", 5).unwrap();
    let captured = state.lock().unwrap().last_search_body.clone().unwrap();
    assert_eq!(captured, json!({"query": "", "top_k": 5}));
}

#[test]
fn search_http_500_is_a_request_error() {
    let state = Shared::default();
    state.lock().unwrap().fail = true;
    let client = spawn_backend(state);

    let err = client.search_documents("cats", 3).unwrap_err();
    assert!(matches!(err, ClientError::Request { .. }));
}

// ---------------------------------------------------------------------------
// unreachable backend
// ---------------------------------------------------------------------------

#[test]
fn unreachable_backend_errors_on_every_operation() {
    // Bind and immediately drop a listener so the port is closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = BackendClient::new(&format!("http://{addr}"));

    assert!(matches!(
        client.list_documents().unwrap_err(),
        ClientError::Request { .. }
    ));
    assert!(matches!(
        client
            .index_document(DocType::Manual, "x", json!({}))
            .unwrap_err(),
        ClientError::Request { .. }
    ));
    assert!(matches!(
        client.delete_document("doc-1").unwrap_err(),
        ClientError::Request { .. }
    ));
    assert!(matches!(
        client.search_documents("q", 1).unwrap_err(),
        ClientError::Request { .. }
    ));
}
