//! DoclingServeEngine against a stub Docling server on an ephemeral port.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use docsift_services::{ConversionEngine, DoclingServeEngine, EngineError, EngineOptions};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// What the stub saw in the last convert request
#[derive(Default, Debug)]
struct Received {
    file_name: Option<String>,
    file_len: usize,
    to_formats: Vec<String>,
    do_ocr: Option<String>,
    do_table_structure: Option<String>,
}

#[derive(Clone)]
struct StubState {
    received: Arc<Mutex<Received>>,
    reply: Arc<(StatusCode, Value)>,
}

async fn convert_file(
    State(state): State<StubState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut received = Received::default();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.unwrap_or_default();
        match name.as_str() {
            "files" => {
                received.file_name = file_name;
                received.file_len = data.len();
            }
            "to_formats" => received
                .to_formats
                .push(String::from_utf8_lossy(&data).into_owned()),
            "do_ocr" => received.do_ocr = Some(String::from_utf8_lossy(&data).into_owned()),
            "do_table_structure" => {
                received.do_table_structure = Some(String::from_utf8_lossy(&data).into_owned())
            }
            _ => {}
        }
    }
    *state.received.lock().unwrap() = received;

    let (status, body) = state.reply.as_ref();
    (*status, Json(body.clone()))
}

async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Received>>) {
    let received = Arc::new(Mutex::new(Received::default()));
    let state = StubState {
        received: received.clone(),
        reply: Arc::new((status, reply)),
    };

    let app = Router::new()
        .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route("/v1/convert/file", post(convert_file))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

fn options(base_url: String) -> EngineOptions {
    EngineOptions {
        base_url,
        ocr: true,
        table_structure: false,
        timeout: Duration::from_secs(5),
    }
}

fn write_pdf(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("5f1c.pdf");
    std::fs::write(&path, b"%PDF-1.4\n%%EOF").unwrap();
    path
}

#[tokio::test]
async fn test_convert_sends_options_and_maps_document() {
    let (base_url, received) = spawn_stub(
        StatusCode::OK,
        json!({
            "document": {
                "filename": "5f1c.pdf",
                "md_content": "# Invoice\n\nTotal: $10",
                "json_content": {"schema_name": "DoclingDocument", "pages": {"1": {}, "2": {}}}
            },
            "status": "success",
            "errors": [],
            "processing_time": 0.4
        }),
    )
    .await;

    let engine = DoclingServeEngine::initialize(options(base_url)).await.unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_pdf(&dir);

    let document = engine.convert(&path).await.unwrap();
    assert_eq!(document.page_count(), 2);
    assert_eq!(document.export_markdown(), "# Invoice\n\nTotal: $10");
    assert_eq!(
        document.export_structured()["schema_name"],
        "DoclingDocument"
    );

    let received = received.lock().unwrap();
    assert_eq!(received.file_name.as_deref(), Some("5f1c.pdf"));
    assert_eq!(received.file_len, 14);
    assert_eq!(received.to_formats, vec!["md", "json"]);
    assert_eq!(received.do_ocr.as_deref(), Some("true"));
    assert_eq!(received.do_table_structure.as_deref(), Some("false"));
}

#[tokio::test]
async fn test_failure_status_becomes_failed() {
    let (base_url, _) = spawn_stub(
        StatusCode::OK,
        json!({
            "document": {"md_content": null, "json_content": null},
            "status": "failure",
            "errors": [{"error_message": "Invalid PDF header"}]
        }),
    )
    .await;

    let engine = DoclingServeEngine::initialize(options(base_url)).await.unwrap();
    let dir = TempDir::new().unwrap();

    let err = engine.convert(&write_pdf(&dir)).await.unwrap_err();
    assert!(matches!(err, EngineError::Failed(ref m) if m == "Invalid PDF header"));
}

#[tokio::test]
async fn test_http_error_becomes_rejected() {
    let (base_url, _) = spawn_stub(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({"detail": "Unsupported file format"}),
    )
    .await;

    let engine = DoclingServeEngine::initialize(options(base_url)).await.unwrap();
    let dir = TempDir::new().unwrap();

    let err = engine.convert(&write_pdf(&dir)).await.unwrap_err();
    match err {
        EngineError::Rejected { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Unsupported file format");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_file_is_an_io_error() {
    let (base_url, _) = spawn_stub(StatusCode::OK, json!({})).await;
    let engine = DoclingServeEngine::initialize(options(base_url)).await.unwrap();

    let dir = TempDir::new().unwrap();
    let err = engine
        .convert(&dir.path().join("gone.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
}

#[tokio::test]
async fn test_initialize_fails_without_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = DoclingServeEngine::initialize(options(format!("http://{}", addr)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unavailable(_)));
}
