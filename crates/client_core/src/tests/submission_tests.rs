use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use shared::{
    domain::Smiles,
    protocol::{SolventField, SUBMIT_REACTION_PATH},
};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

use super::*;

/// Content-Type header and JSON body seen by the fake analysis endpoint.
type CapturedRequest = (Option<String>, serde_json::Value);

#[derive(Clone)]
struct ServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
}

async fn handle_submit(
    State(state): State<ServerState>,
    headers: axum::http::HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send((content_type, payload));
    }
    "<p>mechanism</p>"
}

async fn handle_failure() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "mechanism search crashed")
}

async fn handle_binary() -> impl IntoResponse {
    vec![0xff_u8, 0xfe, 0x00]
}

async fn spawn_analysis_server() -> (String, oneshot::Receiver<CapturedRequest>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route(SUBMIT_REACTION_PATH, post(handle_submit))
        .route("/broken", post(handle_failure))
        .route("/binary", post(handle_binary))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), rx)
}

fn transport_for(server_url: &str, submit_path: &str) -> HttpAnalysisTransport {
    HttpAnalysisTransport::new(&ClientSettings {
        server_url: server_url.to_string(),
        submit_path: submit_path.to_string(),
        request_timeout_secs: 5,
    })
    .expect("transport")
}

fn sample_payload() -> SubmissionPayload {
    SubmissionPayload {
        reactants: vec![Smiles::from("CCO"), Smiles::from("O")],
        products: vec![Smiles::from("CC(=O)O")],
        solvent: SolventField::Absent,
    }
}

#[tokio::test]
async fn posts_json_payload_and_returns_body_text() {
    let (server_url, payload_rx) = spawn_analysis_server().await;
    let transport = transport_for(&server_url, SUBMIT_REACTION_PATH);

    let content = transport.submit(&sample_payload()).await.expect("submit");
    assert_eq!(content, "<p>mechanism</p>");

    let (content_type, body) = payload_rx.await.expect("payload");
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        serde_json::json!({
            "reactants": ["CCO", "O"],
            "products": ["CC(=O)O"],
            "solvent": false,
        })
    );
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (server_url, _payload_rx) = spawn_analysis_server().await;
    let transport = transport_for(&server_url, "/broken");

    let err = transport
        .submit(&sample_payload())
        .await
        .expect_err("must fail");
    match err {
        SubmissionError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "mechanism search crashed");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn non_utf8_body_is_malformed() {
    let (server_url, _payload_rx) = spawn_analysis_server().await;
    let transport = transport_for(&server_url, "/binary");

    let err = transport
        .submit(&sample_payload())
        .await
        .expect_err("must fail");
    assert!(matches!(err, SubmissionError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let transport = transport_for(&format!("http://{addr}"), SUBMIT_REACTION_PATH);
    let err = transport
        .submit(&sample_payload())
        .await
        .expect_err("must fail");
    assert!(matches!(err, SubmissionError::Transport(_)));
}

#[tokio::test]
async fn missing_transport_never_succeeds() {
    let err = MissingAnalysisTransport
        .submit(&sample_payload())
        .await
        .expect_err("must fail");
    assert!(matches!(err, SubmissionError::Unavailable));
}
