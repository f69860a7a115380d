use super::*;
use axum::{body, body::Body, http::Request};
use tower::ServiceExt;

use crate::config::DEFAULT_BODY_LIMIT_BYTES;

fn test_app() -> Router {
    let state = AppState {
        api: ApiContext {
            engine: Arc::new(WriteUpEngine),
        },
    };
    build_router(Arc::new(state), DEFAULT_BODY_LIMIT_BYTES)
}

fn submit_request(body: String) -> Request<Body> {
    Request::post("/submit_reaction")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn submit_reaction_returns_html_write_up() {
    let request = submit_request(
        serde_json::json!({
            "reactants": ["CCO", "O"],
            "products": ["CC(=O)O"],
            "solvent": false,
        })
        .to_string(),
    );
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.starts_with("CCO.O&gt;&gt;&gt;&gt;CC(=O)O<br>"));
}

#[tokio::test]
async fn empty_products_are_answered_in_the_output() {
    let request = submit_request(
        serde_json::json!({ "reactants": ["CCO"], "products": [], "solvent": false }).to_string(),
    );
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"No products added.");
}

#[tokio::test]
async fn solvent_true_is_rejected_by_the_decoder() {
    let request = submit_request(
        serde_json::json!({ "reactants": ["C"], "products": ["C"], "solvent": true }).to_string(),
    );
    let response = test_app().oneshot(request).await.expect("response");
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let state = AppState {
        api: ApiContext {
            engine: Arc::new(WriteUpEngine),
        },
    };
    let app = build_router(Arc::new(state), 32);
    let request = submit_request(
        serde_json::json!({
            "reactants": ["C".repeat(64)],
            "products": ["C"],
            "solvent": false,
        })
        .to_string(),
    );
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn landing_page_is_served() {
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}
