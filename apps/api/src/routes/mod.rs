pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::render::handlers as render;
use crate::state::AppState;
use crate::transform::handlers as transform;

/// Full HTTP surface, including per-request tracing and permissive CORS for the
/// browser front-end.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/optimize-summary",
            post(transform::handle_optimize_summary),
        )
        .route("/api/generate-pdf", post(render::handle_generate_pdf))
        .route("/api/layout-preview", post(render::handle_layout_preview))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::build_router;
    use crate::layout::default_page_config;
    use crate::state::AppState;
    use crate::transform::providers::{EchoTransformer, TemplateTransformer};
    use crate::transform::{TextTransformService, TextTransformer};

    fn app_with(provider: impl TextTransformer + 'static) -> Router {
        build_router(AppState {
            transformer: Arc::new(TextTransformService::new(
                Arc::new(provider),
                Duration::from_millis(8_000),
            )),
            page_config: default_page_config(),
        })
    }

    fn app() -> Router {
        app_with(EchoTransformer)
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn jane_doe_json() -> Value {
        json!({
            "fullName": "Jane Doe",
            "email": "jane@x.com",
            "phone": "555-0100",
            "summary": "Engineer.",
            "skills": "Go, SQL",
            "experience": [
                {"role": "Dev", "company": "Acme", "description": "Built things."}
            ],
            "education": []
        })
    }

    #[tokio::test]
    async fn test_health_reports_service() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-api");
    }

    #[tokio::test]
    async fn test_generate_pdf_returns_one_page_attachment() {
        let response = app()
            .oneshot(post_json("/api/generate-pdf", jane_doe_json().to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers().clone();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"My_Resume.pdf\""
        );
        assert_eq!(headers["x-page-count"], "1");
        assert!(headers.get("x-unused-fields").is_none());

        let bytes = body_bytes(response).await;
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_generate_pdf_flags_unused_education() {
        let mut payload = jane_doe_json();
        payload["education"] = json!([{"school": "MIT"}]);
        let response = app()
            .oneshot(post_json("/api/generate-pdf", payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-unused-fields"], "education");
    }

    #[tokio::test]
    async fn test_generate_pdf_missing_identity_is_422_with_fields() {
        let response = app()
            .oneshot(post_json(
                "/api/generate-pdf",
                json!({"fullName": "Jane Doe", "phone": "  "}).to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELDS");
        assert_eq!(body["error"]["fields"], json!(["email", "phone"]));
    }

    #[tokio::test]
    async fn test_generate_pdf_malformed_json_is_400() {
        let response = app()
            .oneshot(post_json("/api/generate-pdf", "{not json".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_optimize_summary_echoes_by_default() {
        let response = app()
            .oneshot(post_json(
                "/api/optimize-summary",
                json!({"rawText": "Hello"}).to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"optimizedText": "Hello"}));
    }

    #[tokio::test]
    async fn test_optimize_summary_accepts_snake_case_key() {
        let response = app_with(TemplateTransformer)
            .oneshot(post_json(
                "/api/optimize-summary",
                json!({"raw_text": "Hello"}).to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let text = body["optimizedText"].as_str().unwrap();
        assert!(text.contains("expertise in Hello..."));
    }

    #[tokio::test]
    async fn test_optimize_summary_without_raw_text_is_400() {
        let response = app()
            .oneshot(post_json("/api/optimize-summary", "{}".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_layout_preview_describes_pages_and_sections() {
        let response = app()
            .oneshot(post_json(
                "/api/layout-preview",
                jane_doe_json().to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["pageCount"], 1);
        assert_eq!(
            body["sections"],
            json!(["Professional Summary", "Experience", "Skills"])
        );
        assert_eq!(body["pageFill"].as_array().unwrap().len(), 1);
        assert_eq!(body["blocks"][0]["lines"], json!(["Jane Doe"]));
        assert_eq!(body["unencodableChars"], 0);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::get("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
