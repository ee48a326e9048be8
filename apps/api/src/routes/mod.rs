pub mod health;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::plan::handlers;
use crate::state::AppState;

/// Bare (non-preflight) OPTIONS gets an empty 200; preflights are answered by
/// the CORS layer before they reach the router.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// CORS-open surface the front-end was built against: any origin,
/// GET/POST/OPTIONS, Content-Type and Authorization headers.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/generate-plan",
            post(handlers::handle_generate_plan).options(preflight),
        )
        .route(
            "/api/create-content-plan",
            post(handlers::handle_create_content_plan).options(preflight),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::config::GoogleServiceAccount;
    use crate::gdocs::DocsClient;
    use crate::llm_client::LlmClient;

    fn test_state() -> AppState {
        AppState {
            llm: LlmClient::new("test-key".to_string()),
            docs: DocsClient::new(GoogleServiceAccount {
                project_id: "test-project".to_string(),
                private_key_id: "key-1".to_string(),
                private_key: "not a pem".to_string(),
                client_email: "svc@test-project.iam.gserviceaccount.com".to_string(),
                client_id: "1234567890".to_string(),
            }),
        }
    }

    fn app() -> Router {
        build_router(test_state()).layer(cors_layer())
    }

    #[tokio::test]
    async fn test_preflight_returns_200_with_cors_headers() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/generate-plan")
            .header(header::ORIGIN, "https://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
    }

    #[tokio::test]
    async fn test_bare_options_returns_200() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/create-content-plan")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_on_api_routes_is_method_not_allowed() {
        for uri in ["/api/generate-plan", "/api/create-content-plan"] {
            let request = Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap();

            let response = app().oneshot(request).await.unwrap();
            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "GET {uri} must be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }
}
