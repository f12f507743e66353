//! Integration tests per la sessione (cookie JWT)
//!
//! Test per:
//! - POST /jwt
//! - GET /logout
//! - authentication_middleware su GET /postedJob/{email}
//! - CORS con credenziali
//!
//! Gli store sono in memoria: nessun database richiesto.

mod common;

#[cfg(test)]
mod session_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use axum_test::http::HeaderName;
    use serde_json::{Value, json};
    use solosphere_server::core::AppState;
    use solosphere_server::repositories::{InMemoryBidRepository, InMemoryJobRepository};
    use std::sync::Arc;

    // ============================================================
    // Test per POST /jwt - issue_token
    // ============================================================

    #[tokio::test]
    async fn test_issue_token_sets_http_only_cookie() {
        let server = create_test_server(create_test_state());

        let response = server
            .post("/jwt")
            .json(&json!({ "email": "alice@example.com", "name": "Alice" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body, json!({ "success": true }));

        let set_cookie = response
            .headers()
            .get("set-cookie")
            .expect("Set-Cookie header should be present")
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with("token="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Strict"));
        assert!(!set_cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_issue_token_in_production_uses_secure_cookie() {
        let state = Arc::new(
            AppState::with_stores(
                Arc::new(InMemoryJobRepository::new()),
                Arc::new(InMemoryBidRepository::new()),
                TEST_SECRET.to_string(),
            )
            .with_secure_cookies(true),
        );
        let server = create_test_server(state);

        let response = server
            .post("/jwt")
            .json(&json!({ "email": "alice@example.com" }))
            .await;

        response.assert_status_ok();
        let set_cookie = response.headers().get("set-cookie").unwrap().to_str().unwrap();
        assert!(set_cookie.contains("Secure"));
        assert!(set_cookie.contains("SameSite=None"));
    }

    #[tokio::test]
    async fn test_issued_cookie_opens_guarded_route() {
        let server = create_test_server(create_test_state());

        let response = server
            .post("/jwt")
            .json(&json!({ "email": "alice@example.com" }))
            .await;
        let cookie = stored_cookie(response.headers().get("set-cookie").unwrap().to_str().unwrap());

        let response = server
            .get("/postedJob/alice@example.com")
            .add_header(HeaderName::from_static("cookie"), cookie)
            .await;

        response.assert_status_ok();
        let jobs: Value = response.json();
        assert_eq!(jobs, json!([]));
    }

    #[tokio::test]
    async fn test_issue_token_with_non_object_body() {
        let server = create_test_server(create_test_state());

        let response = server.post("/jwt").json(&json!(["not", "an", "object"])).await;

        response.assert_status_unprocessable_entity();
    }

    // ============================================================
    // Test per authentication_middleware
    // ============================================================

    #[tokio::test]
    async fn test_guarded_route_without_cookie() {
        let server = create_test_server(create_test_state());

        let response = server.get("/postedJob/alice@example.com").await;

        response.assert_status_unauthorized();
        let body: Value = response.json();
        assert_eq!(body["message"], "unauthorized access");
    }

    #[tokio::test]
    async fn test_guarded_route_with_garbage_token() {
        let server = create_test_server(create_test_state());

        let response = server
            .get("/postedJob/alice@example.com")
            .add_header(HeaderName::from_static("cookie"), cookie_header("not.a.jwt"))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_guarded_route_with_foreign_signature() {
        let server = create_test_server(create_test_state());
        let identity = json!({ "email": "alice@example.com" });
        let token = solosphere_server::core::encode_jwt(
            identity.as_object().cloned().unwrap(),
            "un-altro-segreto-qualsiasi",
        )
        .unwrap();

        let response = server
            .get("/postedJob/alice@example.com")
            .add_header(HeaderName::from_static("cookie"), cookie_header(&token))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_guarded_route_with_expired_token() {
        let server = create_test_server(create_test_state());
        let token = create_expired_jwt("alice@example.com");

        let response = server
            .get("/postedJob/alice@example.com")
            .add_header(HeaderName::from_static("cookie"), cookie_header(&token))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_guarded_route_finds_token_among_other_cookies() {
        let server = create_test_server(create_test_state());
        let token = create_test_jwt("alice@example.com");

        let response = server
            .get("/postedJob/alice@example.com")
            .add_header(
                HeaderName::from_static("cookie"),
                format!("theme=dark; token={}; lang=it", token),
            )
            .await;

        response.assert_status_ok();
    }

    // ============================================================
    // Test per GET /logout - logout
    // ============================================================

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let server = create_test_server(create_test_state());

        let response = server.get("/logout").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body, json!({ "success": true }));

        let set_cookie = response.headers().get("set-cookie").unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("token=;"));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_cleared_cookie_no_longer_authenticates() {
        let server = create_test_server(create_test_state());

        let response = server.get("/logout").await;
        let cookie = stored_cookie(response.headers().get("set-cookie").unwrap().to_str().unwrap());
        assert_eq!(cookie, "token=");

        let response = server
            .get("/postedJob/alice@example.com")
            .add_header(HeaderName::from_static("cookie"), cookie)
            .await;

        response.assert_status_unauthorized();
    }

    // ============================================================
    // Test per il CORS
    // ============================================================

    #[tokio::test]
    async fn test_cors_allows_configured_origin_with_credentials() {
        let server = create_test_server(create_test_state());

        let response = server
            .get("/jobs")
            .add_header(HeaderName::from_static("origin"), "http://localhost:5173")
            .await;

        response.assert_status_ok();
        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            headers.get("access-control-allow-credentials").unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_ignores_other_origins() {
        let server = create_test_server(create_test_state());

        let response = server
            .get("/jobs")
            .add_header(HeaderName::from_static("origin"), "http://evil.example.com")
            .await;

        response.assert_status(StatusCode::OK);
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
