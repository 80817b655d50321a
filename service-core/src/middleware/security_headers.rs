use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// Path suffix of server-rendered printable documents.
const PRINTABLE_SUFFIX: &str = "/print";

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let is_printable = req.uri().path().ends_with(PRINTABLE_SUFFIX);

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        header::HeaderValue::from_static("DENY"),
    );

    // Printable pages carry their own inline stylesheet and may show a logo
    if is_printable {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static(
                "default-src 'none'; \
                 style-src 'unsafe-inline'; \
                 img-src 'self' data: https:; \
                 frame-ancestors 'none'",
            ),
        );
    } else {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request as HttpRequest, middleware::from_fn, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/api/things", get(|| async { "{}" }))
            .route("/api/things/1/print", get(|| async { "<html></html>" }))
            .layer(from_fn(security_headers_middleware))
    }

    async fn csp_for(path: &str) -> String {
        let response = app()
            .oneshot(HttpRequest::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        response.headers()[header::CONTENT_SECURITY_POLICY]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn api_routes_get_strict_policy() {
        assert_eq!(
            csp_for("/api/things").await,
            "default-src 'none'; frame-ancestors 'none'"
        );
    }

    #[tokio::test]
    async fn printable_routes_allow_inline_styles() {
        assert!(csp_for("/api/things/1/print").await.contains("style-src 'unsafe-inline'"));
    }
}
